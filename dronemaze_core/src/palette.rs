//! Stable agent → color assignment.

use crate::scene::Rgb;

/// The ten Tableau categorical colors.
pub const TABLEAU: [Rgb; 10] = [
    Rgb(31, 119, 180),  // blue
    Rgb(255, 127, 14),  // orange
    Rgb(44, 160, 44),   // green
    Rgb(214, 39, 40),   // red
    Rgb(148, 103, 189), // purple
    Rgb(140, 86, 75),   // brown
    Rgb(227, 119, 194), // pink
    Rgb(127, 127, 127), // gray
    Rgb(188, 189, 34),  // olive
    Rgb(23, 190, 207),  // cyan
];

/// One color per agent, cycling through `palette` when there are more
/// agents than colors.
pub fn assign_colors(palette: &[Rgb], agents: usize) -> Vec<Rgb> {
    if palette.is_empty() {
        return vec![Rgb::BLACK; agents];
    }
    palette.iter().copied().cycle().take(agents).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_agents_than_colors() {
        let colors = assign_colors(&TABLEAU, 3);
        assert_eq!(colors, TABLEAU[..3].to_vec());
    }

    #[test]
    fn test_palette_cycles() {
        let colors = assign_colors(&TABLEAU, 23);
        assert_eq!(colors.len(), 23);
        for (i, color) in colors.iter().enumerate() {
            assert_eq!(*color, TABLEAU[i % TABLEAU.len()]);
        }
    }

    #[test]
    fn test_empty_palette_falls_back_to_black() {
        assert_eq!(assign_colors(&[], 2), vec![Rgb::BLACK, Rgb::BLACK]);
    }
}
