//! Per-agent motion trails with a comet-tail fade.

use crate::scene::{FrameScene, Primitive, Rgb};
use nalgebra::Vector3;

/// Opacity of each segment of a trail holding `len` points.
///
/// Segment `j` (1-based, joining points `j-1` and `j`) gets `j / len`,
/// so the newest segment ends just below full opacity.
pub fn segment_opacities(len: usize) -> impl Iterator<Item = f64> {
    (1..len).map(move |j| j as f64 / len as f64)
}

/// Visited positions of every agent, oldest first.
///
/// Append-only and scoped to a single animation run.
#[derive(Debug, Clone)]
pub struct TrailHistory {
    trails: Vec<Vec<Vector3<f64>>>,
}

impl TrailHistory {
    /// Creates empty trails for `agents` agents.
    pub fn new(agents: usize) -> Self {
        Self {
            trails: vec![Vec::new(); agents],
        }
    }

    /// Number of tracked agents.
    pub fn agents(&self) -> usize {
        self.trails.len()
    }

    /// Records the agent's position for the current frame.
    pub fn push(&mut self, agent: usize, position: Vector3<f64>) {
        self.trails[agent].push(position);
    }

    /// Full trail of one agent.
    pub fn trail(&self, agent: usize) -> &[Vector3<f64>] {
        &self.trails[agent]
    }

    /// Draws the agent's trail as fading segments. Trails shorter than two
    /// points draw nothing.
    pub fn draw(&self, scene: &mut FrameScene, agent: usize, color: Rgb, width: f64) {
        let trail = self.trail(agent);
        for (pair, opacity) in trail.windows(2).zip(segment_opacities(trail.len())) {
            scene.push(Primitive::Segment {
                from: pair[0],
                to: pair[1],
                color,
                opacity,
                width,
            });
        }
    }
}
