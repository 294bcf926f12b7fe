//! Run configuration.
//!
//! Everything is fixed at startup: the defaults reproduce the reference
//! maze run, the CLI can override file paths and output timing, and a
//! JSON scene file can swap the obstacle layout and the view tour.

use crate::camera::{default_views, ViewDescriptor};
use crate::drone::DroneStyle;
use crate::error::{Result, VizError};
use crate::maze::{Maze, Obstacle};
use crate::palette::TABLEAU;
use crate::scene::{Bounds, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a rendering run.
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Trajectory table (CSV)
    pub input: PathBuf,

    /// Video file to write; `.gif` selects the GIF writer
    pub output: PathBuf,

    /// Obstacle layout and look
    pub maze: Maze,

    /// Drone glyph dimensions
    pub drone: DroneStyle,

    /// Named camera tour
    pub views: Vec<ViewDescriptor>,

    /// Peak camera sway in degrees
    pub sway_amplitude: f64,

    /// Viewport
    pub bounds: Bounds,

    /// Render every n-th timestep
    pub frame_stride: usize,

    /// Output frame rate
    pub fps: u32,

    /// Pixels per inch of the figure
    pub dpi: u32,

    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),

    /// Trail stroke width
    pub trail_width: f64,

    /// Goal marker area (square points)
    pub goal_size: f64,

    /// Draw view name and frame counter
    pub show_labels: bool,

    /// Agent colors, cycled
    pub palette: Vec<Rgb>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("traj_eval_Ours.csv"),
            output: PathBuf::from("drone_6view_transition.mp4"),
            maze: Maze::default(),
            drone: DroneStyle::default(),
            views: default_views(),
            sway_amplitude: 8.0,
            bounds: Bounds::default(),
            frame_stride: 2,
            fps: 5,
            dpi: 80,
            figure_size: (12.0, 8.0),
            trail_width: 1.5,
            goal_size: 50.0,
            show_labels: true,
            palette: TABLEAU.to_vec(),
        }
    }
}

/// Optional scene overrides read from JSON.
///
/// ```json
/// {
///   "obstacles": [{"x1": 3, "y1": 3, "x2": 6, "y2": 4}],
///   "views": [{"name": "Top", "elevation": 90, "azimuth": 0}],
///   "sway_amplitude": 5.0
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    pub obstacles: Option<Vec<Obstacle>>,
    pub views: Option<Vec<ViewDescriptor>>,
    pub sway_amplitude: Option<f64>,
    pub drone: Option<DroneStyle>,
}

impl VisualizerConfig {
    /// Output resolution in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = self.dpi as f64;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Applies overrides from a parsed scene file.
    pub fn apply_scene(&mut self, scene: SceneFile) {
        if let Some(obstacles) = scene.obstacles {
            self.maze.obstacles = obstacles;
        }
        if let Some(views) = scene.views {
            self.views = views;
        }
        if let Some(amplitude) = scene.sway_amplitude {
            self.sway_amplitude = amplitude;
        }
        if let Some(drone) = scene.drone {
            self.drone = drone;
        }
    }

    /// Reads a JSON scene file and applies it.
    pub fn load_scene_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene: SceneFile = serde_json::from_str(&text)?;
        tracing::info!("Applied scene overrides from {}", path.display());
        self.apply_scene(scene);
        Ok(())
    }

    /// Rejects settings that would make the run ill-defined.
    pub fn validate(&self) -> Result<()> {
        if self.frame_stride == 0 {
            return Err(VizError::config("frame stride must be at least 1"));
        }
        if self.fps == 0 {
            return Err(VizError::config("fps must be at least 1"));
        }
        if self.dpi == 0 {
            return Err(VizError::config("dpi must be at least 1"));
        }
        let (w, h) = self.resolution();
        if w == 0 || h == 0 {
            return Err(VizError::config(format!("figure resolves to {}x{} pixels", w, h)));
        }
        if self.views.is_empty() {
            return Err(VizError::config("view sequence is empty"));
        }
        if self.maze.ceiling <= self.maze.floor {
            return Err(VizError::config(format!(
                "obstacle span {}..{} is empty",
                self.maze.floor, self.maze.ceiling
            )));
        }
        if let Some(bad) = self.maze.obstacles.iter().find(|o| o.area() == 0.0) {
            return Err(VizError::config(format!("obstacle {:?} has no footprint", bad)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.resolution(), (960, 640));
        assert_eq!(config.frame_stride, 2);
        assert_eq!(config.fps, 5);
        assert_eq!(config.maze.obstacles.len(), 11);
        assert_eq!(config.views.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let config = VisualizerConfig {
            frame_stride: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(VizError::InvalidConfig(_))));
    }

    #[test]
    fn test_degenerate_obstacle_rejected() {
        let mut config = VisualizerConfig::default();
        config.maze.obstacles.push(Obstacle::new(2.0, 2.0, 2.0, 9.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_span_rejected() {
        let mut config = VisualizerConfig::default();
        config.maze.ceiling = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scene_overrides() {
        let json = r#"{
            "obstacles": [{"x1": 1, "y1": 1, "x2": 2, "y2": 3}],
            "views": [{"name": "Left", "elevation": 0, "azimuth": 90}],
            "sway_amplitude": 2.5
        }"#;
        let scene: SceneFile = serde_json::from_str(json).unwrap();

        let mut config = VisualizerConfig::default();
        config.apply_scene(scene);

        assert_eq!(config.maze.obstacles, vec![Obstacle::new(1.0, 1.0, 2.0, 3.0)]);
        assert_eq!(config.views, vec![ViewDescriptor::new("Left", 0.0, 90.0)]);
        assert_eq!(config.sway_amplitude, 2.5);
        // Untouched keys keep their defaults
        assert_eq!(config.drone, DroneStyle::default());
    }

    #[test]
    fn test_partial_drone_override() {
        let scene: SceneFile = serde_json::from_str(r#"{"drone": {"spin_speed": 1.0}}"#).unwrap();
        let mut config = VisualizerConfig::default();
        config.apply_scene(scene);

        assert_eq!(config.drone.spin_speed, 1.0);
        assert_eq!(config.drone.arm_length, 0.3);
    }

    #[test]
    fn test_unknown_scene_key_rejected() {
        assert!(serde_json::from_str::<SceneFile>(r#"{"obstacle": []}"#).is_err());
    }

    #[test]
    fn test_missing_scene_file() {
        let mut config = VisualizerConfig::default();
        assert!(matches!(
            config.load_scene_file("/no/such/scene.json"),
            Err(VizError::Io(_))
        ));
    }
}
