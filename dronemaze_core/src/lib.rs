//! DroneMaze Core - trajectory replay and scene composition
//!
//! Turns a precomputed multi-drone flight log into a sequence of display
//! lists, one per video frame. Nothing here touches pixels or files other
//! than the input table; rasterization and encoding live in
//! `dronemaze_render`.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────────────────────────────────┐
//! │  Trajectory  │─────►│               FrameComposer                  │
//! │  (T, N, 3)   │      │  ┌────────┐ ┌───────┐ ┌───────┐ ┌──────────┐ │
//! └──────────────┘      │  │ Camera │ │ Maze  │ │ Trail │ │  Drone   │ │
//!                       │  │Director│ │       │ │History│ │  Style   │ │
//!                       │  └────────┘ └───────┘ └───────┘ └──────────┘ │
//!                       └─────────────────────┬────────────────────────┘
//!                                             ▼
//!                                        FrameScene ──► rasterizer ──► video
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dronemaze_core::{FrameComposer, Trajectory, VisualizerConfig};
//!
//! let config = VisualizerConfig::default();
//! let trajectory = Trajectory::from_path(&config.input)?;
//! let mut composer = FrameComposer::new(&trajectory, &config)?;
//!
//! for frame in composer.frame_indices().collect::<Vec<_>>() {
//!     let scene = composer.compose(frame)?;
//!     // hand `scene` to a rasterizer
//! }
//! ```

pub mod camera;
pub mod config;
pub mod drone;
pub mod error;
pub mod frame;
pub mod maze;
pub mod palette;
pub mod scene;
pub mod trail;
pub mod trajectory;

pub use camera::{smoothstep, CameraDirector, ViewDescriptor};
pub use config::{SceneFile, VisualizerConfig};
pub use drone::DroneStyle;
pub use error::{Result, VizError};
pub use frame::{FrameComposer, FramePlan};
pub use maze::{Maze, Obstacle};
pub use palette::{assign_colors, TABLEAU};
pub use scene::{Bounds, CameraPose, FrameScene, Label, MarkerShape, Primitive, Rgb};
pub use trail::{segment_opacities, TrailHistory};
pub use trajectory::{Trajectory, TrajectoryRecord};
