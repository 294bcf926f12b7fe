//! Frame orchestration: one fully redrawn [`FrameScene`] per sampled timestep.
//!
//! Per frame, in order:
//! 1. start from an empty scene (nothing carries over from the last frame)
//! 2. resolve the camera pose
//! 3. fix the viewport
//! 4. add the view label and frame counter
//! 5. draw the maze
//! 6. draw the goal markers
//! 7. per agent: extend the trail, draw it, draw the drone
//!
//! The trail history is the only state that lives across frames, and it is
//! owned here.

use crate::camera::CameraDirector;
use crate::config::VisualizerConfig;
use crate::error::{Result, VizError};
use crate::palette::assign_colors;
use crate::scene::{FrameScene, Label, MarkerShape, Primitive, Rgb};
use crate::trail::TrailHistory;
use crate::trajectory::Trajectory;

/// Summary of what a run will render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub timesteps: usize,
    pub agents: usize,
    pub stride: usize,
    pub frame_count: usize,
    pub frames_per_view: usize,
}

/// Composes frames for one animation run.
pub struct FrameComposer<'a> {
    trajectory: &'a Trajectory,
    config: &'a VisualizerConfig,
    camera: CameraDirector,
    colors: Vec<Rgb>,
    trails: TrailHistory,
    last_frame: Option<usize>,
}

impl<'a> FrameComposer<'a> {
    /// Creates a composer with empty trails.
    pub fn new(trajectory: &'a Trajectory, config: &'a VisualizerConfig) -> Result<Self> {
        config.validate()?;

        let camera = CameraDirector::new(
            config.views.clone(),
            trajectory.timesteps(),
            config.sway_amplitude,
        )?;

        Ok(Self {
            trajectory,
            config,
            camera,
            colors: assign_colors(&config.palette, trajectory.agents()),
            trails: TrailHistory::new(trajectory.agents()),
            last_frame: None,
        })
    }

    /// Timesteps that become frames: `0, stride, 2·stride, ...`.
    pub fn frame_indices(&self) -> impl Iterator<Item = usize> {
        (0..self.trajectory.timesteps()).step_by(self.config.frame_stride)
    }

    /// Run summary for logging.
    pub fn plan(&self) -> FramePlan {
        FramePlan {
            timesteps: self.trajectory.timesteps(),
            agents: self.trajectory.agents(),
            stride: self.config.frame_stride,
            frame_count: self.frame_indices().count(),
            frames_per_view: self.camera.frames_per_view(),
        }
    }

    /// Camera director for this run.
    pub fn camera(&self) -> &CameraDirector {
        &self.camera
    }

    /// Trails accumulated so far.
    pub fn trails(&self) -> &TrailHistory {
        &self.trails
    }

    /// Color of each agent.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Composes the scene for `frame` and extends every trail by one point.
    ///
    /// Frames must be requested in increasing order; the trail history is
    /// append-only.
    pub fn compose(&mut self, frame: usize) -> Result<FrameScene> {
        let timesteps = self.trajectory.timesteps();
        if frame >= timesteps {
            return Err(VizError::FrameOutOfRange { frame, timesteps });
        }
        if let Some(last) = self.last_frame {
            if frame <= last {
                return Err(VizError::config(format!(
                    "frame {} requested after frame {}",
                    frame, last
                )));
            }
        }

        let pose = self.camera.direction_for(frame);
        if self.last_frame.map(|f| self.camera.segment(f)) != Some(self.camera.segment(frame)) {
            tracing::debug!("Frame {}: camera enters {} view", frame, pose.view_name);
        }
        self.last_frame = Some(frame);

        let mut scene = FrameScene::new(frame, pose, self.config.bounds);

        if self.config.show_labels {
            scene.label(Label {
                text: format!("{} View", scene.camera.view_name),
                anchor: (0.05, 0.05),
                font_size: 12.0,
                centered: false,
                boxed: true,
            });
            scene.label(Label {
                text: format!("Frame {}/{}", frame, timesteps),
                anchor: (0.5, 0.02),
                font_size: 14.0,
                centered: true,
                boxed: false,
            });
        }

        self.config.maze.draw(&mut scene);

        for (goal, color) in self.trajectory.goals().iter().zip(&self.colors) {
            scene.push(Primitive::Marker {
                at: *goal,
                shape: MarkerShape::Cross,
                color: *color,
                size: self.config.goal_size,
                edge: true,
            });
        }

        for (agent, position) in self.trajectory.row(frame).iter().enumerate() {
            let color = self.colors[agent];
            self.trails.push(agent, *position);
            self.trails.draw(&mut scene, agent, color, self.config.trail_width);
            self.config.drone.draw(&mut scene, *position, color, frame);
        }

        Ok(scene)
    }
}
