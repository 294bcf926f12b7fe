//! Camera director: frame number → viewpoint.
//!
//! The run is split into `K` equal segments, one per named view. Within a
//! segment the camera eases from that view towards the next one, and a
//! small sinusoidal sway is layered on top:
//!
//! ```text
//! frame ──► segment, progress ──► smoothstep(progress) ──► lerp(view[s], view[s+1])
//!                     │                                           │
//!                     └──────────► sin(4π·progress) × amplitude ──┴──► pose
//! ```
//!
//! From the last segment on, the final view is held (sway still applies).

use crate::error::{Result, VizError};
use crate::scene::CameraPose;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A named camera angle, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub name: String,
    pub elevation: f64,
    pub azimuth: f64,
}

impl ViewDescriptor {
    pub fn new(name: &str, elevation: f64, azimuth: f64) -> Self {
        Self {
            name: name.to_string(),
            elevation,
            azimuth,
        }
    }
}

/// The view tour used when no scene file overrides it.
pub fn default_views() -> Vec<ViewDescriptor> {
    vec![
        ViewDescriptor::new("Top", 90.0, 0.0),
        ViewDescriptor::new("Bottom", -90.0, 0.0),
        ViewDescriptor::new("Front", 0.0, 0.0),
    ]
}

/// Cubic ease with zero slope at both ends: `3t² − 2t³`.
pub fn smoothstep(t: f64) -> f64 {
    3.0 * t * t - 2.0 * t * t * t
}

/// Maps frame numbers to camera poses for one run.
#[derive(Debug, Clone)]
pub struct CameraDirector {
    views: Vec<ViewDescriptor>,
    frames_per_view: usize,
    sway_amplitude: f64,
}

impl CameraDirector {
    /// Creates a director for a log of `timesteps` timesteps.
    ///
    /// `frames_per_view` is `timesteps / views.len()`, floored, and never
    /// less than one.
    pub fn new(views: Vec<ViewDescriptor>, timesteps: usize, sway_amplitude: f64) -> Result<Self> {
        if views.is_empty() {
            return Err(VizError::config("view sequence is empty"));
        }
        if timesteps == 0 {
            return Err(VizError::EmptyTrajectory);
        }

        let frames_per_view = (timesteps / views.len()).max(1);

        Ok(Self {
            views,
            frames_per_view,
            sway_amplitude,
        })
    }

    /// Frames allotted to each view segment.
    pub fn frames_per_view(&self) -> usize {
        self.frames_per_view
    }

    /// The view sequence.
    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    /// Index of the segment containing `frame`, clamped to the last view.
    pub fn segment(&self, frame: usize) -> usize {
        (frame / self.frames_per_view).min(self.views.len() - 1)
    }

    /// Sway offset in degrees; one full oscillation per segment.
    pub fn sway(&self, frame: usize) -> f64 {
        let t_local = (frame % self.frames_per_view) as f64 / self.frames_per_view as f64;
        (4.0 * PI * t_local).sin() * self.sway_amplitude
    }

    /// Eased base direction `(elevation, azimuth)` without sway.
    pub fn base_direction(&self, frame: usize) -> (f64, f64) {
        let segment = frame / self.frames_per_view;
        let last = self.views.len() - 1;

        if segment >= last {
            let view = &self.views[last];
            return (view.elevation, view.azimuth);
        }

        let from = &self.views[segment];
        let to = &self.views[segment + 1];
        let t = (frame % self.frames_per_view) as f64 / self.frames_per_view as f64;
        let w = smoothstep(t);

        (
            from.elevation * (1.0 - w) + to.elevation * w,
            from.azimuth * (1.0 - w) + to.azimuth * w,
        )
    }

    /// Camera pose for `frame`.
    pub fn direction_for(&self, frame: usize) -> CameraPose {
        let (elevation, azimuth) = self.base_direction(frame);
        let sway = self.sway(frame);

        CameraPose {
            view_name: self.views[self.segment(frame)].name.clone(),
            elevation: elevation + sway,
            azimuth: azimuth + sway,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn director(timesteps: usize) -> CameraDirector {
        CameraDirector::new(default_views(), timesteps, 8.0).unwrap()
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_relative_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_frames_per_view() {
        assert_eq!(director(300).frames_per_view(), 100);
        assert_eq!(director(301).frames_per_view(), 100);
        // Fewer timesteps than views still yields a usable segment length
        assert_eq!(director(2).frames_per_view(), 1);
    }

    #[test]
    fn test_zero_timesteps_rejected() {
        assert!(matches!(
            CameraDirector::new(default_views(), 0, 8.0),
            Err(VizError::EmptyTrajectory)
        ));
    }

    #[test]
    fn test_empty_views_rejected() {
        assert!(matches!(
            CameraDirector::new(Vec::new(), 100, 8.0),
            Err(VizError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_segment_start_is_exact_view() {
        let cam = director(300);
        let pose = cam.direction_for(0);
        assert_eq!(pose.view_name, "Top");
        assert_eq!(pose.elevation, 90.0);
        assert_eq!(pose.azimuth, 0.0);

        let pose = cam.direction_for(100);
        assert_eq!(pose.view_name, "Bottom");
        assert_eq!(pose.elevation, -90.0);
        assert_eq!(pose.azimuth, 0.0);
    }

    #[test]
    fn test_midpoint_of_first_segment() {
        let cam = director(300);
        let (elev, azim) = cam.base_direction(50);
        assert_relative_eq!(elev, 0.0, epsilon = 1e-12);
        assert_relative_eq!(azim, 0.0, epsilon = 1e-12);

        // sin(2π) is zero up to rounding
        let pose = cam.direction_for(50);
        assert_relative_eq!(pose.elevation, 0.0, epsilon = 1e-9);
        assert_eq!(pose.view_name, "Top");
    }

    #[test]
    fn test_last_segment_holds() {
        let cam = director(300);
        for frame in [200, 250, 299, 300, 10_000] {
            assert_eq!(cam.base_direction(frame), (0.0, 0.0));
            let pose = cam.direction_for(frame);
            assert_eq!(pose.view_name, "Front");
            assert_relative_eq!(pose.elevation, cam.sway(frame), epsilon = 1e-12);
            assert_relative_eq!(pose.azimuth, cam.sway(frame), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sway_restarts_each_segment() {
        let cam = director(300);
        assert_relative_eq!(cam.sway(12), (4.0 * PI * 0.12).sin() * 8.0, epsilon = 1e-12);
        assert_relative_eq!(cam.sway(25), 0.0, epsilon = 1e-9);
        assert_relative_eq!(cam.sway(137), (4.0 * PI * 0.37).sin() * 8.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_direction_is_continuous(frame in 1usize..299) {
            let cam = director(300);
            let a = cam.direction_for(frame - 1);
            let b = cam.direction_for(frame);
            // Largest step: 180° view swing eased over 100 frames plus sway slope
            prop_assert!((a.elevation - b.elevation).abs() < 4.0);
            prop_assert!((a.azimuth - b.azimuth).abs() < 4.0);
        }

        #[test]
        fn prop_final_segment_never_advances(extra in 0usize..100_000) {
            let cam = director(300);
            let frame = 200 + extra;
            prop_assert_eq!(cam.base_direction(frame), (0.0, 0.0));
            prop_assert_eq!(cam.segment(frame), 2);
        }
    }
}
