//! Display list emitted by the scene, drone and trail renderers.
//!
//! Renderers never touch pixels. They push [`Primitive`]s into a
//! [`FrameScene`], and a rasterizer (see `dronemaze_render`) turns the
//! finished scene into an image. A new `FrameScene` is built for every
//! frame, which is what "clearing the surface" means here.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BURLYWOOD: Rgb = Rgb(222, 184, 135);
}

/// Marker glyph for point-like primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled disc (drone body)
    Dot,
    /// Diagonal cross (goal)
    Cross,
}

/// One drawable element, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Planar four-cornered face
    Quad {
        corners: [Vector3<f64>; 4],
        color: Rgb,
        opacity: f64,
    },

    /// Straight line between two points
    Segment {
        from: Vector3<f64>,
        to: Vector3<f64>,
        color: Rgb,
        opacity: f64,
        width: f64,
    },

    /// Screen-sized marker anchored at a world point
    Marker {
        at: Vector3<f64>,
        shape: MarkerShape,
        color: Rgb,
        /// Marker area in square points, like a scatter plot's `s`
        size: f64,
        /// Draw a black outline around the glyph
        edge: bool,
    },
}

/// Text anchored in normalized screen space ([0,1] × [0,1], origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: (f64, f64),
    pub font_size: f64,
    /// Anchor is the top-center of the text instead of its top-left
    pub centered: bool,
    /// Draw on a white box with a gray border
    pub boxed: bool,
}

/// Camera orientation for one frame, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    /// Name of the view the current segment started from
    pub view_name: String,

    /// Elevation above the XY plane (90 = looking straight down)
    pub elevation: f64,

    /// Azimuth around the vertical axis
    pub azimuth: f64,
}

/// Fixed axis-aligned viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: (0.0, 20.0),
            y: (0.0, 20.0),
            z: (0.0, 6.0),
        }
    }
}

/// Everything needed to rasterize one frame.
#[derive(Debug, Clone)]
pub struct FrameScene {
    /// Frame number (a timestep index)
    pub frame: usize,

    /// Camera orientation
    pub camera: CameraPose,

    /// Viewport, constant across frames
    pub bounds: Bounds,

    /// Screen-space text
    pub labels: Vec<Label>,

    /// World-space primitives in draw order
    primitives: Vec<Primitive>,
}

impl FrameScene {
    /// Creates an empty scene for `frame`.
    pub fn new(frame: usize, camera: CameraPose, bounds: Bounds) -> Self {
        Self {
            frame,
            camera,
            bounds,
            labels: Vec::new(),
            primitives: Vec::new(),
        }
    }

    /// Appends a primitive; later primitives draw on top.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Appends a label.
    pub fn label(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Primitives in draw order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraPose {
        CameraPose {
            view_name: "Top".to_string(),
            elevation: 90.0,
            azimuth: 0.0,
        }
    }

    #[test]
    fn test_new_scene_is_empty() {
        let scene = FrameScene::new(3, pose(), Bounds::default());
        assert!(scene.is_empty());
        assert!(scene.labels.is_empty());
        assert_eq!(scene.frame, 3);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut scene = FrameScene::new(0, pose(), Bounds::default());
        let a = Primitive::Marker {
            at: Vector3::zeros(),
            shape: MarkerShape::Dot,
            color: Rgb::BLACK,
            size: 1.0,
            edge: false,
        };
        let b = Primitive::Marker {
            at: Vector3::new(1.0, 1.0, 1.0),
            shape: MarkerShape::Cross,
            color: Rgb::WHITE,
            size: 2.0,
            edge: true,
        };
        scene.push(a.clone());
        scene.push(b.clone());

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.primitives()[0], a);
        assert_eq!(scene.primitives()[1], b);
    }

    #[test]
    fn test_default_bounds() {
        let b = Bounds::default();
        assert_eq!(b.x, (0.0, 20.0));
        assert_eq!(b.y, (0.0, 20.0));
        assert_eq!(b.z, (0.0, 6.0));
    }
}
