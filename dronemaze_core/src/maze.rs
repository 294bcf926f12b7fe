//! Static maze obstacles rendered as translucent boxes.

use crate::scene::{FrameScene, Primitive, Rgb};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular footprint `(x1, y1, x2, y2)`.
///
/// Corners may be given in any order; `(3, 17, 6, 16)` and
/// `(3, 16, 6, 17)` describe the same wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Obstacle {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Footprint area in the XY plane.
    pub fn area(&self) -> f64 {
        ((self.x2 - self.x1) * (self.y2 - self.y1)).abs()
    }

    /// The six faces of the box spanning `floor..ceiling`:
    /// floor cap, ceiling cap, two walls at y1/y2, two walls at x1/x2.
    pub fn faces(&self, floor: f64, ceiling: f64) -> [[Vector3<f64>; 4]; 6] {
        let Obstacle { x1, y1, x2, y2 } = *self;
        let v = Vector3::<f64>::new;
        [
            [v(x1, y1, floor), v(x2, y1, floor), v(x2, y2, floor), v(x1, y2, floor)],
            [v(x1, y1, ceiling), v(x2, y1, ceiling), v(x2, y2, ceiling), v(x1, y2, ceiling)],
            [v(x1, y1, floor), v(x2, y1, floor), v(x2, y1, ceiling), v(x1, y1, ceiling)],
            [v(x1, y2, floor), v(x2, y2, floor), v(x2, y2, ceiling), v(x1, y2, ceiling)],
            [v(x1, y1, floor), v(x1, y2, floor), v(x1, y2, ceiling), v(x1, y1, ceiling)],
            [v(x2, y1, floor), v(x2, y2, floor), v(x2, y2, ceiling), v(x2, y1, ceiling)],
        ]
    }
}

/// The maze layout used when no scene file overrides it.
pub fn default_obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle::new(3.0, 3.0, 6.0, 4.0),
        Obstacle::new(3.0, 4.0, 4.0, 16.0),
        Obstacle::new(3.0, 17.0, 6.0, 16.0),
        Obstacle::new(8.0, 7.0, 12.0, 8.0),
        Obstacle::new(8.0, 13.0, 12.0, 12.0),
        Obstacle::new(11.0, 3.0, 12.0, 8.0),
        Obstacle::new(11.0, 17.0, 12.0, 12.0),
        Obstacle::new(10.0, 3.0, 17.0, 4.0),
        Obstacle::new(10.0, 17.0, 17.0, 16.0),
        Obstacle::new(14.0, 9.0, 16.0, 11.0),
        Obstacle::new(16.0, 7.0, 17.0, 13.0),
    ]
}

/// Shared look and vertical extent of every obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Maze {
    pub obstacles: Vec<Obstacle>,
    pub floor: f64,
    pub ceiling: f64,
    pub color: Rgb,
    pub opacity: f64,
}

impl Default for Maze {
    fn default() -> Self {
        Self {
            obstacles: default_obstacles(),
            floor: 0.0,
            ceiling: 6.0,
            color: Rgb::BURLYWOOD,
            opacity: 0.8,
        }
    }
}

impl Maze {
    /// Emits six translucent faces per obstacle.
    pub fn draw(&self, scene: &mut FrameScene) {
        for obstacle in &self.obstacles {
            for corners in obstacle.faces(self.floor, self.ceiling) {
                scene.push(Primitive::Quad {
                    corners,
                    color: self.color,
                    opacity: self.opacity,
                });
            }
        }
    }
}
