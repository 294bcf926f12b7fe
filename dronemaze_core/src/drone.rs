//! Quadrotor glyph: body marker, four arms, and spinning cross rotors.
//!
//! Blade phase depends only on the frame number, never on wall-clock time,
//! so a re-render of the same log produces the same video.

use crate::scene::{FrameScene, MarkerShape, Primitive, Rgb};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Visual dimensions of a drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneStyle {
    /// Body marker area (square points)
    pub body_size: f64,

    /// Diagonal arm offset along both x and y (world units)
    pub arm_length: f64,

    /// Arm stroke width
    pub arm_width: f64,

    /// Full tip-to-tip blade length (world units)
    pub blade_length: f64,

    /// Rotor spin in radians per frame
    pub spin_speed: f64,

    /// Blade color, independent of the drone color
    pub blade_color: Rgb,

    pub blade_opacity: f64,

    pub blade_width: f64,
}

impl Default for DroneStyle {
    fn default() -> Self {
        Self {
            body_size: 30.0,
            arm_length: 0.3,
            arm_width: 1.5,
            blade_length: 0.4,
            spin_speed: 0.4,
            blade_color: Rgb::BLACK,
            blade_opacity: 0.9,
            blade_width: 1.0,
        }
    }
}

impl DroneStyle {
    /// Offsets of the four rotor hubs from the body, in the XY plane.
    pub fn rotor_offsets(&self) -> [Vector2<f64>; 4] {
        let a = self.arm_length;
        [
            Vector2::new(-a, -a),
            Vector2::new(a, -a),
            Vector2::new(-a, a),
            Vector2::new(a, a),
        ]
    }

    /// Blade angle at `frame`, wrapped into `[0, 2π)`.
    pub fn blade_angle(&self, frame: usize) -> f64 {
        (frame as f64 * self.spin_speed).rem_euclid(TAU)
    }

    /// Half-blade direction vectors for both blades at `frame`.
    ///
    /// The second blade is the first rotated by +90°.
    pub fn blade_half_vectors(&self, frame: usize) -> (Vector2<f64>, Vector2<f64>) {
        let half = self.blade_length / 2.0;
        let angle = self.blade_angle(frame);
        let first = Vector2::new(half * angle.cos(), half * angle.sin());
        let second = Vector2::new(-first.y, first.x);
        (first, second)
    }

    /// Draws one drone at `position` for animation frame `frame`.
    pub fn draw(&self, scene: &mut FrameScene, position: Vector3<f64>, color: Rgb, frame: usize) {
        scene.push(Primitive::Marker {
            at: position,
            shape: MarkerShape::Dot,
            color,
            size: self.body_size,
            edge: true,
        });

        let (blade1, blade2) = self.blade_half_vectors(frame);

        for offset in self.rotor_offsets() {
            let hub = position + Vector3::new(offset.x, offset.y, 0.0);

            scene.push(Primitive::Segment {
                from: position,
                to: hub,
                color,
                opacity: 1.0,
                width: self.arm_width,
            });

            for blade in [blade1, blade2] {
                let tip = Vector3::new(blade.x, blade.y, 0.0);
                scene.push(Primitive::Segment {
                    from: hub - tip,
                    to: hub + tip,
                    color: self.blade_color,
                    opacity: self.blade_opacity,
                    width: self.blade_width,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Bounds, CameraPose};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn empty_scene() -> FrameScene {
        let camera = CameraPose {
            view_name: "Front".into(),
            elevation: 0.0,
            azimuth: 0.0,
        };
        FrameScene::new(0, camera, Bounds::default())
    }

    #[test]
    fn test_primitive_counts() {
        let style = DroneStyle::default();
        let mut scene = empty_scene();
        style.draw(&mut scene, Vector3::new(5.0, 5.0, 2.0), Rgb(31, 119, 180), 7);

        // body + 4 arms + 4 × 2 blades
        assert_eq!(scene.len(), 1 + 4 + 8);
        assert!(matches!(
            scene.primitives()[0],
            Primitive::Marker { shape: MarkerShape::Dot, edge: true, .. }
        ));
    }

    #[test]
    fn test_arms_are_level_and_diagonal() {
        let style = DroneStyle::default();
        let mut scene = empty_scene();
        let body = Vector3::new(5.0, 5.0, 2.0);
        style.draw(&mut scene, body, Rgb(31, 119, 180), 0);

        let arms: Vec<_> = scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Segment { from, to, color, .. } if *color != Rgb::BLACK => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(arms.len(), 4);

        for (from, to) in arms {
            assert_eq!(from, body);
            assert_relative_eq!(to.z, body.z);
            assert_relative_eq!((to.x - body.x).abs(), 0.3, epsilon = 1e-12);
            assert_relative_eq!((to.y - body.y).abs(), 0.3, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_blade_color_is_fixed() {
        let style = DroneStyle::default();
        let mut scene = empty_scene();
        style.draw(&mut scene, Vector3::zeros(), Rgb(255, 0, 0), 3);

        let blades = scene
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Segment { color: Rgb::BLACK, .. }))
            .count();
        assert_eq!(blades, 8);
    }

    #[test]
    fn test_blade_angle_wraps() {
        let style = DroneStyle::default();
        assert_eq!(style.blade_angle(0), 0.0);
        assert_relative_eq!(style.blade_angle(5), 2.0, epsilon = 1e-12);
        // 16 × 0.4 = 6.4 rad, just past one turn
        assert_relative_eq!(style.blade_angle(16), 6.4 - TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_zero_blades_axis_aligned() {
        let style = DroneStyle::default();
        let (b1, b2) = style.blade_half_vectors(0);
        assert_relative_eq!(b1, Vector2::new(0.2, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b2, Vector2::new(0.0, 0.2), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_blades_perpendicular(frame in 0usize..100_000) {
            let style = DroneStyle::default();
            let (b1, b2) = style.blade_half_vectors(frame);
            prop_assert!(b1.dot(&b2).abs() < 1e-12);
            prop_assert!((b1.norm() - 0.2).abs() < 1e-12);
            prop_assert!((b2.norm() - 0.2).abs() < 1e-12);
            // +90° rotation, not -90°
            prop_assert!(b1.perp(&b2) > 0.0);
        }

        #[test]
        fn prop_blade_angle_in_range(frame in 0usize..1_000_000) {
            let angle = DroneStyle::default().blade_angle(frame);
            prop_assert!((0.0..TAU).contains(&angle));
        }
    }
}
