//! Rasterizes a [`FrameScene`] into an rgb24 buffer with plotters.
//!
//! World `(x, y, z)` maps to chart `(x, z, y)` since plotters' 3D charts
//! are y-up. Axes are never configured, so no axis chrome is drawn.

use crate::error::{RenderError, Result};
use dronemaze_core::{FrameScene, Label, MarkerShape, Primitive, Rgb};
use nalgebra::Vector3;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Fraction of the plot area the projected viewport fills.
const CHART_SCALE: f64 = 0.85;

/// Turns composed scenes into pixels at a fixed resolution.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    /// Pixels per typographic point
    px_per_pt: f64,
}

fn to_chart(v: &Vector3<f64>) -> (f64, f64, f64) {
    (v.x, v.z, v.y)
}

/// Camera elevation/azimuth (degrees) → plotters `(pitch, yaw)` (radians).
///
/// Azimuth 0 looks along -x with +y to the right and positive elevation
/// looks down on the maze. Plotters' yaw 0 looks along the chart z axis
/// (world y) and positive pitch looks from below, hence the offset and
/// both sign flips.
fn view_angles(elevation: f64, azimuth: f64) -> (f64, f64) {
    (-elevation.to_radians(), -(azimuth + 90.0).to_radians())
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Marker area in square points → radius in pixels.
fn marker_radius(size: f64, px_per_pt: f64) -> i32 {
    ((size.sqrt() / 2.0) * px_per_pt).round().max(1.0) as i32
}

impl Rasterizer {
    /// Creates a rasterizer for `width` × `height` pixels at `dpi`.
    pub fn new(width: u32, height: u32, dpi: u32) -> Self {
        Self {
            width,
            height,
            px_per_pt: dpi as f64 / 72.0,
        }
    }

    /// Bytes in one rgb24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Draws `scene` into `buf`, overwriting whatever was there.
    pub fn render(&self, scene: &FrameScene, buf: &mut [u8]) -> Result<()> {
        if buf.len() != self.frame_len() {
            return Err(RenderError::FrameSize {
                expected: self.frame_len(),
                actual: buf.len(),
            });
        }

        let root = BitMapBackend::with_buffer(buf, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::draw)?;

        let b = scene.bounds;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_3d(b.x.0..b.x.1, b.z.0..b.z.1, b.y.0..b.y.1)
            .map_err(RenderError::draw)?;

        let (pitch, yaw) = view_angles(scene.camera.elevation, scene.camera.azimuth);
        chart.with_projection(|mut pb| {
            pb.pitch = pitch;
            pb.yaw = yaw;
            pb.scale = CHART_SCALE;
            pb.into_matrix()
        });

        for primitive in scene.primitives() {
            match primitive {
                Primitive::Quad { corners, color: c, opacity } => {
                    let points: Vec<_> = corners.iter().map(to_chart).collect();
                    chart
                        .draw_series(std::iter::once(Polygon::new(
                            points,
                            color(*c).mix(*opacity).filled(),
                        )))
                        .map_err(RenderError::draw)?;
                }
                Primitive::Segment { from, to, color: c, opacity, width } => {
                    let stroke = (width * self.px_per_pt).round().max(1.0) as u32;
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![to_chart(from), to_chart(to)],
                            color(*c).mix(*opacity).stroke_width(stroke),
                        )))
                        .map_err(RenderError::draw)?;
                }
                Primitive::Marker { at, shape, color: c, size, edge } => {
                    let at = to_chart(at);
                    let r = marker_radius(*size, self.px_per_pt);
                    match shape {
                        MarkerShape::Dot => {
                            chart
                                .draw_series(std::iter::once(Circle::new(at, r, color(*c).filled())))
                                .map_err(RenderError::draw)?;
                            if *edge {
                                chart
                                    .draw_series(std::iter::once(Circle::new(at, r, BLACK.stroke_width(1))))
                                    .map_err(RenderError::draw)?;
                            }
                        }
                        MarkerShape::Cross => {
                            if *edge {
                                chart
                                    .draw_series(std::iter::once(Cross::new(at, r + 1, BLACK.stroke_width(4))))
                                    .map_err(RenderError::draw)?;
                            }
                            chart
                                .draw_series(std::iter::once(Cross::new(at, r, color(*c).stroke_width(2))))
                                .map_err(RenderError::draw)?;
                        }
                    }
                }
            }
        }

        for label in &scene.labels {
            self.draw_label(&root, label)?;
        }

        root.present().map_err(RenderError::draw)?;
        Ok(())
    }

    fn draw_label(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>, label: &Label) -> Result<()> {
        let px = (label.font_size * self.px_per_pt).round().max(1.0);
        let h_pos = if label.centered { HPos::Center } else { HPos::Left };
        let style = TextStyle::from(("sans-serif", px).into_font())
            .color(&BLACK)
            .pos(Pos::new(h_pos, VPos::Top));
        let x = (label.anchor.0 * self.width as f64).round() as i32;
        let y = (label.anchor.1 * self.height as f64).round() as i32;

        if label.boxed {
            let (w, h) = root
                .estimate_text_size(&label.text, &style)
                .map_err(RenderError::draw)?;
            let (w, h) = (w as i32, h as i32);
            let x0 = if label.centered { x - w / 2 } else { x };
            let pad = 4;
            let corners = [(x0 - pad, y - pad), (x0 + w + pad, y + h + pad)];
            root.draw(&Rectangle::new(corners, WHITE.filled()))
                .map_err(RenderError::draw)?;
            root.draw(&Rectangle::new(corners, RGBColor(128, 128, 128).stroke_width(1)))
                .map_err(RenderError::draw)?;
        }

        root.draw(&Text::new(label.text.as_str(), (x, y), style))
            .map_err(RenderError::draw)?;
        Ok(())
    }
}
