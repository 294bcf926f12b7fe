//! The render loop: compose → rasterize → sink, one frame at a time.

use crate::error::Result;
use crate::raster::Rasterizer;
use crate::sink::{open_sink, FrameSink, SinkSummary, VideoSpec};
use dronemaze_core::{FrameComposer, FramePlan, Trajectory, VisualizerConfig};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

/// Default encoder binary.
pub const FFMPEG: &str = "ffmpeg";

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub plan: FramePlan,
    pub sink: SinkSummary,
    pub elapsed_secs: f64,
}

/// Output geometry for `config`.
pub fn video_spec(config: &VisualizerConfig) -> VideoSpec {
    let (width, height) = config.resolution();
    VideoSpec {
        width,
        height,
        fps: config.fps,
    }
}

/// Renders every sampled frame of `trajectory` into `sink` and finishes it.
///
/// Frames reach the sink strictly in timestep order. The sink is finished
/// exactly once, after the last frame; on error it is left unfinished and
/// the partial output should be discarded.
pub fn render_into(
    trajectory: &Trajectory,
    config: &VisualizerConfig,
    sink: &mut dyn FrameSink,
) -> Result<RunSummary> {
    let started = Instant::now();
    let mut composer = FrameComposer::new(trajectory, config)?;
    let plan = composer.plan();

    tracing::info!(
        "Rendering {} frames (stride {}, {} frames per view, {} agents)",
        plan.frame_count,
        plan.stride,
        plan.frames_per_view,
        plan.agents
    );

    let spec = video_spec(config);
    let raster = Rasterizer::new(spec.width, spec.height, config.dpi);
    let mut buf = vec![0u8; raster.frame_len()];

    let frames: Vec<usize> = composer.frame_indices().collect();
    for (i, frame) in frames.into_iter().enumerate() {
        let scene = composer.compose(frame)?;
        raster.render(&scene, &mut buf)?;
        sink.push_frame(&buf)?;

        if i % 25 == 0 {
            tracing::debug!("  frame {}/{} | primitives={}", frame, plan.timesteps, scene.len());
        }
    }

    let summary = sink.finish()?;
    let elapsed_secs = started.elapsed().as_secs_f64();

    tracing::info!("Wrote {} frames in {:.1}s", summary.frames, elapsed_secs);

    Ok(RunSummary {
        plan,
        sink: summary,
        elapsed_secs,
    })
}

/// Loads the configured trajectory and renders it to the configured output.
///
/// If rendering fails after the sink was opened, the partial output file is
/// removed.
pub fn run(config: &VisualizerConfig, ffmpeg: &str) -> Result<RunSummary> {
    config.validate()?;
    let trajectory = Trajectory::from_path(&config.input)?;
    let mut sink = open_sink(&config.output, video_spec(config), ffmpeg)?;

    let result = render_into(&trajectory, config, sink.as_mut());
    if result.is_err() {
        // Stop the encoder before deleting what it wrote
        drop(sink);
        discard_partial(&config.output);
    }
    result
}

fn discard_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::warn!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}
