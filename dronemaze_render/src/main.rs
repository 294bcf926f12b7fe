//! DroneMaze CLI
//!
//! Replay a multi-drone trajectory log through the maze and export a video.

use anyhow::Context;
use clap::Parser;
use dronemaze_core::VisualizerConfig;
use dronemaze_render::{run, FFMPEG};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Render a 3D maze flyover of a precomputed drone trajectory log
#[derive(Parser, Debug)]
#[command(name = "dronemaze")]
#[command(about = "Render drone trajectories through a maze to video", long_about = None)]
struct Args {
    /// Trajectory CSV with columns timestep,agent_id,x,y,z
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output video (.mp4 via ffmpeg, .gif written directly)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding obstacles, views, sway or drone style
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Render every n-th timestep
    #[arg(long)]
    stride: Option<usize>,

    /// Output frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Output pixel density (figure is 12x8 inches)
    #[arg(long)]
    dpi: Option<u32>,

    /// Skip the view name and frame counter
    #[arg(long)]
    no_labels: bool,

    /// ffmpeg binary to encode with
    #[arg(long, default_value = FFMPEG)]
    ffmpeg: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(args: &Args) -> anyhow::Result<VisualizerConfig> {
    let mut config = VisualizerConfig::default();

    if let Some(scene) = &args.scene {
        config
            .load_scene_file(scene)
            .with_context(|| format!("loading scene file {}", scene.display()))?;
    }
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(stride) = args.stride {
        config.frame_stride = stride;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    config.show_labels = !args.no_labels;

    config.validate()?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let result = build_config(&args).and_then(|config| {
        info!("DroneMaze v{}", env!("CARGO_PKG_VERSION"));
        info!("  input:  {}", config.input.display());
        info!("  output: {}", config.output.display());

        run(&config, &args.ffmpeg)
            .with_context(|| format!("rendering {}", config.input.display()))
    });

    match result {
        Ok(summary) => {
            let path = summary
                .sink
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            info!(
                "✓ {} frames ({} agents, {} timesteps) -> {}",
                summary.sink.frames, summary.plan.agents, summary.plan.timesteps, path
            );
        }
        Err(e) => {
            error!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}
