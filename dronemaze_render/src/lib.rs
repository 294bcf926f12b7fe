//! DroneMaze Render - pixels and video for composed drone-maze frames
//!
//! Takes the per-frame display lists built by `dronemaze_core`, draws them
//! with a plotters 3D chart into an in-memory rgb24 buffer, and streams the
//! buffers to a video sink in frame order.
//!
//! ```text
//! FrameComposer ──► FrameScene ──► Rasterizer ──► [u8; W·H·3] ──► FrameSink
//!                                                                 ├─ FfmpegSink (.mp4, ...)
//!                                                                 ├─ GifSink    (.gif)
//!                                                                 └─ MemorySink (tests)
//! ```

pub mod error;
pub mod raster;
pub mod runner;
pub mod sink;

pub use error::{RenderError, Result};
pub use raster::Rasterizer;
pub use runner::{render_into, run, video_spec, RunSummary, FFMPEG};
pub use sink::{open_sink, FfmpegSink, FrameSink, GifSink, MemorySink, SinkSummary, VideoSpec};
