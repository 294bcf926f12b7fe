//! Video sinks: ordered consumers of raw RGB frames.
//!
//! A sink accepts frames strictly in order through [`FrameSink::push_frame`]
//! and is finalized exactly once with [`FrameSink::finish`].

use crate::error::{RenderError, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Frame geometry and timing shared by every sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSpec {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl VideoSpec {
    /// Bytes in one rgb24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    fn check(&self, rgb: &[u8]) -> Result<()> {
        if rgb.len() != self.frame_len() {
            return Err(RenderError::FrameSize {
                expected: self.frame_len(),
                actual: rgb.len(),
            });
        }
        Ok(())
    }
}

/// What a sink produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSummary {
    /// Frames written
    pub frames: usize,

    /// Output file, if the sink writes one
    pub path: Option<PathBuf>,
}

/// Ordered consumer of composed frames.
pub trait FrameSink {
    /// Hands off one rgb24 frame. Frames are consumed in call order.
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()>;

    /// Flushes and closes the output. Later calls fail with `SinkClosed`.
    fn finish(&mut self) -> Result<SinkSummary>;
}

/// Opens the sink matching the output extension: `.gif` uses the GIF
/// writer, anything else is piped through ffmpeg.
pub fn open_sink(path: &Path, spec: VideoSpec, ffmpeg: &str) -> Result<Box<dyn FrameSink>> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gif"))
        .unwrap_or(false);

    if is_gif {
        Ok(Box::new(GifSink::create(path, spec)?))
    } else {
        Ok(Box::new(FfmpegSink::spawn(ffmpeg, path, spec)?))
    }
}

// =============================================================================
// FFMPEG
// =============================================================================

/// Streams raw frames into an `ffmpeg` child process.
pub struct FfmpegSink {
    spec: VideoSpec,
    path: PathBuf,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frames: usize,
}

impl FfmpegSink {
    /// Starts `program` reading rgb24 from stdin and writing H.264 to `path`.
    pub fn spawn(program: &str, path: &Path, spec: VideoSpec) -> Result<Self> {
        let size = format!("{}x{}", spec.width, spec.height);
        let fps = spec.fps.to_string();

        let mut child = Command::new(program)
            .args(["-y", "-loglevel", "error", "-nostats"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", size.as_str(), "-r", fps.as_str()])
            .args(["-i", "-"])
            .args(["-an", "-vcodec", "libx264", "-pix_fmt", "yuv420p"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::EncoderUnavailable {
                program: program.to_string(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| RenderError::EncoderFailed("encoder stdin not captured".into()))?;

        tracing::info!("Encoding {} @ {} fps to {}", size, spec.fps, path.display());

        Ok(Self {
            spec,
            path: path.to_path_buf(),
            child: Some(child),
            stdin: Some(stdin),
            frames: 0,
        })
    }
}

impl FrameSink for FfmpegSink {
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()> {
        self.spec.check(rgb)?;
        let stdin = self.stdin.as_mut().ok_or(RenderError::SinkClosed)?;
        stdin
            .write_all(rgb)
            .map_err(|e| RenderError::EncoderFailed(format!("frame {}: {}", self.frames, e)))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary> {
        // Closing stdin signals end of stream
        drop(self.stdin.take());
        let child = self.child.take().ok_or(RenderError::SinkClosed)?;
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::EncoderFailed(format!(
                "{} ({})",
                output.status,
                stderr.trim()
            )));
        }

        Ok(SinkSummary {
            frames: self.frames,
            path: Some(self.path.clone()),
        })
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // Abandoned run: don't leave the encoder waiting on stdin
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

// =============================================================================
// GIF
// =============================================================================

/// Writes an endlessly looping animated GIF.
pub struct GifSink {
    spec: VideoSpec,
    path: PathBuf,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    delay: Delay,
    frames: usize,
}

impl GifSink {
    /// Creates (or truncates) the GIF at `path`.
    pub fn create(path: &Path, spec: VideoSpec) -> Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite)?;

        tracing::info!("Writing GIF {}x{} @ {} fps to {}", spec.width, spec.height, spec.fps, path.display());

        Ok(Self {
            spec,
            path: path.to_path_buf(),
            encoder: Some(encoder),
            delay: Delay::from_numer_denom_ms(1000, spec.fps.max(1)),
            frames: 0,
        })
    }
}

impl FrameSink for GifSink {
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()> {
        self.spec.check(rgb)?;
        let encoder = self.encoder.as_mut().ok_or(RenderError::SinkClosed)?;

        let image = RgbImage::from_raw(self.spec.width, self.spec.height, rgb.to_vec()).ok_or(
            RenderError::FrameSize {
                expected: self.spec.frame_len(),
                actual: rgb.len(),
            },
        )?;
        let rgba = DynamicImage::ImageRgb8(image).to_rgba8();

        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary> {
        // Dropping the encoder writes the GIF trailer
        let encoder = self.encoder.take().ok_or(RenderError::SinkClosed)?;
        drop(encoder);

        Ok(SinkSummary {
            frames: self.frames,
            path: Some(self.path.clone()),
        })
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Keeps every frame in memory. Used by tests and previews.
#[derive(Debug)]
pub struct MemorySink {
    spec: VideoSpec,
    frames: Vec<Vec<u8>>,
    finish_calls: usize,
}

impl MemorySink {
    pub fn new(spec: VideoSpec) -> Self {
        Self {
            spec,
            frames: Vec::new(),
            finish_calls: 0,
        }
    }

    /// Frames received so far, in order.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// How many times `finish` was called.
    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }
}

impl FrameSink for MemorySink {
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()> {
        if self.finish_calls > 0 {
            return Err(RenderError::SinkClosed);
        }
        self.spec.check(rgb)?;
        self.frames.push(rgb.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary> {
        self.finish_calls += 1;
        if self.finish_calls > 1 {
            return Err(RenderError::SinkClosed);
        }
        Ok(SinkSummary {
            frames: self.frames.len(),
            path: None,
        })
    }
}
