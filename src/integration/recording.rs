//! Operator-toggled video recording.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::RecordingConfig;
use crate::error::RecordingError;
use crate::frame::Frame;
use crate::integration::io::RecordingSink;
use crate::tracker::FrameSize;

#[derive(Debug, Clone)]
struct ActiveRecording {
    path: PathBuf,
    codec: String,
    started: Instant,
}

/// Wraps a `RecordingSink` with start/stop bookkeeping and codec fallback.
pub struct Recorder<W> {
    sink: W,
    config: RecordingConfig,
    active: Option<ActiveRecording>,
}

impl<W: RecordingSink> Recorder<W> {
    pub fn new(sink: W, config: RecordingConfig) -> Self {
        Self {
            sink,
            config,
            active: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Output path and codec of the running recording.
    pub fn current(&self) -> Option<(&PathBuf, &str)> {
        self.active
            .as_ref()
            .map(|active| (&active.path, active.codec.as_str()))
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|active| active.started.elapsed())
    }

    /// Open a timestamped output file with the first codec the sink accepts.
    pub fn start(&mut self, size: FrameSize) -> Result<PathBuf, RecordingError> {
        if self.active.is_some() {
            return Err(RecordingError::AlreadyRecording);
        }

        let filename = format!(
            "tracking_video_{}.mp4",
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.config.output_dir.join(filename);

        let mut last_error = String::new();
        for codec in &self.config.codecs {
            match self.sink.open(&path, codec, self.config.fps, size) {
                Ok(()) => {
                    info!("Recording started: {} (codec: {})", path.display(), codec);
                    self.active = Some(ActiveRecording {
                        path: path.clone(),
                        codec: codec.clone(),
                        started: Instant::now(),
                    });
                    return Ok(path);
                }
                Err(err) => {
                    debug!("codec {} unavailable: {}", codec, err);
                    last_error = err.to_string();
                }
            }
        }

        Err(RecordingError::NoUsableCodec {
            tried: self.config.codecs.clone(),
            last: last_error,
        })
    }

    /// Close the sink. On a close error the recording stays active.
    pub fn stop(&mut self) -> Result<(), RecordingError> {
        let Some(active) = &self.active else {
            return Err(RecordingError::NotRecording);
        };
        self.sink
            .close()
            .map_err(|err| RecordingError::Close(err.to_string()))?;
        info!(
            "Recording stopped: {} ({}s)",
            active.path.display(),
            active.started.elapsed().as_secs()
        );
        self.active = None;
        Ok(())
    }

    /// Start or stop; returns whether a recording is running afterwards.
    pub fn toggle(&mut self, size: FrameSize) -> Result<bool, RecordingError> {
        if self.is_recording() {
            self.stop().map(|()| false)
        } else {
            self.start(size).map(|_| true)
        }
    }

    /// Write `frame` if a recording is running.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), RecordingError> {
        if self.active.is_none() {
            return Ok(());
        }
        self.sink
            .write(frame)
            .map_err(|err| RecordingError::Write(err.to_string()))
    }

    /// Stop any running recording, logging instead of failing.
    pub fn finish(&mut self) {
        if self.is_recording() {
            if let Err(err) = self.stop() {
                warn!("Recording error during shutdown: {}", err);
            }
        }
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }
}
