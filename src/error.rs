//! Error types for configuration, recording and the frame pipeline.
//!
//! The tracking core itself has no error type: every tracker, detection or
//! recovery failure is a mode transition on the session.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from the video recording sink.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("recording already active")]
    AlreadyRecording,

    #[error("no active recording")]
    NotRecording,

    #[error("could not create video writer with any codec (tried {tried:?}): {last}")]
    NoUsableCodec { tried: Vec<String>, last: String },

    #[error("error writing frame: {0}")]
    Write(String),

    #[error("error closing video writer: {0}")]
    Close(String),
}

/// Errors that end a single `process_frame` call.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("frame source error: {0}")]
    Source(String),

    #[error("render error: {0}")]
    Render(String),
}
