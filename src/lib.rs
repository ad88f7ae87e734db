//! Real-time single-object video tracking.
//!
//! A `TrackingStateMachine` decides on every frame whether to auto-detect a
//! moving target, keep tracking it, recover after a failed update, or wait
//! for the operator to place a region by hand. The tracking algorithm, the
//! background subtractor and contour extraction are supplied by the caller
//! through the traits in [`integration`].

pub mod config;
pub mod debug_log;
pub mod error;
pub mod frame;
pub mod integration;
pub mod tracker;

pub use config::{AppConfig, RecordingConfig, TrackingConfig, TrackingConfigBuilder, UiConfig};
pub use debug_log::{DebugLog, DebugLogLayer, init_logging};
pub use error::{ConfigError, PipelineError, RecordingError};
pub use frame::{Frame, Mask};
pub use integration::{
    BackgroundSubtractor, Blob, Contour, ContourFinder, FrameOutcome, FrameSource, KeyCommand,
    Overlay, Recorder, RecordingSink, RenderSink, SingleObjectTracker, TrackingPipeline,
};
pub use tracker::{
    FrameSize, NudgeDirection, Rect, RoiSelection, TickEvent, TickReport, TrackingMode,
    TrackingSession, TrackingStateMachine, constrain_region,
};
