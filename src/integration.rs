//! Integration module for connecting vision backends and video I/O to the
//! tracking state machine.
//!
//! This module provides the capability traits the tracker consumes, the
//! operator key mapping, overlay and recording glue, and the per-frame
//! pipeline that ties them together.

mod capability;
mod command;
mod io;
mod overlay;
mod pipeline;
mod recording;

pub use capability::{BackgroundSubtractor, Blob, Contour, ContourFinder, SingleObjectTracker};
pub use command::KeyCommand;
pub use io::{FrameSource, RecordingSink, RenderSink};
pub use overlay::{
    Overlay, SelectionBox, StatusTone, TrackingBox, format_recording_time, truncate_line,
};
pub use pipeline::{FrameOutcome, TrackingPipeline};
pub use recording::Recorder;
