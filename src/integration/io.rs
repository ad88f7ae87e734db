//! Frame input and output boundaries: camera/file source, display, video file.

use std::path::Path;

use crate::frame::Frame;
use crate::integration::overlay::Overlay;
use crate::tracker::FrameSize;

/// Lazy, effectively infinite frame sequence.
pub trait FrameSource {
    type Error: std::fmt::Display;

    /// Next frame, or `Ok(None)` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}

/// Display target for a frame plus its overlay.
pub trait RenderSink {
    type Error: std::fmt::Display;

    fn render(&mut self, frame: &Frame, overlay: &Overlay) -> Result<(), Self::Error>;
}

/// Video file writer.
pub trait RecordingSink {
    type Error: std::fmt::Display;

    /// Open a writer at `path` with the given FourCC codec.
    fn open(&mut self, path: &Path, codec: &str, fps: f64, size: FrameSize) -> Result<(), Self::Error>;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    fn close(&mut self) -> Result<(), Self::Error>;
}
