//! Traits for the vision backends the tracker consumes.
//!
//! The tracking algorithm, the background subtractor and contour extraction
//! are black boxes. Implement these traits to connect any backend (OpenCV,
//! a hand-rolled correlation filter, a test fake) to the state machine.

use crate::frame::{Frame, Mask};
use crate::tracker::Rect;

/// Opaque single-object tracking algorithm.
///
/// # Example
///
/// ```ignore
/// use sotrack_rs::{Frame, Rect, SingleObjectTracker};
///
/// struct MyTracker { /* backend handle */ }
///
/// impl SingleObjectTracker for MyTracker {
///     fn init(&mut self, frame: &Frame, region: Rect) -> bool {
///         // Build the appearance model from `region`
///         true
///     }
///
///     fn update(&mut self, frame: &Frame) -> Option<Rect> {
///         // Locate the target in the new frame
///         None
///     }
/// }
/// ```
pub trait SingleObjectTracker {
    /// (Re)initialize on `region`. Returns `false` if nothing trackable is there.
    fn init(&mut self, frame: &Frame, region: Rect) -> bool;

    /// Advance one frame. `None` means the target was not found.
    fn update(&mut self, frame: &Frame) -> Option<Rect>;
}

impl<T: SingleObjectTracker + ?Sized> SingleObjectTracker for Box<T> {
    fn init(&mut self, frame: &Frame, region: Rect) -> bool {
        (**self).init(frame, region)
    }

    fn update(&mut self, frame: &Frame) -> Option<Rect> {
        (**self).update(frame)
    }
}

/// Foreground mask generator with its own temporal model.
pub trait BackgroundSubtractor {
    /// Error type for subtraction failures.
    type Error: std::fmt::Display;

    /// Feed a frame and return its foreground mask.
    fn apply(&mut self, frame: &Frame) -> Result<Mask, Self::Error>;
}

/// Geometry of one extracted contour.
pub trait Contour {
    fn area(&self) -> f64;
    fn bounding_rect(&self) -> Rect;
}

/// Contour extraction from a foreground mask.
pub trait ContourFinder {
    type Contour: Contour;

    /// Outer contours of the mask, in the backend's iteration order.
    fn find_contours(&mut self, mask: &Mask) -> Vec<Self::Contour>;
}

/// Plain contour summary: area plus bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub area: f64,
    pub bounds: Rect,
}

impl Blob {
    pub fn new(area: f64, bounds: Rect) -> Self {
        Self { area, bounds }
    }
}

impl Contour for Blob {
    fn area(&self) -> f64 {
        self.area
    }

    fn bounding_rect(&self) -> Rect {
        self.bounds
    }
}
