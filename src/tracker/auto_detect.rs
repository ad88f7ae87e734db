//! Motion-based target acquisition.

use tracing::{debug, warn};

use crate::frame::{Frame, Mask};
use crate::integration::{BackgroundSubtractor, Contour, ContourFinder};
use crate::tracker::rect::{FrameSize, Rect};

/// Pick the contour with the strictly largest area above `min_area`, pad its
/// bounds by `padding` on every side and clip to the frame.
///
/// On an exact area tie the earlier contour is kept.
pub fn select_candidate<C: Contour>(
    contours: &[C],
    min_area: f64,
    padding: i32,
    frame: FrameSize,
) -> Option<Rect> {
    let mut largest_area = 0.0;
    let mut largest = None;

    for contour in contours {
        let area = contour.area();
        if area > largest_area && area > min_area {
            largest_area = area;
            largest = Some(contour);
        }
    }

    let region = largest?
        .bounding_rect()
        .expand(padding)
        .clamp_to_frame(frame);
    (!region.is_empty()).then_some(region)
}

/// Owns the background subtractor and contour finder used while searching.
pub struct AutoDetector<B, F> {
    subtractor: B,
    finder: F,
    min_area: f64,
    padding: i32,
}

impl<B, F> AutoDetector<B, F>
where
    B: BackgroundSubtractor,
    F: ContourFinder,
{
    pub fn new(subtractor: B, finder: F, min_area: f64, padding: i32) -> Self {
        Self {
            subtractor,
            finder,
            min_area,
            padding,
        }
    }

    /// Feed a frame to the subtractor. Errors are logged and yield `None`.
    pub fn foreground(&mut self, frame: &Frame) -> Option<Mask> {
        match self.subtractor.apply(frame) {
            Ok(mask) => Some(mask),
            Err(err) => {
                warn!("Error applying background subtractor: {}", err);
                None
            }
        }
    }

    /// Extract contours from `mask` and select the best candidate region.
    pub fn detect(&mut self, mask: &Mask, frame: FrameSize) -> Option<Rect> {
        let contours = self.finder.find_contours(mask);
        let candidate = select_candidate(&contours, self.min_area, self.padding, frame);
        debug!(
            contours = contours.len(),
            candidate = ?candidate,
            "auto-detection pass"
        );
        candidate
    }

    pub fn subtractor(&self) -> &B {
        &self.subtractor
    }

    pub fn subtractor_mut(&mut self) -> &mut B {
        &mut self.subtractor
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    pub fn finder_mut(&mut self) -> &mut F {
        &mut self.finder
    }
}
