//! Re-acquisition around the last known position after an update failure.

use crate::frame::Frame;
use crate::integration::SingleObjectTracker;
use crate::tracker::rect::{FrameSize, Rect};

/// Square window of half-size `search_radius` centered on `last_region`,
/// clipped to the frame.
pub fn search_window(last_region: Rect, search_radius: i32, frame: FrameSize) -> Rect {
    let (cx, cy) = last_region.center();
    Rect::from_tlbr(
        cx - search_radius,
        cy - search_radius,
        cx + search_radius,
        cy + search_radius,
    )
    .clamp_to_frame(frame)
}

/// Re-initialize the tracker on the expanded search window.
///
/// Returns whatever the tracker's `init` reports; there is no internal retry.
pub fn attempt_recovery<T>(tracker: &mut T, frame: &Frame, last_region: Rect, search_radius: i32) -> bool
where
    T: SingleObjectTracker + ?Sized,
{
    let window = search_window(last_region, search_radius, frame.size());
    if window.is_empty() {
        return false;
    }
    tracker.init(frame, window)
}
