//! Operator-driven region placement.

use crate::tracker::rect::{FrameSize, Rect};

/// Pixels moved per nudge command.
pub const NUDGE_STEP: i32 = 10;
/// Pixels added to or removed from both dimensions per resize command.
pub const RESIZE_STEP: i32 = 20;
/// Smallest selectable width and height.
pub const MIN_SELECTION_SIZE: i32 = 40;
/// Width and height of a freshly started selection.
pub const DEFAULT_SELECTION_SIZE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Candidate rectangle being adjusted before confirmation.
///
/// Kept as center plus dimensions; the center is always clamped so the
/// rectangle lies inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiSelection {
    center_x: i32,
    center_y: i32,
    width: i32,
    height: i32,
    frame: FrameSize,
}

impl RoiSelection {
    /// Default-sized selection centered in the frame.
    pub fn new(frame: FrameSize) -> Self {
        let (center_x, center_y) = frame.center();
        let mut selection = Self {
            center_x,
            center_y,
            width: clamp_dimension(DEFAULT_SELECTION_SIZE, frame.width),
            height: clamp_dimension(DEFAULT_SELECTION_SIZE, frame.height),
            frame,
        };
        selection.clamp_center();
        selection
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// The rectangle currently described by center and dimensions.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center_x, self.center_y, self.width, self.height)
    }

    pub fn nudge(&mut self, direction: NudgeDirection) {
        match direction {
            NudgeDirection::Up => self.center_y -= NUDGE_STEP,
            NudgeDirection::Down => self.center_y += NUDGE_STEP,
            NudgeDirection::Left => self.center_x -= NUDGE_STEP,
            NudgeDirection::Right => self.center_x += NUDGE_STEP,
        }
        self.clamp_center();
    }

    pub fn grow(&mut self) {
        self.resize(RESIZE_STEP);
    }

    pub fn shrink(&mut self) {
        self.resize(-RESIZE_STEP);
    }

    fn resize(&mut self, delta: i32) {
        self.width = clamp_dimension(self.width + delta, self.frame.width);
        self.height = clamp_dimension(self.height + delta, self.frame.height);
        self.clamp_center();
    }

    /// Final region handed to tracker initialization.
    pub fn confirm(&self) -> Rect {
        self.rect().clamp_to_frame(self.frame)
    }

    fn clamp_center(&mut self) {
        self.center_x = clamp_axis(self.center_x, self.width, self.frame.width);
        self.center_y = clamp_axis(self.center_y, self.height, self.frame.height);
    }
}

fn clamp_dimension(value: i32, frame_dim: i32) -> i32 {
    value.max(MIN_SELECTION_SIZE).min(frame_dim)
}

// Center range for which [c - len/2, c - len/2 + len) stays in [0, frame_len).
fn clamp_axis(center: i32, len: i32, frame_len: i32) -> i32 {
    let low = len / 2;
    let high = frame_len - (len - len / 2);
    center.min(high).max(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_starts_centered() {
        let selection = RoiSelection::new(FRAME);
        assert_eq!(selection.center(), (320, 240));
        assert_eq!(selection.size(), (100, 100));
        assert_eq!(selection.rect(), Rect::new(270, 190, 100, 100));
    }

    #[test]
    fn test_nudge() {
        let mut selection = RoiSelection::new(FRAME);
        selection.nudge(NudgeDirection::Right);
        selection.nudge(NudgeDirection::Up);
        assert_eq!(selection.center(), (330, 230));
    }

    #[test]
    fn test_repeated_nudges_stay_in_frame() {
        let mut selection = RoiSelection::new(FRAME);
        for direction in [
            NudgeDirection::Left,
            NudgeDirection::Up,
            NudgeDirection::Right,
            NudgeDirection::Down,
        ] {
            for _ in 0..100 {
                selection.nudge(direction);
                assert!(selection.rect().is_within(FRAME), "{:?}", selection.rect());
            }
        }
        assert_eq!(selection.rect(), Rect::new(540, 380, 100, 100));
    }

    #[test]
    fn test_odd_frame_stays_in_bounds() {
        let frame = FrameSize::new(101, 77);
        let mut selection = RoiSelection::new(frame);
        for _ in 0..5 {
            selection.shrink();
            selection.nudge(NudgeDirection::Right);
            selection.nudge(NudgeDirection::Down);
            assert!(selection.rect().is_within(frame));
        }
        for _ in 0..5 {
            selection.grow();
            assert!(selection.rect().is_within(frame));
        }
        assert_eq!(selection.size(), (101, 77));
    }

    #[test]
    fn test_resize_limits() {
        let mut selection = RoiSelection::new(FRAME);
        for _ in 0..10 {
            selection.shrink();
        }
        assert_eq!(selection.size(), (MIN_SELECTION_SIZE, MIN_SELECTION_SIZE));

        for _ in 0..40 {
            selection.grow();
        }
        assert_eq!(selection.size(), (640, 480));
        assert_eq!(selection.rect(), Rect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_grow_near_edge_recenters() {
        let mut selection = RoiSelection::new(FRAME);
        for _ in 0..50 {
            selection.nudge(NudgeDirection::Left);
        }
        selection.grow();
        assert_eq!(selection.size(), (120, 120));
        assert!(selection.rect().is_within(FRAME));
        assert_eq!(selection.rect().x, 0);
    }

    #[test]
    fn test_confirm() {
        let selection = RoiSelection::new(FRAME);
        assert_eq!(selection.confirm(), Rect::new(270, 190, 100, 100));
    }
}
