use serde::{Deserialize, Serialize};

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: i32,
    pub height: i32,
}

impl FrameSize {
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Center pixel of the frame.
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }
}

/// Pixel-aligned region representation.
///
/// Stored as TLWH (top-left x, top-left y, width, height). A rectangle with a
/// non-positive width or height is empty and never tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the region
    pub width: i32,
    /// Height of the region
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Create a Rect of the given dimensions whose center is `(cx, cy)`.
    #[inline]
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self {
            x: cx.saturating_sub(width / 2),
            y: cy.saturating_sub(height / 2),
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    /// Get the center point of the region.
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Average of width and height, the scalar size used by growth and drift checks.
    #[inline]
    pub fn mean_size(&self) -> i32 {
        ((self.width as i64 + self.height as i64) / 2) as i32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Shift the region without resizing it.
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Grow the region by `margin` pixels on every side.
    #[inline]
    pub fn expand(&self, margin: i32) -> Self {
        Self::from_tlbr(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.right().saturating_add(margin),
            self.bottom().saturating_add(margin),
        )
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Edges past the frame are cut off, so the result may be smaller than
    /// the input (or empty when the region lies entirely outside).
    pub fn clamp_to_frame(&self, frame: FrameSize) -> Self {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(frame.width);
        let y2 = self.bottom().min(frame.height);
        Self::from_tlbr(x1, y1, x2.max(x1), y2.max(y1))
    }

    /// Whether the region lies fully inside `[0, width) x [0, height)`.
    #[inline]
    pub fn is_within(&self, frame: FrameSize) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= frame.width && self.bottom() <= frame.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.to_tlbr(), [10, 20, 40, 60]);
        assert_eq!(rect.center(), (25, 40));
        assert_eq!(rect.mean_size(), 35);
        assert_eq!(rect.area(), 1200);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10, 20, 40, 60);
        assert_eq!(rect, Rect::new(10, 20, 30, 40));
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(100, 100, 50, 41);
        assert_eq!(rect, Rect::new(75, 80, 50, 41));
        assert_eq!(rect.center(), (100, 100));
    }

    #[test]
    fn test_expand_and_clamp() {
        let frame = FrameSize::new(640, 480);
        let rect = Rect::new(5, 460, 30, 15).expand(20);
        assert_eq!(rect, Rect::new(-15, 440, 70, 55));

        let clamped = rect.clamp_to_frame(frame);
        assert_eq!(clamped, Rect::new(0, 440, 55, 40));
        assert!(clamped.is_within(frame));
    }

    #[test]
    fn test_clamp_outside_is_empty() {
        let frame = FrameSize::new(100, 100);
        let rect = Rect::new(200, 200, 10, 10).clamp_to_frame(frame);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let rect = Rect::new(i32::MAX - 10, i32::MIN, 500, 400);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.center(), (i32::MAX, i32::MIN + 200));
        assert_eq!(Rect::new(0, 0, i32::MAX, i32::MAX).mean_size(), i32::MAX);
        assert_eq!(Rect::from_center(i32::MIN, 0, 100, 100).x, i32::MIN);
        assert_eq!(rect.translate(100, -1).x, i32::MAX);
        assert_eq!(Rect::new(5, 5, 10, 10).translate(-5, 3), Rect::new(0, 8, 10, 10));
    }

    #[test]
    fn test_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0, 0, 10, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
