//! Adaptive growth limit for tracked regions.

use crate::tracker::rect::{FrameSize, Rect};

/// Bound a tracked region's size relative to its size at acquisition and keep
/// it inside the frame.
///
/// Each dimension is capped at `initial_size * max_growth` and then raised to
/// at least `min_size`, so the floor wins when the two conflict. The resized
/// region keeps the original center and is then shifted (never resized) until
/// it fits in `[0, width) x [0, height)`. A dimension larger than the frame
/// itself is cut to the frame dimension.
pub fn constrain_region(
    region: Rect,
    initial_size: i32,
    max_growth: f64,
    min_size: i32,
    frame: FrameSize,
) -> Rect {
    let max_allowed = (initial_size as f64 * max_growth) as i32;

    let width = region.width.min(max_allowed).max(min_size).min(frame.width);
    let height = region.height.min(max_allowed).max(min_size).min(frame.height);

    let (cx, cy) = region.center();
    let centered = Rect::from_center(cx, cy, width, height);

    // width <= frame.width, so the upper bound is never negative
    let x = centered.x.clamp(0, frame.width.saturating_sub(width));
    let y = centered.y.clamp(0, frame.height.saturating_sub(height));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_growth_capped_and_recentered() {
        let region = Rect::new(200, 150, 200, 200);
        let out = constrain_region(region, 50, 2.0, 40, FRAME);
        assert_eq!(out.width, 100);
        assert_eq!(out.height, 100);
        assert_eq!(out.center(), region.center());
    }

    #[test]
    fn test_within_limits_unchanged() {
        let region = Rect::new(100, 100, 80, 60);
        assert_eq!(constrain_region(region, 50, 2.0, 40, FRAME), region);
    }

    #[test]
    fn test_min_size_wins_over_growth_cap() {
        // cap = 15 * 2.0 = 30 < min 40
        let region = Rect::new(300, 200, 90, 20);
        let out = constrain_region(region, 15, 2.0, 40, FRAME);
        assert_eq!((out.width, out.height), (40, 40));
    }

    #[test]
    fn test_shifted_back_into_frame() {
        let top_left = constrain_region(Rect::new(-30, -10, 60, 60), 50, 2.0, 40, FRAME);
        assert_eq!(top_left, Rect::new(0, 0, 60, 60));

        let bottom_right = constrain_region(Rect::new(600, 450, 80, 80), 50, 2.0, 40, FRAME);
        assert_eq!(bottom_right, Rect::new(560, 400, 80, 80));
    }

    #[test]
    fn test_always_in_bounds_with_size_limits() {
        let (initial, growth, min) = (50, 2.0, 40);
        let cap = ((initial as f64 * growth) as i32).max(min);
        for x in (-200..800).step_by(73) {
            for y in (-200..600).step_by(61) {
                for size in [1, 39, 40, 77, 100, 250, 700] {
                    let out =
                        constrain_region(Rect::new(x, y, size, size / 2 + 1), initial, growth, min, FRAME);
                    assert!(out.is_within(FRAME), "{:?} escaped the frame", out);
                    assert!(out.width >= min && out.width <= cap);
                    assert!(out.height >= min && out.height <= cap);
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for region in [
            Rect::new(500, 400, 300, 300),
            Rect::new(-40, 10, 41, 99),
            Rect::new(320, 240, 1, 1),
        ] {
            let once = constrain_region(region, 60, 1.5, 40, FRAME);
            let twice = constrain_region(once, 60, 1.5, 40, FRAME);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_extreme_tracker_output_stays_in_frame() {
        for region in [
            Rect::new(i32::MAX - 10, i32::MAX - 10, 500, 500),
            Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX),
            Rect::new(i32::MAX, 0, i32::MAX, 80),
        ] {
            let out = constrain_region(region, 50, 2.0, 40, FRAME);
            assert!(out.is_within(FRAME), "{:?} escaped the frame", out);
            assert_eq!(out.width, 100);
        }
    }

    #[test]
    fn test_region_larger_than_frame() {
        let small = FrameSize::new(30, 30);
        let out = constrain_region(Rect::new(0, 0, 50, 50), 50, 2.0, 40, small);
        assert!(out.is_within(small));
    }
}
