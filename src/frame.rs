//! Frame and foreground-mask buffers handed between the capabilities.

use ndarray::{Array2, Array3};

use crate::tracker::FrameSize;

/// A single video frame stored as rows x cols x channels.
#[derive(Debug, Clone)]
pub struct Frame {
    pixels: Array3<u8>,
}

impl Frame {
    pub fn new(pixels: Array3<u8>) -> Self {
        Self { pixels }
    }

    /// A black frame with the given dimensions and channel count.
    pub fn zeros(size: FrameSize, channels: usize) -> Self {
        let rows = size.height.max(0) as usize;
        let cols = size.width.max(0) as usize;
        Self::new(Array3::zeros((rows, cols, channels)))
    }

    pub fn size(&self) -> FrameSize {
        let (rows, cols, _) = self.pixels.dim();
        FrameSize::new(cols as i32, rows as i32)
    }

    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut Array3<u8> {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Array3<u8> {
        self.pixels
    }
}

/// Single-channel foreground mask (non-zero = moving pixel).
#[derive(Debug, Clone)]
pub struct Mask {
    pixels: Array2<u8>,
}

impl Mask {
    pub fn new(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    pub fn size(&self) -> FrameSize {
        let (rows, cols) = self.pixels.dim();
        FrameSize::new(cols as i32, rows as i32)
    }

    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size() {
        let frame = Frame::zeros(FrameSize::new(640, 480), 3);
        assert_eq!(frame.size(), FrameSize::new(640, 480));
        assert_eq!(frame.channels(), 3);
    }

    #[test]
    fn test_mask_foreground_count() {
        let mut pixels = Array2::zeros((4, 6));
        pixels[[1, 2]] = 255;
        pixels[[3, 5]] = 1;
        let mask = Mask::new(pixels);
        assert_eq!(mask.size(), FrameSize::new(6, 4));
        assert_eq!(mask.foreground_count(), 2);
    }
}
