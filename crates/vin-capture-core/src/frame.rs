use serde::{Deserialize, Serialize};

/// Number of interleaved channels in a [`FrameBuffer`] (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Errors raised when constructing or slicing a frame.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    InvalidLength { expected: usize, got: usize },
    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("crop {rect:?} exceeds frame bounds {width}x{height}")]
    CropOutOfBounds {
        rect: Rect,
        width: usize,
        height: usize,
    },
}

/// Axis-aligned pixel rectangle, `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Owned RGBA8 frame, row-major, `data.len() == width * height * 4`.
///
/// One buffer is produced per capture attempt and consumed by the pipeline;
/// nothing keeps a frame alive across attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Wrap an RGBA byte vector.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(FrameError::InvalidLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single RGBA colour.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let o = self.offset(x, y);
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate pixels as `[r, g, b, a]` chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Copy out a sub-rectangle into a fresh frame.
    pub fn crop(&self, rect: Rect) -> Result<Self, FrameError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(FrameError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        if rect.x + rect.width > self.width || rect.y + rect.height > self.height {
            return Err(FrameError::CropOutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            });
        }

        let row_bytes = rect.width * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * rect.height);
        for y in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(Self {
            width: rect.width,
            height: rect.height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = FrameBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidLength {
                expected: 16,
                got: 15
            }
        );
    }

    #[test]
    fn crop_copies_the_requested_window() {
        let mut frame = FrameBuffer::filled(4, 3, [0, 0, 0, 255]).expect("frame");
        frame.set_pixel(2, 1, [10, 20, 30, 255]);

        let crop = frame
            .crop(Rect {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            })
            .expect("crop");
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.pixel(1, 0), [10, 20, 30, 255]);
        assert_eq!(crop.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn crop_outside_bounds_is_an_error() {
        let frame = FrameBuffer::filled(4, 4, [0; 4]).expect("frame");
        let rect = Rect {
            x: 3,
            y: 0,
            width: 2,
            height: 1,
        };
        assert!(matches!(
            frame.crop(rect),
            Err(FrameError::CropOutOfBounds { .. })
        ));
    }
}
