use crate::{FrameBuffer, CHANNELS};

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    /// Take channel 0 of a frame whose R, G and B already hold the same value.
    pub fn from_gray_frame(frame: &FrameBuffer) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            data: frame.pixels().map(|p| p[0]).collect(),
        }
    }

    /// Write the plane back into `frame` as opaque gray.
    pub fn write_into(&self, frame: &mut FrameBuffer) {
        debug_assert_eq!(self.width * self.height, frame.pixel_count());
        for (dst, &v) in frame
            .as_raw_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(self.data.iter())
        {
            dst[0] = v;
            dst[1] = v;
            dst[2] = v;
            dst[3] = 255;
        }
    }
}

impl<'a> GrayImageView<'a> {
    /// Sample with coordinates clamped to the image border.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> u8 {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[cy * self.width + cx]
    }

    /// `(min, max)` over the square window of radius `r` centred on `(x, y)`,
    /// clipped to the image.
    pub fn window_min_max(&self, x: usize, y: usize, r: usize) -> (u8, u8) {
        let x0 = x.saturating_sub(r);
        let y0 = y.saturating_sub(r);
        let x1 = (x + r).min(self.width - 1);
        let y1 = (y + r).min(self.height - 1);

        let mut lo = u8::MAX;
        let mut hi = u8::MIN;
        for yy in y0..=y1 {
            let row = &self.data[yy * self.width + x0..=yy * self.width + x1];
            for &v in row {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        (lo, hi)
    }
}
