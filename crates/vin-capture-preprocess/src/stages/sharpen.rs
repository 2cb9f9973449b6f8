use vin_capture_core::{FrameBuffer, CHANNELS};

/// Edge-enhancing kernel: centre 9, all eight neighbours -1 (sums to 1).
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]];

/// Convolve R, G and B with a 3x3 integer kernel, dividing by `divisor`.
///
/// The one-pixel border has no full neighbourhood and is copied unchanged.
/// Alpha is never touched.
pub fn convolve3x3_rgb(frame: &FrameBuffer, kernel: &[[i32; 3]; 3], divisor: i32) -> FrameBuffer {
    let w = frame.width();
    let h = frame.height();
    let mut out = frame.clone();
    if w < 3 || h < 3 || divisor == 0 {
        return out;
    }

    let src = frame.as_raw();
    let dst = out.as_raw_mut();
    let stride = w * CHANNELS;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let base = y * stride + x * CHANNELS;
            for c in 0..3 {
                let mut acc = 0i32;
                for (ky, row) in kernel.iter().enumerate() {
                    let row_base = (y + ky - 1) * stride;
                    for (kx, &k) in row.iter().enumerate() {
                        acc += k * src[row_base + (x + kx - 1) * CHANNELS + c] as i32;
                    }
                }
                dst[base + c] = (acc / divisor).clamp(0, 255) as u8;
            }
        }
    }
    out
}

/// Stage 2: pre-sharpen the colour frame before grayscale conversion.
pub fn pre_sharpen(frame: &FrameBuffer) -> FrameBuffer {
    convolve3x3_rgb(frame, &SHARPEN_KERNEL, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_region_is_unchanged() {
        let frame = FrameBuffer::filled(5, 5, [90, 120, 30, 255]).expect("frame");
        assert_eq!(pre_sharpen(&frame), frame);
    }

    #[test]
    fn isolated_bright_pixel_is_amplified_and_neighbours_darkened() {
        let mut frame = FrameBuffer::filled(5, 5, [100, 100, 100, 255]).expect("frame");
        frame.set_pixel(2, 2, [120, 120, 120, 255]);
        let out = pre_sharpen(&frame);
        // centre: 9*120 - 8*100 = 280 -> clamp
        assert_eq!(out.pixel(2, 2), [255, 255, 255, 255]);
        // neighbour: 9*100 - 7*100 - 120 = 80
        assert_eq!(out.pixel(1, 2)[0], 80);
        // border copied
        assert_eq!(out.pixel(0, 0), [100, 100, 100, 255]);
    }
}
