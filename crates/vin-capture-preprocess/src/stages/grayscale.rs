use crate::{BlueEmphasis, GrayscaleMethod};
use vin_capture_core::{FrameBuffer, GrayImage};

/// Fraction of the frame width, measured from the left edge, where the
/// blue-channel method falls back to a balanced blend.
///
/// The pure blue-difference formula erodes the first character of the band
/// when the plate edge bleeds into the crop.
pub const BLUE_CHANNEL_EDGE_FRAC: f32 = 0.15;

/// Stage 3: collapse RGB into one gray plane.
pub fn to_gray(frame: &FrameBuffer, method: GrayscaleMethod, emphasis: BlueEmphasis) -> GrayImage {
    let w = frame.width();
    let mut out = GrayImage::new(w, frame.height());
    let edge_cols = (w as f32 * BLUE_CHANNEL_EDGE_FRAC) as usize;
    let weights = emphasis.weights();

    for (i, (p, dst)) in frame.pixels().zip(out.data.iter_mut()).enumerate() {
        let (r, g, b) = (p[0] as f32, p[1] as f32, p[2] as f32);
        let v = match method {
            GrayscaleMethod::Average => (r + g + b) / 3.0,
            GrayscaleMethod::BlueChannel => {
                if i % w < edge_cols {
                    0.3 * r + 0.3 * g + 0.4 * b
                } else {
                    (b - (r + g) / 3.0).max(0.0)
                }
            }
            GrayscaleMethod::Luminosity => weights[0] * r + weights[1] * g + weights[2] * b,
        };
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_channel_mean() {
        let frame = FrameBuffer::filled(2, 2, [30, 60, 90, 255]).expect("frame");
        let g = to_gray(&frame, GrayscaleMethod::Average, BlueEmphasis::Normal);
        assert!(g.data.iter().all(|&v| v == 60));
    }

    #[test]
    fn blue_channel_blends_left_edge_only() {
        let frame = FrameBuffer::filled(20, 1, [60, 90, 200, 255]).expect("frame");
        let g = to_gray(&frame, GrayscaleMethod::BlueChannel, BlueEmphasis::Normal);
        // 15% of 20 = 3 edge columns: 0.3*60 + 0.3*90 + 0.4*200 = 125
        assert_eq!(&g.data[..3], &[125, 125, 125]);
        // 200 - 150/3 = 150
        assert!(g.data[3..].iter().all(|&v| v == 150));
    }

    #[test]
    fn blue_channel_floors_at_zero() {
        let frame = FrameBuffer::filled(10, 1, [255, 255, 10, 255]).expect("frame");
        let g = to_gray(&frame, GrayscaleMethod::BlueChannel, BlueEmphasis::Normal);
        assert_eq!(g.data[9], 0);
    }

    #[test]
    fn stronger_emphasis_brightens_blue_pixels() {
        let frame = FrameBuffer::filled(1, 1, [0, 0, 200, 255]).expect("frame");
        let normal = to_gray(&frame, GrayscaleMethod::Luminosity, BlueEmphasis::Normal).data[0];
        let very = to_gray(&frame, GrayscaleMethod::Luminosity, BlueEmphasis::VeryHigh).data[0];
        let zero = to_gray(&frame, GrayscaleMethod::Luminosity, BlueEmphasis::Zero).data[0];
        assert!(very > normal);
        assert_eq!(zero, 67);
    }
}
