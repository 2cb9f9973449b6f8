use crate::stages::{
    apply_contrast, auto_invert, median3, pre_sharpen, soft_binarize, thicken_strokes, to_gray,
    unsharp_mask,
};
use crate::PreprocessConfig;
use vin_capture_core::{FrameBuffer, GrayImage};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Run the full normalization sequence over one scan-band frame.
///
/// The returned frame is opaque gray (R = G = B) with the same dimensions as
/// the input.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame, cfg), fields(width = frame.width(), height = frame.height()))
)]
pub fn preprocess(mut frame: FrameBuffer, cfg: &PreprocessConfig) -> FrameBuffer {
    if let Some(inversion) = auto_invert(
        &mut frame,
        cfg.invert_threshold,
        cfg.invert_light_text,
        cfg.invert_dark_text,
    ) {
        log::debug!("frame inverted ({inversion:?})");
    }

    if cfg.pre_sharpen {
        frame = pre_sharpen(&frame);
    }

    let mut gray = to_gray(&frame, cfg.grayscale, cfg.blue_emphasis);
    apply_contrast(&mut gray, cfg.contrast);

    if cfg.unsharp_mask {
        unsharp_mask(&mut gray, cfg.unsharp_amount, cfg.unsharp_threshold);
    }

    let mut gray = thicken_strokes(&gray, cfg.kernel_size);

    if cfg.noise_reduction {
        gray = median3(&median3(&gray));
    }

    soft_binarize(&mut gray, cfg.binarize_low, cfg.binarize_high);
    write_gray(gray, frame)
}

fn write_gray(gray: GrayImage, mut frame: FrameBuffer) -> FrameBuffer {
    gray.write_into(&mut frame);
    frame
}

/// A [`PreprocessConfig`] bound for repeated use by a scan session.
#[derive(Clone, Debug, Default)]
pub struct Preprocessor {
    cfg: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(cfg: PreprocessConfig) -> Self {
        Self { cfg }
    }

    #[inline]
    pub fn config(&self) -> &PreprocessConfig {
        &self.cfg
    }

    #[inline]
    pub fn run(&self, frame: FrameBuffer) -> FrameBuffer {
        preprocess(frame, &self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContrastLevel, GrayscaleMethod};

    fn striped_frame(w: usize, h: usize) -> FrameBuffer {
        let mut frame = FrameBuffer::filled(w, h, [230, 228, 225, 255]).expect("frame");
        for y in h / 4..3 * h / 4 {
            for x in (2..w - 2).step_by(6) {
                frame.set_pixel(x, y, [30, 35, 60, 255]);
                frame.set_pixel(x + 1, y, [40, 38, 70, 255]);
            }
        }
        frame
    }

    fn assert_binarized(frame: &FrameBuffer, low: u8, high: u8) {
        for p in frame.pixels() {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 255);
            let v = p[0];
            assert!(
                v == 0 || v == 255 || (low..=high).contains(&v),
                "value {v} escaped the binarization bands"
            );
        }
    }

    #[test]
    fn default_pipeline_output_respects_binarization_bands() {
        let cfg = PreprocessConfig::default();
        let out = preprocess(striped_frame(64, 16), &cfg);
        assert_eq!((out.width(), out.height()), (64, 16));
        assert_binarized(&out, cfg.binarize_low, cfg.binarize_high);
    }

    #[test]
    fn every_stage_enabled_still_respects_bands() {
        let cfg = PreprocessConfig {
            grayscale: GrayscaleMethod::BlueChannel,
            contrast: ContrastLevel::VeryHigh,
            invert_dark_text: true,
            unsharp_mask: true,
            ..PreprocessConfig::default()
        };
        let out = Preprocessor::new(cfg.clone()).run(striped_frame(48, 12));
        assert_binarized(&out, cfg.binarize_low, cfg.binarize_high);
    }

    #[test]
    fn dark_plate_with_light_print_ends_up_with_dark_background() {
        let mut frame = FrameBuffer::filled(30, 10, [20, 20, 20, 255]).expect("frame");
        for x in 10..18 {
            for y in 1..9 {
                frame.set_pixel(x, y, [240, 240, 240, 255]);
            }
        }
        let cfg = PreprocessConfig {
            pre_sharpen: false,
            noise_reduction: false,
            ..PreprocessConfig::default()
        };
        let out = preprocess(frame, &cfg);
        // Background inverted to near white, then clipped to 255.
        assert_eq!(out.pixel(0, 0)[0], 255);
        // The former light stroke is now dark; morphology trims one pixel
        // off each side but keeps its core.
        assert_eq!(out.pixel(13, 5)[0], 0);
        assert_eq!(out.pixel(10, 5)[0], 255);
    }
}
