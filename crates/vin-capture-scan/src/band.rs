use serde::{Deserialize, Serialize};
use vin_capture_core::{FrameBuffer, Rect};

fn default_max_width_px() -> usize {
    280
}

fn default_width_frac() -> f32 {
    0.6
}

fn default_height_frac() -> f32 {
    0.12
}

/// Geometry of the centred strip handed to recognition.
///
/// Width is `min(max_width_px, width_frac * frame_width)`, height is
/// `height_frac * frame_height`; the strip is centred in both directions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanBand {
    #[serde(default = "default_max_width_px")]
    pub max_width_px: usize,
    #[serde(default = "default_width_frac")]
    pub width_frac: f32,
    #[serde(default = "default_height_frac")]
    pub height_frac: f32,
}

impl Default for ScanBand {
    fn default() -> Self {
        Self {
            max_width_px: default_max_width_px(),
            width_frac: default_width_frac(),
            height_frac: default_height_frac(),
        }
    }
}

impl ScanBand {
    /// Band rectangle for a `width` x `height` frame; `None` for empty frames.
    pub fn rect(&self, width: usize, height: usize) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }
        let bw = ((width as f32 * self.width_frac) as usize)
            .min(self.max_width_px)
            .clamp(1, width);
        let bh = ((height as f32 * self.height_frac) as usize).clamp(1, height);
        Some(Rect {
            x: (width - bw) / 2,
            y: (height - bh) / 2,
            width: bw,
            height: bh,
        })
    }

    pub fn crop(&self, frame: &FrameBuffer) -> Option<FrameBuffer> {
        let rect = self.rect(frame.width(), frame.height())?;
        frame.crop(rect).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_frames_cap_at_280px() {
        let band = ScanBand::default();
        let r = band.rect(1280, 720).expect("rect");
        assert_eq!((r.width, r.height), (280, 86));
        assert_eq!((r.x, r.y), (500, 317));
    }

    #[test]
    fn narrow_frames_use_sixty_percent() {
        let r = ScanBand::default().rect(400, 300).expect("rect");
        assert_eq!((r.width, r.height), (240, 36));
        assert_eq!((r.x, r.y), (80, 132));
    }

    #[test]
    fn tiny_frames_still_get_a_pixel() {
        let r = ScanBand::default().rect(1, 1).expect("rect");
        assert_eq!((r.width, r.height), (1, 1));
        assert!(ScanBand::default().rect(0, 10).is_none());
    }

    #[test]
    fn crop_takes_the_centre() {
        let mut frame = FrameBuffer::filled(100, 100, [0, 0, 0, 255]).expect("frame");
        frame.set_pixel(50, 50, [255, 0, 0, 255]);
        let band = ScanBand::default().crop(&frame).expect("band");
        assert_eq!((band.width(), band.height()), (60, 12));
        assert_eq!(band.pixel(30, 6), [255, 0, 0, 255]);
    }
}
