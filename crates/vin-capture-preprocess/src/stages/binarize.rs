use vin_capture_core::GrayImage;

/// Stage 8: clip the tails, keep the middle.
///
/// Values above `high` become 255 and values below `low` become 0. The band
/// `low..=high` is passed through so the OCR engine's own binarization still
/// sees partial stroke information.
pub fn soft_binarize(img: &mut GrayImage, low: u8, high: u8) {
    for v in img.data.iter_mut() {
        if *v > high {
            *v = 255;
        } else if *v < low {
            *v = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_lands_in_an_allowed_band() {
        let mut img = GrayImage {
            width: 256,
            height: 1,
            data: (0..=255u8).collect(),
        };
        soft_binarize(&mut img, 75, 180);
        for (orig, &v) in (0..=255u8).zip(img.data.iter()) {
            match orig {
                0..=74 => assert_eq!(v, 0),
                75..=180 => assert_eq!(v, orig),
                _ => assert_eq!(v, 255),
            }
        }
    }
}
