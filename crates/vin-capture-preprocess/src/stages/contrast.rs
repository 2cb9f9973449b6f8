use crate::ContrastLevel;
use vin_capture_core::GrayImage;

/// Window radius for the adaptive stretch (5x5 neighbourhood).
const ADAPTIVE_RADIUS: usize = 2;
/// Stretch applied even in fully contrasted neighbourhoods.
const ADAPTIVE_MIN_STRETCH: f32 = 0.1;
/// Extra stretch granted to flat neighbourhoods.
const ADAPTIVE_GAIN: f32 = 0.3;

/// Push one value away from mid-gray: `< 128` is scaled by `dark`,
/// `>= 128` by `light`, then clamped.
#[inline]
pub fn stretch_value(v: u8, dark: f32, light: f32) -> u8 {
    let m = if v < 128 { dark } else { light };
    (v as f32 * m).round().clamp(0.0, 255.0) as u8
}

/// Global stretch with fixed multipliers.
pub fn stretch_global(img: &mut GrayImage, dark: f32, light: f32) {
    for v in img.data.iter_mut() {
        *v = stretch_value(*v, dark, light);
    }
}

/// Per-pixel stretch driven by local contrast.
///
/// Flat neighbourhoods (small max - min) get the strongest push, already
/// contrasted ones only the minimum stretch.
pub fn stretch_adaptive(img: &mut GrayImage) {
    let src = img.clone();
    let view = src.view();
    for y in 0..img.height {
        for x in 0..img.width {
            let (lo, hi) = view.window_min_max(x, y, ADAPTIVE_RADIUS);
            let local = (hi - lo) as f32 / 255.0;
            let stretch = ADAPTIVE_MIN_STRETCH + ADAPTIVE_GAIN * (1.0 - local);
            let v = src.get(x, y);
            img.set(x, y, stretch_value(v, 1.0 - stretch, 1.0 + stretch));
        }
    }
}

/// Stage 4: dispatch on the configured contrast level.
pub fn apply_contrast(img: &mut GrayImage, level: ContrastLevel) {
    match level.global_multipliers() {
        Some((dark, light)) => stretch_global(img, dark, light),
        None => stretch_adaptive(img),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_splits_at_128() {
        assert_eq!(stretch_value(127, 0.5, 2.0), 64);
        assert_eq!(stretch_value(128, 0.5, 2.0), 255);
        assert_eq!(stretch_value(100, 0.8, 1.2), 80);
        assert_eq!(stretch_value(200, 0.8, 1.2), 240);
    }

    #[test]
    fn global_high_preset_moves_values_apart() {
        let mut img = GrayImage {
            width: 2,
            height: 1,
            data: vec![100, 150],
        };
        apply_contrast(&mut img, ContrastLevel::High);
        assert_eq!(img.data, vec![70, 195]);
    }

    #[test]
    fn adaptive_pushes_flat_regions_harder() {
        let mut flat = GrayImage {
            width: 5,
            height: 5,
            data: vec![100; 25],
        };
        stretch_adaptive(&mut flat);
        // stretch 0.4 on a flat patch
        assert!(flat.data.iter().all(|&v| v == 60));

        let mut edge = GrayImage {
            width: 5,
            height: 5,
            data: vec![100; 25],
        };
        edge.set(0, 0, 0);
        edge.set(4, 4, 255);
        stretch_adaptive(&mut edge);
        // centre window spans the whole range -> minimum stretch 0.1
        assert_eq!(edge.get(2, 2), 90);
    }
}
