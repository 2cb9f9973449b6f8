use vin_capture_core::GrayImage;

const GAUSS3: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// 3x3 Gaussian blur with clamped borders.
pub fn gaussian_blur3(img: &GrayImage) -> GrayImage {
    let view = img.view();
    let mut out = GrayImage::new(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut acc = 0u32;
            for (ky, row) in GAUSS3.iter().enumerate() {
                for (kx, &k) in row.iter().enumerate() {
                    let sx = x as isize + kx as isize - 1;
                    let sy = y as isize + ky as isize - 1;
                    acc += k * view.get_clamped(sx, sy) as u32;
                }
            }
            out.set(x, y, ((acc + 8) / 16) as u8);
        }
    }
    out
}

/// Stage 5: unsharp mask.
///
/// Differences from the blurred copy whose magnitude exceeds `threshold` are
/// scaled by `amount` and added back; smaller ones are treated as noise and
/// leave the pixel untouched.
pub fn unsharp_mask(img: &mut GrayImage, amount: f32, threshold: u8) {
    let blurred = gaussian_blur3(img);
    for (v, &b) in img.data.iter_mut().zip(blurred.data.iter()) {
        let diff = *v as i32 - b as i32;
        if diff.unsigned_abs() > threshold as u32 {
            let sharpened = *v as f32 + amount * diff as f32;
            *v = sharpened.round().clamp(0.0, 255.0) as u8;
        }
    }
}
