use vin_capture_core::FrameBuffer;

/// Which polarity rule fired during [`auto_invert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inversion {
    /// Dark frame, light print.
    LightText,
    /// Bright frame, dark print.
    DarkText,
}

/// Mean Rec.601 luma over all pixels, in `0.0..=255.0`.
pub fn mean_luminance(frame: &FrameBuffer) -> f32 {
    let n = frame.pixel_count();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = frame
        .pixels()
        .map(|p| 0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64)
        .sum();
    (sum / n as f64) as f32
}

/// Invert R, G and B in place; alpha is left alone.
pub fn invert_colors(frame: &mut FrameBuffer) {
    for p in frame.pixels_mut() {
        p[0] = 255 - p[0];
        p[1] = 255 - p[1];
        p[2] = 255 - p[2];
    }
}

/// Invert the frame when its polarity matches an enabled rule.
///
/// At most one rule fires: a frame darker than `threshold` can only trigger
/// the light-text rule, anything else only the dark-text rule.
pub fn auto_invert(
    frame: &mut FrameBuffer,
    threshold: u8,
    invert_light_text: bool,
    invert_dark_text: bool,
) -> Option<Inversion> {
    let mean = mean_luminance(frame);
    let fired = if mean < threshold as f32 {
        invert_light_text.then_some(Inversion::LightText)
    } else if mean > threshold as f32 {
        invert_dark_text.then_some(Inversion::DarkText)
    } else {
        None
    };

    if fired.is_some() {
        invert_colors(frame);
    }
    fired
}
