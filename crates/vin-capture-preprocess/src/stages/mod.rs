//! Individual preprocessing stages.
//!
//! Stages before grayscale conversion work on the RGBA [`FrameBuffer`];
//! everything after it works on a single [`GrayImage`] plane.
//!
//! [`FrameBuffer`]: vin_capture_core::FrameBuffer
//! [`GrayImage`]: vin_capture_core::GrayImage

mod binarize;
mod contrast;
mod grayscale;
mod invert;
mod morphology;
mod sharpen;
mod unsharp;

pub use binarize::soft_binarize;
pub use contrast::{apply_contrast, stretch_adaptive, stretch_global, stretch_value};
pub use grayscale::{to_gray, BLUE_CHANNEL_EDGE_FRAC};
pub use invert::{auto_invert, invert_colors, mean_luminance, Inversion};
pub use morphology::{dilate, erode, median3, thicken_strokes};
pub use sharpen::{convolve3x3_rgb, pre_sharpen, SHARPEN_KERNEL};
pub use unsharp::{gaussian_blur3, unsharp_mask};
