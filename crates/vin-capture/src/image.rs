//! Interop with the `image` crate.

use crate::core::{FrameBuffer, FrameError};
use ::image::{DynamicImage, RgbaImage};

/// Errors produced when moving pixels between `image` and [`FrameBuffer`].
#[derive(thiserror::Error, Debug)]
pub enum ImageBridgeError {
    #[error("image dimensions do not fit in memory (width={width}, height={height})")]
    Dimensions { width: usize, height: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

/// Copy an `image::RgbaImage` into a [`FrameBuffer`].
pub fn frame_from_rgba(img: &RgbaImage) -> Result<FrameBuffer, ImageBridgeError> {
    Ok(FrameBuffer::new(
        img.width() as usize,
        img.height() as usize,
        img.as_raw().clone(),
    )?)
}

/// Any decoded image, converted to RGBA8 first.
pub fn frame_from_dynamic(img: &DynamicImage) -> Result<FrameBuffer, ImageBridgeError> {
    frame_from_rgba(&img.to_rgba8())
}

pub fn to_rgba_image(frame: &FrameBuffer) -> Result<RgbaImage, ImageBridgeError> {
    let (width, height) = (frame.width(), frame.height());
    let dims = u32::try_from(width).ok().zip(u32::try_from(height).ok());
    let Some((w, h)) = dims else {
        return Err(ImageBridgeError::Dimensions { width, height });
    };
    RgbaImage::from_raw(w, h, frame.as_raw().to_vec())
        .ok_or(ImageBridgeError::Dimensions { width, height })
}

/// Decode an image file into a [`FrameBuffer`].
pub fn load_frame(path: impl AsRef<std::path::Path>) -> Result<FrameBuffer, ImageBridgeError> {
    let img = ::image::ImageReader::open(path)?.decode()?;
    frame_from_dynamic(&img)
}
