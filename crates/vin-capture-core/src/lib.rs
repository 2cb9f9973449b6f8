//! Core types for the VIN capture pipeline.
//!
//! This crate is intentionally small. It owns the pixel containers every
//! other stage speaks (`FrameBuffer` for RGBA camera frames, `GrayImage` for
//! single-channel working planes) and the process logger. It does *not*
//! depend on any camera, OCR engine or image codec.

mod frame;
mod gray;
mod logger;

pub use frame::{FrameBuffer, FrameError, Rect, CHANNELS};
pub use gray::{GrayImage, GrayImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, init_with_levels, SESSION_TARGET};
