//! Facade crate for the `vin-capture-*` workspace.
//!
//! This crate provides:
//! - re-exports of the pipeline crates under short module names
//! - (feature `image`) conversions between `image` buffers and
//!   [`core::FrameBuffer`]
//! - (feature `cli`) the `vin-capture` binary for offline preprocessing and
//!   correction checks
//!
//! ## Quickstart
//!
//! ```no_run
//! use vin_capture::preprocess::{preprocess, PreprocessConfig};
//! use vin_capture::scan::ScanBand;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::ImageReader::open("plate.jpg")?.decode()?.to_rgba8();
//! let frame = vin_capture::image::frame_from_rgba(&img)?;
//! let band = ScanBand::default().crop(&frame).ok_or("empty frame")?;
//! let normalized = preprocess(band, &PreprocessConfig::default());
//! vin_capture::image::to_rgba_image(&normalized)?.save("band.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `vin_capture::core`: `FrameBuffer`, gray planes, logger.
//! - `vin_capture::preprocess`: frame normalization stages and config.
//! - `vin_capture::vin`: VIN alphabet, correctors, check digit, `Vin`.
//! - `vin_capture::scan`: capture controller, recognition loops, collaborator traits.
//! - `vin_capture::image` (feature `image`): `image` crate interop.

pub use vin_capture_core as core;
pub use vin_capture_preprocess as preprocess;
pub use vin_capture_scan as scan;
pub use vin_capture_vin as vin;

pub use vin_capture_core::FrameBuffer;
pub use vin_capture_scan::{CaptureController, ScanConfig, ScanMode};
pub use vin_capture_vin::{aggressive_correct, correct_vin, Vin};

#[cfg(feature = "image")]
pub mod image;
