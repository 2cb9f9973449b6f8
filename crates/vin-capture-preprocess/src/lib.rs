//! Frame normalization ahead of VIN text recognition.
//!
//! [`preprocess`] runs a fixed sequence of stages over an RGBA scan-band
//! crop and returns an opaque gray frame ready for the OCR engine:
//!
//! 1. auto-invert on mean luminance,
//! 2. optional 3x3 pre-sharpen,
//! 3. grayscale conversion (average, blue-channel or weighted luminosity),
//! 4. adaptive or global contrast stretch,
//! 5. optional unsharp mask,
//! 6. dilate, dilate, erode,
//! 7. optional double 3x3 median,
//! 8. soft binarization (dark and light tails only).
//!
//! Every stage is a pure function over pixel buffers and is exported for
//! callers that want to compose their own sequence. All tunables live in
//! [`PreprocessConfig`]; nothing is read from global state.

mod params;
mod pipeline;
pub mod stages;

pub use params::{
    BlueEmphasis, ContrastLevel, GrayscaleMethod, KernelSize, PreprocessConfig,
};
pub use pipeline::{preprocess, Preprocessor};
