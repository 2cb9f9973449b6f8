//! Collaborator interfaces consumed by the capture controller.
//!
//! Implementations live in the host application (browser media APIs, a
//! native camera stack, Tesseract, a barcode library, an HTTP registry).
//! Every method that talks to hardware or the network is `async`; the
//! release paths (`stop_tracks`, `dispose`, `reset`) are synchronous so the
//! controller can run them from `Drop`.

use crate::error::{CaptureError, DecodeError, RecognizeError, RegistryError};
use serde::{Deserialize, Serialize};
use vin_capture_core::FrameBuffer;
use vin_capture_vin::is_vin_char;

/// Which camera to ask for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Rear camera on phones and tablets.
    #[default]
    Environment,
    User,
}

/// Constraints passed to [`CameraSource::acquire`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    #[serde(default)]
    pub facing: Facing,
    #[serde(default = "default_ideal_width")]
    pub ideal_width: u32,
    #[serde(default = "default_ideal_height")]
    pub ideal_height: u32,
}

fn default_ideal_width() -> u32 {
    1280
}

fn default_ideal_height() -> u32 {
    720
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::default(),
            ideal_width: default_ideal_width(),
            ideal_height: default_ideal_height(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamCapabilities {
    pub torch: bool,
}

/// Anything that can hand out the current video frame.
pub trait VideoSource {
    /// Current full frame, or `None` while the source is still warming up.
    fn current_frame(&mut self) -> Option<FrameBuffer>;
}

/// A live camera stream.
#[allow(async_fn_in_trait)]
pub trait CameraStream: VideoSource {
    fn capabilities(&self) -> StreamCapabilities;

    /// Apply the torch constraint.
    async fn apply_torch(&mut self, on: bool) -> Result<(), CaptureError>;

    /// Stop every track of the stream. Must tolerate repeated calls.
    fn stop_tracks(&mut self);
}

/// Grants camera streams.
#[allow(async_fn_in_trait)]
pub trait CameraSource {
    type Stream: CameraStream;

    async fn acquire(
        &mut self,
        constraints: &CaptureConstraints,
    ) -> Result<Self::Stream, CaptureError>;
}

/// Recognizer options sent at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrOptions {
    #[serde(default = "default_whitelist")]
    pub whitelist_alphabet: String,
    #[serde(default = "default_true")]
    pub single_line_mode: bool,
    #[serde(default)]
    pub preserve_spacing: bool,
}

fn default_whitelist() -> String {
    ('0'..='9').chain('A'..='Z').filter(|&c| is_vin_char(c)).collect()
}

fn default_true() -> bool {
    true
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            whitelist_alphabet: default_whitelist(),
            single_line_mode: true,
            preserve_spacing: false,
        }
    }
}

/// One OCR result.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrText {
    pub text: String,
    /// Engine self-reported certainty, `0.0..=100.0`.
    pub confidence: f32,
}

/// Creates recognizer handles.
#[allow(async_fn_in_trait)]
pub trait OcrEngine {
    type Handle: OcrHandle;

    async fn initialize(&mut self, options: &OcrOptions) -> Result<Self::Handle, RecognizeError>;
}

/// An initialized recognizer bound to one session.
#[allow(async_fn_in_trait)]
pub trait OcrHandle {
    async fn recognize(&mut self, frame: &FrameBuffer) -> Result<OcrText, RecognizeError>;

    /// Release engine resources. Called exactly once per handle.
    fn dispose(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarcodeText {
    pub text: String,
}

/// Decodes barcodes straight off a live source.
#[allow(async_fn_in_trait)]
pub trait BarcodeDecoder {
    async fn decode_once(
        &mut self,
        source: &mut dyn VideoSource,
    ) -> Result<BarcodeText, DecodeError>;

    /// Drop any per-stream decoder state.
    fn reset(&mut self);
}

/// Authoritative acceptance check for OCR-sourced VINs.
#[allow(async_fn_in_trait)]
pub trait VehicleRegistry {
    async fn validate(&self, candidate_vin: &str) -> Result<bool, RegistryError>;
}
