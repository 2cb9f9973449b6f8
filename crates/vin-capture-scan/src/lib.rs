//! VIN capture session: camera lifecycle plus the two recognition loops.
//!
//! A [`CaptureController`] owns at most one live [`ScanSession`]. Opening a
//! session acquires the camera, reads its torch capability and starts the
//! loop for the requested [`ScanMode`]:
//!
//! - `Text`: crop the scan band, normalize it, run OCR, gate on confidence,
//!   correct, confirm with the vehicle registry;
//! - `Barcode`: ask the decoder for a symbol on the live source and accept
//!   the first payload shaped like a VIN.
//!
//! The loop never blocks. Each [`CaptureController::step`] performs one
//! attempt and returns; a [`FrameClock`] (or the host's own frame callback)
//! decides when the next one runs. Per-attempt failures are logged to the
//! session and retried. Only a camera failure at open time ends a session
//! with an error.
//!
//! Camera, OCR engine, barcode decoder and registry are collaborators behind
//! the traits in [`device`]; the crate ships no implementation of them.

mod band;
mod barcode_loop;
mod clock;
mod config;
mod controller;
pub mod device;
mod error;
mod ocr_loop;
mod session;

pub use band::ScanBand;
pub use barcode_loop::{normalize_barcode_payload, BarcodeLoop};
pub use clock::{FrameClock, IntervalClock, YieldClock};
pub use config::ScanConfig;
pub use controller::{CaptureController, Collaborators, NoopObserver, ScanObserver, StepOutcome};
pub use error::{CaptureError, ConfigIoError, DecodeError, RecognizeError, RegistryError, ScanError};
pub use ocr_loop::{ConfidenceGate, GateVerdict, OcrLoop};
pub use session::{LogEntry, ScanMode, ScanSession, ScanStatus, SessionHandle};
