use crate::band::ScanBand;
use crate::device::{OcrHandle, VehicleRegistry, VideoSource};
use crate::session::{ScanSession, SessionHandle};
use serde::{Deserialize, Serialize};
use vin_capture_preprocess::Preprocessor;
use vin_capture_vin::{aggressive_correct, correct_vin, matches_general_pattern, Vin, VIN_LEN};

#[cfg(feature = "tracing")]
use tracing::instrument;

fn default_min_confidence() -> f32 {
    40.0
}

fn default_min_length() -> usize {
    15
}

/// Thresholds an OCR reading must clear before it is worth a registry call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceGate {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Minimum length of the aggressively corrected text.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            min_length: default_min_length(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVerdict {
    LowConfidence,
    TooShort,
    /// Long enough to be interesting, but not a 17-character VIN.
    NotVinShaped,
    Pass,
}

impl ConfidenceGate {
    /// Judge an aggressively corrected reading. A NaN confidence never
    /// clears the threshold.
    pub fn evaluate(&self, corrected: &str, confidence: f32) -> GateVerdict {
        let len = corrected.chars().count();
        if confidence.is_nan() || confidence < self.min_confidence {
            GateVerdict::LowConfidence
        } else if len < self.min_length {
            GateVerdict::TooShort
        } else if len != VIN_LEN || !matches_general_pattern(corrected) {
            GateVerdict::NotVinShaped
        } else {
            GateVerdict::Pass
        }
    }
}

/// Text-mode recognition loop bound to one initialized recognizer.
///
/// Each [`OcrLoop::step`] is one attempt: crop, normalize, recognize, gate,
/// correct, confirm with the registry.
#[derive(Debug)]
pub struct OcrLoop<H> {
    handle: Option<H>,
    band: ScanBand,
    preprocessor: Preprocessor,
    gate: ConfidenceGate,
    attempts: u64,
}

impl<H: OcrHandle> OcrLoop<H> {
    pub fn new(handle: H, band: ScanBand, preprocessor: Preprocessor, gate: ConfidenceGate) -> Self {
        Self {
            handle: Some(handle),
            band,
            preprocessor,
            gate,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Run one attempt. `Some` only for a registry-confirmed VIN.
    ///
    /// Every failure is logged to `session` and reported as `None`; once
    /// `live` is closed the attempt stops without touching the session.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(attempt = self.attempts + 1))
    )]
    pub async fn step<S, R>(
        &mut self,
        source: &mut S,
        registry: &R,
        session: &mut ScanSession,
        live: &SessionHandle,
    ) -> Option<Vin>
    where
        S: VideoSource + ?Sized,
        R: VehicleRegistry,
    {
        if !live.is_live() {
            return None;
        }
        let handle = self.handle.as_mut()?;
        self.attempts += 1;

        let Some(frame) = source.current_frame() else {
            session.log("no frame available yet");
            return None;
        };
        let Some(band) = self.band.crop(&frame) else {
            session.log("frame too small for the scan band");
            return None;
        };
        let prepared = self.preprocessor.run(band);

        let reading = handle.recognize(&prepared).await;
        if !live.is_live() {
            return None;
        }
        let reading = match reading {
            Ok(r) => r,
            Err(e) => {
                session.log(format!("OCR error: {e}"));
                return None;
            }
        };

        let text = aggressive_correct(&reading.text);
        session.log(format!("OCR: {text} ({:.0}%)", reading.confidence));
        match self.gate.evaluate(&text, reading.confidence) {
            GateVerdict::Pass => {}
            verdict => {
                log::trace!("attempt {} gated: {verdict:?}", self.attempts);
                return None;
            }
        }

        let candidate = correct_vin(&text);
        let Some(vin) = candidate.to_vin() else {
            session.log(format!("rejected malformed candidate {}", candidate.text));
            return None;
        };
        if !candidate.check_digit_valid {
            log::debug!("{vin}: check digit does not match");
        }

        session.log(format!("validating {vin}"));
        let verdict = registry.validate(vin.as_str()).await;
        if !live.is_live() {
            return None;
        }
        match verdict {
            Ok(true) => {
                session.log(format!("VIN accepted: {vin}"));
                Some(vin)
            }
            Ok(false) => {
                session.log(format!("registry rejected {vin}"));
                None
            }
            Err(e) => {
                session.log(format!("validation failed: {e}"));
                None
            }
        }
    }

    /// Release the recognizer. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.dispose();
        }
    }
}
