use crate::band::ScanBand;
use crate::device::{CaptureConstraints, OcrOptions};
use crate::error::ConfigIoError;
use crate::ocr_loop::ConfidenceGate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;
use vin_capture_preprocess::PreprocessConfig;

fn default_frame_interval_ms() -> u64 {
    16
}

/// Everything a capture session can be tuned with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub band: ScanBand,
    #[serde(default)]
    pub gate: ConfidenceGate,
    #[serde(default)]
    pub ocr: OcrOptions,
    #[serde(default)]
    pub constraints: CaptureConstraints,
    /// Pause between loop attempts when driven by [`crate::IntervalClock`].
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            band: ScanBand::default(),
            gate: ConfidenceGate::default(),
            ocr: OcrOptions::default(),
            constraints: CaptureConstraints::default(),
            frame_interval_ms: default_frame_interval_ms(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ScanConfig =
            serde_json::from_str(r#"{ "gate": { "min_confidence": 55.0 }, "frame_interval_ms": 33 }"#)
                .expect("parse");
        assert_eq!(cfg.gate.min_confidence, 55.0);
        assert_eq!(cfg.gate.min_length, 15);
        assert_eq!(cfg.frame_interval(), Duration::from_millis(33));
        assert_eq!(cfg.band, ScanBand::default());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");
        let mut cfg = ScanConfig::default();
        cfg.band.max_width_px = 320;
        cfg.preprocess.unsharp_mask = true;
        cfg.write_json(&path).expect("write");
        let back = ScanConfig::load_json(&path).expect("load");
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ScanConfig::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigIoError::Io(_)));
    }
}
