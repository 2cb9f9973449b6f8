use crate::device::{BarcodeDecoder, VideoSource};
use crate::error::DecodeError;
use crate::session::{ScanSession, SessionHandle};
use vin_capture_vin::{matches_general_pattern, Vin, VIN_LEN};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Normalize a decoded payload and keep it only if it is a VIN.
///
/// Payloads are trimmed and uppercased. Code 39 labels on imported vehicles
/// carry a leading `I`, which is dropped from 18-character payloads.
pub fn normalize_barcode_payload(raw: &str) -> Option<Vin> {
    let text = raw.trim().to_ascii_uppercase();
    let text = match text.strip_prefix('I') {
        Some(rest) if text.chars().count() == VIN_LEN + 1 => rest,
        _ => text.as_str(),
    };
    if matches_general_pattern(text) {
        Vin::new(text).ok()
    } else {
        None
    }
}

/// Barcode-mode recognition loop. Barcode reads are exact, so there is no
/// confidence gate and no registry lookup.
#[derive(Debug, Default)]
pub struct BarcodeLoop {
    attempts: u64,
}

impl BarcodeLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(attempt = self.attempts + 1))
    )]
    pub async fn step<D: BarcodeDecoder>(
        &mut self,
        decoder: &mut D,
        source: &mut dyn VideoSource,
        session: &mut ScanSession,
        live: &SessionHandle,
    ) -> Option<Vin> {
        if !live.is_live() {
            return None;
        }
        self.attempts += 1;

        let decoded = decoder.decode_once(source).await;
        if !live.is_live() {
            return None;
        }
        match decoded {
            Ok(symbol) => match normalize_barcode_payload(&symbol.text) {
                Some(vin) => {
                    session.log(format!("barcode: {vin}"));
                    Some(vin)
                }
                None => {
                    session.log(format!("barcode is not a VIN: {}", symbol.text.trim()));
                    None
                }
            },
            Err(DecodeError::NotFound) => None,
            Err(e) => {
                session.log(format!("barcode error: {e}"));
                None
            }
        }
    }
}
