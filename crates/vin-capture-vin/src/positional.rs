use crate::alphabet::{
    is_country_code, is_vin_char, matches_general_pattern, matches_north_american_pattern,
    VIN_LEN,
};
use crate::check_digit::has_valid_check_digit;
use crate::vin::Vin;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Prefix misreads seen often enough to rewrite outright.
///
/// `R1G1`: the plate's left border is read as an `R` in front of GM's `1G1`.
const KNOWN_WMI_MISREADS: &[(&str, &str)] = &[("R1G1", "1G1")];

/// Which of the candidates [`correct_vin`] settled on, in preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    NorthAmericanCorrected,
    NorthAmericanOriginal,
    GeneralCorrected,
    GeneralOriginal,
    /// Nothing matched; the cleaned input is returned as a last resort.
    Unmatched,
}

/// Result of the position-aware corrector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateVin {
    pub text: String,
    pub matches_general_pattern: bool,
    pub matches_north_american_pattern: bool,
    /// Informational only: non North American VINs rarely carry one.
    pub check_digit_valid: bool,
    pub selection: Selection,
}

impl CandidateVin {
    fn new(text: String, selection: Selection) -> Self {
        Self {
            matches_general_pattern: matches_general_pattern(&text),
            matches_north_american_pattern: matches_north_american_pattern(&text),
            check_digit_valid: has_valid_check_digit(&text),
            text,
            selection,
        }
    }

    /// The typed VIN, when the candidate satisfies the general pattern.
    pub fn to_vin(&self) -> Option<Vin> {
        if self.matches_general_pattern {
            Vin::new(self.text.clone()).ok()
        } else {
            None
        }
    }
}

/// Rewrite the first characters of `cleaned` when they match a known misread.
///
/// Applied in order:
/// 1. table of known malformed prefixes (`R1G1` -> `1G1`);
/// 2. an invalid first character that is a digit look-alike (`I` -> `1`,
///    `O`/`Q` -> `0`);
/// 3. a digit right after a leading `1` becomes `G` (`16`/`11` -> `1G`).
pub fn repair_wmi(cleaned: &str) -> String {
    let mut s = cleaned.to_owned();
    for (bad, good) in KNOWN_WMI_MISREADS {
        if let Some(rest) = s.strip_prefix(bad) {
            log::debug!("repairing WMI prefix {bad} -> {good}");
            s = format!("{good}{rest}");
            break;
        }
    }

    let mut chars: Vec<char> = s.chars().collect();
    if let Some(first) = chars.first_mut() {
        if !is_country_code(*first) {
            match *first {
                'I' => *first = '1',
                'O' | 'Q' => *first = '0',
                _ => {}
            }
        }
    }
    if chars.len() >= 2 && chars[0] == '1' && chars[1].is_ascii_digit() {
        chars[1] = 'G';
    }
    chars.into_iter().collect()
}

/// Letters that can never appear in a VIN, read back as the digit they
/// resemble. Positions 0 and 1 are exempt.
#[inline]
fn substitute(c: char) -> char {
    match c {
        'I' => '1',
        'O' | 'Q' => '0',
        other => other,
    }
}

/// Position-aware correction for acceptance and display.
///
/// The input is uppercased and reduced to ASCII letters and digits (`I`,
/// `O`, `Q` survive this step so they can be substituted), then the WMI is
/// repaired. That repaired string is the *original*; the *corrected* string
/// additionally substitutes `I O Q` at positions 2-16. The first match in
/// this order wins: North American corrected, North American original,
/// general corrected, general original, else the original as-is.
#[cfg_attr(feature = "tracing", instrument(level = "debug", ret))]
pub fn correct_vin(raw: &str) -> CandidateVin {
    let cleaned: String = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let original = repair_wmi(&cleaned);
    let corrected: String = original
        .chars()
        .enumerate()
        .map(|(i, c)| if (2..VIN_LEN).contains(&i) { substitute(c) } else { c })
        .collect();

    let (text, selection) = if matches_north_american_pattern(&corrected) {
        (corrected, Selection::NorthAmericanCorrected)
    } else if matches_north_american_pattern(&original) {
        (original, Selection::NorthAmericanOriginal)
    } else if matches_general_pattern(&corrected) {
        (corrected, Selection::GeneralCorrected)
    } else if matches_general_pattern(&original) {
        (original, Selection::GeneralOriginal)
    } else {
        (original, Selection::Unmatched)
    };

    debug_assert!(
        selection == Selection::Unmatched || text.chars().all(is_vin_char),
        "matched candidate outside the VIN alphabet"
    );
    CandidateVin::new(text, selection)
}
