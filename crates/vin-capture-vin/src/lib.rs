//! VIN correction and validation.
//!
//! Two correctors coexist on purpose:
//! - [`aggressive_correct`] rewrites every digit look-alike anywhere in the
//!   string. The OCR loop uses it to decide whether a recognition is worth a
//!   registry lookup.
//! - [`correct_vin`] is position-aware: it repairs known WMI misreads, never
//!   substitutes inside the first two positions and reports which pattern the
//!   result satisfies. Its output is what gets accepted and displayed.
//!
//! The two disagree (for example on `G` at position 1) and are kept
//! separate so acceptance behaviour cannot drift when one of them changes.

mod aggressive;
mod alphabet;
mod check_digit;
mod positional;
mod vin;

pub use aggressive::aggressive_correct;
pub use alphabet::{
    is_country_code, is_vin_char, matches_general_pattern, matches_manufacturer_position,
    matches_north_american_pattern, VIN_LEN,
};
pub use check_digit::{check_digit, has_valid_check_digit};
pub use positional::{correct_vin, repair_wmi, CandidateVin, Selection};
pub use vin::{Vin, VinError};
