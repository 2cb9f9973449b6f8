//! ISO 3779 / 49 CFR 565 check character (position 9).

use crate::alphabet::{is_vin_char, VIN_LEN};

const WEIGHTS: [u32; VIN_LEN] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

fn transliterate(c: char) -> Option<u32> {
    let v = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => return None,
    };
    Some(v)
}

/// Expected check character for `vin`, or `None` if it is not 17 VIN
/// alphabet characters.
pub fn check_digit(vin: &str) -> Option<char> {
    if vin.len() != VIN_LEN {
        return None;
    }
    let mut sum = 0u32;
    for (c, w) in vin.chars().zip(WEIGHTS) {
        if !is_vin_char(c) {
            return None;
        }
        sum += transliterate(c)? * w;
    }
    match sum % 11 {
        10 => Some('X'),
        r => char::from_digit(r, 10),
    }
}

/// Whether position 9 holds the expected check character.
///
/// Only binding for North American VINs; most other regions leave the
/// position free.
pub fn has_valid_check_digit(vin: &str) -> bool {
    check_digit(vin).is_some_and(|expected| vin.chars().nth(8) == Some(expected))
}
