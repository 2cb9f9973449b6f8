use crate::alphabet::{is_vin_char, VIN_LEN};

#[inline]
fn digit_lookalike(c: char) -> char {
    match c {
        'O' => '0',
        'I' => '1',
        'S' => '5',
        'Z' => '2',
        'B' => '8',
        'G' => '6',
        other => other,
    }
}

/// Position-blind OCR cleanup used for confidence gating.
///
/// Whitespace is dropped, text is uppercased, and `O I l S Z B G` become
/// `0 1 1 5 2 8 6` everywhere. Lowercase `l` maps to `1` but uppercase `L`
/// is kept. If the result contains a run of at least 17 VIN-alphabet
/// characters, the first 17 of that run are returned; otherwise the whole
/// cleaned string is.
pub fn aggressive_correct(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'l' => '1',
            c => digit_lookalike(c.to_ascii_uppercase()),
        })
        .collect();

    first_vin_run(&cleaned)
        .map(str::to_owned)
        .unwrap_or(cleaned)
}

fn first_vin_run(s: &str) -> Option<&str> {
    let mut start = 0;
    let mut len = 0;
    for (i, c) in s.char_indices() {
        if is_vin_char(c) {
            if len == 0 {
                start = i;
            }
            len += 1;
            if len == VIN_LEN {
                return Some(&s[start..i + c.len_utf8()]);
            }
        } else {
            len = 0;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_lookalikes_everywhere() {
        assert_eq!(aggressive_correct("1G1JC5444R7252367"), "161JC5444R7252367");
        assert_eq!(aggressive_correct("SZBGOI"), "528601");
    }

    #[test]
    fn strips_whitespace_and_uppercases() {
        assert_eq!(aggressive_correct(" 1hgcm8 2633a004352\n"), "1H6CM82633A004352");
        assert_eq!(aggressive_correct("l"), "1");
    }

    #[test]
    fn extracts_first_full_run() {
        assert_eq!(
            aggressive_correct("VIN:1HGCM82633A004352*"),
            "1H6CM82633A004352"
        );
        assert_eq!(
            aggressive_correct("XX-1HGCM82633A00435277"),
            "1H6CM82633A004352"
        );
    }

    #[test]
    fn short_text_is_returned_cleaned() {
        assert_eq!(aggressive_correct("vin: 12Q4"), "V1N:12Q4");
    }
}
