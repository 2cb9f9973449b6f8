/// Length of a modern (post-1981) VIN.
pub const VIN_LEN: usize = 17;

/// `0-9A-HJ-NPR-Z`: digits and capitals without `I`, `O` and `Q`.
#[inline]
pub fn is_vin_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='H' | 'J'..='N' | 'P' | 'R'..='Z')
}

/// Whether `c` can open a WMI (region/country code).
///
/// `0` is unassigned; `I`, `O`, `Q` are outside the alphabet altogether.
#[inline]
pub fn is_country_code(c: char) -> bool {
    c != '0' && is_vin_char(c)
}

/// Exactly 17 characters from the VIN alphabet.
pub fn matches_general_pattern(s: &str) -> bool {
    s.len() == VIN_LEN && s.chars().all(is_vin_char)
}

/// Second character is a letter (manufacturer position).
pub fn matches_manufacturer_position(s: &str) -> bool {
    s.chars().nth(1).is_some_and(|c| c.is_ascii_uppercase())
}

/// General pattern, first character `1`-`5` (North American region) and an
/// alphabetic manufacturer position.
pub fn matches_north_american_pattern(s: &str) -> bool {
    matches_general_pattern(s)
        && s.starts_with(['1', '2', '3', '4', '5'])
        && matches_manufacturer_position(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_excludes_i_o_q() {
        for c in ['I', 'O', 'Q', 'a', '-', ' '] {
            assert!(!is_vin_char(c), "{c:?} must be rejected");
        }
        let accepted = ('0'..='9').chain('A'..='Z').filter(|&c| is_vin_char(c)).count();
        assert_eq!(accepted, 33);
    }

    #[test]
    fn patterns() {
        assert!(matches_general_pattern("1HGCM82633A004352"));
        assert!(matches_north_american_pattern("1HGCM82633A004352"));

        // European WMI: general only.
        assert!(matches_general_pattern("WVWZZZ1JZXW000001"));
        assert!(!matches_north_american_pattern("WVWZZZ1JZXW000001"));

        // Numeric manufacturer position.
        assert!(!matches_north_american_pattern("11111111111111111"));

        assert!(!matches_general_pattern("1HGCM82633A00435"));
        assert!(!matches_general_pattern("1HGCM82633A0O4352"));
    }
}
