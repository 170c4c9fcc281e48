//! Identifier canonicalization for reliable directory matching
//!
//! Vehicle numbers arrive as free text (typed or transcribed) with
//! inconsistent casing, stray whitespace and the common O/0 confusion.
//! The same rules are applied to the directory table on load and to
//! runtime input, so lookups always compare canonical forms.

/// Canonicalize a vehicle number: uppercase, strip all whitespace
/// (interior included), rewrite every letter 'O' to digit '0'.
///
/// Pure and total; empty input yields an empty string.
pub fn normalize_vehicle(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c == 'O' {
                '0'
            } else {
                c
            }
        })
        .collect()
}

/// Canonicalize a flat identifier: uppercase and strip whitespace.
///
/// No O→0 rewrite here: flat numbers legitimately contain the letter O
/// in wing names. A bare numeric string is prefixed with "F" so "101"
/// and "F101" refer to the same flat.
pub fn normalize_flat(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit()) {
        format!("F{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_vehicle_canonical() {
        assert_eq!(normalize_vehicle("mh01 ao 1234"), "MH01A01234");
    }

    #[test]
    fn test_normalize_vehicle_interior_whitespace() {
        assert_eq!(normalize_vehicle("  MH 12\tAB 001 "), "MH12AB001");
    }

    #[test]
    fn test_normalize_vehicle_o_to_zero() {
        assert_eq!(normalize_vehicle("OO00oo"), "000000");
    }

    #[test]
    fn test_normalize_vehicle_empty() {
        assert_eq!(normalize_vehicle(""), "");
        assert_eq!(normalize_vehicle("   "), "");
    }

    #[test]
    fn test_normalize_flat_keeps_letter_o() {
        assert_eq!(normalize_flat(" o-101 "), "O-101");
    }

    #[test]
    fn test_normalize_flat_bare_number_gets_prefix() {
        assert_eq!(normalize_flat("101"), "F101");
        assert_eq!(normalize_flat(" 7 "), "F7");
    }

    #[test]
    fn test_normalize_flat_already_prefixed() {
        assert_eq!(normalize_flat("f101"), "F101");
    }

    #[test]
    fn test_normalize_flat_empty() {
        assert_eq!(normalize_flat(""), "");
    }
}
