//! Per-country checksum routines.
//!
//! Each routine is a pure function of the payload extracted by the
//! dispatcher. The mapping from [`Country`] to routine is an exhaustive
//! `match`, so every scheme country has exactly one handler.
//!
//! Routines never panic: a payload with an unexpected length or character
//! class simply fails its check. This matters for substitute tables whose
//! shapes may not line up with the arithmetic below.

mod routines;

use crate::scheme::Country;

/// A checksum routine over an extracted payload.
pub type ChecksumFn = fn(&str) -> bool;

/// The checksum routine for `country`.
pub fn routine_for(country: Country) -> ChecksumFn {
    match country {
        Country::At => routines::at,
        Country::Be => routines::be,
        Country::Bg => routines::bg,
        Country::Che => routines::che,
        Country::Cy => routines::cy,
        Country::Cz => routines::cz,
        Country::De => routines::de,
        Country::Dk => routines::dk,
        Country::Ee => routines::ee,
        Country::El => routines::el,
        Country::Es => routines::es,
        Country::Eu => routines::format_only,
        Country::Fi => routines::fi,
        Country::Fr => routines::fr,
        Country::Gb => routines::gb,
        Country::Hr => routines::hr,
        Country::Hu => routines::hu,
        Country::Ie => routines::ie,
        Country::It => routines::it,
        Country::Lt => routines::lt,
        Country::Lu => routines::lu,
        Country::Lv => routines::lv,
        Country::Mt => routines::mt,
        Country::Nl => routines::nl,
        Country::No => routines::no,
        Country::Pl => routines::pl,
        Country::Pt => routines::pt,
        Country::Ro => routines::ro,
        Country::Rs => routines::rs,
        Country::Ru => routines::ru,
        Country::Se => routines::se,
        Country::Si => routines::si,
        Country::Sk => routines::sk,
    }
}

/// Run `country`'s checksum over `payload`.
///
/// Non-ASCII payloads always fail; no scheme admits them.
pub fn check(country: Country, payload: &str) -> bool {
    payload.is_ascii() && routine_for(country)(payload)
}

/// Like [`check`], keyed by a textual country code.
///
/// Codes without a scheme fail rather than pass.
pub fn check_code(code: &str, payload: &str) -> bool {
    code.parse::<Country>()
        .is_ok_and(|country| check(country, payload))
}

// ── shared arithmetic ───────────────────────────────────────────────────────

/// Digit values of `s`, or `None` if any byte is not an ASCII digit.
fn digits(s: &str) -> Option<Vec<u64>> {
    s.bytes()
        .map(|b| b.is_ascii_digit().then(|| u64::from(b - b'0')))
        .collect()
}

/// Digit values of `s` if it is exactly `len` ASCII digits.
fn digits_exact(s: &str, len: usize) -> Option<Vec<u64>> {
    if s.len() != len {
        return None;
    }
    digits(s)
}

/// Decimal value of an all-digit string that fits in a `u64`.
fn number(s: &str) -> Option<u64> {
    if s.is_empty() || s.len() > 19 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn weighted_sum(digits: &[u64], weights: &[u64]) -> u64 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}

/// Weighted sum where two-digit products contribute the sum of their digits.
fn folded_sum(digits: &[u64], weights: &[u64]) -> u64 {
    digits
        .iter()
        .zip(weights)
        .map(|(d, w)| {
            let product = d * w;
            if product > 9 {
                product / 10 + product % 10
            } else {
                product
            }
        })
        .sum()
}

/// ISO 7064 MOD 11-10 running product after consuming `digits`.
fn iso7064_product(digits: &[u64]) -> u64 {
    digits.iter().fold(10, |product, d| {
        let sum = match (d + product) % 10 {
            0 => 10,
            s => s,
        };
        (2 * sum) % 11
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_country_has_a_routine() {
        // a payload that no real scheme accepts must fail everywhere except EU
        for country in Country::ALL {
            let accepted = check(country, "");
            assert_eq!(accepted, country == Country::Eu, "{country}");
        }
    }

    #[test]
    fn non_ascii_payload_fails() {
        assert!(!check(Country::Eu, "12345678９"));
        assert!(!check(Country::Ie, "8Ä49289F"));
    }

    #[test]
    fn check_code_known_and_unknown() {
        assert!(check_code("AT", "37675002"));
        assert!(check_code("at", "37675002"));
        assert!(!check_code("AT", "37675003"));
        assert!(!check_code("XX", "37675002"));
        assert!(!check_code("", "37675002"));
    }

    #[test]
    fn digits_rejects_non_digits() {
        assert_eq!(digits("0129"), Some(vec![0, 1, 2, 9]));
        assert_eq!(digits("12a"), None);
        assert_eq!(digits_exact("123", 4), None);
    }

    #[test]
    fn number_rejects_signs_and_overflow() {
        assert_eq!(number("007"), Some(7));
        assert_eq!(number("+7"), None);
        assert_eq!(number(""), None);
        assert_eq!(number("99999999999999999999"), None);
    }

    #[test]
    fn folded_sum_adds_product_digits() {
        // 6*2 = 12 -> 1 + 2
        assert_eq!(folded_sum(&[6], &[2]), 3);
        assert_eq!(folded_sum(&[3, 7, 6, 7, 5, 0, 0], &[1, 2, 1, 2, 1, 2, 1]), 24);
    }

    #[test]
    fn iso7064_seed() {
        assert_eq!(iso7064_product(&[]), 10);
        // (0 + 10) % 10 = 0 -> 10, 2 * 10 % 11 = 9
        assert_eq!(iso7064_product(&[0]), 9);
    }
}
