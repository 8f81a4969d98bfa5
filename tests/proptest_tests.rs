//! Property-based tests for normalization, dispatch and the facade.
//!
//! Run with: `cargo test --test proptest_tests`

use proptest::prelude::*;
use vatin::*;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Strings drawn from letters, digits, separators and a little punctuation.
fn arb_raw() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .\\-\t*+()/äöüßÉ]{0,24}"
}

/// Numbers known to pass their checksum.
fn arb_valid_number() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "ATU37675002",
        "BE0776091951",
        "CHE116281710",
        "DE136695976",
        "ESX1234567L",
        "FR40303265045",
        "GB980780684",
        "IE8Z49289F",
        "NL004495445B01",
        "SE556188840401",
    ])
}

/// Separators to splice into a number.
fn arb_separators() -> impl Strategy<Value = String> {
    "[ .\\-]{0,3}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in arb_raw()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_any_string(s in "\\PC{0,32}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_has_no_separators(s in arb_raw()) {
        let n = normalize(&s);
        prop_assert!(!n.chars().any(|c| c.is_whitespace() || c == '-' || c == '.'));
    }

    #[test]
    fn validation_never_panics(s in "\\PC{0,40}") {
        let v = VatValidator::new();
        let _ = v.is_valid(Some(&s));
        let _ = v.parse(&s);
    }

    #[test]
    fn separators_and_case_do_not_matter(
        number in arb_valid_number(),
        split in 0usize..11,
        sep in arb_separators(),
        lower in any::<bool>(),
    ) {
        let split = split.min(number.len());
        let mut raw = format!("{}{}{}", &number[..split], sep, &number[split..]);
        if lower {
            raw = raw.to_lowercase();
        }
        prop_assert!(is_valid(Some(&raw)), "{} should be valid", raw);
    }

    #[test]
    fn hook_precedence(s in "[A-Z0-9]{1,16}") {
        let v = VatValidator::builder().extra_vat(|_| true).build().unwrap();
        prop_assert!(v.is_valid(Some(&s)));
    }

    #[test]
    fn unknown_prefix_rejected(
        prefix in "[A-Z]{2}".prop_filter("no scheme prefix", |p| {
            SchemeTable::standard().with_prefix(p).next().is_none()
        }),
        rest in "[A-Z0-9]{0,14}",
    ) {
        let raw = format!("{prefix}{rest}");
        prop_assert_eq!(VatValidator::new().verdict(Some(&raw)), Verdict::NoMatch);
    }

    #[test]
    fn verdict_agrees_with_is_valid(s in arb_raw()) {
        let v = VatValidator::new();
        prop_assert_eq!(v.verdict(Some(&s)).is_accepted(), v.is_valid(Some(&s)));
    }

    #[test]
    fn eu_accepts_any_nine_digits(digits in "[0-9]{9}") {
        let raw = format!("EU{digits}");
        prop_assert!(is_valid(Some(&raw)));
    }

    #[test]
    fn changing_at_check_digit_fails(d in 0u8..10) {
        let raw = format!("ATU3767500{d}");
        prop_assert_eq!(is_valid(Some(&raw)), d == 2);
    }
}
