//! # vatin
//!
//! Offline recognition and checksum verification of VAT numbers.
//!
//! A number is normalized (separators stripped, upper-cased), matched
//! against an ordered table of national schemes, and the extracted payload
//! is run through that country's checksum. Nothing here contacts a tax
//! authority: a valid result means the number is well-formed and internally
//! consistent, not that it is registered.
//!
//! ## Quick Start
//!
//! ```rust
//! use vatin::{Country, VatValidator, Verdict};
//!
//! let validator = VatValidator::new();
//! assert!(validator.is_valid(Some("ATU37675002")));
//! assert!(validator.is_valid(Some("  at u 37675002 ")));
//! assert!(!validator.is_valid(Some("ATU37675003")));
//!
//! // Absent values are not this crate's concern.
//! assert!(validator.is_valid(None));
//!
//! match validator.verdict(Some("DE136695976")) {
//!     Verdict::Valid(m) => assert_eq!(m.country, Country::De),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Extension hook
//!
//! ```rust
//! let validator = vatin::VatValidator::builder()
//!     .extra_vat(|normalized| normalized.len() == 2 && normalized.bytes().all(|b| b.is_ascii_digit()))
//!     .build()
//!     .unwrap();
//! assert!(validator.is_valid(Some("11")));
//! ```
//!
//! ## Supported schemes
//!
//! AT, BE, BG, CHE, CY, CZ, DE, DK, EE, EL, ES, EU, FI, FR, GB, HR, HU, IE,
//! IT, LT, LU, LV, MT, NL, NO, PL, PT, RO, RS, RU, SE, SI, SK.

pub mod checksum;
pub mod dispatch;
mod error;
pub mod normalize;
pub mod scheme;
mod validator;

pub use checksum::{check, check_code};
pub use dispatch::{MatchResult, dispatch};
pub use error::{ConfigError, UnknownCountry};
pub use normalize::normalize;
pub use scheme::{Country, SchemeDefinition, SchemeTable};
pub use validator::{ExtraVat, ValidatorOptions, VatValidator, VatValidatorBuilder, Verdict};

/// Validate against the standard table with no extension hook.
///
/// `None` and `""` are accepted; see [`VatValidator::is_valid`].
pub fn is_valid(value: Option<&str>) -> bool {
    VatValidator::new().is_valid(value)
}
