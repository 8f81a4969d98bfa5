//! The validation facade: normalize, consult the extension hook, dispatch,
//! and run the matched country's checksum.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checksum;
use crate::dispatch::{MatchResult, dispatch};
use crate::error::ConfigError;
use crate::normalize::normalize;
use crate::scheme::SchemeTable;

/// Caller-supplied predicate tried before the scheme table.
///
/// It receives the normalized input. Returning `true` accepts the number
/// outright; returning `false` falls through to the table.
#[derive(Clone)]
pub enum ExtraVat {
    /// An arbitrary predicate.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
    /// Accept inputs matching a regular expression (e.g. from configuration).
    Pattern(Regex),
}

impl ExtraVat {
    /// Wrap a closure or function as a hook.
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Compile a pattern hook.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidExtraVat` if `pattern` does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| ConfigError::InvalidExtraVat {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Evaluate the hook against a normalized number.
    pub fn accepts(&self, normalized: &str) -> bool {
        match self {
            Self::Predicate(f) => f(normalized),
            Self::Pattern(re) => re.is_match(normalized),
        }
    }
}

impl fmt::Debug for ExtraVat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("ExtraVat::Predicate(..)"),
            Self::Pattern(re) => write!(f, "ExtraVat::Pattern({:?})", re.as_str()),
        }
    }
}

/// Declarative validator configuration.
///
/// ```
/// let opts: vatin::ValidatorOptions = serde_json::from_str(r#"{"extra_vat": "^\\d{2}$"}"#).unwrap();
/// let validator = vatin::VatValidator::from_options(&opts).unwrap();
/// assert!(validator.is_valid(Some("11")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Regular expression for numbers accepted ahead of the scheme table.
    #[serde(default)]
    pub extra_vat: Option<String>,
}

/// Why a number was accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No value was given; nothing to check.
    Empty,
    /// The extension hook accepted the normalized input.
    AcceptedByHook,
    /// No scheme recognised the input.
    NoMatch,
    /// A scheme matched but its checksum failed.
    ChecksumFailed(MatchResult),
    /// A scheme matched and its checksum passed.
    Valid(MatchResult),
}

impl Verdict {
    /// Whether this verdict counts as a valid VAT number.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Empty | Self::AcceptedByHook | Self::Valid(_))
    }

    /// The recognised country and payload, if a scheme matched.
    pub fn matched(&self) -> Option<&MatchResult> {
        match self {
            Self::ChecksumFailed(m) | Self::Valid(m) => Some(m),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::AcceptedByHook => "accepted_by_hook",
            Self::NoMatch => "no_match",
            Self::ChecksumFailed(_) => "checksum_failed",
            Self::Valid(_) => "valid",
        }
    }
}

/// Validates VAT numbers against a scheme table and optional hook.
///
/// Cheap to clone and safe to share between threads; validation holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct VatValidator {
    table: Arc<SchemeTable>,
    extra_vat: Option<ExtraVat>,
}

impl Default for VatValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl VatValidator {
    /// A validator over the standard table with no hook.
    pub fn new() -> Self {
        Self {
            table: SchemeTable::standard_arc(),
            extra_vat: None,
        }
    }

    /// Start configuring a validator.
    pub fn builder() -> VatValidatorBuilder {
        VatValidatorBuilder::new()
    }

    /// Build a validator from declarative options over the standard table.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidExtraVat` if the hook pattern does not compile.
    pub fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Some(pattern) = &options.extra_vat {
            builder = builder.extra_vat_pattern(pattern);
        }
        builder.build()
    }

    /// The scheme table in use.
    pub fn table(&self) -> &SchemeTable {
        &self.table
    }

    /// Whether `value` is an acceptable VAT number.
    ///
    /// `None` and the empty string are accepted without any check: absence
    /// of a value is for the caller to police.
    pub fn is_valid(&self, value: Option<&str>) -> bool {
        self.verdict(value).is_accepted()
    }

    /// Validate `value` and report how the outcome was reached.
    pub fn verdict(&self, value: Option<&str>) -> Verdict {
        let verdict = self.evaluate(value);
        tracing::debug!(
            verdict = verdict.label(),
            country = verdict.matched().map(|m| m.country.code()),
            "vat number checked"
        );
        verdict
    }

    /// Recognise `value` without running any checksum.
    pub fn parse(&self, value: &str) -> Option<MatchResult> {
        dispatch(&self.table, &normalize(value))
    }

    fn evaluate(&self, value: Option<&str>) -> Verdict {
        let Some(raw) = value.filter(|v| !v.is_empty()) else {
            return Verdict::Empty;
        };

        let normalized = normalize(raw);
        tracing::trace!(%normalized, "normalized vat number");

        if let Some(hook) = &self.extra_vat {
            if hook.accepts(&normalized) {
                tracing::trace!(%normalized, "accepted by extra_vat hook");
                return Verdict::AcceptedByHook;
            }
        }

        let Some(matched) = dispatch(&self.table, &normalized) else {
            tracing::trace!(%normalized, "no scheme matched");
            return Verdict::NoMatch;
        };

        if checksum::check(matched.country, &matched.payload) {
            Verdict::Valid(matched)
        } else {
            Verdict::ChecksumFailed(matched)
        }
    }
}

/// Builder for [`VatValidator`].
///
/// Configuration problems are reported by [`build`](Self::build), never
/// during validation.
#[derive(Debug, Default)]
pub struct VatValidatorBuilder {
    table: Option<Arc<SchemeTable>>,
    extra_vat: Option<ExtraVat>,
    extra_vat_pattern: Option<String>,
}

impl VatValidatorBuilder {
    /// A builder over the standard table with no hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a substitute scheme table instead of the standard one.
    pub fn table(mut self, table: impl Into<Arc<SchemeTable>>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Install a predicate hook.
    pub fn extra_vat(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.extra_vat = Some(ExtraVat::predicate(f));
        self.extra_vat_pattern = None;
        self
    }

    /// Install a pattern hook; compiled by [`build`](Self::build).
    pub fn extra_vat_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_vat_pattern = Some(pattern.into());
        self.extra_vat = None;
        self
    }

    /// Finish configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidExtraVat` if a hook pattern does not compile.
    pub fn build(self) -> Result<VatValidator, ConfigError> {
        let extra_vat = match self.extra_vat_pattern {
            Some(pattern) => Some(ExtraVat::pattern(&pattern)?),
            None => self.extra_vat,
        };
        Ok(VatValidator {
            table: self.table.unwrap_or_else(SchemeTable::standard_arc),
            extra_vat,
        })
    }
}
