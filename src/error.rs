use thiserror::Error;

/// Errors raised while configuring a validator or building a scheme table.
///
/// These only ever surface from construction (`build()`, `from_options()`,
/// `SchemeDefinition::new`). Validating a number never produces an error;
/// a rejected number is a plain `false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The `extra_vat` hook pattern could not be compiled into a predicate.
    #[error("extra_vat hook is not usable: invalid pattern '{pattern}'")]
    InvalidExtraVat {
        /// The pattern text as supplied.
        pattern: String,
        /// Why the regex engine refused it.
        #[source]
        source: regex::Error,
    },

    /// A scheme shape did not compile.
    #[error("invalid scheme pattern for {country}: '{pattern}'")]
    InvalidSchemePattern {
        /// Country code the scheme was declared for.
        country: String,
        /// The full anchored pattern.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A scheme shape has no `payload` capture group to extract.
    #[error("scheme pattern for {country} has no 'payload' group: '{pattern}'")]
    MissingPayloadGroup {
        /// Country code the scheme was declared for.
        country: String,
        /// The full anchored pattern.
        pattern: String,
    },
}

/// Error returned when parsing a country code that has no scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown VAT country code '{0}'")]
pub struct UnknownCountry(pub String);
