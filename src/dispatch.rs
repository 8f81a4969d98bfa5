//! Recognise which scheme a normalized number belongs to.

use serde::{Deserialize, Serialize};

use crate::scheme::{Country, SchemeTable};

/// Country and payload extracted from a recognised number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Jurisdiction whose scheme matched.
    pub country: Country,
    /// The substring handed to the checksum routine.
    pub payload: String,
}

/// Match a normalized number against `table`.
///
/// Only schemes whose prefix begins with the input's first two characters
/// are considered, in table order. The first scheme whose pattern matches
/// the whole input decides the result; later schemes are never tried, even
/// if the payload it yields goes on to fail its checksum.
pub fn dispatch(table: &SchemeTable, normalized: &str) -> Option<MatchResult> {
    let split = normalized
        .char_indices()
        .nth(2)
        .map_or(normalized.len(), |(i, _)| i);
    let candidate = &normalized[..split];

    table.with_prefix(candidate).find_map(|scheme| {
        scheme.extract(normalized).map(|payload| MatchResult {
            country: scheme.country(),
            payload: payload.to_string(),
        })
    })
}
