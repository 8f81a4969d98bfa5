//! Input normalization ahead of scheme matching.

/// Strip separators and upper-case a raw VAT number.
///
/// Every run of whitespace, `-` and `.` is removed entirely (not collapsed
/// to a single separator), then ASCII letters are upper-cased. Other
/// characters are left alone so they can never turn into a country prefix. Normalizing an
/// already normalized string returns it unchanged.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !is_separator(*c))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '.'
}
