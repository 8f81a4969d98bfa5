//! Country codes and the ordered scheme table.
//!
//! The standard table is reference data: each entry fixes the country
//! prefix, the payload length(s) and the permitted character class at every
//! position. Changing an entry changes which numbers are accepted, so the
//! shapes below are kept exactly as published rather than tidied up.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, UnknownCountry};

/// Name of the capture group holding the checksum-relevant payload.
pub const PAYLOAD_GROUP: &str = "payload";

/// A jurisdiction with a VAT number scheme.
///
/// Serializes as its upper-case prefix code (e.g. `"CHE"`, `"EL"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Country {
    /// Austria
    At,
    /// Belgium
    Be,
    /// Bulgaria
    Bg,
    /// Switzerland
    Che,
    /// Cyprus
    Cy,
    /// Czech Republic
    Cz,
    /// Germany
    De,
    /// Denmark
    Dk,
    /// Estonia
    Ee,
    /// Greece
    El,
    /// Spain
    Es,
    /// EU-type numbers for non-EU businesses
    Eu,
    /// Finland
    Fi,
    /// France
    Fr,
    /// United Kingdom
    Gb,
    /// Croatia
    Hr,
    /// Hungary
    Hu,
    /// Ireland
    Ie,
    /// Italy
    It,
    /// Lithuania
    Lt,
    /// Luxembourg
    Lu,
    /// Latvia
    Lv,
    /// Malta
    Mt,
    /// Netherlands
    Nl,
    /// Norway
    No,
    /// Poland
    Pl,
    /// Portugal
    Pt,
    /// Romania
    Ro,
    /// Serbia
    Rs,
    /// Russia
    Ru,
    /// Sweden
    Se,
    /// Slovenia
    Si,
    /// Slovakia
    Sk,
}

impl Country {
    /// Every country with a scheme, in code order.
    pub const ALL: [Country; 33] = [
        Country::At,
        Country::Be,
        Country::Bg,
        Country::Che,
        Country::Cy,
        Country::Cz,
        Country::De,
        Country::Dk,
        Country::Ee,
        Country::El,
        Country::Es,
        Country::Eu,
        Country::Fi,
        Country::Fr,
        Country::Gb,
        Country::Hr,
        Country::Hu,
        Country::Ie,
        Country::It,
        Country::Lt,
        Country::Lu,
        Country::Lv,
        Country::Mt,
        Country::Nl,
        Country::No,
        Country::Pl,
        Country::Pt,
        Country::Ro,
        Country::Rs,
        Country::Ru,
        Country::Se,
        Country::Si,
        Country::Sk,
    ];

    /// The literal prefix this country's numbers start with.
    pub fn code(self) -> &'static str {
        match self {
            Country::At => "AT",
            Country::Be => "BE",
            Country::Bg => "BG",
            Country::Che => "CHE",
            Country::Cy => "CY",
            Country::Cz => "CZ",
            Country::De => "DE",
            Country::Dk => "DK",
            Country::Ee => "EE",
            Country::El => "EL",
            Country::Es => "ES",
            Country::Eu => "EU",
            Country::Fi => "FI",
            Country::Fr => "FR",
            Country::Gb => "GB",
            Country::Hr => "HR",
            Country::Hu => "HU",
            Country::Ie => "IE",
            Country::It => "IT",
            Country::Lt => "LT",
            Country::Lu => "LU",
            Country::Lv => "LV",
            Country::Mt => "MT",
            Country::Nl => "NL",
            Country::No => "NO",
            Country::Pl => "PL",
            Country::Pt => "PT",
            Country::Ro => "RO",
            Country::Rs => "RS",
            Country::Ru => "RU",
            Country::Se => "SE",
            Country::Si => "SI",
            Country::Sk => "SK",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Country::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| UnknownCountry(s.to_string()))
    }
}

/// One recognisable shape of a country's VAT number.
///
/// The pattern is always anchored as `^<CODE>(?:<shape>)$`; `shape` must contain
/// a `(?P<payload>...)` group naming the substring handed to the checksum.
#[derive(Debug, Clone)]
pub struct SchemeDefinition {
    country: Country,
    pattern: Regex,
}

impl SchemeDefinition {
    /// Compile a scheme for `country` from the shape following its prefix.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSchemePattern` if the shape is not a valid regex,
    /// `ConfigError::MissingPayloadGroup` if it has no `payload` group.
    pub fn new(country: Country, shape: &str) -> Result<Self, ConfigError> {
        let anchored = format!("^{}(?:{})$", regex::escape(country.code()), shape);
        // classes such as `\d` must not admit non-ASCII digits
        let pattern = RegexBuilder::new(&anchored)
            .unicode(false)
            .build()
            .map_err(|source| ConfigError::InvalidSchemePattern {
            country: country.code().into(),
            pattern: anchored.clone(),
            source,
        })?;
        if !pattern.capture_names().flatten().any(|n| n == PAYLOAD_GROUP) {
            return Err(ConfigError::MissingPayloadGroup {
                country: country.code().into(),
                pattern: anchored,
            });
        }
        Ok(Self { country, pattern })
    }

    /// The country this scheme belongs to.
    pub fn country(&self) -> Country {
        self.country
    }

    /// The literal prefix the pattern begins with.
    pub fn prefix(&self) -> &'static str {
        self.country.code()
    }

    /// The full anchored pattern text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Match the whole normalized input and extract the payload.
    pub fn extract<'a>(&self, normalized: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(normalized)
            .and_then(|caps| caps.name(PAYLOAD_GROUP))
            .map(|m| m.as_str())
    }
}

/// An ordered, immutable list of scheme definitions.
///
/// Order is significant: when several schemes share a prefix the first one
/// whose pattern matches wins.
#[derive(Debug, Clone)]
pub struct SchemeTable {
    schemes: Vec<SchemeDefinition>,
}

impl SchemeTable {
    /// Build a table from definitions, keeping their order.
    pub fn new(schemes: Vec<SchemeDefinition>) -> Self {
        Self { schemes }
    }

    /// The shared reference table covering every [`Country`].
    pub fn standard() -> &'static SchemeTable {
        &**STANDARD
    }

    /// Same as [`SchemeTable::standard`], as a shared handle.
    pub fn standard_arc() -> Arc<SchemeTable> {
        Arc::clone(&STANDARD)
    }

    /// Compile the reference table from [`STANDARD_SHAPES`].
    ///
    /// # Errors
    ///
    /// Only if a shape in the reference data is malformed.
    pub fn try_standard() -> Result<Self, ConfigError> {
        STANDARD_SHAPES
            .iter()
            .map(|&(country, shape)| SchemeDefinition::new(country, shape))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Iterate the definitions in table order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemeDefinition> {
        self.schemes.iter()
    }

    /// Definitions whose prefix begins with `candidate`, in table order.
    pub fn with_prefix<'a>(
        &'a self,
        candidate: &'a str,
    ) -> impl Iterator<Item = &'a SchemeDefinition> + 'a {
        self.schemes
            .iter()
            .filter(move |s| s.prefix().starts_with(candidate))
    }

    /// Distinct countries, in order of first appearance.
    pub fn countries(&self) -> Vec<Country> {
        let mut seen = Vec::new();
        for scheme in &self.schemes {
            if !seen.contains(&scheme.country) {
                seen.push(scheme.country);
            }
        }
        seen
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Whether the table has no definitions.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemeTable {
    type Item = &'a SchemeDefinition;
    type IntoIter = std::slice::Iter<'a, SchemeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemes.iter()
    }
}

static STANDARD: LazyLock<Arc<SchemeTable>> = LazyLock::new(|| {
    Arc::new(SchemeTable::try_standard().expect("reference scheme shapes compile"))
});

/// The reference shapes, in evaluation order.
pub static STANDARD_SHAPES: &[(Country, &str)] = &[
    (Country::At, r"U(?P<payload>\d{8})"),
    (Country::Be, r"(?P<payload>0?\d{9})"),
    (Country::Bg, r"(?P<payload>\d{9,10})"),
    (Country::Che, r"(?P<payload>\d{9})(MWST)?"),
    (Country::Cy, r"(?P<payload>[0-59]\d{7}[A-Z])"),
    (Country::Cz, r"(?P<payload>\d{8,10})(\d{3})?"),
    (Country::De, r"(?P<payload>[1-9]\d{8})"),
    (Country::Dk, r"(?P<payload>\d{8})"),
    (Country::Ee, r"(?P<payload>10\d{7})"),
    (Country::El, r"(?P<payload>\d{9})"),
    // national juridical entities
    (Country::Es, r"(?P<payload>[A-Z]\d{8})"),
    // other juridical entities
    (Country::Es, r"(?P<payload>[A-HN-SW]\d{7}[A-J])"),
    // personal entities, type 1
    (Country::Es, r"(?P<payload>[0-9YZ]\d{7}[A-Z])"),
    // personal entities, type 2
    (Country::Es, r"(?P<payload>[KLMX]\d{7}[A-Z])"),
    (Country::Eu, r"(?P<payload>\d{9})"),
    (Country::Fi, r"(?P<payload>\d{8})"),
    (Country::Fr, r"(?P<payload>\d{11})"),
    (Country::Fr, r"(?P<payload>[A-HJ-NP-Z]\d{10})"),
    (Country::Fr, r"(?P<payload>\d[A-HJ-NP-Z]\d{9})"),
    (Country::Fr, r"(?P<payload>[A-HJ-NP-Z]{2}\d{9})"),
    // standard
    (Country::Gb, r"(?P<payload>\d{9})"),
    // branch traders
    (Country::Gb, r"(?P<payload>\d{12})"),
    // government departments
    (Country::Gb, r"(?P<payload>GD\d{3})"),
    // health authorities
    (Country::Gb, r"(?P<payload>HA\d{3})"),
    (Country::Hr, r"(?P<payload>\d{11})"),
    (Country::Hu, r"(?P<payload>\d{8})"),
    (Country::Ie, r"(?P<payload>\d{7}[A-W])"),
    (Country::Ie, r"(?P<payload>[7-9][A-Z*+)]\d{5}[A-W])"),
    (Country::Ie, r"(?P<payload>\d{7}[A-W][AH])"),
    (Country::It, r"(?P<payload>\d{11})"),
    (Country::Lv, r"(?P<payload>\d{11})"),
    (Country::Lt, r"(?P<payload>\d{9}|\d{12})"),
    (Country::Lu, r"(?P<payload>\d{8})"),
    (Country::Mt, r"(?P<payload>[1-9]\d{7})"),
    (Country::Nl, r"(?P<payload>\d{9})B\d{2}"),
    (Country::No, r"(?P<payload>\d{9})"),
    (Country::Pl, r"(?P<payload>\d{10})"),
    (Country::Pt, r"(?P<payload>\d{9})"),
    (Country::Ro, r"(?P<payload>[1-9]\d{1,9})"),
    (Country::Ru, r"(?P<payload>\d{10}|\d{12})"),
    (Country::Rs, r"(?P<payload>\d{9})"),
    (Country::Si, r"(?P<payload>[1-9]\d{7})"),
    (Country::Sk, r"(?P<payload>[1-9]\d[(2-4)|(6-9)]\d{7})"),
    (Country::Se, r"(?P<payload>\d{10}01)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_compiles() {
        let table = SchemeTable::try_standard().unwrap();
        assert_eq!(table.len(), STANDARD_SHAPES.len());
    }

    #[test]
    fn standard_table_covers_every_country() {
        let countries = SchemeTable::standard().countries();
        for c in Country::ALL {
            assert!(countries.contains(&c), "{c} has no scheme");
        }
        assert_eq!(countries.len(), Country::ALL.len());
    }

    #[test]
    fn variant_counts() {
        let count = |c: Country| SchemeTable::standard().iter().filter(|s| s.country() == c).count();
        assert_eq!(count(Country::Es), 4);
        assert_eq!(count(Country::Fr), 4);
        assert_eq!(count(Country::Gb), 4);
        assert_eq!(count(Country::Ie), 3);
        assert_eq!(count(Country::De), 1);
    }

    #[test]
    fn patterns_are_anchored_with_prefix() {
        for s in SchemeTable::standard() {
            assert!(s.pattern().starts_with(&format!("^{}", s.prefix())));
            assert!(s.pattern().ends_with('$'));
        }
    }

    #[test]
    fn shapes_are_ascii_only() {
        let nl = SchemeDefinition::new(Country::Nl, r"(?P<payload>\d{9})B\d{2}").unwrap();
        assert_eq!(nl.extract("NL004495445B01"), Some("004495445"));
        assert_eq!(nl.extract("NL004495445B\u{660}\u{661}"), None);
        let at = SchemeDefinition::new(Country::At, r"U(?P<payload>\d{8})").unwrap();
        assert_eq!(at.extract("ATU\u{FF13}7675002"), None);
    }

    #[test]
    fn extract_payload() {
        let at = SchemeDefinition::new(Country::At, r"U(?P<payload>\d{8})").unwrap();
        assert_eq!(at.extract("ATU37675002"), Some("37675002"));
        assert_eq!(at.extract("ATU376750021"), None);
        assert_eq!(at.extract("XATU37675002"), None);
    }

    #[test]
    fn extract_excludes_suffix_groups() {
        let nl = SchemeDefinition::new(Country::Nl, r"(?P<payload>\d{9})B\d{2}").unwrap();
        assert_eq!(nl.extract("NL004495445B01"), Some("004495445"));
        let che = SchemeDefinition::new(Country::Che, r"(?P<payload>\d{9})(MWST)?").unwrap();
        assert_eq!(che.extract("CHE116281710MWST"), Some("116281710"));
        assert_eq!(che.extract("CHE116281710"), Some("116281710"));
    }

    #[test]
    fn cz_payload_leaves_trailing_group() {
        let cz = SchemeTable::standard()
            .iter()
            .find(|s| s.country() == Country::Cz)
            .unwrap();
        assert_eq!(cz.extract("CZ25123891"), Some("25123891"));
        assert_eq!(cz.extract("CZ2512389112"), Some("2512389112"));
        assert_eq!(cz.extract("CZ25123891123"), Some("25123891"));
        assert_eq!(cz.extract("CZ2512389100123"), Some("2512389100"));
        assert_eq!(cz.extract("CZ12345678901"), Some("12345678"));
    }

    #[test]
    fn missing_payload_group_rejected() {
        let err = SchemeDefinition::new(Country::At, r"U\d{8}").unwrap_err();
        assert!(matches!(err, ConfigError::MissingPayloadGroup { .. }));
    }

    #[test]
    fn bad_shape_rejected() {
        let err = SchemeDefinition::new(Country::At, r"(?P<payload>\d{8}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchemePattern { .. }));
    }

    #[test]
    fn prefix_filter_keeps_table_order() {
        let es: Vec<_> = SchemeTable::standard().with_prefix("ES").collect();
        assert_eq!(es.len(), 4);
        assert!(es[0].pattern().contains(r"[A-Z]\d{8}"));
        let ch: Vec<_> = SchemeTable::standard().with_prefix("CH").collect();
        assert_eq!(ch.len(), 1);
        assert_eq!(ch[0].country(), Country::Che);
    }

    #[test]
    fn country_codes_round_trip() {
        for c in Country::ALL {
            assert_eq!(c.code().parse::<Country>().unwrap(), c);
            assert_eq!(c.to_string(), c.code());
        }
        assert_eq!("che".parse::<Country>().unwrap(), Country::Che);
        assert!("XX".parse::<Country>().is_err());
        assert!("".parse::<Country>().is_err());
    }

    #[test]
    fn country_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Country::Che).unwrap(), "\"CHE\"");
        assert_eq!(serde_json::from_str::<Country>("\"EL\"").unwrap(), Country::El);
    }
}
