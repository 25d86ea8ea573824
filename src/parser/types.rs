//! Common types for parsers

use std::fmt;
use std::str::FromStr;

/// A documentation version, `major.minor` with no patch component
///
/// Ordering is the lexicographic `(major, minor)` tuple comparison, so
/// `4.100` sorts after `4.99`. See [`DocVersion::legacy_key`] for the
/// float key this replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocVersion {
    pub major: u32,
    pub minor: u32,
}

impl DocVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// `major + minor / 100`, the comparison key older tooling used.
    ///
    /// Only orders correctly while minor versions stay below 100.
    pub fn legacy_key(&self) -> f64 {
        f64::from(self.major) + f64::from(self.minor) / 100.0
    }
}

/// Error returned when a string is not `<digits>.<digits>`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid documentation version: {0:?}")]
pub struct InvalidVersion(pub String);

impl FromStr for DocVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion(s.to_string());

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_number(major) || !is_number(minor) {
            return Err(invalid());
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for DocVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parsed form of one versioned documentation URL
///
/// Every component except the version is independent of the product
/// release, which is what lets [`DocumentReference::build_url`] derive the
/// same document at another version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    /// Scheme and host, plus port when it is not the default (e.g. "https://docs.redhat.com")
    pub base_origin: String,
    /// Path up to and including the product segment
    /// (e.g. "/en/documentation/openshift_container_platform")
    pub path_prefix: String,
    /// Version segment exactly as it appeared (e.g. "4.17")
    pub version: String,
    /// Numeric form of `version`
    pub major_minor: DocVersion,
    /// Rendering mode (e.g. "html-single" or "html")
    pub format: String,
    /// Book identifier (e.g. "disconnected_environments")
    pub document_id: String,
    /// Page within the book; "index" for single-page books
    pub page_id: String,
    /// URL fragment without '#'; empty when absent
    pub anchor: String,
    /// The URL this reference was parsed from
    pub original_url: String,
}

impl DocumentReference {
    /// Whether the reference deep-links to an in-page anchor
    pub fn has_anchor(&self) -> bool {
        !self.anchor.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.17", Some(DocVersion::new(4, 17)))]
    #[case("4.9", Some(DocVersion::new(4, 9)))]
    #[case("5.0", Some(DocVersion::new(5, 0)))]
    #[case("4.100", Some(DocVersion::new(4, 100)))]
    #[case("4", None)]
    #[case("4.17.1", None)]
    #[case("v4.17", None)]
    #[case("4.x", None)]
    #[case(".17", None)]
    #[case("4.", None)]
    #[case("+4.17", None)]
    #[case("99999999999.1", None)] // overflows u32
    #[case("", None)]
    fn doc_version_from_str(#[case] input: &str, #[case] expected: Option<DocVersion>) {
        assert_eq!(input.parse::<DocVersion>().ok(), expected);
    }

    #[rstest]
    #[case(DocVersion::new(4, 17), 4.17)]
    #[case(DocVersion::new(4, 9), 4.09)]
    #[case(DocVersion::new(5, 0), 5.00)]
    fn legacy_key_matches_float_encoding(#[case] version: DocVersion, #[case] expected: f64) {
        assert_eq!(version.legacy_key(), expected);
    }

    #[test]
    fn tuple_ordering_diverges_from_legacy_key_at_minor_100() {
        let four_150 = DocVersion::new(4, 150);
        let five_0 = DocVersion::new(5, 0);
        let five_1 = DocVersion::new(5, 1);

        // The tuple comparison is the one in use.
        assert!(four_150 < five_1);
        assert!(DocVersion::new(4, 100) < five_0);

        // The float key ranks 4.150 above 5.1 and cannot tell 4.100 from 5.0.
        assert!(four_150.legacy_key() > five_1.legacy_key());
        assert_eq!(DocVersion::new(4, 100).legacy_key(), five_0.legacy_key());
    }

    #[test]
    fn doc_version_display_round_trips() {
        let version: DocVersion = "4.20".parse().unwrap();
        assert_eq!(version.to_string(), "4.20");
    }
}
