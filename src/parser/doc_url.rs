//! Versioned documentation URL parser
//!
//! Expected shape:
//! `https://docs.redhat.com/en/documentation/openshift_container_platform/<major>.<minor>/<format>/<document>/<page>[#anchor]`

use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::config::SiteConfig;
use crate::parser::error::ParseError;
use crate::parser::types::{DocVersion, DocumentReference};

/// Number of path segments from the product segment through the page
const DOCUMENT_SEGMENTS: usize = 5;

/// Parse a URL against the default documentation site
pub fn parse(raw_url: &str) -> Result<DocumentReference, ParseError> {
    parse_with_site(raw_url, &SiteConfig::default())
}

/// Parse a URL against the given documentation site
pub fn parse_with_site(raw_url: &str, site: &SiteConfig) -> Result<DocumentReference, ParseError> {
    let url = Url::parse(raw_url).map_err(|source| ParseError::InvalidUrl {
        url: raw_url.to_string(),
        source,
    })?;

    let host = url.host_str().unwrap_or_default();
    if !host.eq_ignore_ascii_case(&site.host) {
        return Err(ParseError::NotTargetSite {
            host: host.to_string(),
            expected: site.host.clone(),
        });
    }

    let path = url.path();
    let malformed = || ParseError::MalformedPath {
        path: path.to_string(),
    };

    // "/a/b" splits into ["", "a", "b"]; the leading empty piece is the root.
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < DOCUMENT_SEGMENTS + 1 {
        return Err(malformed());
    }
    let (prefix, tail) = segments.split_at(segments.len() - DOCUMENT_SEGMENTS);
    let [product, version, format, document, page] = tail else {
        return Err(malformed());
    };

    if *product != site.product || [format, document, page].iter().any(|s| s.is_empty()) {
        return Err(malformed());
    }

    let major_minor: DocVersion = version.parse().map_err(|_| malformed())?;

    // Taken from the raw string so the fragment is kept byte for byte.
    let anchor = raw_url
        .split_once('#')
        .map(|(_, fragment)| fragment.to_string())
        .unwrap_or_default();

    let reference = DocumentReference {
        base_origin: url.origin().ascii_serialization(),
        path_prefix: format!("{}/{}", prefix.join("/"), product),
        version: version.to_string(),
        major_minor,
        format: format.to_string(),
        document_id: document.to_string(),
        page_id: page.to_string(),
        anchor,
        original_url: raw_url.to_string(),
    };
    debug!(
        "Parsed {} as version {} of {}/{}",
        raw_url, reference.version, reference.document_id, reference.page_id
    );

    Ok(reference)
}

impl DocumentReference {
    /// Build the URL of the same document (and anchor) at another version
    ///
    /// Only the version segment changes; everything else is copied verbatim.
    pub fn build_url(&self, target_version: &str) -> String {
        let mut url = format!(
            "{}{}/{}/{}/{}/{}",
            self.base_origin,
            self.path_prefix,
            target_version,
            self.format,
            self.document_id,
            self.page_id
        );

        if self.has_anchor() {
            url.push('#');
            url.push_str(&self.anchor);
        }

        url
    }
}

impl FromStr for DocumentReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
