use thiserror::Error;

/// Error type for documentation URL parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not an absolute URL
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL is on some other host
    #[error("not a {expected} documentation URL (host: {host:?})")]
    NotTargetSite { host: String, expected: String },

    /// The URL is on the right host but its path is not a versioned document path
    #[error("URL path {path:?} does not match the expected documentation format")]
    MalformedPath { path: String },
}

/// Error type for HTML markup scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// The HTML grammar could not be loaded into tree-sitter
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    /// Parsing produced no syntax tree at all
    #[error("Failed to parse HTML")]
    NoTree,
}
