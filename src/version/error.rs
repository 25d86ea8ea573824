use thiserror::Error;

use crate::parser::error::{MarkupError, ParseError};

/// Failure while probing one candidate URL
///
/// A definitive "page does not exist" (status >= 400) is not an error.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
}

/// Failure of a whole check; only an unusable input URL aborts a check
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to parse URL: {0}")]
    InvalidUrl(#[from] ParseError),
}
