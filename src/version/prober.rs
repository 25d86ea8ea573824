//! Prober trait for checking whether a documentation page (and anchor) exists

#[cfg(test)]
use mockall::automock;

use crate::version::error::ProbeError;

/// Result of probing one URL
#[derive(Debug)]
pub struct ProbeOutcome {
    /// The page answered with a status in [200, 400)
    pub page_exists: bool,
    /// The probed URL carried a non-empty fragment
    pub has_anchor: bool,
    /// Whether the fragment was found in the page; `None` when there is no fragment
    pub anchor_exists: Option<bool>,
    /// Last transport or markup failure when every attempt failed
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    /// The page exists; `anchor_exists` is `None` when no anchor was requested
    pub fn found(anchor_exists: Option<bool>) -> Self {
        Self {
            page_exists: true,
            has_anchor: anchor_exists.is_some(),
            anchor_exists,
            error: None,
        }
    }

    /// The server answered definitively that the page does not exist
    pub fn missing(has_anchor: bool) -> Self {
        Self {
            page_exists: false,
            has_anchor,
            anchor_exists: has_anchor.then_some(false),
            error: None,
        }
    }

    /// Every attempt failed; existence is unconfirmed
    pub fn failed(has_anchor: bool, error: Option<ProbeError>) -> Self {
        Self {
            error,
            ..Self::missing(has_anchor)
        }
    }
}

/// Trait for checking documentation URLs
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probes `url`, including its `#fragment` if any
    ///
    /// Never fails as a whole: transport problems are reported through
    /// [`ProbeOutcome::error`] with `page_exists == false`.
    async fn probe(&self, url: &str) -> ProbeOutcome;
}
