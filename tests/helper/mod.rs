//! Shared test utilities

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use ocp_doc_checker::config::{ProbeConfig, SiteConfig};
use ocp_doc_checker::version::http_prober::HttpProber;
use ocp_doc_checker::version::{Checker, ProbeOutcome, Prober};

pub const DOCS_PATH: &str = "/en/documentation/openshift_container_platform";

/// Known versions `4.<from>` through `4.<to>`
pub fn versions(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|minor| format!("4.{minor}")).collect()
}

/// Site config matching a mockito server
pub fn local_site() -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".to_string(),
        ..SiteConfig::default()
    }
}

/// Path of a document page at `version`
pub fn doc_path(version: &str, rest: &str) -> String {
    format!("{DOCS_PATH}/{version}/{rest}")
}

/// HTML page containing an element with the given id
pub fn page_with_anchor(anchor: &str) -> String {
    format!(r#"<html><body><h1>Guide</h1><section id="{anchor}"><p>text</p></section></body></html>"#)
}

/// Checker probing a local server over HTTP, without retries
pub fn http_checker(known_versions: Vec<String>) -> Checker {
    let config = ProbeConfig {
        max_attempts: 1,
        backoff_step_ms: 0,
        request_timeout_ms: 5_000,
        ..ProbeConfig::default()
    };
    let prober = HttpProber::new(&config).unwrap();

    Checker::new(Arc::new(prober), known_versions).with_site(local_site())
}

/// Prober answering from a fixed set of existing URLs
///
/// A URL with an anchor is valid when it is listed with its anchor; a listed
/// URL without the anchor means the page exists but the anchor does not.
pub struct FakeProber {
    urls: HashSet<String>,
    stalled: HashSet<String>,
}

impl FakeProber {
    pub fn new(urls: &[&str]) -> Self {
        Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            stalled: HashSet::new(),
        }
    }

    /// Never answer for these URLs
    pub fn with_stalled(mut self, urls: &[&str]) -> Self {
        self.stalled = urls.iter().map(|u| u.to_string()).collect();
        self
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let (page, anchor) = url.split_once('#').unwrap_or((url, ""));
        let has_anchor = !anchor.is_empty();

        if self.stalled.contains(url) {
            std::future::pending::<()>().await;
        }
        if self.urls.contains(url) {
            ProbeOutcome::found(has_anchor.then_some(true))
        } else if has_anchor && self.urls.contains(page) {
            ProbeOutcome::found(Some(false))
        } else {
            ProbeOutcome::missing(has_anchor)
        }
    }
}
