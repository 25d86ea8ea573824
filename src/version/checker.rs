//! Outdated-version check for one documentation URL

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::config::{CheckerConfig, DEFAULT_MAX_CONCURRENT_PROBES, SiteConfig};
use crate::parser::doc_url::parse_with_site;
use crate::parser::types::DocumentReference;
use crate::version::error::{CheckError, ProbeError};
use crate::version::http_prober::HttpProber;
use crate::version::ordering::candidate_versions;
use crate::version::prober::{ProbeOutcome, Prober};

/// Result of probing one candidate version
#[derive(Debug)]
pub struct VersionProbeResult {
    pub version: String,
    /// Candidate URL, carrying the original anchor if there was one
    pub url: String,
    pub page_exists: bool,
    pub has_anchor: bool,
    /// `None` when no anchor was requested
    pub anchor_exists: Option<bool>,
    pub probe_error: Option<ProbeError>,
    pub checked_at: DateTime<Utc>,
}

impl VersionProbeResult {
    pub fn from_outcome(version: String, url: String, outcome: ProbeOutcome) -> Self {
        Self {
            version,
            url,
            page_exists: outcome.page_exists,
            has_anchor: outcome.has_anchor,
            anchor_exists: outcome.anchor_exists,
            probe_error: outcome.error,
            checked_at: Utc::now(),
        }
    }

    /// A valid newer version has the page and, if one was requested, the anchor
    pub fn is_valid(&self) -> bool {
        self.page_exists && (!self.has_anchor || self.anchor_exists == Some(true))
    }

    /// The page exists but the requested anchor does not
    pub fn is_anchor_missing(&self) -> bool {
        self.page_exists && self.has_anchor && self.anchor_exists != Some(true)
    }
}

/// Aggregate verdict for one input URL
#[derive(Debug)]
pub struct CheckReport {
    pub original_url: String,
    pub original_version: String,
    /// Newest valid version, or the original version when none is newer
    pub latest_version: String,
    /// At least one newer version is valid
    pub is_outdated: bool,
    /// Every candidate examined, ascending by version
    pub all_probed_versions: Vec<VersionProbeResult>,
    /// Probing stopped early because of a cancellation request
    pub cancelled: bool,
}

impl CheckReport {
    /// Aggregate probe results, given in ascending version order
    pub fn new(
        reference: &DocumentReference,
        all_probed_versions: Vec<VersionProbeResult>,
        cancelled: bool,
    ) -> Self {
        let latest_valid = all_probed_versions
            .iter()
            .rev()
            .find(|result| result.is_valid())
            .map(|result| result.version.clone());

        Self {
            original_url: reference.original_url.clone(),
            original_version: reference.version.clone(),
            is_outdated: latest_valid.is_some(),
            latest_version: latest_valid.unwrap_or_else(|| reference.version.clone()),
            all_probed_versions,
            cancelled,
        }
    }

    /// Valid candidates, ascending by version
    pub fn valid_newer_versions(&self) -> Vec<&VersionProbeResult> {
        self.all_probed_versions
            .iter()
            .filter(|result| result.is_valid())
            .collect()
    }

    /// The newest valid candidate, if any
    pub fn latest(&self) -> Option<&VersionProbeResult> {
        self.all_probed_versions
            .iter()
            .rev()
            .find(|result| result.is_valid())
    }
}

/// Checks documentation URLs against newer versions
pub struct Checker {
    prober: Arc<dyn Prober>,
    known_versions: Vec<String>,
    site: SiteConfig,
    max_concurrent_probes: usize,
}

impl Checker {
    /// Create a new Checker probing `known_versions` through `prober`
    pub fn new(prober: Arc<dyn Prober>, known_versions: Vec<String>) -> Self {
        Self {
            prober,
            known_versions,
            site: SiteConfig::default(),
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
        }
    }

    /// Create a Checker with an HTTP prober built from `config`
    pub fn from_config(config: &CheckerConfig) -> Result<Self, ProbeError> {
        let prober = HttpProber::new(&config.probe)?;

        Ok(Self::new(Arc::new(prober), config.known_versions.clone())
            .with_site(config.site.clone())
            .with_max_concurrent_probes(config.probe.max_concurrent_probes))
    }

    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    pub fn with_max_concurrent_probes(mut self, limit: usize) -> Self {
        self.max_concurrent_probes = limit.max(1);
        self
    }

    pub fn known_versions(&self) -> &[String] {
        &self.known_versions
    }

    pub fn max_concurrent_probes(&self) -> usize {
        self.max_concurrent_probes
    }

    /// Check one URL
    ///
    /// Fails only when the URL cannot be parsed; per-version probe failures
    /// are recorded in the report.
    pub async fn check(&self, raw_url: &str) -> Result<CheckReport, CheckError> {
        self.check_until(raw_url, std::future::pending()).await
    }

    /// Check one URL, stopping early once `cancel` completes
    ///
    /// On cancellation in-flight probes are dropped and the report holds the
    /// results gathered so far, with `cancelled` set.
    pub async fn check_until<F>(&self, raw_url: &str, cancel: F) -> Result<CheckReport, CheckError>
    where
        F: Future<Output = ()>,
    {
        let reference = parse_with_site(raw_url, &self.site)?;
        let candidates = candidate_versions(&reference.version, &self.known_versions);
        info!(
            "Checking {} against {} newer version(s)",
            raw_url,
            candidates.len()
        );

        let prober = &self.prober;
        let reference_ref = &reference;
        // `buffered` yields in input order, so results stay ascending.
        let mut probes = std::pin::pin!(
            stream::iter(candidates)
                .map(|version| {
                    let url = reference_ref.build_url(&version);
                    async move {
                        debug!("Probing version {}: {}", version, url);
                        let outcome = prober.probe(&url).await;
                        VersionProbeResult::from_outcome(version, url, outcome)
                    }
                })
                .buffered(self.max_concurrent_probes)
        );
        let mut cancel = std::pin::pin!(cancel);

        let mut results = Vec::new();
        let mut cancelled = false;
        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    info!("Check of {} cancelled after {} probe(s)", raw_url, results.len());
                    cancelled = true;
                    break;
                }
                next = probes.next() => match next {
                    Some(result) => results.push(result),
                    None => break,
                },
            }
        }

        let report = CheckReport::new(&reference, results, cancelled);
        info!(
            "{}: outdated = {}, latest = {}",
            raw_url, report.is_outdated, report.latest_version
        );

        Ok(report)
    }
}
