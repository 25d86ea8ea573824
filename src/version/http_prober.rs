//! HTTP implementation of the prober

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::ProbeConfig;
use crate::parser::html::contains_anchor;
use crate::version::error::ProbeError;
use crate::version::prober::{ProbeOutcome, Prober};
use crate::version::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// Answer from a single attempt
enum PageStatus {
    Exists { anchor_exists: Option<bool> },
    Missing,
}

/// Prober that checks pages over HTTP
///
/// Pages without an anchor are checked with HEAD (falling back to GET when
/// the HEAD request itself fails). Pages with an anchor are always fetched
/// with GET so the anchor can be looked up in the body.
pub struct HttpProber {
    client: reqwest::Client,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpProber {
    /// Creates a new HttpProber from probe configuration
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ocp-doc-checker/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            retry: RetryPolicy::from(config),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replaces the sleeper used for backoff between attempts
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn attempt(&self, base_url: &str, anchor: &str) -> Result<PageStatus, ProbeError> {
        let response = if anchor.is_empty() {
            match self.client.head(base_url).send().await {
                Ok(response) => response,
                Err(e) => {
                    debug!("HEAD {} failed ({}), falling back to GET", base_url, e);
                    self.client.get(base_url).send().await?
                }
            }
        } else {
            self.client.get(base_url).send().await?
        };

        let status = response.status().as_u16();
        if !page_exists(status)? {
            debug!("{} answered {}: page does not exist", base_url, status);
            return Ok(PageStatus::Missing);
        }

        if anchor.is_empty() {
            return Ok(PageStatus::Exists {
                anchor_exists: None,
            });
        }

        let body = response.text().await?;
        let found = contains_anchor(&body, anchor)?;
        debug!("{}#{}: anchor found = {}", base_url, anchor, found);

        Ok(PageStatus::Exists {
            anchor_exists: Some(found),
        })
    }

    /// Run `attempt` until it succeeds or the retry budget is spent
    ///
    /// Attempts are separated by the policy's backoff; the last error is
    /// returned once no attempts remain.
    async fn retrying<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T, ProbeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProbeError>>,
    {
        let mut made = 0;
        loop {
            let error = match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };
            made += 1;
            debug!("Probe of {} failed: {}", url, error);
            if made >= self.retry.max_attempts {
                return Err(error);
            }

            let delay = self.retry.delay_before(made);
            debug!(
                "Retrying {} in {:?} (attempt {}/{})",
                url,
                delay,
                made + 1,
                self.retry.max_attempts
            );
            self.sleeper.sleep(delay).await;
        }
    }
}

/// Reads a final response status; `Ok(true)` means the page exists
///
/// Any status from 400 up is a definitive "missing". Redirects are followed
/// by the client, so 3xx statuses seen here still count as existing.
fn page_exists(status: u16) -> Result<bool, ProbeError> {
    match status {
        400.. => Ok(false),
        200..=399 => Ok(true),
        _ => Err(ProbeError::UnexpectedStatus(status)),
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let (base_url, anchor) = url.split_once('#').unwrap_or((url, ""));
        let has_anchor = !anchor.is_empty();

        match self.retrying(url, || self.attempt(base_url, anchor)).await {
            Ok(PageStatus::Exists { anchor_exists }) => ProbeOutcome::found(anchor_exists),
            Ok(PageStatus::Missing) => ProbeOutcome::missing(has_anchor),
            Err(e) => ProbeOutcome::failed(has_anchor, Some(e)),
        }
    }
}
