//! Checking many URLs with bounded fan-out

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::version::cancel::CancelSignal;
use crate::version::checker::{CheckReport, Checker};
use crate::version::error::CheckError;

/// Outcome of checking one URL of a batch
#[derive(Debug)]
pub struct BatchEntry {
    pub url: String,
    pub result: Result<CheckReport, CheckError>,
}

/// Check every URL, at most `concurrency` at a time
///
/// Entries come back in input order. A URL that fails to parse does not
/// affect the others.
pub async fn check_all(checker: &Checker, urls: &[String], concurrency: usize) -> Vec<BatchEntry> {
    run(checker, urls, concurrency, None).await
}

/// Like [`check_all`], but every check stops early once `signal` fires
pub async fn check_all_until(
    checker: &Checker,
    urls: &[String],
    concurrency: usize,
    signal: CancelSignal,
) -> Vec<BatchEntry> {
    run(checker, urls, concurrency, Some(signal)).await
}

async fn run(
    checker: &Checker,
    urls: &[String],
    concurrency: usize,
    signal: Option<CancelSignal>,
) -> Vec<BatchEntry> {
    stream::iter(urls)
        .map(|url| {
            let signal = signal.clone();
            async move {
                let result = match signal {
                    Some(signal) => checker.check_until(url, signal.cancelled()).await,
                    None => checker.check(url).await,
                };
                if let Err(e) = &result {
                    warn!("Error checking URL {}: {}", url, e);
                }
                BatchEntry {
                    url: url.clone(),
                    result,
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
