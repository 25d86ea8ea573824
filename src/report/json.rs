//! JSON rendering of check reports

use serde::Serialize;

use crate::version::checker::CheckReport;

/// A valid newer version of a document
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonVersion<'a> {
    pub version: &'a str,
    pub url: &'a str,
}

/// JSON shape of a single check
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonReport<'a> {
    pub original_url: &'a str,
    pub original_version: &'a str,
    pub latest_version: &'a str,
    pub is_outdated: bool,
    pub newer_versions: Vec<JsonVersion<'a>>,
}

impl<'a> From<&'a CheckReport> for JsonReport<'a> {
    fn from(report: &'a CheckReport) -> Self {
        Self {
            original_url: &report.original_url,
            original_version: &report.original_version,
            latest_version: &report.latest_version,
            is_outdated: report.is_outdated,
            newer_versions: report
                .valid_newer_versions()
                .into_iter()
                .map(|result| JsonVersion {
                    version: &result.version,
                    url: &result.url,
                })
                .collect(),
        }
    }
}

/// JSON shape of a batch of checks
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonBatchReport<'a> {
    pub total_count: usize,
    pub uptodate_count: usize,
    pub outdated_count: usize,
    pub results: Vec<JsonReport<'a>>,
}

impl<'a> JsonBatchReport<'a> {
    pub fn new(reports: &[&'a CheckReport]) -> Self {
        let outdated_count = reports.iter().filter(|r| r.is_outdated).count();

        Self {
            total_count: reports.len(),
            uptodate_count: reports.len() - outdated_count,
            outdated_count,
            results: reports.iter().map(|r| JsonReport::from(*r)).collect(),
        }
    }
}

pub fn render_single(report: &CheckReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(report))
}

pub fn render_batch(reports: &[&CheckReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonBatchReport::new(reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::doc_url::parse;
    use crate::version::checker::VersionProbeResult;
    use crate::version::prober::ProbeOutcome;
    use serde_json::json;

    const URL: &str = "https://docs.redhat.com/en/documentation/openshift_container_platform/4.17/html/doc/page#sec";

    fn report(outcomes: Vec<(&str, ProbeOutcome)>) -> CheckReport {
        let reference = parse(URL).unwrap();
        let results = outcomes
            .into_iter()
            .map(|(version, outcome)| {
                VersionProbeResult::from_outcome(
                    version.to_string(),
                    reference.build_url(version),
                    outcome,
                )
            })
            .collect();
        CheckReport::new(&reference, results, false)
    }

    #[test]
    fn single_report_lists_only_valid_newer_versions() {
        let report = report(vec![
            ("4.18", ProbeOutcome::found(Some(false))),
            ("4.19", ProbeOutcome::found(Some(true))),
            ("4.20", ProbeOutcome::missing(true)),
        ]);

        let value: serde_json::Value = serde_json::from_str(&render_single(&report).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "original_url": URL,
                "original_version": "4.17",
                "latest_version": "4.19",
                "is_outdated": true,
                "newer_versions": [{
                    "version": "4.19",
                    "url": "https://docs.redhat.com/en/documentation/openshift_container_platform/4.19/html/doc/page#sec",
                }],
            })
        );
    }

    #[test]
    fn up_to_date_report_has_empty_newer_versions() {
        let report = report(vec![("4.18", ProbeOutcome::missing(true))]);

        let value: serde_json::Value = serde_json::from_str(&render_single(&report).unwrap()).unwrap();

        assert_eq!(value["is_outdated"], json!(false));
        assert_eq!(value["latest_version"], json!("4.17"));
        assert_eq!(value["newer_versions"], json!([]));
    }

    #[test]
    fn batch_report_counts_results() {
        let outdated = report(vec![("4.18", ProbeOutcome::found(Some(true)))]);
        let current = report(vec![]);

        let batch = JsonBatchReport::new(&[&outdated, &current, &outdated]);

        assert_eq!(batch.total_count, 3);
        assert_eq!(batch.uptodate_count, 1);
        assert_eq!(batch.outdated_count, 2);
        assert_eq!(batch.results.len(), 3);
        assert_eq!(batch.results[1].latest_version, "4.17");
    }

    #[test]
    fn empty_batch_renders_zero_counts() {
        let value: serde_json::Value = serde_json::from_str(&render_batch(&[]).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "total_count": 0,
                "uptodate_count": 0,
                "outdated_count": 0,
                "results": [],
            })
        );
    }
}
