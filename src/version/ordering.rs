//! Candidate version enumeration

use tracing::debug;

use crate::parser::types::DocVersion;

/// Versions from `known` that are strictly newer than `current`
///
/// The result is ascending and free of duplicates. Entries of `known` that
/// are not `major.minor` are skipped. An unparseable `current` has no newer
/// versions, so the result is empty.
pub fn candidate_versions(current: &str, known: &[String]) -> Vec<String> {
    let Ok(current_version) = current.parse::<DocVersion>() else {
        debug!("Current version {:?} is not major.minor; nothing to probe", current);
        return Vec::new();
    };

    let mut newer: Vec<(DocVersion, &String)> = known
        .iter()
        .filter_map(|raw| match raw.parse::<DocVersion>() {
            Ok(version) => Some((version, raw)),
            Err(e) => {
                debug!("Skipping known version: {}", e);
                None
            }
        })
        .filter(|(version, _)| *version > current_version)
        .collect();

    newer.sort_by_key(|(version, _)| *version);
    newer.dedup_by_key(|(version, _)| *version);

    newer.into_iter().map(|(_, raw)| raw.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn four_ten_to_nineteen() -> Vec<String> {
        (10..=19).map(|minor| format!("4.{minor}")).collect()
    }

    #[rstest]
    #[case("4.17", &["4.18", "4.19"])]
    #[case("4.9", &["4.10", "4.11", "4.12", "4.13", "4.14", "4.15", "4.16", "4.17", "4.18", "4.19"])]
    #[case("4.19", &[])] // already the newest known version
    #[case("5.0", &[])]
    #[case("invalid", &[])] // unparseable current version
    fn candidate_versions_returns_strictly_newer(#[case] current: &str, #[case] expected: &[&str]) {
        assert_eq!(
            candidate_versions(current, &four_ten_to_nineteen()),
            strings(expected)
        );
    }

    #[test]
    fn candidate_versions_sorts_unordered_input() {
        let known = strings(&["4.19", "5.1", "4.18", "5.0", "4.20"]);

        assert_eq!(
            candidate_versions("4.17", &known),
            strings(&["4.18", "4.19", "4.20", "5.0", "5.1"])
        );
    }

    #[test]
    fn candidate_versions_skips_unparseable_entries() {
        let known = strings(&["4.18", "latest", "4.19.1", "v4.20", "4.21"]);

        assert_eq!(
            candidate_versions("4.17", &known),
            strings(&["4.18", "4.21"])
        );
    }

    #[test]
    fn candidate_versions_collapses_duplicates() {
        let known = strings(&["4.18", "4.18", "4.19"]);

        assert_eq!(candidate_versions("4.17", &known), strings(&["4.18", "4.19"]));
    }

    #[test]
    fn candidate_versions_orders_by_tuple_not_float_key() {
        // Under the legacy float key 4.150 (= 5.5) would land after 5.1.
        let known = strings(&["5.1", "4.150", "4.100"]);

        assert_eq!(
            candidate_versions("4.99", &known),
            strings(&["4.100", "4.150", "5.1"])
        );
    }

    #[test]
    fn candidate_versions_output_is_strictly_ascending_and_newer() {
        let known = strings(&["4.3", "4.12", "4.1", "3.11", "4.20", "4.2", "4.12", "10.0"]);
        let current: DocVersion = "4.2".parse().unwrap();

        let result: Vec<DocVersion> = candidate_versions("4.2", &known)
            .iter()
            .map(|v| v.parse().unwrap())
            .collect();

        assert!(result.iter().all(|v| *v > current));
        assert!(result.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(result.len(), 4);
    }
}
