use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::Context;

// =============================================================================
// Probe-related constants
// =============================================================================

/// Timeout for a single HTTP request in milliseconds (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Attempts per probe, including the first one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff step in milliseconds; attempt k waits k * step
pub const DEFAULT_BACKOFF_STEP_MS: u64 = 2_000;

/// Upper bound on concurrent probes (and concurrent checks in a batch)
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 5;

// =============================================================================
// Site-related constants
// =============================================================================

/// Host serving the OpenShift documentation
pub const DEFAULT_DOCS_HOST: &str = "docs.redhat.com";

/// Path segment that precedes the version segment
pub const DEFAULT_PRODUCT_SEGMENT: &str = "openshift_container_platform";

/// Versions probed when no explicit list is configured
pub const DEFAULT_KNOWN_VERSIONS: [&str; 11] = [
    "4.10", "4.11", "4.12", "4.13", "4.14", "4.15", "4.16", "4.17", "4.18", "4.19", "4.20",
];

const APP_NAME: &str = "ocp-doc-checker";

/// Checker configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    pub known_versions: Vec<String>,
    pub site: SiteConfig,
    pub probe: ProbeConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            known_versions: DEFAULT_KNOWN_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect(),
            site: SiteConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

/// Which documentation site URLs must belong to
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub host: String,
    pub product: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DOCS_HOST.to_string(),
            product: DEFAULT_PRODUCT_SEGMENT.to_string(),
        }
    }
}

/// HTTP probing configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeConfig {
    pub request_timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_step_ms: u64,
    pub max_concurrent_probes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step_ms: DEFAULT_BACKOFF_STEP_MS,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
        }
    }
}

impl CheckerConfig {
    /// Reads a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads `explicit` if given, otherwise the default config file when it
    /// exists, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Returns the path to the default config file.
/// Uses $XDG_CONFIG_HOME/ocp-doc-checker if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/ocp-doc-checker.
pub fn config_path() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

/// Returns the default path of the JSON log file.
pub fn log_path() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
    .join("ocp-doc-checker.log")
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn checker_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CheckerConfig>(json!({
            "probe": {
                "maxAttempts": 5
            }
        }))
        .unwrap();

        assert_eq!(result.probe.max_attempts, 5);
        assert_eq!(result.probe.backoff_step_ms, DEFAULT_BACKOFF_STEP_MS);
        assert_eq!(result.site, SiteConfig::default());
        assert_eq!(result.known_versions.len(), DEFAULT_KNOWN_VERSIONS.len());
    }

    #[test]
    fn checker_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<CheckerConfig>(json!({
            "knownVersions": ["4.18", "4.19"],
            "site": {
                "host": "docs.example.org",
                "product": "okd"
            },
            "probe": {
                "requestTimeoutMs": 1000,
                "maxAttempts": 2,
                "backoffStepMs": 10,
                "maxConcurrentProbes": 1
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            CheckerConfig {
                known_versions: vec!["4.18".to_string(), "4.19".to_string()],
                site: SiteConfig {
                    host: "docs.example.org".to_string(),
                    product: "okd".to_string(),
                },
                probe: ProbeConfig {
                    request_timeout_ms: 1000,
                    max_attempts: 2,
                    backoff_step_ms: 10,
                    max_concurrent_probes: 1,
                },
            }
        );
    }

    #[test]
    fn from_file_reads_json_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"knownVersions": ["4.20"]}}"#).unwrap();

        let config = CheckerConfig::from_file(file.path()).unwrap();

        assert_eq!(config.known_versions, vec!["4.20".to_string()]);
        assert_eq!(config.probe, ProbeConfig::default());
    }

    #[test]
    fn from_file_reports_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(CheckerConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn dir_with_env_uses_xdg_home_when_set() {
        let path = dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
            ".config",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/ocp-doc-checker"));
    }

    #[test]
    fn dir_with_env_falls_back_to_home() {
        let path = dir_with_env(None, Some(PathBuf::from("/home/user")), ".local/share");

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/ocp-doc-checker")
        );
    }

    #[test]
    fn dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = dir_with_env(None, None, ".config");
        assert_eq!(path, PathBuf::from("./ocp-doc-checker"));
    }
}
