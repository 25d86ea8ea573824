//! In-place rewriting of outdated documentation URLs

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::scan::error::FixError;
use crate::scan::scanner::UrlLocation;
use crate::version::checker::CheckReport;

/// One URL rewritten in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedUrl {
    pub file: PathBuf,
    pub from_version: String,
    pub to_version: String,
    pub old_url: String,
    pub new_url: String,
}

/// What [`apply_fixes`] changed, and which files it could not change
#[derive(Debug, Default)]
pub struct FixSummary {
    pub fixed: Vec<FixedUrl>,
    pub failures: Vec<FixError>,
}

impl FixSummary {
    /// Number of distinct files that were rewritten
    pub fn files_changed(&self) -> usize {
        let mut files: Vec<&Path> = self.fixed.iter().map(|f| f.file.as_path()).collect();
        files.sort();
        files.dedup();
        files.len()
    }
}

/// Point every outdated URL at its newest valid version
///
/// Each file containing an outdated URL is rewritten on its own; a failure
/// on one file is recorded and the others are still processed. Cancelled
/// reports only cover a prefix of the candidates, so they are never applied.
pub fn apply_fixes(reports: &[&CheckReport], locations: &[UrlLocation]) -> FixSummary {
    let files_by_url: HashMap<&str, &[PathBuf]> = locations
        .iter()
        .map(|location| (location.url.as_str(), location.files.as_slice()))
        .collect();
    let mut summary = FixSummary::default();

    for report in reports {
        if report.cancelled {
            info!("Not fixing {}: its check was cancelled", report.original_url);
            continue;
        }
        let Some(latest) = report.latest() else {
            continue;
        };
        let Some(files) = files_by_url.get(report.original_url.as_str()) else {
            continue;
        };

        for file in files.iter() {
            match rewrite_file(file, &report.original_url, &latest.url) {
                Ok(true) => {
                    info!(
                        "Updated {}: {} -> {}",
                        file.display(),
                        report.original_version,
                        latest.version
                    );
                    summary.fixed.push(FixedUrl {
                        file: file.clone(),
                        from_version: report.original_version.clone(),
                        to_version: latest.version.clone(),
                        old_url: report.original_url.clone(),
                        new_url: latest.url.clone(),
                    });
                }
                Ok(false) => {}
                Err(e) => {
                    error!("{}", e);
                    summary.failures.push(e);
                }
            }
        }
    }

    summary
}

/// Replace every occurrence of `old_url` with `new_url` in `path`
///
/// The new content is written to a temporary file next to `path` and renamed
/// over it, so the file is either fully rewritten or left untouched. Returns
/// whether anything changed.
pub fn rewrite_file(path: &Path, old_url: &str, new_url: &str) -> Result<bool, FixError> {
    let content = std::fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if !content.contains(old_url) {
        return Ok(false);
    }
    let updated = content.replace(old_url, new_url);

    let write_error = |source| FixError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = std::fs::metadata(path).map_err(write_error)?.permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(updated.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    std::fs::set_permissions(temp.path(), permissions).map_err(write_error)?;
    temp.persist(path)?;

    Ok(true)
}
