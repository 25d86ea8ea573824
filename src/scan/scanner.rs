//! Documentation URL scanner for text files

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::scan::error::ScanError;

/// File extensions scanned when walking a directory
const SUPPORTED_EXTENSIONS: [&str; 4] = ["md", "markdown", "txt", "adoc"];

/// Trailing characters that belong to the surrounding prose, not the URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// One documentation URL and every file it appears in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
    pub url: String,
    pub files: Vec<PathBuf>,
}

/// Finds versioned documentation URLs in text
pub struct UrlScanner {
    pattern: Regex,
}

impl UrlScanner {
    pub fn new(site: &SiteConfig) -> Result<Self, ScanError> {
        let pattern = format!(
            r#"https://{}/[^\s)\]"]*{}/\d+\.\d+/[^\s)\]"]*"#,
            regex::escape(&site.host),
            regex::escape(&site.product)
        );

        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Every URL occurrence in `content`, in order, duplicates included
    pub fn find_urls(&self, content: &str) -> Vec<String> {
        self.pattern
            .find_iter(content)
            .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
            .collect()
    }

    /// URLs found in one file
    pub fn scan_file(&self, path: &Path) -> Result<Vec<String>, ScanError> {
        let bytes = std::fs::read(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.find_urls(&String::from_utf8_lossy(&bytes)))
    }

    /// Scan a file, or every supported file below a directory
    ///
    /// URLs are grouped in first-seen order, each with the distinct files
    /// containing it. Unreadable files inside a directory are skipped.
    pub fn scan_path(&self, path: &Path) -> Result<Vec<UrlLocation>, ScanError> {
        let mut locations: IndexMap<String, Vec<PathBuf>> = IndexMap::new();

        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() || !is_supported(entry.path()) {
                    continue;
                }

                match self.scan_file(entry.path()) {
                    Ok(urls) => record(&mut locations, urls, entry.path()),
                    Err(e) => warn!("Skipping file: {}", e),
                }
            }
        } else {
            let urls = self.scan_file(path)?;
            record(&mut locations, urls, path);
        }

        debug!(
            "Found {} unique URL(s) under {}",
            locations.len(),
            path.display()
        );

        Ok(locations
            .into_iter()
            .map(|(url, files)| UrlLocation { url, files })
            .collect())
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

fn record(locations: &mut IndexMap<String, Vec<PathBuf>>, urls: Vec<String>, file: &Path) {
    for url in urls {
        let files = locations.entry(url).or_default();
        if !files.iter().any(|f| f == file) {
            files.push(file.to_path_buf());
        }
    }
}
