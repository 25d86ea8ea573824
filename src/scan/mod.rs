//! Finding documentation URLs in files and rewriting outdated ones
//! - scanner.rs: directory walk and URL extraction
//! - fixer.rs: atomic per-file URL replacement
//! - error.rs: ScanError and FixError

pub mod error;
pub mod fixer;
pub mod scanner;

pub use error::{FixError, ScanError};
pub use fixer::{FixSummary, FixedUrl, apply_fixes, rewrite_file};
pub use scanner::{UrlLocation, UrlScanner};
