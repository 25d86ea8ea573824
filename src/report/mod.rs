//! Rendering of check results
//! - text.rs: human-readable reports
//! - json.rs: machine-readable reports

pub mod json;
pub mod text;
