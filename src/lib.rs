//! Outdated OpenShift documentation link detection
//!
//! - [`parser`]: documentation URL parsing and HTML anchor scanning
//! - [`version`]: candidate enumeration, probing and the check orchestrator
//! - [`scan`]: finding documentation URLs in files and rewriting them
//! - [`report`]: text and JSON rendering of check results
//! - [`config`]: configuration and default constants
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod parser;
pub mod report;
pub mod scan;
pub mod version;
