//! Version resolution and validity checking
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Parser    │────▶│  Ordering   │────▶│   Checker   │
//! │ (doc URL)   │     │ (candidates)│     │ (aggregate) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Prober    │
//!                                         │(HTTP+anchor)│
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`ordering`]: strictly-newer candidate versions
//! - [`prober`]: Prober trait and probe outcome
//! - [`http_prober`]: reqwest-based prober with retries
//! - [`retry`]: retry budget, backoff curve and the injectable sleeper
//! - [`checker`]: per-URL orchestrator and report types
//! - [`batch`]: bounded fan-out over many URLs
//! - [`cancel`]: cancellation signal for in-flight checks
//! - [`error`]: Error types for probing and checking

pub mod batch;
pub mod cancel;
pub mod checker;
pub mod error;
pub mod http_prober;
pub mod ordering;
pub mod prober;
pub mod retry;

pub use checker::{CheckReport, Checker, VersionProbeResult};
pub use error::{CheckError, ProbeError};
pub use prober::{ProbeOutcome, Prober};
