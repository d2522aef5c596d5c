//! cert-audit library
//!
//! Audits TLS assets for a multi-service deployment:
//! - Certificate/key file presence per service and for the deployment CA
//! - Cryptographic verification of each leaf certificate against the CA
//! - Expiry windows with urgency banding
//! - Live TLS connectivity probes per service port
//!
//! Everything is recomputed from disk and network state on each run; no
//! state is kept between invocations.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod output;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{ServiceSpec, Settings};
pub use error::{AuditError, Result};
pub use layout::AssetLayout;
pub use models::{ProbeOutcome, ValidityStatus};
pub use report::AuditReport;
