//! Result types shared between checks and the report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// File presence per asset, keyed by `"ca"` plus service names
pub type FileCheckResults = BTreeMap<String, bool>;

/// Validity status per service
pub type ValidityResults = BTreeMap<String, ValidityStatus>;

/// Probe outcome per service
pub type ConnectivityResults = BTreeMap<String, ProbeOutcome>;

/// Outcome of verifying a service certificate against the CA
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidityStatus {
    Valid {
        /// Not-after timestamp, when it could be extracted
        expires_at: Option<DateTime<Utc>>,
        /// Whole days until expiry, when the timestamp is known
        days_left: Option<i64>,
    },
    Invalid {
        reason: String,
    },
}

impl ValidityStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidityStatus::Valid { .. })
    }

    pub fn days_left(&self) -> Option<i64> {
        match self {
            ValidityStatus::Valid { days_left, .. } => *days_left,
            ValidityStatus::Invalid { .. } => None,
        }
    }
}

/// Outcome of a single TLS connectivity probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// TCP connection and TLS handshake both succeeded
    Connected,
    /// TCP connection timed out
    Timeout,
    /// TCP connection was refused
    Refused,
    /// Anything else: handshake failure, resolution failure, reset
    Failed { message: String },
}

impl ProbeOutcome {
    /// Collapse to the boolean used in the summary
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeOutcome::Connected)
    }
}
