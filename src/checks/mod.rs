//! Check modules for cert-audit
//!
//! File presence, certificate validity, and TLS connectivity checks.

pub mod files;
pub mod probe;
pub mod validity;

pub use files::FileChecker;
pub use probe::TlsProber;
pub use validity::{TrustVerifier, ValidityChecker, X509Verifier};
