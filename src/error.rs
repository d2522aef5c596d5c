//! Custom error types for cert-audit
//!
//! Domain-specific error types using `thiserror` for the failure modes that
//! can occur while auditing certificate assets.

use thiserror::Error;

/// Top-level error type for the cert-audit application
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Certificate error: {0}")]
    Certificate(#[from] CertError),

    #[error("Connectivity error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Certificate reading and verification errors
#[derive(Error, Debug)]
pub enum CertError {
    #[error("Failed to read {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("No CERTIFICATE block found in {path}")]
    NoCertificate { path: String },

    #[error("Failed to parse certificate: {message}")]
    Parse { message: String },

    #[error("certificate issuer does not match CA subject")]
    IssuerMismatch,

    #[error("certificate signature verification failed")]
    BadSignature,

    #[error("certificate has expired")]
    Expired,

    #[error("certificate is not yet valid")]
    NotYetValid,

    #[error("CA certificate is outside its validity period")]
    CaNotValid,

    #[error("Failed to extract expiry timestamp: {message}")]
    ExpiryUnavailable { message: String },
}

/// Connectivity probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Connection timed out to {host}:{port}")]
    Timeout { host: String, port: u16 },

    #[error("Connection refused to {host}:{port}")]
    Refused { host: String, port: u16 },

    #[error("TLS handshake failed with {host}:{port}: {message}")]
    Handshake {
        host: String,
        port: u16,
        message: String,
    },

    #[error("Connection failed to {host}:{port}: {message}")]
    Connection {
        host: String,
        port: u16,
        message: String,
    },

    #[error("TLS configuration error: {message}")]
    Configuration { message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;
