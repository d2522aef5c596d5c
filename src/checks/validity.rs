//! Certificate validity checker
//!
//! Verifies each service's leaf certificate against the deployment CA and
//! computes days until expiry. Verification is native (x509-parser) behind
//! the `TrustVerifier` trait so tests can substitute their own verifier.
//! This validates signing by the local CA, not public trust anchoring.

use crate::config::ServiceSpec;
use crate::error::CertError;
use crate::layout::AssetLayout;
use crate::models::{ValidityResults, ValidityStatus};
use chrono::{DateTime, TimeZone, Utc};
use console::style;
use std::path::Path;
use x509_parser::prelude::*;

/// Narrow verification interface: chain check plus expiry extraction.
pub trait TrustVerifier {
    /// Verify that `leaf_der` was signed by `ca_der` and is within its
    /// validity period. The error carries the diagnostic reason.
    fn verify_chain(&self, ca_der: &[u8], leaf_der: &[u8]) -> Result<(), CertError>;

    /// Extract the leaf certificate's not-after timestamp.
    fn read_expiry(&self, leaf_der: &[u8]) -> Result<DateTime<Utc>, CertError>;
}

/// Native X.509 verifier using x509-parser's signature verification
#[derive(Debug, Default)]
pub struct X509Verifier;

impl TrustVerifier for X509Verifier {
    fn verify_chain(&self, ca_der: &[u8], leaf_der: &[u8]) -> Result<(), CertError> {
        let (_, ca) = X509Certificate::from_der(ca_der).map_err(|e| CertError::Parse {
            message: format!("CA certificate: {e:?}"),
        })?;
        let (_, leaf) = X509Certificate::from_der(leaf_der).map_err(|e| CertError::Parse {
            message: format!("{e:?}"),
        })?;

        let now = Utc::now().timestamp();

        let ca_validity = ca.validity();
        if now < ca_validity.not_before.timestamp() || now > ca_validity.not_after.timestamp() {
            return Err(CertError::CaNotValid);
        }

        if leaf.issuer() != ca.subject() {
            return Err(CertError::IssuerMismatch);
        }

        leaf.verify_signature(Some(ca.public_key()))
            .map_err(|_| CertError::BadSignature)?;

        let validity = leaf.validity();
        if now > validity.not_after.timestamp() {
            return Err(CertError::Expired);
        }
        if now < validity.not_before.timestamp() {
            return Err(CertError::NotYetValid);
        }

        Ok(())
    }

    fn read_expiry(&self, leaf_der: &[u8]) -> Result<DateTime<Utc>, CertError> {
        let (_, leaf) = X509Certificate::from_der(leaf_der).map_err(|e| CertError::Parse {
            message: format!("{e:?}"),
        })?;

        let ts = leaf.validity().not_after.timestamp();
        Utc.timestamp_opt(ts, 0)
            .single()
            .ok_or_else(|| CertError::ExpiryUnavailable {
                message: format!("not-after timestamp {ts} out of range"),
            })
    }
}

/// Read the first certificate from a PEM (or raw DER) file as DER bytes
pub fn read_certificate(path: &Path) -> Result<Vec<u8>, CertError> {
    let data = std::fs::read(path).map_err(|e| CertError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if data.windows(11).any(|w| w == b"-----BEGIN ") {
        let blocks = ::pem::parse_many(&data).map_err(|e| CertError::Parse {
            message: format!("invalid PEM in {}: {e}", path.display()),
        })?;
        return blocks
            .into_iter()
            .find(|p| p.tag() == "CERTIFICATE")
            .map(|p| p.into_contents())
            .ok_or_else(|| CertError::NoCertificate {
                path: path.display().to_string(),
            });
    }

    // Fall back to treating the file as a single DER certificate
    Ok(data)
}

/// Checks certificate validity for every configured service
pub struct ValidityChecker<'a, V: TrustVerifier> {
    layout: &'a AssetLayout,
    verifier: V,
}

impl<'a> ValidityChecker<'a, X509Verifier> {
    pub fn new(layout: &'a AssetLayout) -> Self {
        Self::with_verifier(layout, X509Verifier)
    }
}

impl<'a, V: TrustVerifier> ValidityChecker<'a, V> {
    pub fn with_verifier(layout: &'a AssetLayout, verifier: V) -> Self {
        Self { layout, verifier }
    }

    /// Verify every service certificate against the CA.
    ///
    /// Returns an empty map when the CA certificate is absent (the rest of
    /// the run continues). Per-service failures are isolated: a bad or
    /// unreadable certificate never prevents checking the others.
    pub fn check(&self, services: &[ServiceSpec]) -> ValidityResults {
        let mut results = ValidityResults::new();

        let ca_path = self.layout.ca_paths().cert;
        if !ca_path.try_exists().unwrap_or(false) {
            tracing::error!(path = %ca_path.display(), "CA certificate not found, skipping validity checks");
            println!("{}", style("CA certificate not found").red());
            return results;
        }

        // Load once; a CA that exists but cannot be read or parsed surfaces
        // as the invalidity reason for each service rather than aborting.
        let ca_der = read_certificate(&ca_path);

        for service in services {
            let cert_path = self.layout.service_paths(&service.name).cert;

            if !cert_path.try_exists().unwrap_or(false) {
                results.insert(
                    service.name.clone(),
                    ValidityStatus::Invalid {
                        reason: "certificate file not found".to_string(),
                    },
                );
                continue;
            }

            let status = match &ca_der {
                Ok(ca) => self.check_service(ca, &cert_path),
                Err(e) => ValidityStatus::Invalid {
                    reason: e.to_string(),
                },
            };

            match &status {
                ValidityStatus::Valid { .. } => {
                    println!(
                        "{}",
                        style(format!("✓ {} certificate is valid", service.name)).green()
                    );
                }
                ValidityStatus::Invalid { reason } => {
                    println!(
                        "{}",
                        style(format!(
                            "✗ {} certificate verification failed: {reason}",
                            service.name
                        ))
                        .red()
                    );
                }
            }

            results.insert(service.name.clone(), status);
        }

        results
    }

    fn check_service(&self, ca_der: &[u8], cert_path: &Path) -> ValidityStatus {
        let leaf_der = match read_certificate(cert_path) {
            Ok(der) => der,
            Err(e) => {
                return ValidityStatus::Invalid {
                    reason: e.to_string(),
                }
            }
        };

        if let Err(e) = self.verifier.verify_chain(ca_der, &leaf_der) {
            return ValidityStatus::Invalid {
                reason: e.to_string(),
            };
        }

        // Verification passed; a missing expiry timestamp degrades to
        // "Unknown" rather than invalidating the certificate.
        match self.verifier.read_expiry(&leaf_der) {
            Ok(expires_at) => {
                let days_left = (expires_at - Utc::now()).num_days();
                ValidityStatus::Valid {
                    expires_at: Some(expires_at),
                    days_left: Some(days_left),
                }
            }
            Err(e) => {
                tracing::debug!(path = %cert_path.display(), error = %e, "expiry extraction failed");
                ValidityStatus::Valid {
                    expires_at: None,
                    days_left: None,
                }
            }
        }
    }
}
