//! TLS connectivity prober
//!
//! Opens a TCP connection to each service's port and performs a TLS
//! handshake with peer-certificate and hostname verification disabled. The
//! deployment uses a private CA, so this step tests reachability and TLS
//! capability only; trust is checked separately by the validity checker.
//! The permissive verifier must never be reused outside this probe.

use crate::config::ProbeSettings;
use crate::error::ProbeError;
use crate::models::ProbeOutcome;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::sync::Arc;
use tokio::net::TcpStream;

/// A certificate verifier that accepts any certificate.
#[derive(Debug)]
struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
        ]
    }
}

/// Probes TLS reachability of a single host across service ports
pub struct TlsProber {
    host: String,
    settings: ProbeSettings,
}

impl TlsProber {
    pub fn new(host: impl Into<String>, settings: ProbeSettings) -> Self {
        // Ensure a default crypto provider is installed
        let _ = rustls::crypto::ring::default_provider().install_default();
        Self {
            host: host.into(),
            settings,
        }
    }

    /// Probe one port, collapsing every failure mode into a `ProbeOutcome`.
    /// Nothing here is fatal to the overall run.
    pub async fn probe(&self, port: u16) -> ProbeOutcome {
        match self.check(port).await {
            Ok(()) => ProbeOutcome::Connected,
            Err(ProbeError::Timeout { .. }) => ProbeOutcome::Timeout,
            Err(ProbeError::Refused { .. }) => ProbeOutcome::Refused,
            Err(e) => ProbeOutcome::Failed {
                message: e.to_string(),
            },
        }
    }

    /// TCP connect within the timeout, then a TLS handshake over the stream
    pub async fn check(&self, port: u16) -> Result<(), ProbeError> {
        let stream = match tokio::time::timeout(
            self.settings.connect_timeout(),
            TcpStream::connect((self.host.as_str(), port)),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(self.classify_connect_error(port, &e)),
            Err(_) => {
                return Err(ProbeError::Timeout {
                    host: self.host.clone(),
                    port,
                })
            }
        };

        let server_name =
            ServerName::try_from(self.host.clone()).map_err(|e| ProbeError::Configuration {
                message: format!("invalid server name {}: {e}", self.host),
            })?;

        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier))
            .with_no_client_auth();
        let connector = tokio_rustls::TlsConnector::from(Arc::new(config));

        match tokio::time::timeout(
            self.settings.handshake_timeout(),
            connector.connect(server_name, stream),
        )
        .await
        {
            Ok(Ok(_tls_stream)) => Ok(()),
            Ok(Err(e)) => Err(ProbeError::Handshake {
                host: self.host.clone(),
                port,
                message: e.to_string(),
            }),
            Err(_) => Err(ProbeError::Handshake {
                host: self.host.clone(),
                port,
                message: "TLS handshake timed out".to_string(),
            }),
        }
    }

    fn classify_connect_error(&self, port: u16, e: &std::io::Error) -> ProbeError {
        use std::io::ErrorKind;

        match e.kind() {
            ErrorKind::ConnectionRefused => ProbeError::Refused {
                host: self.host.clone(),
                port,
            },
            ErrorKind::TimedOut => ProbeError::Timeout {
                host: self.host.clone(),
                port,
            },
            _ => ProbeError::Connection {
                host: self.host.clone(),
                port,
                message: e.to_string(),
            },
        }
    }
}
