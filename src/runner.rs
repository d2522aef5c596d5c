//! Audit orchestration engine
//!
//! Runs the check phases strictly in sequence: file presence, certificate
//! validity, connectivity. Standalone so it can be driven by the CLI binary
//! or by integration tests.

use crate::checks::{FileChecker, TlsProber, ValidityChecker};
use crate::config::Settings;
use crate::error::{AuditError, Result};
use crate::layout::AssetLayout;
use crate::models::{ConnectivityResults, ProbeOutcome};
use crate::output::{create_spinner, print_header};
use crate::report::AuditReport;
use console::style;
use std::path::Path;

/// Run the full audit against the asset root.
///
/// Fails fast only when the root directory itself is missing; every
/// per-service problem is captured in the returned report instead.
pub async fn run_audit<'a>(settings: &'a Settings, root: &Path) -> Result<AuditReport<'a>> {
    if !root.try_exists().unwrap_or(false) {
        return Err(AuditError::Precondition(format!(
            "certificate directory '{}' not found",
            root.display()
        )));
    }

    let layout = AssetLayout::new(root);

    print_header("Validating certificate files");
    let files = FileChecker::new(&layout).check(&settings.services);

    print_header("Checking certificate validity");
    let validity = ValidityChecker::new(&layout).check(&settings.services);

    print_header("Testing TLS connectivity");
    let connectivity = probe_services(settings).await;

    Ok(AuditReport::new(
        &settings.services,
        files,
        validity,
        connectivity,
    ))
}

/// Probe each service once, in declaration order. No retries.
async fn probe_services(settings: &Settings) -> ConnectivityResults {
    let prober = TlsProber::new(settings.host.clone(), settings.probe.clone());
    let mut results = ConnectivityResults::new();

    for service in &settings.services {
        let spinner = create_spinner(&format!(
            "Probing {} ({}:{})...",
            service.name, settings.host, service.port
        ));
        let outcome = prober.probe(service.port).await;
        spinner.finish_and_clear();

        match &outcome {
            ProbeOutcome::Connected => {
                println!(
                    "{}",
                    style(format!("✓ {} TLS connection successful", service.name)).green()
                );
            }
            ProbeOutcome::Timeout => {
                tracing::warn!(service = %service.name, port = service.port, "connection timeout");
                println!(
                    "{}",
                    style(format!(
                        "⚠ {} connection timeout (service may be down)",
                        service.name
                    ))
                    .yellow()
                );
            }
            ProbeOutcome::Refused => {
                tracing::warn!(service = %service.name, port = service.port, "connection refused");
                println!(
                    "{}",
                    style(format!(
                        "⚠ {} connection refused (service not running)",
                        service.name
                    ))
                    .yellow()
                );
            }
            ProbeOutcome::Failed { message } => {
                tracing::error!(service = %service.name, port = service.port, error = %message, "probe failed");
                println!(
                    "{}",
                    style(format!(
                        "✗ {} TLS connection failed: {message}",
                        service.name
                    ))
                    .red()
                );
            }
        }

        results.insert(service.name.clone(), outcome);
    }

    results
}
