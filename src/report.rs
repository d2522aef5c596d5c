//! Report generation
//!
//! Aggregates the three result sets into summary counts, a per-service
//! detail table, and actionable recommendations, and derives the process
//! exit decision.

use crate::config::ServiceSpec;
use crate::models::{ConnectivityResults, FileCheckResults, ValidityResults, ValidityStatus};
use crate::output::print_header;
use console::style;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style as TabledStyle},
    Table, Tabled,
};

/// Urgency banding on days until expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpiryBand {
    /// Under 30 days
    Urgent,
    /// Under 90 days
    Warning,
    /// 90 days or more
    Healthy,
}

pub fn expiry_band(days_left: i64) -> ExpiryBand {
    if days_left < 30 {
        ExpiryBand::Urgent
    } else if days_left < 90 {
        ExpiryBand::Warning
    } else {
        ExpiryBand::Healthy
    }
}

/// Summary counts across all checks
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub files_present: usize,
    /// Services plus one for the CA
    pub files_expected: usize,
    pub certs_valid: usize,
    pub connections_ok: usize,
    pub total_services: usize,
}

/// Aggregated audit results, a pure function of the three result maps
pub struct AuditReport<'a> {
    services: &'a [ServiceSpec],
    pub files: FileCheckResults,
    pub validity: ValidityResults,
    pub connectivity: ConnectivityResults,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    files: &'a FileCheckResults,
    validity: &'a ValidityResults,
    connectivity: &'a ConnectivityResults,
    recommendations: Vec<String>,
    passed: bool,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Files")]
    files: String,
    #[tabled(rename = "Validity")]
    validity: String,
    #[tabled(rename = "Connection")]
    connection: String,
}

impl<'a> AuditReport<'a> {
    pub fn new(
        services: &'a [ServiceSpec],
        files: FileCheckResults,
        validity: ValidityResults,
        connectivity: ConnectivityResults,
    ) -> Self {
        Self {
            services,
            files,
            validity,
            connectivity,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files_present: self.files.values().filter(|v| **v).count(),
            files_expected: self.services.len() + 1,
            certs_valid: self.validity.values().filter(|v| v.is_valid()).count(),
            connections_ok: self
                .connectivity
                .values()
                .filter(|v| v.is_connected())
                .count(),
            total_services: self.services.len(),
        }
    }

    /// The exit decision: every file present and every checked certificate
    /// valid. Connectivity is reported but never affects exit status.
    pub fn passed(&self) -> bool {
        self.files.values().all(|v| *v) && self.validity.values().all(|v| v.is_valid())
    }

    pub fn recommendations(&self) -> Vec<String> {
        let summary = self.summary();
        let mut recs = Vec::new();

        if summary.files_present < summary.files_expected {
            recs.push(
                "Run the certificate generation script to create missing certificates".to_string(),
            );
        }
        if summary.certs_valid < summary.total_services {
            recs.push(
                "Some certificates are invalid - check the verification errors above".to_string(),
            );
        }
        if summary.connections_ok < summary.total_services {
            recs.push(
                "Some services are not accessible - check if the backing services are running"
                    .to_string(),
            );
        }

        for service in self.services {
            if let Some(ValidityStatus::Valid {
                days_left: Some(days),
                ..
            }) = self.validity.get(&service.name)
            {
                if *days < 30 {
                    recs.push(format!(
                        "{} certificate expires in {days} days - renew soon!",
                        service.name
                    ));
                }
            }
        }

        recs
    }

    /// Render the full human-readable report to the console
    pub fn print(&self) {
        print_header("Certificate Validation Report");

        let summary = self.summary();
        println!("{}", style("Summary:").bold());
        println!(
            "  Certificate files: {}/{}",
            summary.files_present, summary.files_expected
        );
        println!(
            "  Valid certificates: {}/{}",
            summary.certs_valid, summary.total_services
        );
        println!(
            "  TLS connections: {}/{}",
            summary.connections_ok, summary.total_services
        );

        println!();
        println!("{}", style("Detailed Results:").bold());

        let rows: Vec<ServiceRow> = self
            .services
            .iter()
            .map(|service| ServiceRow {
                service: service.name.clone(),
                files: glyph(self.files.get(&service.name).copied().unwrap_or(false)),
                validity: self.validity_cell(&service.name),
                connection: glyph(
                    self.connectivity
                        .get(&service.name)
                        .map(|o| o.is_connected())
                        .unwrap_or(false),
                ),
            })
            .collect();

        let table = Table::new(rows)
            .with(TabledStyle::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();
        println!("{table}");

        let recs = self.recommendations();
        if !recs.is_empty() {
            println!();
            println!("{}", style("Recommendations:").yellow().bold());
            for rec in &recs {
                println!("  {} {}", style("•").yellow(), rec);
            }
        }
    }

    /// Render the report as pretty JSON
    pub fn print_json(&self) -> crate::error::Result<()> {
        crate::output::print_json(&JsonReport {
            summary: self.summary(),
            files: &self.files,
            validity: &self.validity,
            connectivity: &self.connectivity,
            recommendations: self.recommendations(),
            passed: self.passed(),
        })
    }

    fn validity_cell(&self, service: &str) -> String {
        match self.validity.get(service) {
            Some(ValidityStatus::Valid {
                days_left: Some(days),
                ..
            }) => {
                let text = format!("✓ expires in {days} days");
                match expiry_band(*days) {
                    ExpiryBand::Urgent => style(text).red().to_string(),
                    ExpiryBand::Warning => style(text).yellow().to_string(),
                    ExpiryBand::Healthy => style(text).green().to_string(),
                }
            }
            Some(ValidityStatus::Valid { .. }) => style("✓").green().to_string(),
            _ => style("✗").red().to_string(),
        }
    }
}

fn glyph(ok: bool) -> String {
    if ok {
        style("✓").green().to_string()
    } else {
        style("✗").red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeOutcome;
    use std::collections::BTreeMap;

    fn services() -> Vec<ServiceSpec> {
        vec![
            ServiceSpec::new("redis", 6380),
            ServiceSpec::new("minio", 9000),
        ]
    }

    fn all_good(services: &[ServiceSpec]) -> AuditReport<'_> {
        let mut files = BTreeMap::new();
        files.insert("ca".to_string(), true);
        let mut validity = BTreeMap::new();
        let mut connectivity = BTreeMap::new();
        for s in services {
            files.insert(s.name.clone(), true);
            validity.insert(
                s.name.clone(),
                ValidityStatus::Valid {
                    expires_at: None,
                    days_left: Some(365),
                },
            );
            connectivity.insert(s.name.clone(), ProbeOutcome::Connected);
        }
        AuditReport::new(services, files, validity, connectivity)
    }

    #[test]
    fn test_expiry_bands() {
        assert_eq!(expiry_band(10), ExpiryBand::Urgent);
        assert_eq!(expiry_band(29), ExpiryBand::Urgent);
        assert_eq!(expiry_band(30), ExpiryBand::Warning);
        assert_eq!(expiry_band(89), ExpiryBand::Warning);
        assert_eq!(expiry_band(90), ExpiryBand::Healthy);
        assert_eq!(expiry_band(200), ExpiryBand::Healthy);
    }

    #[test]
    fn test_summary_counts_and_pass() {
        let services = services();
        let report = all_good(&services);
        let summary = report.summary();
        assert_eq!(summary.files_present, 3);
        assert_eq!(summary.files_expected, 3);
        assert_eq!(summary.certs_valid, 2);
        assert_eq!(summary.connections_ok, 2);
        assert!(report.passed());
        assert!(report.recommendations().is_empty());
    }

    #[test]
    fn test_connectivity_does_not_affect_exit() {
        let services = services();
        let mut report = all_good(&services);
        report
            .connectivity
            .insert("redis".to_string(), ProbeOutcome::Refused);
        assert!(report.passed());
        assert_eq!(report.recommendations().len(), 1);
    }

    #[test]
    fn test_missing_file_fails_and_recommends() {
        let services = services();
        let mut report = all_good(&services);
        report.files.insert("redis".to_string(), false);
        assert!(!report.passed());
        assert!(report
            .recommendations()
            .iter()
            .any(|r| r.contains("missing certificates")));
    }

    #[test]
    fn test_expiring_soon_called_out_per_service() {
        let services = services();
        let mut report = all_good(&services);
        report.validity.insert(
            "minio".to_string(),
            ValidityStatus::Valid {
                expires_at: None,
                days_left: Some(12),
            },
        );
        let recs = report.recommendations();
        assert!(recs
            .iter()
            .any(|r| r.contains("minio") && r.contains("12 days")));
        // still passes: urgency is a recommendation, not a failure
        assert!(report.passed());
    }

    #[test]
    fn test_invalid_certificate_fails() {
        let services = services();
        let mut report = all_good(&services);
        report.validity.insert(
            "redis".to_string(),
            ValidityStatus::Invalid {
                reason: "certificate signature verification failed".to_string(),
            },
        );
        assert!(!report.passed());
        assert_eq!(report.summary().certs_valid, 1);
    }
}
