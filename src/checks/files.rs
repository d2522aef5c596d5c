//! File presence checker
//!
//! Stats each expected asset path and reports presence per asset. Does not
//! inspect file contents.

use crate::config::ServiceSpec;
use crate::layout::AssetLayout;
use crate::models::FileCheckResults;
use console::style;
use std::path::Path;

/// Key under which the CA presence result is stored
pub const CA_KEY: &str = "ca";

/// Checks that expected certificate files exist on disk
pub struct FileChecker<'a> {
    layout: &'a AssetLayout,
}

impl<'a> FileChecker<'a> {
    pub fn new(layout: &'a AssetLayout) -> Self {
        Self { layout }
    }

    /// Check presence of the CA pair and every service's asset triple.
    ///
    /// The CA counts as present only if both certificate and key exist; a
    /// service counts as present only if certificate, key, and its local CA
    /// copy all exist. One status line is printed per asset.
    pub fn check(&self, services: &[ServiceSpec]) -> FileCheckResults {
        let mut results = FileCheckResults::new();

        let ca = self.layout.ca_paths();
        let ca_present = path_present(&ca.cert) && path_present(&ca.key);
        if ca_present {
            println!("{}", style("✓ CA certificate and key found").green());
        } else {
            println!("{}", style("✗ CA certificate or key missing").red());
        }
        results.insert(CA_KEY.to_string(), ca_present);

        for service in services {
            let paths = self.layout.service_paths(&service.name);
            let present = path_present(&paths.cert)
                && path_present(&paths.key)
                && path_present(&paths.ca_copy);
            if present {
                println!(
                    "{}",
                    style(format!("✓ {} certificates found", service.name)).green()
                );
            } else {
                println!(
                    "{}",
                    style(format!("✗ {} certificates missing", service.name)).red()
                );
            }
            results.insert(service.name.clone(), present);
        }

        results
    }
}

// Filesystem errors (e.g. permission denied on a parent directory) count as
// "not present" rather than aborting the run.
fn path_present(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_not_present() {
        assert!(!path_present(Path::new("/nonexistent/dir/cert.crt")));
    }
}
