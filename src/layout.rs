//! Asset layout resolution
//!
//! Derives the expected on-disk locations of CA and per-service TLS assets
//! from a root directory. Pure path arithmetic, no I/O.

use std::path::{Path, PathBuf};

/// Expected locations of the root CA material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Expected locations of a single service's TLS assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
    /// Service-local copy of the CA certificate
    pub ca_copy: PathBuf,
}

/// Resolves asset paths under a fixed root directory.
///
/// Layout convention:
/// `<root>/ca/{ca.crt,ca.key}` and
/// `<root>/<service>/{<service>.crt,<service>.key,ca.crt}`.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ca_paths(&self) -> CaPaths {
        let ca_dir = self.root.join("ca");
        CaPaths {
            cert: ca_dir.join("ca.crt"),
            key: ca_dir.join("ca.key"),
        }
    }

    pub fn service_paths(&self, service: &str) -> AssetPaths {
        let dir = self.root.join(service);
        AssetPaths {
            cert: dir.join(format!("{service}.crt")),
            key: dir.join(format!("{service}.key")),
            ca_copy: dir.join("ca.crt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ca_paths() {
        let layout = AssetLayout::new("ssl");
        let ca = layout.ca_paths();
        assert_eq!(ca.cert, PathBuf::from("ssl/ca/ca.crt"));
        assert_eq!(ca.key, PathBuf::from("ssl/ca/ca.key"));
    }

    #[test]
    fn test_service_paths() {
        let layout = AssetLayout::new("/etc/deploy/ssl");
        let paths = layout.service_paths("redis");
        assert_eq!(paths.cert, PathBuf::from("/etc/deploy/ssl/redis/redis.crt"));
        assert_eq!(paths.key, PathBuf::from("/etc/deploy/ssl/redis/redis.key"));
        assert_eq!(paths.ca_copy, PathBuf::from("/etc/deploy/ssl/redis/ca.crt"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let layout = AssetLayout::new("ssl");
        assert_eq!(
            layout.service_paths("minio"),
            layout.service_paths("minio")
        );
    }
}
