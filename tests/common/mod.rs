//! Shared helpers for integration tests: generate a throwaway CA, issue
//! leaf certificates, and lay them out in the audited directory convention.

use rcgen::{
    BasicConstraints, CertificateParams, DnType, IsCa, Issuer, KeyPair, KeyUsagePurpose,
};
use std::fs;
use std::path::Path;
use time::{Duration, OffsetDateTime};

pub struct TestCa {
    pub cert_pem: String,
    pub issuer: Issuer<'static, KeyPair>,
}

pub fn make_ca(common_name: &str) -> TestCa {
    let mut params = CertificateParams::new(Vec::new()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyCertSign,
    ];

    let key = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key).unwrap();
    let cert_pem = cert.pem();
    let issuer = Issuer::from_ca_cert_pem(&cert_pem, key).unwrap();

    TestCa { cert_pem, issuer }
}

/// Issue a leaf certificate for `name`, expiring `days` from now
/// (negative values produce an already-expired certificate).
pub fn issue_leaf(ca: &TestCa, name: &str, days: i64) -> (String, String) {
    let mut params = CertificateParams::new(vec![name.to_string()]).unwrap();
    params.distinguished_name.push(DnType::CommonName, name);
    params.not_before = OffsetDateTime::now_utc() - Duration::days(30);
    // Pad past the day boundary so whole-day rounding stays at `days`
    params.not_after = OffsetDateTime::now_utc() + Duration::days(days) + Duration::hours(1);

    let key = KeyPair::generate().unwrap();
    let cert = params.signed_by(&key, &ca.issuer).unwrap();
    (cert.pem(), key.serialize_pem())
}

/// Write the CA pair under `<root>/ca/`
pub fn install_ca(root: &Path, ca: &TestCa) {
    let ca_dir = root.join("ca");
    fs::create_dir_all(&ca_dir).unwrap();
    fs::write(ca_dir.join("ca.crt"), &ca.cert_pem).unwrap();
    // The audit only stats the key file, so placeholder content suffices
    fs::write(ca_dir.join("ca.key"), "test key material").unwrap();
}

/// Write a complete asset triple for one service
pub fn install_service(root: &Path, ca: &TestCa, name: &str, days: i64) {
    let (cert_pem, key_pem) = issue_leaf(ca, name, days);
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.crt")), cert_pem).unwrap();
    fs::write(dir.join(format!("{name}.key")), key_pem).unwrap();
    fs::write(dir.join("ca.crt"), &ca.cert_pem).unwrap();
}
