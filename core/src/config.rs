//! Connection parameters for one Candlepin endpoint.

use std::path::{Path, PathBuf};

/// Where and how to reach the Candlepin REST API.
///
/// Built once with the consuming `with_*` methods and then only read.
/// Whether TLS is used is decided by `secure` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    host: String,
    port: u16,
    base_path: String,
    secure: bool,
    cert_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
    accept_invalid_certs: bool,
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: u16, base_path: &str) -> Self {
        Self {
            host: host.into(),
            port,
            base_path: normalize_base_path(base_path),
            secure: false,
            cert_file: None,
            key_file: None,
            accept_invalid_certs: false,
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// PEM client certificate and private key presented on TLS connections.
    /// Both may point at the same file.
    pub fn with_client_cert(mut self, cert_file: impl Into<PathBuf>, key_file: impl Into<PathBuf>) -> Self {
        self.cert_file = Some(cert_file.into());
        self.key_file = Some(key_file.into());
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn cert_file(&self) -> Option<&Path> {
        self.cert_file.as_deref()
    }

    pub fn key_file(&self) -> Option<&Path> {
        self.key_file.as_deref()
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// `scheme://host:port/base`, without a trailing slash.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}{}", self.host, self.port, self.base_path)
    }

    /// Absolute URL for a call path such as `/pools?owner=1&`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

/// `candlepin/`, `/candlepin` and `candlepin` all become `/candlepin`;
/// an empty or `/` base becomes the empty string.
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
