//! Connection settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$CANDLEPIN_CONFIG`, else `$XDG_CONFIG_HOME/candlepin/config.toml`
//! 3. Environment variables: `CANDLEPIN_*` prefix
//! 4. Global command-line flags (`Settings::with_overrides`)

use std::path::{Path, PathBuf};

use candlepin_core::EndpointConfig;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::args::GlobalArgs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Base path of the REST API
    pub prefix: String,
    pub secure: bool,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    /// Skip server certificate verification
    pub insecure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            prefix: "/candlepin".to_string(),
            secure: false,
            cert: None,
            key: None,
            insecure: false,
        }
    }
}

/// `$XDG_CONFIG_HOME/candlepin/config.toml`, if a home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "candlepin").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Settings {
    /// Load from the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var_os("CANDLEPIN_CONFIG")
            .map(PathBuf::from)
            .or_else(global_config_path);
        Self::load_layers(file.as_deref(), None)
    }

    /// Load from an optional config file and environment.
    ///
    /// `env` replaces the process environment when given, so tests never
    /// have to mutate global state.
    pub fn load_layers(file: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("prefix", defaults.prefix)?
            .set_default("secure", defaults.secure)?
            .set_default("insecure", defaults.insecure)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("CANDLEPIN").try_parsing(true).source(env));

        builder.build()?.try_deserialize()
    }

    /// Apply global flags on top of the loaded settings.
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(prefix) = &args.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(cert) = &args.cert {
            self.cert = Some(cert.clone());
        }
        if let Some(key) = &args.key {
            self.key = Some(key.clone());
        }
        self.secure |= args.secure;
        self.insecure |= args.insecure;
        self
    }

    pub fn endpoint(&self) -> EndpointConfig {
        let mut endpoint = EndpointConfig::new(self.host.as_str(), self.port, &self.prefix)
            .with_secure(self.secure)
            .with_accept_invalid_certs(self.insecure);
        if let Some(cert) = &self.cert {
            let key = self.key.clone().unwrap_or_else(|| cert.clone());
            endpoint = endpoint.with_client_cert(cert.clone(), key);
        }
        endpoint
    }
}
