//! Configuration for the NetBox MCP gateway.
//!
//! Layers, lowest to highest: built-in defaults, the TOML config file,
//! `NETBOX_*` environment variables, then explicit overrides (command-line
//! flags). The result translates to `netbox_core::GatewayConfig`; core never
//! sees the file or the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netbox_core::{GatewayConfig, TlsVerification};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "NETBOX_";

/// Keys read from the environment (`NETBOX_URL`, `NETBOX_CA_CERT`, ...).
const ENV_KEYS: [&str; 5] = ["url", "token", "insecure", "ca_cert", "timeout"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NetBox {field} is not configured (set {env})")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Merged settings. URL and token stay optional here so that a missing
/// value is reported by name rather than as a deserialization failure.
#[derive(Deserialize)]
pub struct Config {
    /// Instance root, e.g. "https://netbox.example.com".
    #[serde(default)]
    pub url: Option<String>,

    /// API token. Wrapped in a `SecretString` once validated.
    #[serde(default)]
    pub token: Option<String>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("insecure", &self.insecure)
            .field("ca_cert", &self.ca_cert)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> u64 {
    30
}

/// Highest-precedence layer. Unset fields leave lower layers alone.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netbox-mcp", "netbox-mcp").map_or_else(
        || PathBuf::from(".netbox-mcp.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// File + environment layers. A missing file contributes nothing.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
}

/// Load the merged config.
///
/// `path` is an explicitly requested file (`--config`), which must exist;
/// `None` falls back to [`config_path`], which may be absent.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Config, ConfigError> {
    let path = match path {
        Some(explicit) if !explicit.exists() => {
            return Err(ConfigError::NotFound(explicit.to_path_buf()));
        }
        Some(explicit) => explicit.to_path_buf(),
        None => config_path(),
    };

    let config = figment(&path)
        .merge(Serialized::defaults(overrides))
        .extract()?;
    Ok(config)
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and build the runtime config. Missing URL or token is
    /// reported with the environment variable that would supply it.
    pub fn to_gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        let raw_url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing {
                field: "URL",
                env: "NETBOX_URL",
            })?;

        let url: url::Url = raw_url.parse().map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("'{raw_url}': {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url".into(),
                reason: format!("expected http or https, got '{}'", url.scheme()),
            });
        }

        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_owned()))
            .ok_or(ConfigError::Missing {
                field: "API token",
                env: "NETBOX_TOKEN",
            })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(GatewayConfig {
            url,
            token,
            tls,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_in(jail: &Jail, overrides: &Overrides) -> Result<Config, ConfigError> {
        load(Some(&jail.directory().join("config.toml")), overrides)
    }

    #[test]
    fn file_values_load() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                url = "https://netbox.example.com"
                token = "0123abcd"
                timeout = 10
                "#,
            )?;
            let config = load_in(jail, &Overrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.url.as_deref(), Some("https://netbox.example.com"));
            assert_eq!(config.token.as_deref(), Some("0123abcd"));
            assert_eq!(config.timeout, 10);
            assert!(!config.insecure);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_and_flags_override_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                url = "https://file.example.com"
                token = "from-file"
                "#,
            )?;
            jail.set_env("NETBOX_URL", "https://env.example.com");
            jail.set_env("NETBOX_INSECURE", "true");

            let config = load_in(jail, &Overrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
            assert_eq!(config.token.as_deref(), Some("from-file"));
            assert!(config.insecure);

            let overrides = Overrides {
                url: Some("https://flag.example.com".into()),
                timeout: Some(5),
                ..Overrides::default()
            };
            let config = load_in(jail, &overrides).map_err(|e| e.to_string())?;
            assert_eq!(config.url.as_deref(), Some("https://flag.example.com"));
            assert_eq!(config.timeout, 5);
            assert!(config.insecure);
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_vars_are_ignored() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "")?;
            jail.set_env("NETBOX_URL", "https://env.example.com");
            jail.set_env("NETBOX_TOKEN", "abc");
            jail.set_env("NETBOX_SOMETHING_ELSE", "x");

            let config = load_in(jail, &Overrides::default()).map_err(|e| e.to_string())?;
            assert!(config.to_gateway_config().is_ok());
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|jail| {
            let err = load_in(jail, &Overrides::default()).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn missing_url_names_env_var() {
        let config = Config {
            token: Some("t".into()),
            ..Config::default()
        };
        let err = config.to_gateway_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { env: "NETBOX_URL", .. }));
        assert!(err.to_string().contains("NETBOX_URL"));
    }

    #[test]
    fn missing_or_blank_token_names_env_var() {
        let mut config = Config {
            url: Some("https://netbox.example.com".into()),
            ..Config::default()
        };
        let err = config.to_gateway_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { env: "NETBOX_TOKEN", .. }));

        config.token = Some("   ".into());
        let err = config.to_gateway_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { env: "NETBOX_TOKEN", .. }));
    }

    #[test]
    fn bad_url_is_validation_error() {
        for url in ["not a url", "ftp://netbox.example.com"] {
            let config = Config {
                url: Some(url.into()),
                token: Some("t".into()),
                ..Config::default()
            };
            let err = config.to_gateway_config().unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }), "{url}: {err}");
        }
    }

    #[test]
    fn debug_redacts_token() {
        let config = Config {
            token: Some("super-secret".into()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = Config {
            url: Some("https://netbox.example.com".into()),
            token: Some("t".into()),
            timeout: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.to_gateway_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn tls_mode_selection() {
        let base = || Config {
            url: Some("https://netbox.example.com".into()),
            token: Some("t".into()),
            ..Config::default()
        };

        let strict = base().to_gateway_config().unwrap();
        assert_eq!(strict.tls, TlsVerification::SystemDefaults);
        assert_eq!(strict.timeout, Duration::from_secs(30));

        let custom = Config {
            ca_cert: Some("/etc/ssl/netbox.pem".into()),
            ..base()
        }
        .to_gateway_config()
        .unwrap();
        assert_eq!(
            custom.tls,
            TlsVerification::CustomCa("/etc/ssl/netbox.pem".into())
        );

        let insecure = Config {
            insecure: true,
            ca_cert: Some("/etc/ssl/netbox.pem".into()),
            ..base()
        }
        .to_gateway_config()
        .unwrap();
        assert_eq!(insecure.tls, TlsVerification::DangerAcceptInvalid);
    }
}
