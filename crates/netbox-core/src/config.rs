// ── Runtime connection configuration ──
//
// Describes *how* to reach NetBox. Carries the token and connection
// tuning, but never touches disk or the environment; `netbox-config`
// builds one and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab instances).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for netbox_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Everything needed to talk to one NetBox instance.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Instance root (e.g. `https://netbox.example.com`); `/api/` is added.
    pub url: Url,
    /// API token sent as `Authorization: Token <token>`.
    pub token: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            url,
            token,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> netbox_api::TransportConfig {
        netbox_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
