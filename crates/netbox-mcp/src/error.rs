//! Startup errors with miette diagnostics.
//!
//! Anything that stops the server before it starts serving. Once the
//! stdio loop runs, failures are reported to the client instead.

use miette::Diagnostic;
use thiserror::Error;

use netbox_config::ConfigError;
use netbox_core::CoreError;

#[derive(Debug, Error, Diagnostic)]
pub enum StartupError {
    #[error("NetBox {field} is not configured")]
    #[diagnostic(
        code(netbox_mcp::missing_setting),
        help(
            "Set the {env} environment variable or pass {flag}.\n\
             It can also go in the config file at {path}."
        )
    )]
    MissingSetting {
        field: &'static str,
        env: &'static str,
        flag: &'static str,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(
        code(netbox_mcp::config),
        help("Check the config file, NETBOX_* environment variables and flags.")
    )]
    Config(ConfigError),

    #[error("Could not set up the NetBox client")]
    #[diagnostic(
        code(netbox_mcp::client),
        help("Check the URL and, if set, the CA certificate path.")
    )]
    Client(#[source] CoreError),

    #[error("stdio transport failed")]
    #[diagnostic(code(netbox_mcp::io))]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { field, env } => Self::MissingSetting {
                field,
                env,
                flag: flag_for(env),
                path: netbox_config::config_path().display().to_string(),
            },
            other => Self::Config(other),
        }
    }
}

impl From<CoreError> for StartupError {
    fn from(err: CoreError) -> Self {
        Self::Client(err)
    }
}

fn flag_for(env: &str) -> &'static str {
    match env {
        "NETBOX_URL" => "--url",
        "NETBOX_TOKEN" => "--token",
        _ => "the matching flag",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_points_at_env_and_flag() {
        let err = StartupError::from(ConfigError::Missing {
            field: "API token",
            env: "NETBOX_TOKEN",
        });
        let StartupError::MissingSetting { env, flag, .. } = &err else {
            panic!("expected MissingSetting, got {err:?}");
        };
        assert_eq!(*env, "NETBOX_TOKEN");
        assert_eq!(*flag, "--token");

        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("NETBOX_TOKEN"));
        assert!(help.contains("--token"));
    }

    #[test]
    fn other_config_errors_pass_through() {
        let err = StartupError::from(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
        assert!(matches!(err, StartupError::Config(_)));
        assert_eq!(err.to_string(), "invalid timeout: must be at least 1 second");
    }
}
