// ── Core error types ──
//
// What callers of the gateway see. Local validation failures carry the
// full list of accepted values; remote failures carry NetBox's status
// and body verbatim. The `From<netbox_api::Error>` impl translates
// transport-layer errors into this taxonomy.

use std::fmt::Write as _;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation (raised before any network call) ───────────
    #[error("Invalid object_type '{requested}'. Must be one of:\n{}", bullet_list(.valid))]
    UnknownResourceKind {
        requested: String,
        /// Every accepted kind, sorted lexically.
        valid: Vec<&'static str>,
    },

    #[error("Invalid status '{requested}'. Must be one of: {}", .valid.join(", "))]
    InvalidStatus {
        requested: String,
        valid: Vec<&'static str>,
    },

    // ── Remote errors ────────────────────────────────────────────────
    /// NetBox answered with a non-2xx status. `body` is exactly what it
    /// sent, so field-level validation messages reach the caller intact.
    #[error("NetBox request failed (HTTP {status}): {body}")]
    RemoteRequestFailed {
        status: u16,
        body: String,
        detail: Option<String>,
    },

    #[error("NetBox is unreachable: {reason}")]
    TransportUnavailable { reason: String },

    #[error("Unexpected response from NetBox: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn bullet_list(items: &[&str]) -> String {
    let mut out = String::new();
    for item in items {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "- {item}");
    }
    out
}

impl CoreError {
    /// Returns `true` if NetBox reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RemoteRequestFailed { status: 404, .. })
    }

    /// HTTP status reported by NetBox, if the request got that far.
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Self::RemoteRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before anything was sent.
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownResourceKind { .. } | Self::InvalidStatus { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netbox_api::Error> for CoreError {
    fn from(err: netbox_api::Error) -> Self {
        match err {
            netbox_api::Error::Api {
                status,
                body,
                detail,
            } => CoreError::RemoteRequestFailed {
                status,
                body,
                detail,
            },
            netbox_api::Error::Transport(e) => CoreError::TransportUnavailable {
                reason: e.to_string(),
            },
            netbox_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
            netbox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netbox_api::Error::InvalidToken { message } => CoreError::Config { message },
            netbox_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_message_lists_one_per_line() {
        let err = CoreError::UnknownResourceKind {
            requested: "routers".into(),
            valid: vec!["devices", "sites"],
        };
        assert_eq!(
            err.to_string(),
            "Invalid object_type 'routers'. Must be one of:\n- devices\n- sites"
        );
        assert!(err.is_local_validation());
        assert_eq!(err.remote_status(), None);
    }

    #[test]
    fn remote_failure_keeps_status_and_body() {
        let err = CoreError::from(netbox_api::Error::Api {
            status: 400,
            body: r#"{"address":["Duplicate IP address found"]}"#.into(),
            detail: None,
        });
        assert_eq!(err.remote_status(), Some(400));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Duplicate IP address found"));
    }

    #[test]
    fn not_found_is_detected() {
        let err = CoreError::from(netbox_api::Error::Api {
            status: 404,
            body: r#"{"detail":"Not found."}"#.into(),
            detail: Some("Not found.".into()),
        });
        assert!(err.is_not_found());
    }

    #[test]
    fn build_time_failures_become_config_errors() {
        let err = CoreError::from(netbox_api::Error::Tls("invalid CA cert".into()));
        assert!(matches!(err, CoreError::Config { ref message } if message.contains("CA cert")));
    }
}
