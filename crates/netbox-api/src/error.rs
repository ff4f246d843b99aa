use thiserror::Error;

/// Top-level error type for the `netbox-api` crate.
///
/// Covers every failure mode of a single round trip to NetBox: building
/// the client, reaching the server, and interpreting its answer.
/// `netbox-core` maps these into the gateway's error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token cannot be encoded as an HTTP header value.
    #[error("Invalid API token: {message}")]
    InvalidToken { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Non-2xx response. `body` is the raw response text, untouched.
    #[error("NetBox API error (HTTP {status}): {}", summarize(.detail, .body))]
    Api {
        status: u16,
        body: String,
        /// The `detail` field NetBox puts on most non-validation errors.
        detail: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn summarize<'a>(detail: &'a Option<String>, body: &'a str) -> &'a str {
    detail.as_deref().unwrap_or(body)
}

impl Error {
    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if the request never produced an HTTP answer.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Tls(_) => true,
            _ => false,
        }
    }

    /// HTTP status reported by NetBox, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_detail_in_message() {
        let err = Error::Api {
            status: 404,
            body: r#"{"detail":"Not found."}"#.into(),
            detail: Some("Not found.".into()),
        };
        assert_eq!(err.to_string(), "NetBox API error (HTTP 404): Not found.");
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn api_error_falls_back_to_body() {
        let err = Error::Api {
            status: 400,
            body: r#"{"name":["This field is required."]}"#.into(),
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            r#"NetBox API error (HTTP 400): {"name":["This field is required."]}"#
        );
        assert!(!err.is_not_found());
    }
}
