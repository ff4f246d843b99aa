// Async HTTP client for the NetBox REST API.
//
// Base path: /api/
// Auth: `Authorization: Token <token>` header

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

// ── Error response shape from NetBox ─────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the NetBox REST API.
///
/// Uses token authentication and speaks JSON to endpoints under `/api/`.
/// Paths are relative to that root (e.g. `"dcim/devices"` or
/// `"dcim/devices/7"`); the trailing slash NetBox expects is added here.
#[derive(Debug, Clone)]
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NetboxClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Token <token>` as a default header on every
    /// request.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken {
                message: format!("invalid token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the API root URL: `https://host[/prefix]/api/`.
    ///
    /// Accepts the instance root with or without a trailing slash, and
    /// with or without the `/api` segment already present.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// The normalized API root (always ends with `/api/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path onto the API root, with a trailing slash.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let relative = format!("{}/", path.trim_matches('/'));
        Ok(self.base_url.join(&relative)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET` with query parameters. Repeated keys are sent as-is.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// Partial update: fields missing from `body` are left untouched.
    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// Full replacement: NetBox validates `body` as a complete object.
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            trace!(bytes = body.len(), "response body received");
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "NetBox returned an error response");

        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.detail);

        Error::Api {
            status: status.as_u16(),
            body: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
            detail,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> NetboxClient {
        NetboxClient::from_reqwest(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn base_url_gains_api_segment() {
        assert_eq!(
            client("https://netbox.example.com").base_url().as_str(),
            "https://netbox.example.com/api/"
        );
        assert_eq!(
            client("https://netbox.example.com/").base_url().as_str(),
            "https://netbox.example.com/api/"
        );
    }

    #[test]
    fn base_url_keeps_existing_api_segment_and_prefix() {
        assert_eq!(
            client("https://netbox.example.com/api").base_url().as_str(),
            "https://netbox.example.com/api/"
        );
        assert_eq!(
            client("https://example.com/netbox/").base_url().as_str(),
            "https://example.com/netbox/api/"
        );
    }

    #[test]
    fn paths_get_a_single_trailing_slash() {
        let c = client("https://netbox.example.com");
        assert_eq!(
            c.url("dcim/devices").unwrap().as_str(),
            "https://netbox.example.com/api/dcim/devices/"
        );
        assert_eq!(
            c.url("/dcim/devices/7/").unwrap().as_str(),
            "https://netbox.example.com/api/dcim/devices/7/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = NetboxClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let token = SecretString::from("abc\ndef".to_string());
        let err = NetboxClient::from_token(
            "https://netbox.example.com",
            &token,
            &TransportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidToken { .. }));
    }
}
