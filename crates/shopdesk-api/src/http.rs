// HttpCore
//
// Uniform calling convention over `reqwest::Client`: every verb takes a
// path relative to the configured base URL, attaches the bearer token held
// by the session handle, and resolves to the decoded response body. The
// `reqwest::Response` never escapes this module.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::session::SessionHandle;
use crate::transport::TransportConfig;

/// Response header carrying a replacement bearer token.
pub const ROTATED_TOKEN_HEADER: &str = "x-refreshed-token";

/// Longest slice of an error body kept in error messages.
const ERROR_PREVIEW_CHARS: usize = 200;

/// Error body shape; only `message` is of interest.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Per-call options: extra headers, query pairs, and a timeout override.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Thin request wrapper shared by every resource service.
pub struct HttpCore {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionHandle>,
}

impl HttpCore {
    /// Build from a transport config.
    pub fn new(
        base_url: Url,
        transport: &TransportConfig,
        session: Arc<SessionHandle>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Arc<SessionHandle>) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionHandle> {
        &self.session
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}/{path}` with exactly one slash between the two.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        self.send(Method::GET, path, None::<&()>, config).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        self.send(Method::POST, path, Some(body), config).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        self.send(Method::PUT, path, Some(body), config).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        self.send(Method::PATCH, path, Some(body), config).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        self.send(Method::DELETE, path, None::<&()>, config).await
    }

    /// POST a multipart form (image uploads).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        config: &RequestConfig,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let resp = self
            .request(Method::POST, url, config)
            .multipart(form)
            .send()
            .await?;
        self.handle_response(path, resp).await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        config: &RequestConfig,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder = self.request(method, url, config);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        self.handle_response(path, resp).await
    }

    fn request(&self, method: Method, url: Url, config: &RequestConfig) -> reqwest::RequestBuilder {
        let mut headers = config.headers.clone();
        if !headers.contains_key(AUTHORIZATION) {
            if let Some(bearer) = self.session.bearer() {
                match HeaderValue::from_str(&bearer) {
                    Ok(mut value) => {
                        value.set_sensitive(true);
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(e) => warn!("stored token is not a valid header value: {e}"),
                }
            }
        }

        let mut builder = self.http.request(method, url).headers(headers);
        if !config.query.is_empty() {
            builder = builder.query(&config.query);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        self.capture_rotated_token(resp.headers());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if let Err(e) = self.session.clear() {
                warn!("failed to clear session after HTTP {status}: {e}");
            }
            return Err(Error::Unauthorized {
                status: status.as_u16(),
                message: error_message(status, resp).await,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path: path.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: error_message(status, resp).await,
            });
        }

        let body = resp.text().await?;
        // 204-style empty bodies decode as JSON null.
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    fn capture_rotated_token(&self, headers: &HeaderMap) {
        let Some(token) = headers
            .get(ROTATED_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        else {
            return;
        };

        trace!("backend rotated bearer token");
        if let Err(e) = self
            .session
            .rotate_token(SecretString::from(token.to_owned()))
        {
            warn!("failed to persist rotated token: {e}");
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}

async fn error_message(status: StatusCode, resp: reqwest::Response) -> String {
    let raw = resp.text().await.unwrap_or_default();

    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(&raw)
    {
        return message;
    }

    if raw.trim().is_empty() {
        status.to_string()
    } else {
        preview(&raw)
    }
}
