// Request client
//
// Wraps `reqwest::Client` with base-path URL construction, bearer token
// injection, and envelope unwrapping. Endpoint groups (students, courses,
// enrollments, teachers) are implemented as inherent methods in separate
// files so this module stays focused on transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{NoToken, TokenSource, bearer_value};
use crate::error::{Error, FALLBACK_REQUEST_FAILED};
use crate::models::Envelope;
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::transport::{DEFAULT_BASE_PATH, TransportConfig};

/// Everything needed to construct an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `https://campus.example.edu`.
    pub base_url: Url,
    /// Path prefix shared by every endpoint. Defaults to `/api`.
    pub base_path: String,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            base_path: DEFAULT_BASE_PATH.to_owned(),
            transport: TransportConfig::default(),
        }
    }
}

/// HTTP client for the campus backend.
///
/// Handles the `{ success, data, message }` envelope, attaches the bearer
/// token from the injected [`TokenSource`], and reports every failure to
/// the injected [`Notifier`] before returning it. Callers only ever see
/// the unwrapped `data` payload.
///
/// Cheap to clone; clones share the connection pool, token source, and
/// notifier.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: Url,
    timeout: Duration,
    tokens: Arc<dyn TokenSource>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Build a client from config, with no token and `tracing` notifications.
    ///
    /// Use [`with_token_source`](Self::with_token_source) and
    /// [`with_notifier`](Self::with_notifier) to inject the real capabilities.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Self::with_client(
            http,
            &config.base_url,
            &config.base_path,
            config.transport.timeout,
        )
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        base_path: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let root = Self::normalize_root(base_url, base_path)?;
        Ok(Self {
            http,
            root,
            timeout,
            tokens: Arc::new(NoToken),
            notifier: Arc::new(LogNotifier),
        })
    }

    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Root every endpoint URL is built from (origin + base path).
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Append the base path to the origin, dropping any trailing slash.
    fn normalize_root(base_url: &Url, base_path: &str) -> Result<Url, Error> {
        let mut root = base_url.clone();
        root.set_query(None);
        root.set_fragment(None);
        root.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(base_url.to_string()))?
            .pop_if_empty()
            .extend(base_path.split('/').filter(|s| !s.is_empty()));
        Ok(root)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build an endpoint URL from path segments. Each segment is
    /// percent-encoded, so ids and semester names may contain any text.
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, Error> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.root.to_string()))?
            .pop_if_empty()
            .extend(segments.iter().map(AsRef::as_ref));
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        self.send(self.http.get(url)).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("GET {url}");
        self.send(self.http.get(url).query(params)).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        debug!("POST {url}");
        self.send(self.http.post(url).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        debug!("PUT {url}");
        self.send(self.http.put(url).json(body)).await
    }

    /// PUT with query parameters and no body.
    pub(crate) async fn put_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {url}");
        self.send(self.http.put(url).query(params)).await
    }

    /// PUT with neither body nor query.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("PUT {url}");
        self.send(self.http.put(url)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {url}");
        self.send(self.http.delete(url)).await
    }

    // ── Interceptors ─────────────────────────────────────────────────

    /// Attach the bearer token if one is available right now.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let Some(value) = self.tokens.token().as_ref().and_then(bearer_value) else {
            trace!("no token available, sending unauthenticated");
            return builder;
        };
        match HeaderValue::from_str(&value) {
            Ok(mut header) => {
                header.set_sensitive(true);
                builder.header(AUTHORIZATION, header)
            }
            Err(_) => {
                trace!("token is not a valid header value, sending unauthenticated");
                builder
            }
        }
    }

    /// Send once, unwrap the envelope, and notify on any failure.
    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, Error> {
        let result = match self.authorize(builder).send().await {
            Ok(resp) => Self::parse_envelope(resp).await,
            Err(e) if e.is_timeout() => Err(Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
            Err(e) => Err(Error::Transport(e)),
        };

        if let Err(ref err) = result {
            debug!(error = %err, kind = ?err.kind(), "request failed");
            self.notifier.notify(Notification::error(err.user_message()));
        }
        result
    }

    /// Parse the `{ success, data, message }` envelope, returning `data`
    /// on success or `Error::Api` when `success` is false.
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            // Error pages from the backend often still carry an envelope.
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| env.message)
                .or_else(|| status.canonical_reason().map(str::to_owned))
                .unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_REQUEST_FAILED.to_owned());
            return Err(Error::Api { message });
        }

        serde_json::from_value(envelope.data).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("root", &self.root.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
