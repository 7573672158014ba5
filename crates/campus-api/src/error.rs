use thiserror::Error;

/// Notification text used when an envelope failure carries no message.
pub const FALLBACK_REQUEST_FAILED: &str = "request failed";

/// Notification text used when a transport failure carries no message.
pub const FALLBACK_NETWORK_ERROR: &str = "network error";

/// Top-level error type for the `campus-api` crate.
///
/// Every failure falls into one of two [`ErrorKind`]s: the server answered
/// with `success: false`, or no usable answer came back at all.
/// `campus-core` maps these into consumer-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Application ─────────────────────────────────────────────────
    /// The envelope reported `success: false`.
    #[error("{message}")]
    Api { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request exceeded the client-wide timeout bound.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Non-2xx HTTP status.
    #[error("Request failed with status code {status}: {message}")]
    Status { status: u16, message: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The body was not a valid envelope, or `data` did not match the
    /// expected shape. Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Coarse classification surfaced to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server responded and declined the request.
    Application,
    /// No response, a timeout, or a response that could not be used.
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } => ErrorKind::Application,
            _ => ErrorKind::Transport,
        }
    }

    /// Text shown to the user when this error is surfaced as a notification.
    pub fn user_message(&self) -> String {
        let (message, fallback) = match self {
            Self::Api { message } => (message.clone(), FALLBACK_REQUEST_FAILED),
            Self::Status { message, .. } => (message.clone(), FALLBACK_NETWORK_ERROR),
            Self::Deserialization { .. } => (String::new(), FALLBACK_REQUEST_FAILED),
            other => (other.to_string(), FALLBACK_NETWORK_ERROR),
        };
        if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        }
    }

    /// Returns `true` if the server answered with a 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }
}
