// ── Core error types ──
//
// Consumer-facing errors from campus-core. Store actions never expose
// HTTP details directly; the `From<campus_api::Error>` impl translates
// transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for store actions.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Server answered and declined ─────────────────────────────────
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    // ── No usable answer ─────────────────────────────────────────────
    #[error("Cannot reach server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` when the server itself refused the operation.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<campus_api::Error> for CoreError {
    fn from(err: campus_api::Error) -> Self {
        match err {
            campus_api::Error::Api { message } => CoreError::Rejected { message },
            campus_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            campus_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            campus_api::Error::Status { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            campus_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            campus_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Invalid base URL: {url}"),
            },
            campus_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            campus_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_failure_becomes_rejection() {
        let err = CoreError::from(campus_api::Error::Api {
            message: "X".into(),
        });
        assert!(err.is_rejection());
        assert!(matches!(err, CoreError::Rejected { ref message } if message == "X"));
    }

    #[test]
    fn status_keeps_code() {
        let err = CoreError::from(campus_api::Error::Status {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
        assert!(!err.is_rejection());
    }
}
