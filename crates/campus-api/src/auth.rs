use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};

/// Where the client looks up the bearer token before each request.
///
/// Consulted on every call, so a token stored or cleared between two
/// requests takes effect on the next one. Returning `None` (or an empty
/// token) sends the request unauthenticated.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<SecretString>;
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn token(&self) -> Option<SecretString> {
        (**self).token()
    }
}

/// Never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<SecretString> {
        None
    }
}

/// A fixed token supplied at construction.
#[derive(Debug, Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

/// In-process token slot that can be filled or cleared at runtime.
///
/// Whatever acquires the token (a login screen, a CLI prompt) calls
/// [`set`](Self::set); the client picks it up on its next request.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(SecretString::from(token.into()));
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn is_set(&self) -> bool {
        self.token().is_some()
    }
}

impl TokenSource for MemoryTokenStore {
    fn token(&self) -> Option<SecretString> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Format a token as an `Authorization` header value, skipping blanks.
pub(crate) fn bearer_value(token: &SecretString) -> Option<String> {
    let raw = token.expose_secret().trim();
    if raw.is_empty() {
        None
    } else {
        Some(format!("Bearer {raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_set());

        store.set("abc");
        assert_eq!(
            store.token().map(|t| t.expose_secret().to_owned()),
            Some("abc".to_owned())
        );

        store.clear();
        assert!(store.token().is_none());
    }

    #[test]
    fn blank_tokens_produce_no_header() {
        assert_eq!(bearer_value(&SecretString::from("   ".to_owned())), None);
        assert_eq!(
            bearer_value(&SecretString::from("t0k".to_owned())),
            Some("Bearer t0k".to_owned())
        );
    }

    #[test]
    fn arc_wrapped_sources_delegate() {
        let shared: Arc<dyn TokenSource> = Arc::new(StaticToken::new("x"));
        assert!(shared.token().is_some());
        assert!(NoToken.token().is_none());
    }
}
