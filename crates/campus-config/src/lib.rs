//! Shared configuration for campus clients.
//!
//! TOML config with env overrides, persisted-token resolution (env var +
//! keyring + plaintext), and translation to `campus_api::ClientConfig`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use campus_api::transport::{DEFAULT_BASE_PATH, DEFAULT_TIMEOUT};
use campus_api::{ApiClient, ClientConfig, TlsMode, TokenSource, TransportConfig};

const KEYRING_SERVICE: &str = "campus";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("client construction failed: {0}")]
    Client(#[from] campus_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server origin (e.g. "https://campus.example.edu").
    #[serde(default = "default_server")]
    pub server: String,

    /// Path prefix shared by every endpoint.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates (local development only).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Keyring account the token is stored under.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Look the token up in the system keyring.
    #[serde(default = "default_true")]
    pub use_keyring: bool,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Plaintext token. Keyring or env var take precedence.
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            base_path: default_base_path(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            profile: default_profile(),
            use_keyring: true,
            token_env: None,
            token: None,
        }
    }
}

fn default_server() -> String {
    "http://localhost:8080".into()
}
fn default_base_path() -> String {
    DEFAULT_BASE_PATH.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
fn default_profile() -> String {
    "default".into()
}
fn default_true() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("edu", "campus", "campus").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("campus");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path + `CAMPUS_*` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` + `CAMPUS_*` environment. A missing file
/// yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CAMPUS_"))
        .extract()?;
    debug!(path = %path.display(), server = %config.server, "config loaded");
    Ok(config)
}

/// Load config, returning the defaults if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to client types ─────────────────────────────────────

impl Config {
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let base_url: url::Url = self.server.parse().map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", self.server),
        })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        Ok(ClientConfig {
            base_url,
            base_path: self.base_path.clone(),
            transport: TransportConfig {
                tls,
                timeout: Duration::from_secs(self.timeout),
            },
        })
    }

    /// The token lookup chain described by this config.
    pub fn token_source(&self) -> TokenChain {
        TokenChain {
            env_var: self.token_env.clone(),
            keyring: self.use_keyring.then(|| KeyringToken::new(&self.profile)),
            plaintext: self.token.clone().map(SecretString::from),
        }
    }

    /// Build a ready-to-use client with this config's token chain.
    pub fn build_client(&self) -> Result<ApiClient, ConfigError> {
        let client = ApiClient::new(&self.to_client_config()?)?;
        Ok(client.with_token_source(Arc::new(self.token_source())))
    }
}

// ── Token resolution ────────────────────────────────────────────────

/// Token persisted in the system keyring under `campus/{profile}/token`.
///
/// The keyring is read once, on the first request, and the answer is kept
/// in memory. [`store`](Self::store) and [`clear`](Self::clear) update the
/// cached value; [`refresh`](Self::refresh) forces the next request to read
/// the keyring again. Clones share one cache.
#[derive(Debug, Clone)]
pub struct KeyringToken {
    account: String,
    cached: Arc<RwLock<Cached>>,
}

#[derive(Debug)]
enum Cached {
    Unread,
    Read(Option<SecretString>),
}

impl KeyringToken {
    pub fn new(profile: &str) -> Self {
        Self {
            account: format!("{profile}/token"),
            cached: Arc::new(RwLock::new(Cached::Unread)),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account)
    }

    fn set_cached(&self, value: Cached) {
        *self.cached.write().unwrap_or_else(|e| e.into_inner()) = value;
    }

    /// Blocking keyring lookup.
    fn load(&self) -> Option<SecretString> {
        let entry = self.entry().ok()?;
        match entry.get_password() {
            Ok(secret) => Some(SecretString::from(secret)),
            Err(e) => {
                trace!(error = %e, "no keyring token");
                None
            }
        }
    }

    /// Persist a token obtained elsewhere (e.g. by a login flow).
    pub fn store(&self, token: &str) -> Result<(), ConfigError> {
        self.entry()?.set_password(token)?;
        self.set_cached(Cached::Read(Some(SecretString::from(token.to_owned()))));
        Ok(())
    }

    /// Forget the persisted token. Clearing an absent entry is not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                self.set_cached(Cached::Read(None));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Drop the cached answer; the next request reads the keyring again.
    pub fn refresh(&self) {
        self.set_cached(Cached::Unread);
    }
}

impl TokenSource for KeyringToken {
    fn token(&self) -> Option<SecretString> {
        if let Cached::Read(ref token) = *self.cached.read().unwrap_or_else(|e| e.into_inner()) {
            return token.clone();
        }
        let token = self.load();
        debug!(found = token.is_some(), "keyring token loaded");
        self.set_cached(Cached::Read(token.clone()));
        token
    }
}

/// Token lookup order: named env var, then keyring, then plaintext config.
///
/// Re-evaluated on every request, so a token stored or removed while the
/// client is running is picked up by the next call. The env var is read
/// each time; the keyring only on first use and after
/// [`KeyringToken::refresh`], since the OS lookup blocks the calling thread.
#[derive(Debug, Clone)]
pub struct TokenChain {
    env_var: Option<String>,
    keyring: Option<KeyringToken>,
    plaintext: Option<SecretString>,
}

impl TokenSource for TokenChain {
    fn token(&self) -> Option<SecretString> {
        // 1. Named env var
        if let Some(ref name) = self.env_var {
            if let Ok(val) = std::env::var(name) {
                if !val.is_empty() {
                    return Some(SecretString::from(val));
                }
            }
        }

        // 2. System keyring
        if let Some(token) = self.keyring.as_ref().and_then(|k| k.token()) {
            return Some(token);
        }

        // 3. Plaintext in config
        self.plaintext.clone()
    }
}
