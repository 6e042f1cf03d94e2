//! Portal client library
//!
//! Client-side glue for the portal backend:
//! - Account authentication (login, register, logout)
//! - Gemini text generation via the Generative Language API
//!
//! Both clients are constructed once at startup from [`AppConfig`] and passed
//! down by the application; nothing here reads ambient environment after init.

pub mod auth;
pub mod genai;

use std::path::PathBuf;
use std::sync::Arc;

use auth::{AuthClient, AuthError};
use genai::{GenAiClient, GenAiConfig};

/// Environment variable holding the portal base URL.
const PORTAL_BASE_URL_VAR: &str = "PORTAL_BASE_URL";

/// Environment variable overriding the request timeout in seconds.
const PORTAL_TIMEOUT_VAR: &str = "PORTAL_TIMEOUT_SECS";

/// Default request timeout in seconds
fn default_timeout_secs() -> u64 { 30 }

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}

/// Application configuration
///
/// Read once from the process environment at startup and passed by value
/// into [`AppState::new`]. Never re-read mid-process.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Portal backend base URL (e.g. `https://portal.example.com`)
    pub base_url: String,

    /// Request timeout in seconds for auth calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Gemini API configuration
    pub genai: GenAiConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// This is the single ambient read in the crate; everything downstream
    /// receives the values by struct.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(PORTAL_BASE_URL_VAR)
            .map_err(|_| ConfigError::MissingVar(PORTAL_BASE_URL_VAR))?;

        let timeout_secs = match std::env::var(PORTAL_TIMEOUT_VAR) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: PORTAL_TIMEOUT_VAR,
                message: format!("expected integer seconds, got {:?}", raw),
            })?,
            Err(_) => default_timeout_secs(),
        };

        Ok(Self {
            base_url,
            timeout_secs,
            genai: GenAiConfig::from_env()?,
        })
    }
}

/// Application state shared across the app
///
/// Owns both clients. The Gemini handle lives behind an [`Arc`] so every
/// call site observes the same instance; it is written once here and only
/// read afterwards.
pub struct AppState {
    /// Auth client for the portal backend
    pub auth: AuthClient,
    /// Shared Gemini client handle
    pub genai: Arc<GenAiClient>,
}

impl AppState {
    /// Create new application state from configuration
    pub fn new(config: AppConfig) -> Result<Self, AuthError> {
        let auth = AuthClient::new(&config.base_url, config.timeout_secs)?;
        let genai = Arc::new(GenAiClient::new(config.genai));

        Ok(Self { auth, genai })
    }

    /// Get a clone of the shared Gemini handle
    pub fn genai_handle(&self) -> Arc<GenAiClient> {
        Arc::clone(&self.genai)
    }
}

/// Get log directory path (shared across modules)
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("portal-client").join("logs"))
}

/// Initialize logging (console layer plus optional daily file layer)
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "portal-client.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}

/// Truncate a string to at most `max` bytes on a char boundary (for log output)
pub fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
