//! Process configuration, read once at start-up.
//!
//! Every setting comes from an environment variable. An empty value is
//! treated the same as an unset one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rocky_engine::error::EngineError;
use rocky_model::error::ModelError;
use rocky_model::provider::Provider;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("rule table could not be loaded: {0}")]
    Rules(#[from] EngineError),

    #[error("outbound client could not be built: {0}")]
    Client(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Lowercased `DEFAULT_MODEL`, unvalidated.
    pub default_model: Option<String>,
    pub interaction_lookup_url: Option<String>,
    pub rule_table_path: Option<PathBuf>,
    pub static_root: Option<PathBuf>,
    pub model_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gemini_api_key: None,
            openai_api_key: None,
            default_model: None,
            interaction_lookup_url: None,
            rule_table_path: None,
            static_root: None,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v,
                expected: "a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let model_timeout = match get("MODEL_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MODEL_TIMEOUT_SECS",
                        value: v,
                        expected: "a positive number of seconds",
                    });
                }
            },
            None => DEFAULT_MODEL_TIMEOUT,
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => match v.parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_BODY_BYTES",
                        value: v,
                        expected: "a positive byte count",
                    });
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            port,
            gemini_api_key: get("GEMINI_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            default_model: get("DEFAULT_MODEL").map(|m| m.to_lowercase()),
            interaction_lookup_url: get("INTERACTION_LOOKUP_URL"),
            rule_table_path: get("RULE_TABLE_PATH").map(PathBuf::from),
            static_root: get("STATIC_ROOT").map(PathBuf::from),
            model_timeout,
            max_body_bytes,
        })
    }

    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Mock => None,
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenAi => self.openai_api_key.as_deref(),
        }
    }

    /// The engine-only backend is always available; the others need a key.
    pub fn model_available(&self, provider: Provider) -> bool {
        provider == Provider::Mock || self.api_key(provider).is_some()
    }

    /// `DEFAULT_MODEL` when it names an available remote model, otherwise
    /// the first available of openai, gemini, mock.
    pub fn default_model(&self) -> Provider {
        let requested = self
            .default_model
            .as_deref()
            .and_then(Provider::parse)
            .filter(|p| *p != Provider::Mock && self.model_available(*p));

        requested.unwrap_or_else(|| {
            [Provider::OpenAi, Provider::Gemini]
                .into_iter()
                .find(|p| self.model_available(*p))
                .unwrap_or(Provider::Mock)
        })
    }

    /// The configured static root, else the first of the working directory
    /// and its two parents that holds an `index.html`.
    pub fn resolve_static_root(&self) -> PathBuf {
        if let Some(root) = &self.static_root {
            return root.clone();
        }
        match std::env::current_dir() {
            Ok(cwd) => detect_static_root(&cwd),
            Err(_) => PathBuf::from("."),
        }
    }
}

pub fn detect_static_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .take(3)
        .find(|dir| dir.join("index.html").is_file())
        .unwrap_or(start)
        .to_path_buf()
}
