use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on a whole relay exchange. Unset means a call blocks until
    /// the provider answers or the transport gives up.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// ============================================================================
// ProvidersConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_openai")]
    pub openai: ProviderEndpoint,
    #[serde(default = "default_deepseek")]
    pub deepseek: ProviderEndpoint,
    #[serde(default = "default_gemini")]
    pub gemini: ProviderEndpoint,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: default_openai(),
            deepseek: default_deepseek(),
            gemini: default_gemini(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: String,
}

fn default_openai() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://api.openai.com/v1".to_string(),
    }
}

fn default_deepseek() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://api.deepseek.com/v1".to_string(),
    }
}

fn default_gemini() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Provider API keys, resolved once at startup.
///
/// `Debug` never prints the key values.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai: Option<String>,
    pub deepseek: Option<String>,
    pub gemini: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment. Empty values count as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve keys through an arbitrary lookup, e.g. a map in tests.
    ///
    /// `CHATGPT_API_KEY` wins over `OPENAI_API_KEY` when both are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai: get("CHATGPT_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            deepseek: get("DEEPSEEK_API_KEY"),
            gemini: get("GEMINI_API_KEY"),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("openai", &mask(&self.openai))
            .field("deepseek", &mask(&self.deepseek))
            .field("gemini", &mask(&self.gemini))
            .finish()
    }
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

// ============================================================================
// Tests
// ============================================================================
