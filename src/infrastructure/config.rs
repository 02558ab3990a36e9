use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::application::services::{DEFAULT_CONTEXT_LIMIT, DEFAULT_FETCH_LIMIT, DEFAULT_PREAMBLE};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything the service needs at startup: connection settings from the
/// environment and tunables from the optional YAML file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: EnvConfig,
    pub config: Config,
}

impl AppConfig {
    /// Loads `.env`-populated environment variables and the YAML file named
    /// by `APP_CONFIG`, failing on the first missing required setting.
    pub fn load() -> Result<Self, ConfigError> {
        let env = EnvConfig::from_env()?;
        let path = std::env::var("APP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let config = Config::load(&path)?;
        Self::new(env, config)
    }

    pub fn new(env: EnvConfig, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { env, config })
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub server: ServerConfig,
    pub ollama_url: String,
    pub vector_store: VectorStoreConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves `host` (an IP literal or a hostname such as `localhost`) and
    /// returns the first address found.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| ConfigError::Invalid(format!("SERVER_HOST '{}': {e}", self.host)))?
            .next()
            .ok_or_else(|| {
                ConfigError::Invalid(format!("SERVER_HOST '{}' resolved to no address", self.host))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone)]
pub enum VectorStoreConfig {
    Astra {
        endpoint: String,
        namespace: String,
        token: String,
        collection: String,
    },
    Qdrant {
        url: String,
        collection: String,
        api_key: Option<String>,
    },
    /// Process-local store with no loading path. It is always empty, so
    /// this mode runs the service with retrieval disabled.
    Memory,
}

impl VectorStoreConfig {
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Astra { .. } => "astra",
            Self::Qdrant { .. } => "qdrant",
            Self::Memory => "memory",
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from any variable source. Empty values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let vector_store = match get("VECTOR_STORE").as_deref().unwrap_or("astra") {
            "astra" => VectorStoreConfig::Astra {
                endpoint: require("ASTRA_ENDPOINT")?,
                namespace: require("ASTRA_NAMESPACE")?,
                token: require("ASTRA_TOKEN")?,
                collection: require("ASTRA_COLLECTION")?,
            },
            "qdrant" => VectorStoreConfig::Qdrant {
                url: require("QDRANT_URL")?,
                collection: require("QDRANT_COLLECTION")?,
                api_key: get("QDRANT_API_KEY"),
            },
            "memory" => VectorStoreConfig::Memory,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown VECTOR_STORE '{other}', expected astra, qdrant or memory"
                )))
            }
        };

        let ollama_url = require("OLLAMA_API_URL")?;

        let mut server = ServerConfig::default();
        if let Some(host) = get("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("SERVER_PORT '{port}' is not a port")))?;
        }

        Ok(Self {
            server,
            ollama_url,
            vector_store,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub prompts: PromptsConfig,
    pub cors: CorsConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Reads the YAML file at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_yaml(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        if r.fetch_limit == 0 || r.context_limit == 0 {
            return Err(ConfigError::Invalid(
                "retrieval limits must be at least 1".into(),
            ));
        }
        if r.context_limit > r.fetch_limit {
            return Err(ConfigError::Invalid(format!(
                "retrieval.context_limit ({}) exceeds retrieval.fetch_limit ({})",
                r.context_limit, r.fetch_limit
            )));
        }
        if self.llm.model.trim().is_empty() || self.embedding.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model names must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama2".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub fetch_limit: usize,
    pub context_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            context_limit: DEFAULT_CONTEXT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub preamble: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
        }
    }
}
