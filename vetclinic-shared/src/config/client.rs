use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use url::Url;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

const ENV_BASE_URL: &str = "VETCLINIC_API_BASE_URL";
const ENV_LOG_LEVEL: &str = "VETCLINIC_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "VETCLINIC_LOG_FORMAT";
const ENV_STORAGE_PATH: &str = "VETCLINIC_STORAGE_PATH";

/// Errors raised while loading or rendering configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access configuration file {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text did not parse or could not be rendered.
    #[error("failed to {action} {format} configuration: {message}")]
    Parse {
        /// `parse` or `render`.
        action: &'static str,
        /// Format involved.
        format: ConfigFormat,
        /// Parser message.
        message: String,
    },
    /// The file extension or requested format is not supported.
    #[error("unsupported configuration format `{0}`; use yaml, json or toml")]
    UnsupportedFormat(String),
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    /// Default file name for a generated configuration in this format.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Yaml => "vetclinic.yaml",
            Self::Json => "vetclinic.json",
            Self::Toml => "vetclinic.toml",
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        })
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown log format `{other}`; use text or json"
            ))),
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute URL every request path is appended to.
    pub base_url: String,
    /// `User-Agent` sent with each request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("vetclinic/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where the session token and user are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Session file; the platform config directory is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured session file, or `<config dir>/vetclinic/session.json`.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_session_path)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output style.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend connection.
    pub api: ApiConfig,
    /// Session persistence.
    pub storage: StorageConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Precedence, lowest first: built-in defaults, the file, `VETCLINIC_*`
    /// environment variables (only for values the file left at their default),
    /// then `base_url_override`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, a variable holds
    /// an unusable value, or the resulting base URL is invalid.
    pub fn load_config(
        config_path: Option<PathBuf>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::with_defaults(),
        };
        let defaults = Self::with_defaults();

        if config.api.base_url == defaults.api.base_url {
            if let Ok(base_url) = env::var(ENV_BASE_URL) {
                config.api.base_url = base_url;
            }
        }
        if config.logging.level == defaults.logging.level {
            if let Ok(level) = env::var(ENV_LOG_LEVEL) {
                config.logging.level = level;
            }
        }
        if config.logging.format == defaults.logging.format {
            if let Ok(format) = env::var(ENV_LOG_FORMAT) {
                config.logging.format = format.parse()?;
            }
        }
        if config.storage.path.is_none() {
            if let Ok(path) = env::var(ENV_STORAGE_PATH) {
                config.storage.path = Some(PathBuf::from(path));
            }
        }

        if let Some(base_url) = base_url_override {
            config.api.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file whose format follows its extension.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable, the extension unsupported,
    /// or the content does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    /// Parses configuration text in the given format.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when the text is malformed.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            action: "parse",
            format,
            message,
        };
        match format {
            ConfigFormat::Yaml => serde_yml::from_str(content).map_err(|e| parse_error(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Serializes the configuration in the given format.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the serializer rejects the value.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let render_error = |message: String| ConfigError::Parse {
            action: "render",
            format,
            message,
        };
        match format {
            ConfigFormat::Yaml => serde_yml::to_string(self).map_err(|e| render_error(e.to_string())),
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| render_error(e.to_string()))
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| render_error(e.to_string()))
            }
        }
    }

    /// Checks that the base URL is an absolute `http`/`https` URL.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|err| {
            ConfigError::Invalid(format!("base URL `{}`: {err}", self.api.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base URL `{}` must use http or https",
                self.api.base_url
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level must not be empty".into()));
        }
        Ok(())
    }
}

fn default_session_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("vetclinic").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./session.json"))
}
