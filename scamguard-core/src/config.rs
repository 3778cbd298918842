//! Gateway configuration: environment variables layered over an optional
//! TOML file, with built-in defaults underneath.
//!
//! Resolution order for every setting is environment, then file, then
//! default. The file location itself resolves explicit path, then
//! `SCAMGUARD_CONFIG`, then the first default location that exists.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Hosted anti-fraud service root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://antifraud-gateway.lyc-dev.workers.dev";

/// Request deadline applied when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("scamguard.toml"),
        PathBuf::from("config/scamguard.toml"),
    ]
});

/// Settings the HTTP gateway is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Service root, scheme included
    pub base_url: String,
    /// Optional key sent in the `x-api-key` header
    pub api_key: Option<String>,
    /// Whole-request deadline
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// On-disk layout of `scamguard.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    gateway: FileGatewayConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileGatewayConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    /// Humantime string, e.g. `"30s"`
    timeout: Option<String>,
}

/// Environment snapshot, gathered once per load.
#[derive(Debug, Default, Clone)]
struct EnvConfig {
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<String>,
}

impl EnvConfig {
    fn gather() -> Self {
        Self {
            config_path: env_var("SCAMGUARD_CONFIG").map(PathBuf::from),
            base_url: env_var("SCAMGUARD_BASE_URL"),
            api_key: env_var("SCAMGUARD_API_KEY"),
            timeout: env_var("SCAMGUARD_TIMEOUT"),
        }
    }
}

/// Read a variable, treating unset, empty, and whitespace-only alike.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Resolves a [`GatewayConfig`] from the environment and an optional file.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    /// Read settings from this file instead of probing the defaults.
    /// The file must exist.
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Load this env file instead of `.env` in the working directory.
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<GatewayConfig, ConfigLoadError> {
        // A missing env file is fine; a malformed one is not.
        match &self.options.env_file {
            Some(path) => {
                dotenvy::from_path(path).map(|_| ()).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(()),
                    _ => Err(err),
                })?
            }
            None => dotenvy::dotenv().map(|_| ()).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(()),
                _ => Err(err),
            })?,
        }

        let env = EnvConfig::gather();
        let (file, path) = self.load_file_config(&env)?;
        if let Some(path) = &path {
            debug!(path = %path.display(), "loaded gateway configuration file");
        }

        let config = compose(file.unwrap_or_default(), env)?;
        if config.api_key.is_none() {
            warn!("no API key configured; the gateway may reject requests");
        }
        Ok(config)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file (option or env) must exist; default
        // locations are probed and skipped silently.
        let named = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        if let Some(path) = named {
            if !path.exists() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            let parsed = read_config_file(&path)?;
            return Ok((Some(parsed), Some(path)));
        }

        if let Some(path) = DEFAULT_CONFIG_LOCATIONS
            .iter()
            .find(|candidate| candidate.exists())
        {
            let parsed = read_config_file(path)?;
            return Ok((Some(parsed), Some(path.clone())));
        }

        Ok((None, None))
    }
}

fn read_config_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(file: FileConfig, env: EnvConfig) -> Result<GatewayConfig, ConfigLoadError> {
    let base_url = env
        .base_url
        .or(file.gateway.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_base_url(&base_url)?;

    let api_key = env.api_key.or(file.gateway.api_key);

    let timeout = match env.timeout.or(file.gateway.timeout) {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_TIMEOUT,
    };

    Ok(GatewayConfig {
        base_url,
        api_key,
        timeout,
    })
}

fn validate_base_url(raw: &str) -> Result<(), ConfigLoadError> {
    let parsed = Url::parse(raw).map_err(|source| ConfigLoadError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigLoadError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Parse a humantime string (`"30s"`, `"2m"`) into a request deadline.
/// Zero is rejected.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let timeout =
        humantime::parse_duration(raw).map_err(|source| ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            source,
        })?;
    if timeout.is_zero() {
        return Err(ConfigLoadError::ZeroTimeout);
    }
    Ok(timeout)
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid gateway base url '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported gateway url scheme '{scheme}', expected http or https")]
    UnsupportedScheme { scheme: String },
    #[error("invalid gateway timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("gateway timeout must be greater than zero")]
    ZeroTimeout,
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
