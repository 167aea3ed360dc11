use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonebook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_STORAGE_KEY: &str = "contacts";
pub const DEFAULT_ADD_LATENCY_MS: u64 = 300;
pub const DEFAULT_DELETE_LATENCY_MS: u64 = 200;
pub const MAX_LATENCY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage_key: String,
    pub latency: LatencyConfig,
}

/// Artificial pauses before each mutation touches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub add_ms: u64,
    pub delete_ms: u64,
}

impl LatencyConfig {
    pub fn add(&self) -> Duration {
        Duration::from_millis(self.add_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: LatencyConfig {
                add_ms: DEFAULT_ADD_LATENCY_MS,
                delete_ms: DEFAULT_DELETE_LATENCY_MS,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid storage_key value: {0:?}")]
    InvalidStorageKey(String),
    #[error("invalid latency.{field} value: {value} (max {max})", max = MAX_LATENCY_MS)]
    InvalidLatency { field: &'static str, value: u64 },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    storage_key: Option<String>,
    latency: Option<LatencyFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LatencyFile {
    add_ms: Option<u64>,
    delete_ms: Option<u64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(key) = parsed.storage_key {
        if key.is_empty() || key.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
            return Err(ConfigError::InvalidStorageKey(key));
        }
        config.storage_key = key;
    }

    if let Some(latency) = parsed.latency {
        if let Some(add_ms) = latency.add_ms {
            config.latency.add_ms = validate_latency("add_ms", add_ms)?;
        }
        if let Some(delete_ms) = latency.delete_ms {
            config.latency.delete_ms = validate_latency("delete_ms", delete_ms)?;
        }
    }

    Ok(config)
}

fn validate_latency(field: &'static str, value: u64) -> Result<u64> {
    if value > MAX_LATENCY_MS {
        return Err(ConfigError::InvalidLatency { field, value });
    }
    Ok(value)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
