use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Format used when the configured one is missing or empty.
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings for timestamped bullets.
///
/// Missing keys in a stored file fall back to [`Config::default`], so a file
/// written by an older version (or an empty file) still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Token format such as `HH:mm` or `YYYY-MM-DD HH:mm:ss`.
    ///
    /// Kept exactly as the user typed it, including the empty string.
    /// Use [`Config::effective_time_format`] when formatting.
    pub time_format: String,
    /// Stamp in UTC when true, in the local offset otherwise.
    pub use_utc: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            use_utc: true,
        }
    }
}

impl Config {
    /// The format to actually use: an empty setting means the default.
    pub fn effective_time_format(&self) -> &str {
        if self.time_format.is_empty() {
            DEFAULT_TIME_FORMAT
        } else {
            &self.time_format
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/time-bullet");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

/// Where settings are persisted.
///
/// The engine only ever calls `load` once at startup and `save` after each
/// settings change; it never depends on a particular storage medium.
pub trait ConfigStore {
    fn load(&self) -> Result<Option<Config>, ConfigError>;
    fn save(&self, config: &Config) -> anyhow::Result<()>;

    /// Load the stored settings merged over the defaults.
    ///
    /// A missing or broken store is not fatal: it is logged and the defaults
    /// are used instead.
    fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                log::info!("No stored settings found, using defaults");
                Config::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {e}");
                Config::default()
            }
        }
    }
}

/// TOML file backed store.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new(Config::config_path())
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Option<Config>, ConfigError> {
        Config::load_from_path(&self.path)
    }

    fn save(&self, config: &Config) -> anyhow::Result<()> {
        config.save_to_path(&self.path)
    }
}
