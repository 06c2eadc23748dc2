use crate::session::SaveFailurePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A config file that exists but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Where documents are kept on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the JSON store; defaults to the platform data dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Document opened when none is given on the command line
    #[serde(default = "default_document")]
    pub document: String,

    /// "keep" (default) or "rollback"
    #[serde(default)]
    pub on_save_failure: SaveFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
            on_save_failure: SaveFailurePolicy::default(),
        }
    }
}

fn default_document() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Get the XDG-style config file path (~/.config/blocktree/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("blocktree").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/blocktree/config.toml
    /// - Linux: ~/.config/blocktree/config.toml
    /// - Windows: %APPDATA%/blocktree/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blocktree").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    /// On macOS, checks ~/.config/blocktree first, then falls back to ~/Library/Application Support
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(target_os = "macos")]
        {
            if let Some(path) = Self::xdg_config_path() {
                if let Some(config) = Self::load_from(&path)? {
                    return Ok(config);
                }
            }
        }

        match Self::config_path() {
            Some(path) => Ok(Self::load_from(&path)?.unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// Parse one config file; `None` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Store root: the configured path, else `<data dir>/blocktree`, else `./blocktree-data`
    pub fn store_root(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("blocktree")))
            .unwrap_or_else(|| PathBuf::from("blocktree-data"))
    }

    /// Configured log level, falling back to `warn` on unknown names
    pub fn log_level(&self) -> tracing::Level {
        self.log.level.parse().unwrap_or(tracing::Level::WARN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session.document, "default");
        assert_eq!(config.session.on_save_failure, SaveFailurePolicy::Keep);
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [store]
            path = "/tmp/blocks"

            [session]
            document = "journal"
            on_save_failure = "rollback"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.store_root(), PathBuf::from("/tmp/blocks"));
        assert_eq!(config.session.document, "journal");
        assert_eq!(config.session.on_save_failure, SaveFailurePolicy::Rollback);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let mut config = Config::default();
        config.log.level = "chatty".to_string();
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[session]\ndocument = \"inbox\"\n").unwrap();
        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.session.document, "inbox");
        assert!(Config::load_from(&dir.path().join("missing.toml")).unwrap().is_none());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[session\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(&err, ConfigError::Parse { path: p, .. } if p == &path));
        assert!(err.to_string().starts_with("malformed config "));

        fs::write(&path, "[session]\non_save_failure = \"sometimes\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.session.on_save_failure = SaveFailurePolicy::Rollback;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
