//! Configuration loading for bachu hosts.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.bachu/config.toml` (user)
//! 3. `/etc/bachu/config.toml` (system)
//!
//! With no file at all the defaults apply: embedded knowledge base,
//! entropy-seeded responses, `warn` logging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::brain::Brain;
use crate::knowledge::KnowledgeBase;
use crate::{BachuError, Result};

/// Host configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub responses: ResponsesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the knowledge base comes from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON knowledge base file. Unset means the compiled-in seed.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Response selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesConfig {
    /// Fixed RNG seed for reproducible replies.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging defaults for binaries. `RUST_LOG` takes precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive (default: "warn").
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.bachu/config.toml`
    /// 3. `/etc/bachu/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BachuError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            BachuError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, `None` if no file exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(BachuError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".bachu").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/bachu/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// The configured knowledge base: the file at `knowledge.path`, or the
    /// embedded seed.
    pub fn knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.knowledge.path {
            Some(path) => KnowledgeBase::load(path),
            None => Ok(KnowledgeBase::embedded()),
        }
    }

    /// Build an uninitialised brain from this configuration.
    pub fn brain(&self) -> Result<Brain> {
        let knowledge = self.knowledge_base()?;
        Ok(match self.responses.seed {
            Some(seed) => Brain::seeded(knowledge, seed),
            None => Brain::new(knowledge),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert!(config.knowledge.path.is_none());
        assert!(config.responses.seed.is_none());
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [knowledge]
            path = "/srv/bachu/knowledge.json"

            [responses]
            seed = 42

            [logging]
            filter = "bachu=debug"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.knowledge.path.as_deref(),
            Some(Path::new("/srv/bachu/knowledge.json"))
        );
        assert_eq!(config.responses.seed, Some(42));
        assert_eq!(config.logging.filter, "bachu=debug");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/bachu.toml"))).unwrap_err();
        assert!(matches!(err, BachuError::Configuration(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn default_knowledge_base_is_embedded() {
        let kb = Config::default().knowledge_base().unwrap();
        assert_eq!(kb, KnowledgeBase::embedded());
    }

    #[test]
    fn seeded_brain_from_config() {
        let config = Config {
            responses: ResponsesConfig { seed: Some(3) },
            ..Default::default()
        };
        let mut a = config.brain().unwrap();
        let mut b = config.brain().unwrap();
        assert_eq!(a.process("hola"), b.process("hola"));
    }
}
