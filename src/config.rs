//! Process-wide settings for stencil.
//! Holds the template extension and loads optional configuration files that
//! set the extension and seed global variables.

use crate::constants::DEFAULT_TEMPLATE_EXT;
use crate::error::{Error, Result};
use crate::globals::assign_global;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::sync::{OnceLock, PoisonError, RwLock};

static TEMPLATE_EXT: OnceLock<RwLock<String>> = OnceLock::new();

fn template_ext_cell() -> &'static RwLock<String> {
    TEMPLATE_EXT.get_or_init(|| RwLock::new(DEFAULT_TEMPLATE_EXT.to_string()))
}

/// Returns the extension currently appended to template paths.
pub fn template_ext() -> String {
    template_ext_cell().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Changes the extension appended to template paths constructed from now on.
/// Templates that already exist keep the path they resolved.
pub fn set_template_ext<S: Into<String>>(ext: S) {
    let ext = ext.into();
    debug!("Template extension set to '{}'.", ext);
    *template_ext_cell().write().unwrap_or_else(PoisonError::into_inner) = ext;
}

/// Contents of a `stencil.json`, `stencil.yml` or `stencil.yaml` file.
///
/// ```yaml
/// extension: .html
/// globals:
///   site_name: Example
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Template extension, left unchanged when absent
    #[serde(default)]
    pub extension: Option<String>,
    /// Variables assigned globally when the config is applied
    #[serde(default)]
    pub globals: IndexMap<String, serde_json::Value>,
}

impl Config {
    /// Loads configuration from a directory, trying each name in `config_files`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no config file exists or none parses
    pub fn load<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Self> {
        for file in config_files {
            let config_path = dir.as_ref().join(file);
            if config_path.exists() {
                debug!("Loading configuration from {}", config_path.display());
                let content = std::fs::read_to_string(&config_path).map_err(Error::IoError)?;
                return Self::parse(&content);
            }
        }

        Err(Error::ConfigError(format!(
            "No configuration file found (tried: {})",
            config_files.join(", ")
        )))
    }

    /// Parses configuration content, trying JSON first and YAML second.
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
        }
    }

    /// Sets the template extension and assigns every configured global.
    pub fn apply(self) {
        if let Some(ext) = self.extension {
            set_template_ext(ext);
        }
        for (key, value) in self.globals {
            assign_global(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let config = Config::parse(r#"{"extension": ".html", "globals": {"a": 1}}"#).unwrap();
        assert_eq!(config.extension.as_deref(), Some(".html"));
        assert_eq!(config.globals.get("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_parse_yaml() {
        let config = Config::parse("globals:\n  title: Home\n  tags: [a, b]\n").unwrap();
        assert_eq!(config.extension, None);
        assert_eq!(
            config.globals.keys().collect::<Vec<_>>(),
            vec!["title", "tags"]
        );
    }

    #[test]
    fn test_parse_invalid() {
        match Config::parse("globals: [unclosed") {
            Err(Error::ConfigError(_)) => (),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }
}
