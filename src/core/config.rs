//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the working-directory config file
pub const LOCAL_CONFIG_DIR: &str = ".fcc";

/// Default decimal places for text output
pub const DEFAULT_PRECISION: usize = 4;

/// Keys accepted by `fcc config set`, with descriptions
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("author", "Author recorded in new scenario files"),
    (
        "default_format",
        "Default output format (auto, yaml, json, csv, tsv, md)",
    ),
    ("precision", "Decimal places for text output"),
    ("strict", "Reject degenerate inputs before computing (true/false)"),
];

const FORMAT_NAMES: &[&str] = &["auto", "yaml", "json", "csv", "tsv", "md"];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key '{0}'")]
    #[diagnostic(
        code(fcc::config::key),
        help("run `fcc config keys` to list valid keys")
    )]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}: expected {expected}")]
    #[diagnostic(code(fcc::config::value))]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// FCC configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Author recorded in new scenario files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Decimal places for text output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,

    /// Validate inputs before computing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(Self::global_config_path().as_deref(), &cwd)
    }

    /// Load with an explicit global path and working directory
    pub fn load_from(global_path: Option<&Path>, working_dir: &Path) -> Self {
        // 1. Built-in defaults (already in Default impl)
        let mut config = Config::default();

        // 2. Global user config (~/.config/fcc/config.yaml)
        if let Some(global) = global_path.and_then(Self::read_file) {
            config.merge(global);
        }

        // 3. Working-directory config (.fcc/config.yaml)
        if let Some(local) = Self::read_file(&Self::local_config_path(working_dir)) {
            config.merge(local);
        }

        // 4. Environment variables
        config.merge(Self::from_env());

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn from_env() -> Config {
        let mut config = Config::default();

        if let Ok(author) = std::env::var("FCC_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(format) = std::env::var("FCC_FORMAT") {
            config.default_format = Some(format);
        }
        if let Ok(precision) = std::env::var("FCC_PRECISION") {
            match precision.trim().parse() {
                Ok(p) => config.precision = Some(p),
                Err(_) => log::warn!("FCC_PRECISION is not a number: '{}'", precision),
            }
        }
        if let Ok(strict) = std::env::var("FCC_STRICT") {
            config.strict = parse_bool(&strict);
            if config.strict.is_none() {
                log::warn!("FCC_STRICT is not a boolean: '{}'", strict);
            }
        }

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fcc")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Path of the config file for a working directory
    pub fn local_config_path(working_dir: &Path) -> PathBuf {
        working_dir.join(LOCAL_CONFIG_DIR).join("config.yaml")
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.precision.is_some() {
            self.precision = other.precision;
        }
        if other.strict.is_some() {
            self.strict = other.strict;
        }
    }

    /// Current value of `key` as text, `None` when unset
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(match key {
            "author" => self.author.clone(),
            "default_format" => self.default_format.clone(),
            "precision" => self.precision.map(|p| p.to_string()),
            "strict" => self.strict.map(|s| s.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        })
    }

    /// Parse `value` for `key` and store it
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        };

        match key {
            "author" => self.author = Some(value.to_string()),
            "default_format" => {
                let format = value.trim().to_lowercase();
                if !FORMAT_NAMES.contains(&format.as_str()) {
                    return Err(invalid("one of auto, yaml, json, csv, tsv, md"));
                }
                self.default_format = Some(format);
            }
            "precision" => {
                let precision = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("a whole number"))?;
                self.precision = Some(precision);
            }
            "strict" => {
                let strict = parse_bool(value).ok_or_else(|| invalid("true or false"))?;
                self.strict = Some(strict);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Clear `key`; returns whether it was set
    pub fn unset(&mut self, key: &str) -> Result<bool, ConfigError> {
        Ok(match key {
            "author" => self.author.take().is_some(),
            "default_format" => self.default_format.take().is_some(),
            "precision" => self.precision.take().is_some(),
            "strict" => self.strict.take().is_some(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        })
    }

    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        // Try git config
        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // Fall back to username
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert!(!config.strict());
    }

    #[test]
    fn test_local_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global/config.yaml");
        let work = tmp.path().join("work");

        write_config(&global, "precision: 2\nstrict: true\nauthor: Global\n");
        write_config(&Config::local_config_path(&work), "precision: 6\n");

        let config = Config::load_from(Some(&global), &work);
        assert_eq!(config.precision, Some(6));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.author.as_deref(), Some("Global"));
    }

    #[test]
    fn test_missing_and_broken_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("nope.yaml");
        write_config(&Config::local_config_path(tmp.path()), "precision: [oops\n");

        let config = Config::load_from(Some(&global), tmp.path());
        assert_eq!(config.precision, None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_set_get_unset() {
        let mut config = Config::default();
        config.set("precision", "2").unwrap();
        config.set("strict", "on").unwrap();
        config.set("default_format", "JSON").unwrap();

        assert_eq!(config.get("precision").unwrap().as_deref(), Some("2"));
        assert_eq!(config.get("strict").unwrap().as_deref(), Some("true"));
        assert_eq!(config.default_format.as_deref(), Some("json"));

        assert!(config.unset("precision").unwrap());
        assert!(!config.unset("precision").unwrap());
        assert_eq!(config.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("editor", "vim"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("precision", "two"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config.set("default_format", "xml").is_err());
        assert_eq!(config, Config::default());
    }
}
