use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PATHBOX_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `$PATHBOX_CONFIG` if set, otherwise `~/.config/pathbox/config.toml`
    /// on Unix (platform equivalent via `dirs::config_dir()`). Falls back to
    /// the current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pathbox").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML.
    ///
    /// Does not validate: environment and CLI overrides are layered on top
    /// first, then the caller runs [`Config::validate`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply `PATHBOX_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply `PATHBOX_*` overrides using `lookup` as the environment.
    ///
    /// - `PATHBOX_IMAGE`: image
    /// - `PATHBOX_VOLUME`: persistent volume (empty clears it)
    /// - `PATHBOX_RUNTIME`: runtime executable
    /// - `PATHBOX_GIT_CONFIG`: `1/true/yes/on` or `0/false/no/off`
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(image) = lookup("PATHBOX_IMAGE").filter(|v| !v.is_empty()) {
            self.image = image;
        }
        if let Some(volume) = lookup("PATHBOX_VOLUME") {
            self.volume = Some(volume).filter(|v| !v.is_empty());
        }
        if let Some(runtime) = lookup("PATHBOX_RUNTIME").filter(|v| !v.is_empty()) {
            self.runtime = runtime;
        }
        if let Some(flag) = lookup("PATHBOX_GIT_CONFIG") {
            match parse_bool(&flag) {
                Some(enabled) => self.mount_git_config = enabled,
                None => tracing::warn!("PATHBOX_GIT_CONFIG: ignoring unrecognised value '{}'", flag),
            }
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - An image is configured
    /// - The runtime is non-empty
    /// - The volume name and name prefix are legal runtime object names
    /// - The workspace root and persistent home are absolute, free of `,`
    ///   and newlines, and the workspace root is not `/`
    /// - `[env]` names are non-empty and contain no `=`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image.trim().is_empty() {
            return Err(validation(
                "no container image configured (set PATHBOX_IMAGE, `image` in the config file, or pass --image)",
            ));
        }

        if self.runtime.trim().is_empty() {
            return Err(validation("runtime must not be empty"));
        }

        if let Some(volume) = &self.volume {
            if !is_object_name(volume) {
                return Err(validation(format!(
                    "invalid volume name '{}': use letters, digits, '_', '.' or '-'",
                    volume
                )));
            }
        }

        if !is_object_name(&self.name_prefix) {
            return Err(validation(format!(
                "invalid name_prefix '{}': use letters, digits, '_', '.' or '-'",
                self.name_prefix
            )));
        }

        if !self.workspace_root.starts_with('/') || self.workspace_root.trim_end_matches('/').is_empty() {
            return Err(validation(format!(
                "workspace_root must be an absolute path other than '/', got '{}'",
                self.workspace_root
            )));
        }

        if !self.persistent_home.starts_with('/') {
            return Err(validation(format!(
                "persistent_home must be an absolute path, got '{}'",
                self.persistent_home
            )));
        }

        // Both end up inside `--mount` values, which the runtime splits on ','.
        for (field, value) in [
            ("workspace_root", &self.workspace_root),
            ("persistent_home", &self.persistent_home),
        ] {
            if let Some(c) = value.chars().find(|&c| matches!(c, ',' | '\n')) {
                return Err(validation(format!(
                    "{} must not contain {:?}, got {:?}",
                    field, c, value
                )));
            }
        }

        if let Some(key) = self.env.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(validation(format!(
                "invalid [env] variable name {:?}: must be non-empty and contain no '='",
                key
            )));
        }

        Ok(())
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

/// `[a-zA-Z0-9][a-zA-Z0-9_.-]*`, the runtime's rule for volume and container names.
fn is_object_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
