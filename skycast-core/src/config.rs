use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment override for the WeatherAPI key; wins over the config file
/// so deployments can inject the secret without touching disk.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// WeatherAPI.com key. Example TOML:
    /// api_key = "..."
    pub api_key: Option<String>,
}

impl Config {
    /// Resolve the API key from the environment or the config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_from(env::var(API_KEY_ENV).ok().as_deref())
    }

    /// The resolution rule with the environment lookup injected, so the
    /// precedence is testable without mutating process state.
    fn resolve_api_key_from(&self, env_key: Option<&str>) -> Result<String> {
        if let Some(key) = env_key {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        self.api_key.clone().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your WeatherAPI.com key, \
                 or set {API_KEY_ENV}."
            )
        })
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_actionable_error() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key_from(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn configured_key_resolves() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert_eq!(cfg.resolve_api_key_from(None).expect("key must resolve"), "KEY");
    }

    #[test]
    fn env_key_shadows_the_config_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".to_string());

        let key = cfg.resolve_api_key_from(Some("ENV_KEY")).expect("env key must win");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn empty_env_key_falls_back_to_the_config_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".to_string());

        let key = cfg.resolve_api_key_from(Some("")).expect("file key must apply");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn env_key_alone_is_sufficient() {
        let cfg = Config::default();

        let key = cfg.resolve_api_key_from(Some("ENV_KEY")).expect("env key must apply");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        assert!(cfg.resolve_api_key_from(None).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".to_string());

        let serialized = toml::to_string_pretty(&cfg).expect("serializes");
        let parsed: Config = toml::from_str(&serialized).expect("parses back");

        assert_eq!(parsed.api_key.as_deref(), Some("SECRET"));
    }
}
