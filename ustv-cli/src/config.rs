use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "ustv";

/// Persistent defaults. Passwords are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Username used when none is given on the command line
    pub username: Option<String>,

    /// API host
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// User agent string for requests
    pub user_agent: Option<String>,

    /// Default proxy URL (supports http, https, socks5)
    pub proxy: Option<String>,

    /// Default proxy username (if proxy requires authentication)
    pub proxy_username: Option<String>,

    /// Default proxy password (if proxy requires authentication)
    pub proxy_password: Option<String>,

    /// Player command used to open written playlists
    pub player: Option<String>,

    /// Directory for playlists written under their default name
    pub output_dir: Option<PathBuf>,

    /// Enable colored output
    pub colored_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            username: None,
            base_url: ustvnow::session::DEFAULT_BASE_URL.to_string(),
            timeout: 30,
            user_agent: None,
            proxy: None,
            proxy_username: None,
            proxy_password: None,
            player: None,
            output_dir: None,
            colored_output: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from file, or from the per-user location when no path is given
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                if path.exists() {
                    let content = std::fs::read_to_string(path)
                        .context("Failed to read configuration file")?;
                    toml::from_str(&content).context("Failed to parse configuration file")
                } else {
                    Ok(Self::default())
                }
            }
            None => confy::load(APP_NAME, None).context("Failed to load configuration"),
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, None).ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, toml_string).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Reset configuration to defaults and save
    pub fn reset(config_path: Option<&Path>) -> Result<()> {
        let path = config_path
            .map(|p| p.to_path_buf())
            .or_else(Self::default_config_path)
            .context("No configuration path available")?;

        Self::default().save(&path)
    }

    pub fn show(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration for display")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str("username = \"me@example.com\"\ntimeout = 10\n").unwrap();
        assert_eq!(config.username.as_deref(), Some("me@example.com"));
        assert_eq!(config.timeout, 10);
        assert_eq!(config.base_url, "https://m.ustvnow.com/");
        assert!(config.colored_output);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("ustv-config-that-does-not-exist.toml");
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = std::env::temp_dir().join(format!("ustv-config-{}", std::process::id()));
        let path = dir.join("ustv.toml");
        let config = AppConfig {
            player: Some("mpv --fs".to_string()),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.player.as_deref(), Some("mpv --fs"));
        assert!(config.show().unwrap().contains("player = \"mpv --fs\""));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
