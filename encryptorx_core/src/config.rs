use anyhow::{Context, Result};
use encryptorx_plugins::RequestType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::save::ExtensionFilter;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub save: SaveSettings,
    #[serde(default)]
    pub links: LinkSettings,
}

fn default_theme() -> String {
    "auto".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SaveSettings {
    #[serde(default)]
    pub default_directory: Option<PathBuf>,
    #[serde(default)]
    pub extension_filter: ExtensionFilter,
}

impl SaveSettings {
    /// Directory the file dialog starts in.
    pub fn start_directory(&self) -> PathBuf {
        self.default_directory
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkSettings {
    #[serde(default = "default_bug_report_url")]
    pub bug_report: String,
}

fn default_bug_report_url() -> String {
    "https://github.com/encryptorx/encryptorx/issues/new".to_string()
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            bug_report: default_bug_report_url(),
        }
    }
}

impl LinkSettings {
    pub fn as_map(&self) -> HashMap<RequestType, String> {
        HashMap::from([(RequestType::BugReport, self.bug_report.clone())])
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            save: SaveSettings::default(),
            links: LinkSettings::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("encryptorx")
            .join("config.toml"))
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?).await
    }

    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).await?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config at {}", config_path.display()))?;

        Ok(config)
    }

    pub async fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).await?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let tmp = tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("config.toml"))
            .await
            .unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.save.extension_filter.pattern(), ".*");
    }

    #[tokio::test]
    async fn partial_file_fills_remaining_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "theme = \"retro\"\n[save]\nextension_filter = \".log\"\n")
            .await
            .unwrap();

        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config.theme, "retro");
        assert_eq!(config.save.extension_filter, ExtensionFilter::new(".log"));
        assert_eq!(config.links, LinkSettings::default());
    }

    #[tokio::test]
    async fn extension_filter_is_normalized_on_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[save]\nextension_filter = \" .log \"\n")
            .await
            .unwrap();
        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config.save.extension_filter.pattern(), ".log");
        assert!(config.save.extension_filter.accepts("run.log"));

        fs::write(&path, "[save]\nextension_filter = \"  \"\n")
            .await
            .unwrap();
        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config.save.extension_filter, ExtensionFilter::permissive());
    }

    #[tokio::test]
    async fn save_then_load_preserves_values() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.save.default_directory = Some(PathBuf::from("/tmp"));
        config.links.bug_report = "https://example.com/bugs".to_string();

        config.save_to(&path).await.unwrap();
        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "theme = [").await.unwrap();
        assert!(Config::load_from(&path).await.is_err());
    }

    #[test]
    fn configured_start_directory_wins() {
        let settings = SaveSettings {
            default_directory: Some(PathBuf::from("/srv/out")),
            extension_filter: ExtensionFilter::default(),
        };
        assert_eq!(settings.start_directory(), PathBuf::from("/srv/out"));
    }
}
