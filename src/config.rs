use crate::error::{Result, VisitReportError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default subject (promotor) name used when the CLI flag is absent.
    pub default_subject: Option<String>,
    /// Root directory of the local object storage.
    pub storage_root: Option<PathBuf>,
    /// Lifetime of simulated signed URLs, in seconds.
    pub signed_url_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_subject: None,
            storage_root: None,
            signed_url_ttl_secs: 900,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VisitReportError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("visit-report").join("config.json"))
    }

    pub fn set_subject(&mut self, subject: String) -> Result<()> {
        self.default_subject = Some(subject);
        self.save()
    }

    pub fn set_storage_root(&mut self, root: PathBuf) -> Result<()> {
        self.storage_root = Some(root);
        self.save()
    }
}
