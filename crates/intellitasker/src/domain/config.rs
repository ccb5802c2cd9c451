//! Configuration domain facade.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::level_filters::LevelFilter;

use crate::engine::TitleCollation;
use crate::entities::{AppConfig, FilterCategory, SortKey, LIST_LIMIT_MAX};
use crate::errors::{TasksError, TasksResult};

/// Keys accepted by [`ConfigDomain::set`]
pub const CONFIG_KEYS: [&str; 7] = [
    "api.baseUrl",
    "api.timeoutSecs",
    "view.defaultSort",
    "view.defaultFilter",
    "view.collationLocale",
    "view.pageLimit",
    "global.logLevel",
];

/// Configuration domain facade
pub struct ConfigDomain {
    config_path: PathBuf,
}

impl ConfigDomain {
    /// Create a new config domain rooted at `project_path`
    pub fn new(project_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_path.as_ref().join(".intellitasker/config.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration; a missing file yields the defaults
    pub async fn load(&self) -> TasksResult<AppConfig> {
        match fs::read_to_string(&self.config_path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(TasksError::FileReadError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Save configuration
    pub async fn save(&self, config: &AppConfig) -> TasksResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)
            .await
            .map_err(|e| TasksError::FileWriteError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Set one dotted key, validate it, and persist the result
    pub async fn set(&self, key: &str, value: &str) -> TasksResult<AppConfig> {
        let mut config = self.load().await?;
        apply_setting(&mut config, key, value)?;
        self.save(&config).await?;
        tracing::info!(key, value, "configuration updated");
        Ok(config)
    }
}

/// Apply a dotted `key = value` pair to `config`
pub fn apply_setting(config: &mut AppConfig, key: &str, value: &str) -> TasksResult<()> {
    let invalid = |reason: String| TasksError::InvalidConfigValue {
        key: key.to_string(),
        reason,
    };
    let value = value.trim();

    match key {
        "api.baseUrl" | "api.base_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(format!("expected an http(s) URL, got '{value}'")));
            }
            config.api.base_url = value.trim_end_matches('/').to_string();
        }
        "api.timeoutSecs" | "api.timeout_secs" => {
            config.api.timeout_secs = value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| invalid(format!("expected a positive number of seconds, got '{value}'")))?;
        }
        "view.defaultSort" | "view.default_sort" => {
            config.view.default_sort = value
                .parse::<SortKey>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "view.defaultFilter" | "view.default_filter" => {
            config.view.default_filter = value
                .parse::<FilterCategory>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "view.collationLocale" | "view.collation_locale" => {
            TitleCollation::new(value).map_err(|e| invalid(e.to_string()))?;
            config.view.collation_locale = value.to_string();
        }
        "view.pageLimit" | "view.page_limit" => {
            config.view.page_limit = value
                .parse::<u32>()
                .ok()
                .filter(|limit| (1..=LIST_LIMIT_MAX).contains(limit))
                .ok_or_else(|| invalid(format!("expected 1-{LIST_LIMIT_MAX}, got '{value}'")))?;
        }
        "global.logLevel" | "global.log_level" => {
            value
                .parse::<LevelFilter>()
                .map_err(|_| invalid(format!("unknown log level '{value}'")))?;
            config.global.log_level = value.to_lowercase();
        }
        _ => {
            return Err(invalid(format!(
                "unknown key, expected one of: {}",
                CONFIG_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());

        let config = domain.load().await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.view.page_limit, 1000);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());

        let mut config = AppConfig::default();
        config.view.default_sort = SortKey::Title;
        domain.save(&config).await.unwrap();

        let loaded = domain.load().await.unwrap();
        assert_eq!(loaded.view.default_sort, SortKey::Title);
        assert!(domain.path().ends_with(".intellitasker/config.json"));
    }

    #[tokio::test]
    async fn test_set_persists() {
        let temp_dir = TempDir::new().unwrap();
        let domain = ConfigDomain::new(temp_dir.path());

        domain.set("api.baseUrl", "https://tasks.example.com/").await.unwrap();
        domain.set("view.defaultFilter", "in-progress").await.unwrap();

        let loaded = domain.load().await.unwrap();
        assert_eq!(loaded.api.base_url, "https://tasks.example.com");
        assert_eq!(loaded.view.default_filter, FilterCategory::InProgress);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = AppConfig::default();
        for (key, value) in [
            ("api.baseUrl", "localhost"),
            ("api.timeoutSecs", "0"),
            ("view.pageLimit", "1001"),
            ("view.defaultSort", "priority"),
            ("global.logLevel", "loud"),
            ("nope", "x"),
        ] {
            let err = apply_setting(&mut config, key, value).unwrap_err();
            assert!(
                matches!(err, TasksError::InvalidConfigValue { .. }),
                "{key} accepted {value}"
            );
        }
        assert_eq!(config, AppConfig::default());
    }
}
