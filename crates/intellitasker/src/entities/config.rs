//! Configuration entities.

use serde::{Deserialize, Serialize};

use super::{FilterCategory, SortKey};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// View defaults
    #[serde(default)]
    pub view: ViewConfig,

    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task backend
    #[serde(default = "default_base_url", rename = "baseUrl")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs", rename = "timeoutSecs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Defaults for the task view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default, rename = "defaultSort")]
    pub default_sort: SortKey,

    #[serde(default, rename = "defaultFilter")]
    pub default_filter: FilterCategory,

    /// BCP 47 locale used to order titles
    #[serde(default = "default_collation_locale", rename = "collationLocale")]
    pub collation_locale: String,

    /// Page size requested from the backend
    #[serde(default = "default_page_limit", rename = "pageLimit")]
    pub page_limit: u32,
}

fn default_collation_locale() -> String {
    "es".to_string()
}

const fn default_page_limit() -> u32 {
    1000
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            default_filter: FilterCategory::default(),
            collation_locale: default_collation_locale(),
            page_limit: default_page_limit(),
        }
    }
}

/// Global configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level", rename = "logLevel")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.view.collation_locale, "es");
        assert_eq!(config.view.page_limit, 1000);
        assert_eq!(config.global.log_level, "warn");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"view": {"defaultSort": "title"}}"#).unwrap();
        assert_eq!(config.view.default_sort, SortKey::Title);
        assert_eq!(config.view.default_filter, FilterCategory::All);
        assert_eq!(config.api.timeout_secs, 30);
    }
}
