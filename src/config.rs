use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Crate-level defaults for new controllers, loaded from a TOML file under
/// the platform config directory. Every section falls back to its defaults
/// when the file is absent or omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub pagination: PaginationConfig,
    pub search: SearchConfig,
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size for controllers whose namespace has no persisted state yet.
    pub default_page_size: usize,

    /// Sizes offered by the page-size picker. A hint for the calling
    /// page's pager control; the controller accepts any size the page
    /// sends in a page-change event.
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quick-filter commit delay in milliseconds.
    pub debounce_ms: u64,

    /// Start quick filters in fuzzy mode instead of text mode.
    pub fuzzy_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Persist view state at all. Off means every session starts from
    /// caller-supplied defaults.
    pub enabled: bool,

    /// Override for the view-state directory (leave unset for the platform
    /// default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            fuzzy_default: false,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_dir: None,
        }
    }
}

impl ViewConfig {
    /// Load config from the default location, creating a default file on
    /// first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: ViewConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("table-state").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.pagination.default_page_size, 20);
        assert_eq!(config.search.debounce_ms, 300);
        assert!(config.persistence.enabled);
    }

    #[test]
    fn config_serialization() {
        let config = ViewConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ViewConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: ViewConfig = toml::from_str("[search]\ndebounce_ms = 150\n").unwrap();
        assert_eq!(parsed.search.debounce_ms, 150);
        assert_eq!(parsed.pagination, PaginationConfig::default());
        assert_eq!(parsed.persistence, PersistenceConfig::default());
    }
}
