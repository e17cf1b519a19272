//! Site configuration.
//!
//! One optional `config.toml` at the working root. Files are sparse —
//! override just the values you want:
//!
//! ```toml
//! site_name = "Lansdale Business Center"   # document-title suffix
//! base_url = "https://example.com"         # absolutizes og:image paths
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing file means
//! stock defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Suffix for detail page document titles and og:title.
    pub site_name: String,
    /// Prepended to image paths for absolute Open Graph URLs. Empty leaves
    /// paths relative.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Lansdale Business Center".to_string(),
            base_url: String::new(),
        }
    }
}

/// Load `config.toml` from `root`, falling back to defaults when absent.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    if !path.is_file() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}
