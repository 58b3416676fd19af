//! Site configuration (folio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "folio.yml";

/// Environment variable overriding `content_dir`
const CONTENT_DIR_ENV: &str = "FOLIO_CONTENT_DIR";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolioConfig {
    // Content location
    pub content_dir: String,
    pub index_file: String,
    pub posts_glob: String,

    // Listing
    pub per_page: usize,
    pub recent_limit: usize,
    pub related_limit: usize,

    // Feed
    pub feed_limit: usize,

    /// Reuse the last loaded index until a content file changes
    pub cache: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            content_dir: "blogs".to_string(),
            index_file: "blogs.yaml".to_string(),
            posts_glob: "posts/*.yaml".to_string(),

            per_page: crate::query::PER_PAGE,
            recent_limit: 5,
            related_limit: 3,

            feed_limit: crate::generator::rss::FEED_LIMIT,

            cache: false,
        }
    }
}

impl FolioConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: FolioConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Load `folio.yml` from `base_dir` if present, then apply environment
    /// overrides.
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)?
        } else {
            Self::default()
        };

        if let Ok(dir) = std::env::var(CONTENT_DIR_ENV) {
            if !dir.is_empty() {
                config.content_dir = dir;
            }
        }

        // A zero page size would make pagination meaningless
        if config.per_page == 0 {
            config.per_page = crate::query::PER_PAGE;
        }

        Ok(config)
    }

    /// Resolve the content root relative to `base_dir`
    pub fn content_root(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.content_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.content_dir, "blogs");
        assert_eq!(config.index_file, "blogs.yaml");
        assert_eq!(config.posts_glob, "posts/*.yaml");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.feed_limit, 20);
        assert!(!config.cache);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
content_dir: content
per_page: 5
cache: true
"#;
        let config: FolioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.per_page, 5);
        assert!(config.cache);
        // Unspecified fields keep their defaults
        assert_eq!(config.related_limit, 3);
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FolioConfig::discover(dir.path()).unwrap();
        assert_eq!(config.index_file, "blogs.yaml");
        assert_eq!(
            config.content_root(dir.path()),
            dir.path().join(&config.content_dir)
        );
    }

    #[test]
    fn test_discover_fixes_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "per_page: 0\n").unwrap();
        let config = FolioConfig::discover(dir.path()).unwrap();
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "per_page: [nope\n").unwrap();
        assert!(FolioConfig::discover(dir.path()).is_err());
    }
}
