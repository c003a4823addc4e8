// src/config.rs
//
// Site configuration. Values come from, in increasing precedence:
// built-in defaults, an optional TOML file, command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Shown as the <h1> of every page.
    pub blog_name: String,
    /// Directory holding post files.
    pub posts_dir: PathBuf,
    /// Directory pages and index.html are written to.
    pub output_dir: PathBuf,
    /// HTML prepended to every page.
    pub header_path: PathBuf,
    /// HTML placed after the main column of every page.
    pub side_column_path: PathBuf,
    /// URL prefix used for archive links.
    pub link_base: String,
    /// Appended to every page.
    pub footer: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            blog_name: "My Blog".to_string(),
            posts_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("blog"),
            header_path: PathBuf::from("res/header.html"),
            side_column_path: PathBuf::from("res/sideColumn.html"),
            link_base: "/blog".to_string(),
            footer: "\n</html>".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Archive link for a page file name.
    pub fn link_for(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.link_base.trim_end_matches('/'))
    }
}
