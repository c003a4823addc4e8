// src/lib.rs
//
// postmark — static blog generator.
//
// Posts are plain text in a small markdown-like dialect and are turned into
// HTML one line at a time by `format::LineFormatter`. The rest of the crate
// reads post files, lays out pages and writes the archive index.

pub mod config;
pub mod error;
pub mod format;
pub mod html;
pub mod inline;
pub mod post;
pub mod site;

pub use config::SiteConfig;
pub use error::{BuildError, ConfigError, FormatError, Result};
pub use format::LineFormatter;
pub use post::{Post, PostDate};
pub use site::{BuildSummary, Site};
