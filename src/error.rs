// src/error.rs
//
// Error types for formatting posts and building the site.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning a post body into HTML.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A markdown token occurs an odd number of times on one line.
    #[error("mismatched markdown formatting: odd number of `{token}` in {line:?}")]
    MalformedInlineMarkup { token: &'static str, line: String },

    /// Same as above, tagged with the 1-based body line it came from.
    #[error("line {line_no}: {source}")]
    AtLine {
        line_no: usize,
        #[source]
        source: Box<FormatError>,
    },
}

impl FormatError {
    /// Body line number, when known.
    pub fn line_no(&self) -> Option<usize> {
        match self {
            FormatError::AtLine { line_no, .. } => Some(*line_no),
            FormatError::MalformedInlineMarkup { .. } => None,
        }
    }
}

/// Failure while loading the site configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Failure anywhere in a generation run. The first one aborts the run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: missing {field} line")]
    MissingHeader { path: PathBuf, field: &'static str },

    #[error("{path}: invalid date {value:?}, expected M/D/YY")]
    InvalidDate { path: PathBuf, value: String },

    #[error("error in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
