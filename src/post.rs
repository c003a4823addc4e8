// src/post.rs
//
// Post files:
//   line 1   title
//   line 2   date, M/D/YY
//   line 3   reserved (ignored)
//   rest     body, formatted line by line
//
// Lines split on '\n'; a trailing '\r' is dropped.

use chrono::{Datelike, NaiveDate};
use log::debug;
use memchr::memchr_iter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::format::LineFormatter;

/* ================================ Dates ================================= */

/// Calendar date of a post, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostDate(NaiveDate);

impl PostDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse `M/D/YY`. Two-digit years 00-68 land in 2000s, 69-99 in 1900s.
    pub fn parse(s: &str) -> Option<Self> {
        // %y also takes a single digit
        let yy = s.rsplit('/').next()?;
        if yy.len() != 2 || !yy.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let date = NaiveDate::parse_from_str(s, "%m/%d/%y").ok()?;
        // chrono pivots at 70, posts pivot at 69
        if date.year() == 2069 {
            return date.with_year(1969).map(Self);
        }
        Some(Self(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `January 2, 2006`
    pub fn long(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }

    /// `01-02-2006`
    pub fn archive(&self) -> String {
        self.0.format("%m-%d-%Y").to_string()
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long())
    }
}

/* ================================ Posts ================================= */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub date: PostDate,
    /// Formatted HTML, one entry per emitted chunk.
    pub body: Vec<String>,
    pub source: PathBuf,
}

/// `Hello World` → `hello-world`
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Split on '\n', dropping a trailing '\r'. A final newline does not produce
/// an extra empty line.
pub fn split_lines(src: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    for nl in memchr_iter(b'\n', src.as_bytes()) {
        lines.push(trim_cr(&src[start..nl]));
        start = nl + 1;
    }
    if start < src.len() {
        lines.push(trim_cr(&src[start..]));
    }
    lines
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

impl Post {
    /// Parse and format a post from its file contents.
    pub fn parse(source: &Path, src: &str) -> Result<Self> {
        let mut lines = split_lines(src).into_iter();

        let title = match lines.next() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => {
                return Err(BuildError::MissingHeader {
                    path: source.to_path_buf(),
                    field: "title",
                })
            }
        };

        let Some(date_line) = lines.next() else {
            return Err(BuildError::MissingHeader {
                path: source.to_path_buf(),
                field: "date",
            });
        };
        let date = PostDate::parse(date_line.trim()).ok_or_else(|| BuildError::InvalidDate {
            path: source.to_path_buf(),
            value: date_line.to_string(),
        })?;

        // reserved
        lines.next();

        let body = LineFormatter::new()
            .format_lines(lines)
            .map_err(|e| BuildError::Format {
                path: source.to_path_buf(),
                source: e,
            })?;
        debug!("{}: {} body chunk(s)", source.display(), body.len());

        Ok(Self {
            title,
            date,
            body,
            source: source.to_path_buf(),
        })
    }

    /// Read and parse a post file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &src)
    }

    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// `<slug>.html`
    pub fn file_name(&self) -> String {
        format!("{}.html", self.slug())
    }
}
