// src/main.rs
//
// postmark — build a static blog from a directory of post files.
//
// - Every regular file in the posts directory is one post:
//     line 1 title, line 2 date (M/D/YY), line 3 reserved, then the body.
// - Each post becomes <output>/<title-slug>.html; an archive listing newest
//   first is written to <output>/index.html.
// - The first malformed post aborts the run.
//
// CLI flags:
//   --config FILE        : TOML file with site settings
//   --posts DIR          : posts directory            (default: posts)
//   --output DIR         : output directory           (default: blog)
//   --header FILE        : page header HTML           (default: res/header.html)
//   --side-column FILE   : side column HTML           (default: res/sideColumn.html)
//   --blog-name NAME     : <h1> of every page
//   -v, --verbose        : debug logging
// Precedence: flags, then config file, then defaults. RUST_LOG overrides -v.

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use postmark::{Site, SiteConfig};

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Site configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding post files
    #[arg(long)]
    posts: Option<PathBuf>,

    /// Directory pages are written to
    #[arg(long)]
    output: Option<PathBuf>,

    /// HTML file prepended to every page
    #[arg(long)]
    header: Option<PathBuf>,

    /// HTML file placed beside the main column
    #[arg(long = "side-column")]
    side_column: Option<PathBuf>,

    /// Blog title shown on every page
    #[arg(long = "blog-name")]
    blog_name: Option<String>,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

impl Cli {
    fn site_config(&self) -> anyhow::Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::load_from_path(path)?,
            None => SiteConfig::default(),
        };
        if let Some(p) = &self.posts {
            config.posts_dir = p.clone();
        }
        if let Some(p) = &self.output {
            config.output_dir = p.clone();
        }
        if let Some(p) = &self.header {
            config.header_path = p.clone();
        }
        if let Some(p) = &self.side_column {
            config.side_column_path = p.clone();
        }
        if let Some(name) = &self.blog_name {
            config.blog_name = name.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = cli.site_config()?;
    log::debug!("{config:?}");

    let site = Site::load(config).context("failed to load page templates")?;
    site.build().context("site generation aborted")?;
    Ok(())
}
