// src/site.rs
//
// Page assembly and the generation run.
//
// Page layout:
//   <header file><h1>blog name</h1>
//   <body><div class="column three-quarters">   (index: div on its own line)
//   ...content...
//   </div>
//   <side column file>
//   </body>
//   <footer>

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use crate::html::{wrap_in_div, wrap_in_tag, wrap_in_tag_inline};
use crate::post::Post;

const COLUMN_CLASS: &str = "column three-quarters";
const ARCHIVE_HEADING: &str = "Archive of Posts";
pub const INDEX_FILE: &str = "index.html";

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: Vec<PathBuf>,
    pub index: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    /// Header file contents followed by the <h1>.
    header: String,
    side_column: String,
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Newest first. Posts sharing a date keep their relative order.
pub fn sort_reverse_chronological(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Regular files in `dir`, ordered by file name.
pub fn post_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source: std::io::Error| BuildError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_type().map_err(read_err)?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

impl Site {
    pub fn new(config: SiteConfig, header_html: &str, side_column: String) -> Self {
        let header = format!(
            "{header_html}{}",
            wrap_in_tag_inline("h1", &config.blog_name)
        );
        Self {
            config,
            header,
            side_column,
        }
    }

    /// Read the header and side column files named by `config`.
    pub fn load(config: SiteConfig) -> Result<Self> {
        let header_html = read_file(&config.header_path)?;
        let side_column = read_file(&config.side_column_path)?;
        Ok(Self::new(config, &header_html, side_column))
    }

    pub fn page_path(&self, post: &Post) -> PathBuf {
        self.config.output_dir.join(post.file_name())
    }

    /// `lead` goes between <body> and the column div.
    fn render_page(&self, lead: &str, content: &str) -> String {
        let mut column = String::from(lead);
        column.push_str(&wrap_in_div(COLUMN_CLASS, content));
        column.push('\n');
        column.push_str(&self.side_column);
        let body = wrap_in_tag("body", &column);
        format!("{}\n{body}\n{}", self.header, self.config.footer)
    }

    pub fn render_post(&self, post: &Post) -> String {
        let mut content = String::from("\n");
        content.push_str(&wrap_in_tag_inline("h2", &post.title));
        content.push_str(&wrap_in_tag_inline("i", &post.date.long()));
        for line in &post.body {
            content.push('\n');
            content.push_str(line);
        }
        self.render_page("", &content)
    }

    /// Archive page. `posts` are listed in the order given.
    pub fn render_index(&self, posts: &[Post]) -> String {
        let mut items = String::new();
        for post in posts {
            let link = format!(
                "<a href=\"{}\">{}</a>",
                self.config.link_for(&post.file_name()),
                post.title
            );
            let date = wrap_in_tag_inline("i", &post.date.archive());
            items.push('\n');
            items.push_str(&wrap_in_tag_inline("li", &format!("{link} - {date}")));
        }

        let content = format!(
            "\n{}\n{}",
            wrap_in_tag_inline("h2", ARCHIVE_HEADING),
            wrap_in_tag("ul", &items)
        );
        // the archive column starts on its own line
        self.render_page("\n", &content)
    }

    /// Format every post, write its page, then write the index.
    /// Stops at the first error.
    pub fn build(&self) -> Result<BuildSummary> {
        let out_dir = &self.config.output_dir;
        fs::create_dir_all(out_dir).map_err(|source| BuildError::Write {
            path: out_dir.clone(),
            source,
        })?;

        let mut posts = Vec::new();
        let mut pages = Vec::new();
        for path in post_paths(&self.config.posts_dir)? {
            debug!("formatting {}", path.display());
            let post = Post::load(&path)?;
            let page_path = self.page_path(&post);
            write_file(&page_path, &self.render_post(&post))?;
            info!("{} written to {}", post.title, page_path.display());
            pages.push(page_path);
            posts.push(post);
        }

        sort_reverse_chronological(&mut posts);
        let index = out_dir.join(INDEX_FILE);
        write_file(&index, &self.render_index(&posts))?;
        info!("{} posts generated", posts.len());

        Ok(BuildSummary { pages, index })
    }
}
