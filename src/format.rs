// src/format.rs
//
// Line-by-line post formatter.
//
// - Empty line → "<br>".
// - Leading '>' characters give the list depth of the line. A change in depth
//   queues "<ul>" / "</ul>" carry lines which are emitted in front of the next
//   output. The '>' characters, plus one space after them, are stripped.
// - A line that is exactly "```" (after stripping '>') toggles a code block and
//   becomes "<pre>" / "</pre>". Inside a code block lines pass through verbatim.
// - Everything else: inline markdown, links, images, then <p> (depth 0) or <li>.
//
// One LineFormatter per post; it holds no shared state.

use log::{debug, warn};

use crate::error::FormatError;
use crate::html::wrap_in_tag_inline;
use crate::inline::{apply_markdown, replace_images, replace_links};

pub const FENCE: &str = "```";
pub const LIST_OPEN: &str = "<ul>";
pub const LIST_CLOSE: &str = "</ul>";

/// Formatting state for one post body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    in_code_block: bool,
    indent_level: usize,
    pending: Vec<&'static str>,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    /// Current open list depth.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Carry lines queued for the next output.
    pub fn pending(&self) -> &[&'static str] {
        &self.pending
    }

    /// Format one raw line. On error nothing is emitted; queued carry lines
    /// stay queued for the next successful line.
    pub fn format_line(&mut self, line: &str) -> Result<String, FormatError> {
        if line.is_empty() {
            return Ok(self.flush_pending("<br>"));
        }

        let stripped = self.track_nesting(line);

        if stripped == FENCE {
            self.in_code_block = !self.in_code_block;
            let tag = if self.in_code_block { "<pre>" } else { "</pre>" };
            return Ok(self.flush_pending(tag));
        }

        if self.in_code_block {
            return Ok(self.flush_pending(stripped));
        }

        // order matters
        let html = apply_markdown(stripped)?;
        let html = replace_links(&html);
        let html = replace_images(&html);

        let html = if self.indent_level == 0 {
            wrap_in_tag_inline("p", &html)
        } else {
            wrap_in_tag_inline("li", &html)
        };

        Ok(self.flush_pending(&html))
    }

    /// Format a whole body. Errors carry the 1-based line number; dangling
    /// lists and code blocks are closed at the end.
    pub fn format_lines<I, S>(mut self, lines: I) -> Result<Vec<String>, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let html = self
                .format_line(line.as_ref())
                .map_err(|source| FormatError::AtLine {
                    line_no: idx + 1,
                    source: Box::new(source),
                })?;
            out.push(html);
        }
        out.extend(self.finish());
        Ok(out)
    }

    /// Close whatever is still open at end of input: a code block first, then
    /// every list level. `None` when the body was already balanced.
    pub fn finish(mut self) -> Option<String> {
        if self.in_code_block {
            warn!("unterminated code block, closing it");
            self.in_code_block = false;
            self.pending.push("</pre>");
        }
        if self.indent_level > 0 {
            debug!("closing {} open list level(s)", self.indent_level);
            self.pending
                .extend(std::iter::repeat(LIST_CLOSE).take(self.indent_level));
            self.indent_level = 0;
        }
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.join("\n"))
        }
    }

    /* ============================ State machine ============================ */

    /// Queue list open/close lines for this line's depth and return the line
    /// with its '>' prefix (and one space after it) removed.
    fn track_nesting<'a>(&mut self, line: &'a str) -> &'a str {
        let desired = line.bytes().take_while(|&b| b == b'>').count();

        if desired > self.indent_level {
            self.pending
                .extend(std::iter::repeat(LIST_OPEN).take(desired - self.indent_level));
        } else if desired < self.indent_level {
            self.pending
                .extend(std::iter::repeat(LIST_CLOSE).take(self.indent_level - desired));
        }
        self.indent_level = desired;

        // ^>+\s?
        let rest = &line[desired..];
        if desired > 0 {
            rest.strip_prefix(' ').unwrap_or(rest)
        } else {
            rest
        }
    }

    /// Prefix `line` with the queued carry lines, oldest first, and clear them.
    fn flush_pending(&mut self, line: &str) -> String {
        if self.pending.is_empty() {
            return line.to_string();
        }
        let mut out = String::with_capacity(line.len() + self.pending.len() * 6);
        for carry in self.pending.drain(..) {
            out.push_str(carry);
            out.push('\n');
        }
        out.push_str(line);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(lines: &[&str]) -> Vec<String> {
        let mut f = LineFormatter::new();
        lines.iter().map(|l| f.format_line(l).unwrap()).collect()
    }

    #[test]
    fn end_to_end_example() {
        let out = run(&["Hello **world**", "", "> item one", "> item two", "done"]);
        assert_eq!(
            out,
            vec![
                "<p>Hello <b>world</b></p>",
                "<br>",
                "<ul>\n<li>item one</li>",
                "<li>item two</li>",
                "</ul>\n<p>done</p>",
            ]
        );
    }

    #[test]
    fn nesting_deltas_drive_list_markers() {
        let out = run(&["a", ">b", ">c", ">>d", ">e", "f"]);
        assert_eq!(
            out,
            vec![
                "<p>a</p>",
                "<ul>\n<li>b</li>",
                "<li>c</li>",
                "<ul>\n<li>d</li>",
                "</ul>\n<li>e</li>",
                "</ul>\n<p>f</p>",
            ]
        );
        let joined = out.join("\n");
        assert_eq!(joined.matches("<ul>").count(), 2);
        assert_eq!(
            joined.matches("<ul>").count(),
            joined.matches("</ul>").count()
        );
    }

    #[test]
    fn jump_of_several_levels_queues_one_marker_per_level() {
        let out = run(&[">>>deep", "top"]);
        assert_eq!(out[0], "<ul>\n<ul>\n<ul>\n<li>deep</li>");
        assert_eq!(out[1], "</ul>\n</ul>\n</ul>\n<p>top</p>");
    }

    #[test]
    fn code_fence_passes_content_through() {
        let out = run(&["```", "**not bold** [x](y) [z]", "  indented", "```", "after"]);
        assert_eq!(
            out,
            vec![
                "<pre>",
                "**not bold** [x](y) [z]",
                "  indented",
                "</pre>",
                "<p>after</p>",
            ]
        );
    }

    #[test]
    fn odd_tokens_inside_code_block_are_fine() {
        let out = run(&["```", "a ** b -- c", "```"]);
        assert_eq!(out[1], "a ** b -- c");
    }

    #[test]
    fn fence_inside_list_keeps_depth_and_toggles() {
        let mut f = LineFormatter::new();
        assert_eq!(f.format_line(">item").unwrap(), "<ul>\n<li>item</li>");
        assert_eq!(f.format_line(">```").unwrap(), "<pre>");
        assert!(f.in_code_block());
        assert_eq!(f.indent_level(), 1);
        assert_eq!(f.format_line(">let x = 1;").unwrap(), "let x = 1;");
        assert_eq!(f.format_line(">```").unwrap(), "</pre>");
        assert!(!f.in_code_block());
    }

    #[test]
    fn only_one_space_after_prefix_is_dropped() {
        let out = run(&[">  two spaces", "> ```", "> code", "> ```"]);
        assert_eq!(out[0], "<ul>\n<li> two spaces</li>");
        assert_eq!(out[1], "<pre>");
        assert_eq!(out[2], "code");
        assert_eq!(out[3], "</pre>");
    }

    #[test]
    fn leading_space_without_prefix_is_kept() {
        assert_eq!(run(&[" indented"])[0], "<p> indented</p>");
    }

    #[test]
    fn nesting_changes_inside_code_block_still_emit_markers() {
        let out = run(&["```", ">quoted", "```"]);
        assert_eq!(out[1], "<ul>\nquoted");
        assert_eq!(out[2], "</ul>\n</pre>");
    }

    #[test]
    fn fence_with_trailing_text_is_not_a_fence() {
        let mut f = LineFormatter::new();
        assert_eq!(f.format_line("```rust").unwrap_err().line_no(), None);
        assert!(!f.in_code_block());
        assert_eq!(f.format_line("```x```").unwrap(), "<p><code>x</code></p>");
    }

    #[test]
    fn empty_line_is_br_in_every_state() {
        let mut f = LineFormatter::new();
        f.format_line(">>x").unwrap();
        assert_eq!(f.format_line("").unwrap(), "<br>");
        assert_eq!(f.indent_level(), 2);
        f.format_line("```").unwrap();
        assert_eq!(f.format_line("").unwrap(), "<br>");
        assert!(f.in_code_block());
    }

    #[test]
    fn empty_line_flushes_pending_carry_lines() {
        let mut f = LineFormatter::new();
        // a rejected line still moves the depth and queues its marker
        assert!(f.format_line(">**oops").is_err());
        assert_eq!(f.pending(), &[LIST_OPEN]);
        assert_eq!(f.format_line("").unwrap(), "<ul>\n<br>");
        assert!(f.pending().is_empty());
    }

    #[test]
    fn malformed_markup_produces_no_output() {
        let mut f = LineFormatter::new();
        let err = f.format_line("some __text").unwrap_err();
        assert_eq!(
            err,
            FormatError::MalformedInlineMarkup {
                token: "__",
                line: "some __text".to_string(),
            }
        );
        assert_eq!(f.format_line("fine").unwrap(), "<p>fine</p>");
    }

    #[test]
    fn link_line_has_no_image() {
        let out = run(&["go [home](/index.html)"]);
        assert_eq!(out[0], r#"<p>go <a href="/index.html">home</a></p>"#);
        assert!(!out[0].contains("<img"));
    }

    #[test]
    fn list_items_get_full_inline_processing() {
        let out = run(&[">[pic.png] and **bold**"]);
        assert_eq!(out[0], "<ul>\n<li><img src=\"pic.png\"/> and <b>bold</b></li>");
    }

    #[test]
    fn finish_closes_dangling_lists() {
        let mut f = LineFormatter::new();
        f.format_line(">>deep").unwrap();
        assert_eq!(f.finish().as_deref(), Some("</ul>\n</ul>"));
    }

    #[test]
    fn finish_closes_open_code_block_before_lists() {
        let mut f = LineFormatter::new();
        f.format_line(">```").unwrap();
        assert_eq!(f.finish().as_deref(), Some("</pre>\n</ul>"));
    }

    #[test]
    fn finish_on_balanced_body_is_none() {
        let mut f = LineFormatter::new();
        f.format_line(">a").unwrap();
        f.format_line("b").unwrap();
        assert_eq!(f.finish(), None);
    }

    #[test]
    fn format_lines_reports_line_number() {
        let err = LineFormatter::new()
            .format_lines(["ok", "", "bad **"])
            .unwrap_err();
        assert_eq!(err.line_no(), Some(3));
    }

    #[test]
    fn format_lines_appends_closing_markers() {
        let out = LineFormatter::new().format_lines(["a", ">b"]).unwrap();
        assert_eq!(out, vec!["<p>a</p>", "<ul>\n<li>b</li>", "</ul>"]);
    }

    #[test]
    fn formatters_are_independent() {
        let mut a = LineFormatter::new();
        let mut b = LineFormatter::new();
        a.format_line(">x").unwrap();
        a.format_line("```").unwrap();
        assert_eq!(b.format_line("y").unwrap(), "<p>y</p>");
        assert_eq!(b, LineFormatter::new());
    }
}
