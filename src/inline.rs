// src/inline.rs
//
// Stateless per-line substitutions, applied in this order:
//   1. inline markdown tokens  (** __ -- ```)
//   2. links                   [text](url)
//   3. images                  [alt]
// Links must run before images, otherwise `[text](url)` would turn into an
// <img> followed by a literal "(url)".

use memchr::memmem;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::FormatError;

/// Token → tag, in the order they are substituted.
pub const MARKDOWN_TOKENS: [(&str, &str); 4] = [
    ("**", "b"),
    ("__", "i"),
    ("--", "s"),
    ("```", "code"),
];

// \[(.*?)\]\((.*?)\)
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\[(.*?)\]\((.*?)\)"));
// \[(.*?)\]
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\[(.*?)\]"));

/// Patterns are constants covered by the tests below; a failure here is a bug.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/* ============================ Inline markdown ============================ */

/// Non-overlapping occurrences, scanned left to right.
fn count_token(s: &str, token: &str) -> usize {
    memmem::find_iter(s.as_bytes(), token.as_bytes()).count()
}

/// Replace occurrences of `token` alternately with `<tag>` and `</tag>`.
fn toggle_token(s: &str, token: &str, tag: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut open = true;
    let mut last = 0usize;
    for start in memmem::find_iter(s.as_bytes(), token.as_bytes()) {
        // tokens are ASCII, so both ends sit on char boundaries
        out.push_str(&s[last..start]);
        if open {
            out.push('<');
        } else {
            out.push_str("</");
        }
        out.push_str(tag);
        out.push('>');
        open = !open;
        last = start + token.len();
    }
    out.push_str(&s[last..]);
    out
}

/// Substitute all four token pairs. Every token must occur an even number of
/// times; otherwise the whole line is rejected and nothing is substituted.
pub fn apply_markdown(line: &str) -> Result<String, FormatError> {
    for (token, _) in MARKDOWN_TOKENS {
        if count_token(line, token) % 2 != 0 {
            return Err(FormatError::MalformedInlineMarkup {
                token,
                line: line.to_string(),
            });
        }
    }

    let mut out = line.to_string();
    for (token, tag) in MARKDOWN_TOKENS {
        if count_token(&out, token) != 0 {
            out = toggle_token(&out, token, tag);
        }
    }
    Ok(out)
}

/* ============================ Links & images ============================= */

/// `[text](url)` → `<a href="url">text</a>`
pub fn replace_links(line: &str) -> String {
    LINK_RE
        .replace_all(line, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

/// `[alt]` → `<img src="alt"/>`
pub fn replace_images(line: &str) -> String {
    IMAGE_RE.replace_all(line, r#"<img src="${1}"/>"#).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("**bold**", "<b>bold</b>")]
    #[case("__it__", "<i>it</i>")]
    #[case("--gone--", "<s>gone</s>")]
    #[case("```x```", "<code>x</code>")]
    #[case("**a** and **b**", "<b>a</b> and <b>b</b>")]
    #[case("**__both__**", "<b><i>both</i></b>")]
    #[case("no tokens", "no tokens")]
    fn substitutes_token_pairs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply_markdown(input).unwrap(), expected);
    }

    #[rstest]
    #[case("**open", "**")]
    #[case("a __b__ __c", "__")]
    #[case("x -- y", "--")]
    #[case("```", "```")]
    fn odd_token_count_is_rejected(#[case] input: &str, #[case] token: &'static str) {
        let err = apply_markdown(input).unwrap_err();
        assert_eq!(
            err,
            FormatError::MalformedInlineMarkup {
                token,
                line: input.to_string(),
            }
        );
    }

    #[test]
    fn odd_token_rejects_line_even_if_other_tokens_balance() {
        assert!(apply_markdown("**ok** but -- dangling").is_err());
    }

    #[test]
    fn open_and_close_counts_match() {
        let out = apply_markdown("**a** **b** **c**").unwrap();
        assert_eq!(out.matches("<b>").count(), 3);
        assert_eq!(out.matches("</b>").count(), 3);
        assert!(out.find("<b>").unwrap() < out.find("</b>").unwrap());
    }

    #[test]
    fn three_dashes_count_as_one_token() {
        // "---" holds a single non-overlapping "--"
        assert!(apply_markdown("a --- b").is_err());
        assert_eq!(apply_markdown("----").unwrap(), "<s></s>");
    }

    #[test]
    fn links() {
        assert_eq!(
            replace_links("see [docs](https://example.com) now"),
            r#"see <a href="https://example.com">docs</a> now"#
        );
        assert_eq!(
            replace_links("[a](1) [b](2)"),
            r#"<a href="1">a</a> <a href="2">b</a>"#
        );
    }

    #[test]
    fn images() {
        assert_eq!(replace_images("[cat.png]"), r#"<img src="cat.png"/>"#);
        assert_eq!(
            replace_images("[a] and [b]"),
            r#"<img src="a"/> and <img src="b"/>"#
        );
    }

    #[test]
    fn links_run_before_images() {
        let out = replace_images(&replace_links("[a](b)"));
        assert_eq!(out, r#"<a href="b">a</a>"#);
        assert!(!out.contains("<img"));

        // the opposite order breaks the link apart
        let wrong = replace_links(&replace_images("[a](b)"));
        assert_eq!(wrong, r#"<img src="a"/>(b)"#);
    }
}
