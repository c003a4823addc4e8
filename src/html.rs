// src/html.rs
//
// Tag wrapping helpers. No escaping: content is inserted as-is.

/// `<tag>content\n</tag>`
pub fn wrap_in_tag(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}\n</{tag}>")
}

/// `<tag>content</tag>`
pub fn wrap_in_tag_inline(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

/// `<div class="class">content\n</div>`
pub fn wrap_in_div(class: &str, content: &str) -> String {
    format!("<div class=\"{class}\">{content}\n</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_wrap_has_no_newline() {
        assert_eq!(wrap_in_tag_inline("p", "hi"), "<p>hi</p>");
    }

    #[test]
    fn block_wrap_puts_close_tag_on_own_line() {
        assert_eq!(wrap_in_tag("body", "\nx"), "<body>\nx\n</body>");
        assert_eq!(
            wrap_in_div("column three-quarters", "\n<h2>t</h2>"),
            "<div class=\"column three-quarters\">\n<h2>t</h2>\n</div>"
        );
    }
}
