//! Markdown noise removal applied before structural parsing.

use regex::Regex;
use std::sync::OnceLock;

/// HTML comment block, possibly spanning lines.
pub const HTML_COMMENT_PATTERN: &str = r"(?s)<!--.*?-->";
/// Front matter: a `---` line at the very start, arbitrary lines, and a closing `---` line.
pub const FRONT_MATTER_PATTERN: &str = r"\A---\n(?s:(?:.*?\n)?)---(?:\n|\z)";
/// Footer delimiter: the first `---` line after the start of the document.
pub const FOOTER_PATTERN: &str = r"\n---(?:\n|\z)";

fn html_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HTML_COMMENT_PATTERN).expect("html comment pattern"))
}

fn front_matter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FRONT_MATTER_PATTERN).expect("front matter pattern"))
}

fn footer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FOOTER_PATTERN).expect("footer pattern"))
}

/// Strips comments, front matter and the trailing footer from raw markdown.
///
/// Line endings are normalized to `\n` first. Front matter may follow leading
/// comments or blank lines. The footer rule truncates at the
/// first `---` line anywhere past the start, so a horizontal rule in the body
/// also ends the document.
///
/// ```
/// let raw = "---\ntitle: FAQ\n---\n## Intro\nHello <!-- draft -->\n---\nfooter";
/// assert_eq!(faqchunk::clean_markdown(raw), "## Intro\nHello");
/// ```
pub fn clean_markdown(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let without_comments = html_comment_re().replace_all(&normalized, "");
    let body = front_matter_re().replace(without_comments.trim_start(), "");
    let body = match footer_re().find(&body) {
        Some(footer) => &body[..footer.start()],
        None => &body[..],
    };
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::clean_markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn removes_multiline_comments() {
        let raw = "Before\n<!-- line one\nline two -->\nAfter";
        assert_eq!(clean_markdown(raw), "Before\n\nAfter");
    }

    #[test]
    fn comment_only_document_is_empty() {
        assert_eq!(clean_markdown("<!-- nothing to see -->\n"), "");
    }

    #[test]
    fn front_matter_only_at_start() {
        let raw = "---\ntitle: x\ntags: [a]\n---\n# Title\nBody";
        assert_eq!(clean_markdown(raw), "# Title\nBody");

        let empty = "---\n---\nBody";
        assert_eq!(clean_markdown(empty), "Body");
    }

    #[test]
    fn front_matter_after_leading_comment() {
        let raw = "<!-- generated -->\n---\ntitle: x\n---\n## A\nBody";
        assert_eq!(clean_markdown(raw), "## A\nBody");
    }

    #[test]
    fn footer_truncates_at_first_rule() {
        let raw = "## A\ntext\n---\nPage 3 of 9\n---\nmore";
        assert_eq!(clean_markdown(raw), "## A\ntext");
    }

    #[test]
    fn footer_rule_at_end_of_file() {
        assert_eq!(clean_markdown("## A\ntext\n---"), "## A\ntext");
    }

    #[test]
    fn longer_rules_are_not_footers() {
        let raw = "## A\ntext\n----\nstill body";
        assert_eq!(clean_markdown(raw), raw);
    }

    #[test]
    fn crlf_matches_lf() {
        let lf = "---\nmeta\n---\n## A\n\nBody\n---\nfooter";
        let crlf = lf.replace('\n', "\r\n");
        assert_eq!(clean_markdown(&crlf), clean_markdown(lf));
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean_markdown("## A\n\nJust text."), "## A\n\nJust text.");
    }
}
