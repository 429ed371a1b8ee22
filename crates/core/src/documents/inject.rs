//! Style injection for hero HTML fragments
//!
//! Hero fragments are authored in the CMS without the site typography. Before
//! they are served, a font/style block is spliced in where a browser will
//! apply it.

use veriprint_domain::constants::{HERO_FONT_FAMILY, HERO_FONT_STYLESHEET};

/// Font link plus base typography for hero fragments.
pub fn hero_style_block() -> String {
    format!(
        concat!(
            "<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>",
            "<link rel=\"stylesheet\" href=\"{stylesheet}\">",
            "<style>html,body{{margin:0;font-family:{family};",
            "-webkit-font-smoothing:antialiased;}}</style>"
        ),
        stylesheet = HERO_FONT_STYLESHEET,
        family = HERO_FONT_FAMILY,
    )
}

/// Insert `block` into `html`.
///
/// Placement, first match wins:
/// 1. immediately before the first `</head>`;
/// 2. immediately after the opening `<html ...>` or `<body ...>` tag;
/// 3. at the very start of the document.
///
/// Tag matching is ASCII case-insensitive.
pub fn inject_style_block(html: &str, block: &str) -> String {
    let at = find_ignore_case(html, "</head>")
        .or_else(|| end_of_open_tag(html, "<html"))
        .or_else(|| end_of_open_tag(html, "<body"))
        .unwrap_or(0);

    let mut out = String::with_capacity(html.len() + block.len());
    out.push_str(&html[..at]);
    out.push_str(block);
    out.push_str(&html[at..]);
    out
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

/// Byte offset just past the `>` closing the first `tag` opening.
fn end_of_open_tag(html: &str, tag: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(rel) = lower[from..].find(tag) {
        let start = from + rel;
        let after = start + tag.len();
        // `<html` must not match `<htmlfoo`
        match lower.as_bytes().get(after) {
            Some(b'>' | b' ' | b'\t' | b'\n' | b'\r' | b'/') => {
                return lower[after..].find('>').map(|close| after + close + 1);
            }
            _ => from = after,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_before_closing_head() {
        let html = "<html><head><title>Hero</title></head><body><h1>Hi</h1></body></html>";
        let out = inject_style_block(html, "<style>x</style>");

        assert_eq!(
            out,
            "<html><head><title>Hero</title><style>x</style></head><body><h1>Hi</h1></body></html>"
        );
    }

    #[test]
    fn closing_head_match_ignores_case() {
        let out = inject_style_block("<HEAD></HEAD><p>x</p>", "[S]");
        assert_eq!(out, "<HEAD>[S]</HEAD><p>x</p>");
    }

    #[test]
    fn falls_back_to_after_html_or_body_tag() {
        assert_eq!(
            inject_style_block("<html lang=\"en\"><p>x</p></html>", "[S]"),
            "<html lang=\"en\">[S]<p>x</p></html>"
        );
        assert_eq!(
            inject_style_block("<Body class=\"hero\"><p>x</p></Body>", "[S]"),
            "<Body class=\"hero\">[S]<p>x</p></Body>"
        );
    }

    #[test]
    fn bare_fragment_gets_block_prepended() {
        assert_eq!(inject_style_block("<section>hero</section>", "[S]"), "[S]<section>hero</section>");
        assert_eq!(inject_style_block("", "[S]"), "[S]");
    }

    #[test]
    fn similar_tag_names_are_not_matched() {
        assert_eq!(inject_style_block("<htmlish>x</htmlish>", "[S]"), "[S]<htmlish>x</htmlish>");
    }

    #[test]
    fn style_block_references_font() {
        let block = hero_style_block();
        assert!(block.contains(HERO_FONT_STYLESHEET));
        assert!(block.contains("font-family:'Inter'"));
        assert!(block.ends_with("</style>"));
    }
}
