use pulldown_cmark::{html, Options, Parser};

/// Renders a release body written in GitHub-flavoured Markdown to HTML that is
/// safe to embed in a feed reader.
///
/// Raw HTML inside the Markdown survives rendering and is only made safe by
/// the cleaning step, so script elements and event handlers are removed
/// entirely rather than escaped.
pub fn render_body(body: Option<&str>) -> String {
    let Some(markdown) = body else {
        return String::new();
    };

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, Parser::new_ext(markdown, options));

    ammonia::Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .clean(&rendered)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_renders_empty() {
        assert_eq!(render_body(None), "");
    }

    #[test]
    fn empty_body_renders_empty() {
        assert_eq!(render_body(Some("")), "");
    }

    #[test]
    fn bold_is_kept() {
        let html = render_body(Some("**bold**"));

        assert!(html.contains("<strong>bold</strong>"), "{html}");
    }

    #[test]
    fn script_element_is_removed() {
        let html = render_body(Some("before\n\n<script>alert(1)</script>\n\nafter"));

        assert!(!html.contains("<script"), "{html}");
        assert!(!html.contains("alert(1)"), "{html}");
        assert!(html.contains("before"), "{html}");
        assert!(html.contains("after"), "{html}");
    }

    #[test]
    fn event_handler_attribute_is_removed() {
        let html = render_body(Some("<img src=\"logo.png\" onerror=\"alert(1)\">"));

        assert!(html.contains("<img"), "{html}");
        assert!(html.contains("logo.png"), "{html}");
        assert!(!html.contains("onerror"), "{html}");
    }

    #[test]
    fn javascript_links_lose_their_target() {
        let html = render_body(Some("[click](javascript:alert(1))"));

        assert!(html.contains("click"), "{html}");
        assert!(!html.contains("javascript:"), "{html}");
    }

    #[test]
    fn formatting_survives() {
        let html = render_body(Some(
            "# Changes\n\n* ~~old~~ *new*\n\n```rust\nfn main() {}\n```\n\n[docs](https://docs.rs)",
        ));

        assert!(html.contains("<h1>Changes</h1>"), "{html}");
        assert!(html.contains("<ul>"), "{html}");
        assert!(html.contains("<del>old</del>"), "{html}");
        assert!(html.contains("<em>new</em>"), "{html}");
        assert!(html.contains("<pre>"), "{html}");
        assert!(html.contains("fn main() {}"), "{html}");
        assert!(html.contains("href=\"https://docs.rs\""), "{html}");
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""), "{html}");
    }

    #[test]
    fn tables_render() {
        let html = render_body(Some("| a | b |\n|---|---|\n| 1 | 2 |"));

        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
    }
}
