//! Streaming HTML cleanup ahead of DOM parsing.
//!
//! Both extraction paths strip markup before building a DOM: the structured
//! parser removes scripts, hidden nodes and page chrome, the fallback scraper
//! removes a fixed list of non-content tags. Rewriting happens with
//! `lol_html`, so the removed subtrees never reach the tree builder.

use std::sync::LazyLock;

use regex::Regex;

/// Tags that never carry article prose.
pub const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg", "canvas", "template"];

static COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"));

static UNLIKELY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|social|newsletter)",
    )
    .expect("unlikely regex")
});

static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").expect("positive regex")
});

static HIDDEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("hidden regex")
});

/// Configuration for the structured parser's cleanup pass
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Tags removed together with their content
    pub strip_tags: Vec<String>,
    /// Whether to remove HTML comments
    pub remove_comments: bool,
    /// Whether to unwrap elements whose class/id looks like page chrome
    pub remove_unlikely: bool,
    /// Whether to remove elements hidden with inline styles
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            strip_tags: NOISE_TAGS.iter().map(|t| t.to_string()).collect(),
            remove_comments: true,
            remove_unlikely: true,
            remove_hidden: true,
        }
    }
}

/// Runs the configured cleanup steps in order.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let tags: Vec<&str> = config.strip_tags.iter().map(String::as_str).collect();
    let mut processed = strip_elements(html, &tags);

    if config.remove_comments {
        processed = COMMENT_PATTERN.replace_all(&processed, "").into_owned();
    }

    if config.remove_unlikely {
        processed = remove_unlikely_candidates(&processed);
    }

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    processed
}

/// Removes every element named in `tags`, content included.
///
/// On rewriter failure the input is returned unchanged.
pub fn strip_elements(html: &str, tags: &[&str]) -> String {
    if tags.is_empty() {
        return html.to_string();
    }

    let selector = tags.join(", ");
    rewrite(
        html,
        vec![lol_html::element!(selector, |el| {
            el.remove();
            Ok(())
        })],
    )
}

/// Unwraps elements whose id or class matches chrome patterns, keeping
/// their children so a mislabelled wrapper cannot swallow the article.
fn remove_unlikely_candidates(html: &str) -> String {
    rewrite(
        html,
        vec![lol_html::element!("*", |el| {
            let tag = el.tag_name();
            if matches!(tag.as_str(), "html" | "body" | "article" | "main" | "a") {
                return Ok(());
            }

            if let Some(id) = el.get_attribute("id")
                && UNLIKELY_PATTERN.is_match(&id)
                && !POSITIVE_PATTERN.is_match(&id)
            {
                el.remove_and_keep_content();
                return Ok(());
            }

            if let Some(class) = el.get_attribute("class")
                && class
                    .split_whitespace()
                    .any(|name| UNLIKELY_PATTERN.is_match(name) && !POSITIVE_PATTERN.is_match(name))
            {
                el.remove_and_keep_content();
            }

            Ok(())
        })],
    )
}

/// Removes elements with display:none or visibility:hidden styles
fn remove_hidden_elements(html: &str) -> String {
    rewrite(
        html,
        vec![lol_html::element!("[style]", |el| {
            if let Some(style) = el.get_attribute("style")
                && HIDDEN_PATTERN.is_match(&style)
            {
                el.remove();
            }
            Ok(())
        })],
    )
}

fn rewrite<'h>(
    html: &str, handlers: Vec<(std::borrow::Cow<'h, lol_html::Selector>, lol_html::ElementContentHandlers<'h>)>,
) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        tracing::debug!("html rewriter failed, keeping original markup");
        return html.to_string();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_elements() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <nav>Home | World</nav>
                    <article><p>Content</p><figure><img src="a.jpg"><figcaption>Caption</figcaption></figure></article>
                    <aside>Related</aside>
                    <footer>Copyright</footer>
                </body>
            </html>
        "#;

        let result = strip_elements(html, &["script", "style", "nav", "footer", "aside", "figure"]);
        assert!(!result.contains("alert"));
        assert!(!result.contains("color:red"));
        assert!(!result.contains("Home | World"));
        assert!(!result.contains("Caption"));
        assert!(!result.contains("Related"));
        assert!(!result.contains("Copyright"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_strip_elements_everything_removed() {
        let html = "<aside><p>Related</p></aside><footer><p>Copyright</p></footer>";
        assert_eq!(strip_elements(html, &["aside", "footer"]), "");
    }

    #[test]
    fn test_strip_elements_empty_list() {
        let html = "<p>unchanged</p>";
        assert_eq!(strip_elements(html, &[]), html);
    }

    #[test]
    fn test_remove_unlikely_candidates() {
        let html = r#"
            <html>
                <body>
                    <div id="sidebar"><span>Sidebar content</span></div>
                    <div id="main-content">Main content</div>
                    <div class="banner-ad">Ad</div>
                    <div class="article-body">Article content</div>
                </body>
            </html>
        "#;

        let result = remove_unlikely_candidates(html);
        assert!(!result.contains("id=\"sidebar\""));
        assert!(!result.contains("banner-ad"));
        assert!(result.contains("Sidebar content"));
        assert!(result.contains("main-content"));
        assert!(result.contains("article-body"));
    }

    #[test]
    fn test_remove_hidden_elements() {
        let html = r#"
            <div style="display:none">Hidden content</div>
            <div style="visibility: hidden">Invisible content</div>
            <div style="color: red">Visible content</div>
        "#;

        let result = remove_hidden_elements(html);
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_preprocess_full_pipeline() {
        let html = r#"
            <html>
            <head><script>console.log('x');</script><!-- note --></head>
            <body>
                <div class="menu"><p>Menu</p></div>
                <div id="story" class="article">
                    <p style="display:none">Hidden</p>
                    <p>Content</p>
                </div>
            </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("<script"));
        assert!(!result.contains("<!--"));
        assert!(!result.contains("class=\"menu\""));
        assert!(!result.contains("Hidden"));
        assert!(result.contains("Content"));
        assert!(result.contains("id=\"story\""));
    }
}
