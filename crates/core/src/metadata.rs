use std::collections::BTreeSet;

use crate::parse::{Document, Element};

/// Page-level metadata read by the structured parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    /// Keywords declared by the page itself (`<meta name="keywords">`)
    pub meta_keywords: Vec<String>,
    /// Absolute URLs of lead images declared in the head
    pub images: BTreeSet<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. Meta `title` / `DC.title`
    /// 5. `<title>` element
    /// 6. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(headline) = json_ld.get("headline")
            && let Some(value) = headline.as_str()
            && !value.trim().is_empty()
        {
            return Some(value.trim().to_string());
        }

        for name in ["og:title", "twitter:title", "title", "DC.title"] {
            if let Some(title) = self.get_meta_content(name) {
                return Some(title);
            }
        }

        if let Some(title) = self.title() {
            return Some(title);
        }

        if let Ok(Some(h1)) = self.select_first("h1") {
            let text = h1.normalized_text();
            if !text.is_empty() {
                return Some(text);
            }
        }

        None
    }

    /// Comma-separated `<meta name="keywords">` values, lowercased.
    pub fn extract_meta_keywords(&self) -> Vec<String> {
        self.get_meta_content("keywords")
            .map(|content| {
                content
                    .split(',')
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lead images declared in the head:
    /// 1. Open Graph `og:image`
    /// 2. Twitter `twitter:image`
    /// 3. `<link rel="image_src">`
    ///
    /// Relative sources are resolved against the document URL; ones that
    /// cannot be made absolute are dropped.
    pub fn extract_head_images(&self) -> BTreeSet<String> {
        let mut images = BTreeSet::new();

        for name in ["og:image", "twitter:image", "twitter:image:src"] {
            if let Some(src) = self.get_meta_content(name) {
                self.insert_resolved(&mut images, &src);
            }
        }

        if let Ok(links) = self.select("link[rel=\"image_src\"]") {
            for link in links {
                if let Some(href) = link.attr("href") {
                    self.insert_resolved(&mut images, href);
                }
            }
        }

        images
    }

    /// `<img>` sources inside `container`, resolved like head images.
    ///
    /// `data:` URIs are skipped.
    pub fn extract_content_images(&self, container: &Element<'_>) -> BTreeSet<String> {
        let mut images = BTreeSet::new();

        if let Ok(imgs) = container.select("img") {
            for img in imgs {
                let src = img.attr("src").or_else(|| img.attr("data-src"));
                if let Some(src) = src
                    && !src.trim_start().starts_with("data:")
                {
                    self.insert_resolved(&mut images, src);
                }
            }
        }

        images
    }

    /// Extract all head metadata at once
    pub fn extract_metadata(&self) -> Metadata {
        Metadata {
            title: self.extract_title(),
            meta_keywords: self.extract_meta_keywords(),
            images: self.extract_head_images(),
        }
    }

    fn insert_resolved(&self, images: &mut BTreeSet<String>, src: &str) {
        let src = src.trim();
        if src.is_empty() {
            return;
        }
        if let Some(url) = self.resolve(src)
            && matches!(url.scheme(), "http" | "https")
        {
            images.insert(url.to_string());
        }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        for key in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", key, attr);
            if let Ok(Some(el)) = self.select_first(&selector)
                && let Some(content) = el.attr("content")
                && !content.trim().is_empty()
            {
                return Some(content.trim().to_string());
            }
        }

        None
    }

    /// Extract and parse JSON-LD from script tags
    fn extract_json_ld(&self) -> Option<serde_json::Value> {
        let elements = self.select("script[type=\"application/ld+json\"]").ok()?;
        elements.iter().find_map(|el| {
            let value = serde_json::from_str::<serde_json::Value>(el.text().trim()).ok()?;
            match value {
                serde_json::Value::Array(items) => items.into_iter().find(|item| item.get("headline").is_some()),
                other => Some(other),
            }
        })
    }
}
