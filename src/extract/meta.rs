use crate::results::Meta;
use crate::utils::{collapse_whitespace, truncate_chars};
use scraper::{Html, Selector};

/// Extracts page-level metadata. Never fails; absent fields keep their
/// defaults (empty strings, language "en", no canonical).
pub fn extract_meta(doc: &Html) -> Meta {
    let mut meta = Meta::default();

    // Title: <title> text, falling back to og:title
    let title_selector = Selector::parse("title").unwrap();
    if let Some(title) = doc.select(&title_selector).next() {
        meta.title = collapse_whitespace(&title.text().collect::<String>());
    } else {
        let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
        if let Some(el) = doc.select(&og_title).next() {
            meta.title = el.value().attr("content").unwrap_or("").to_string();
        }
    }

    // Description: meta[name=description], falling back to og:description
    let desc_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    if let Some(el) = doc.select(&desc_selector).next() {
        meta.description = el.value().attr("content").unwrap_or("").to_string();
    } else {
        let og_desc = Selector::parse(r#"meta[property="og:description"]"#).unwrap();
        if let Some(el) = doc.select(&og_desc).next() {
            meta.description = el.value().attr("content").unwrap_or("").to_string();
        }
    }

    // Language: first two chars of html[lang], default "en"
    let html_selector = Selector::parse("html").unwrap();
    if let Some(el) = doc.select(&html_selector).next() {
        if let Some(lang) = el.value().attr("lang") {
            if !lang.is_empty() {
                meta.language = truncate_chars(lang, 2);
            }
        }
    }

    // Canonical: link[rel=canonical] href, absent otherwise
    let canonical_selector = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    if let Some(el) = doc.select(&canonical_selector).next() {
        meta.canonical = el.value().attr("href").map(|h| h.to_string());
    }

    meta
}
