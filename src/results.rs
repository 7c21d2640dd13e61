use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of one scrape invocation: everything extracted from the page
/// plus a record of what happened along the way. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// The seed URL that was scraped
    pub url: String,

    /// RFC 3339 timestamp taken at the start of the scrape
    #[serde(rename = "scrapedAt")]
    pub scraped_at: String,

    /// Page-level metadata
    pub meta: Meta,

    /// Extracted sections, in document order; always at least one
    pub sections: Vec<Section>,

    /// Record of clicks, scrolls and pages visited during rendering
    pub interactions: InteractionLog,

    /// Non-fatal failures collected during the scrape
    pub errors: Vec<ErrorRecord>,
}

/// Page-level metadata, best-effort with fixed fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub title: String,
    pub description: String,
    /// Two-letter language code, "en" when the page does not declare one
    pub language: String,
    /// Canonical URL if the page declares one
    pub canonical: Option<String>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            language: "en".to_string(),
            canonical: None,
        }
    }
}

/// Semantic type assigned to a section from tag and class signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Nav,
    Footer,
    Section,
    Hero,
    Faq,
    Pricing,
    Unknown,
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Nav => "nav",
            SectionType::Footer => "footer",
            SectionType::Section => "section",
            SectionType::Hero => "hero",
            SectionType::Faq => "faq",
            SectionType::Pricing => "pricing",
            SectionType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// One bounded, typed chunk of extracted page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// "<type>-<ordinal>", ordinals dense and increasing in document order
    pub id: String,

    #[serde(rename = "type")]
    pub section_type: SectionType,

    /// Short label derived from the content, at most 100 chars
    pub label: String,

    /// URL the section was extracted from
    #[serde(rename = "sourceUrl")]
    pub source_url: String,

    pub content: SectionContent,

    /// Serialized region markup, at most 5000 chars plus a truncation marker
    #[serde(rename = "rawHtml")]
    pub raw_html: String,

    /// True iff the raw markup was cut at the 5000-char cap
    pub truncated: bool,
}

impl Section {
    /// The placeholder section substituted when no content could be extracted
    pub fn sentinel(source_url: &str) -> Self {
        Self {
            id: "empty-0".to_string(),
            section_type: SectionType::Unknown,
            label: "No content found".to_string(),
            source_url: source_url.to_string(),
            content: SectionContent::default(),
            raw_html: String::new(),
            truncated: false,
        }
    }
}

/// Typed content payload of a section; every field respects a hard cap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionContent {
    /// h1-h6 texts in document order, at most 10
    pub headings: Vec<String>,

    /// Space-joined paragraph fragments, at most 5000 chars
    pub text: String,

    /// At most 50 links, hrefs absolute
    pub links: Vec<Link>,

    /// At most 20 images, srcs absolute
    pub images: Vec<Image>,

    /// At most 10 lists of item texts
    pub lists: Vec<Vec<String>>,

    /// At most 5 tables of row-cell texts
    pub tables: Vec<Vec<Vec<String>>>,
}

/// A link with its text capped at 100 chars and an absolute href
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image with an absolute source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Record of the interactions performed during a rendered session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionLog {
    /// Selector identifiers that were actually clicked
    pub clicks: Vec<String>,

    /// Number of scroll-to-bottom actions performed
    pub scrolls: u32,

    /// Absolute URLs visited, the seed first; at most 3
    pub pages: Vec<String>,
}

/// Phase of the scrape during which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPhase {
    Fetch,
    Render,
    Interaction,
    Scroll,
}

/// A non-fatal failure, collected and surfaced rather than thrown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub phase: ErrorPhase,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, phase: ErrorPhase) -> Self {
        Self {
            message: message.into(),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_section_shape() {
        let section = Section::sentinel("https://example.test/");
        assert_eq!(section.id, "empty-0");
        assert_eq!(section.section_type, SectionType::Unknown);
        assert_eq!(section.label, "No content found");
        assert_eq!(section.raw_html, "");
        assert!(!section.truncated);
        assert!(section.content.headings.is_empty());
        assert!(section.content.text.is_empty());
    }

    #[test]
    fn test_section_serializes_with_wire_field_names() {
        let section = Section::sentinel("https://example.test/");
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "unknown");
        assert_eq!(json["sourceUrl"], "https://example.test/");
        assert_eq!(json["rawHtml"], "");
        assert_eq!(json["truncated"], false);
        assert!(json["content"]["tables"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_envelope_serializes_with_wire_field_names() {
        let envelope = PageEnvelope {
            url: "https://example.test/".to_string(),
            scraped_at: "2024-01-01T00:00:00+00:00".to_string(),
            meta: Meta::default(),
            sections: vec![Section::sentinel("https://example.test/")],
            interactions: InteractionLog::default(),
            errors: vec![ErrorRecord::new("Static fetch failed", ErrorPhase::Fetch)],
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["scrapedAt"], "2024-01-01T00:00:00+00:00");
        assert_eq!(json["meta"]["language"], "en");
        assert!(json["meta"]["canonical"].is_null());
        assert_eq!(json["interactions"]["scrolls"], 0);
        assert_eq!(json["errors"][0]["phase"], "fetch");
    }

    #[test]
    fn test_error_phase_serializes_lowercase() {
        for (phase, expected) in [
            (ErrorPhase::Fetch, "\"fetch\""),
            (ErrorPhase::Render, "\"render\""),
            (ErrorPhase::Interaction, "\"interaction\""),
            (ErrorPhase::Scroll, "\"scroll\""),
        ] {
            assert_eq!(serde_json::to_string(&phase).unwrap(), expected);
        }
    }

    #[test]
    fn test_section_type_display_matches_serialization() {
        for section_type in [
            SectionType::Nav,
            SectionType::Footer,
            SectionType::Section,
            SectionType::Hero,
            SectionType::Faq,
            SectionType::Pricing,
            SectionType::Unknown,
        ] {
            let serialized = serde_json::to_string(&section_type).unwrap();
            assert_eq!(serialized, format!("\"{}\"", section_type));
        }
    }
}
