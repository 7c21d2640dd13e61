use crate::extract::meta::extract_meta;
use scraper::Html;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_title_element() {
        let doc = Html::parse_document(
            r#"<html><head><title>  My   Page </title>
            <meta property="og:title" content="OG Title"></head><body></body></html>"#,
        );
        let meta = extract_meta(&doc);
        // <title> wins over og:title, whitespace collapsed
        assert_eq!(meta.title, "My Page");
    }

    #[test]
    fn test_title_falls_back_to_og_title() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content="OG Title"></head><body></body></html>"#,
        );
        let meta = extract_meta(&doc);
        assert_eq!(meta.title, "OG Title");
    }

    #[test]
    fn test_description_fallback_order() {
        let doc = Html::parse_document(
            r#"<html><head>
            <meta name="description" content="Plain description">
            <meta property="og:description" content="OG description">
            </head><body></body></html>"#,
        );
        assert_eq!(extract_meta(&doc).description, "Plain description");

        let doc = Html::parse_document(
            r#"<html><head><meta property="og:description" content="OG description"></head><body></body></html>"#,
        );
        assert_eq!(extract_meta(&doc).description, "OG description");
    }

    #[test]
    fn test_language_truncated_to_two_chars() {
        let doc = Html::parse_document(r#"<html lang="en-US"><body></body></html>"#);
        assert_eq!(extract_meta(&doc).language, "en");

        let doc = Html::parse_document(r#"<html lang="fr"><body></body></html>"#);
        assert_eq!(extract_meta(&doc).language, "fr");
    }

    #[test]
    fn test_language_defaults_to_en() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_meta(&doc).language, "en");
    }

    #[test]
    fn test_canonical_passthrough() {
        let doc = Html::parse_document(
            r#"<html><head><link rel="canonical" href="https://example.com/page"></head><body></body></html>"#,
        );
        assert_eq!(
            extract_meta(&doc).canonical,
            Some("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_absent_fields_keep_defaults() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let meta = extract_meta(&doc);
        assert_eq!(meta.title, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.language, "en");
        assert_eq!(meta.canonical, None);
    }
}
