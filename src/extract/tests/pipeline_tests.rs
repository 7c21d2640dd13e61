use crate::extract::{content_volume, extract};
use crate::results::SectionType;

const SOURCE: &str = "https://example.test/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_page_goes_through_heading_tier() {
        // No landmarks: the heading's parent (body) becomes the one region
        let html = "<html><body><h1>Welcome</h1>\
                    <p>Short text under five hundred chars total.</p></body></html>";
        let (_, sections) = extract(html, SOURCE);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Unknown);
        assert_eq!(sections[0].id, "unknown-0");
        assert_eq!(sections[0].label, "Welcome");
        // Thin content: would force escalation to the render path
        assert!(content_volume(&sections) < 500);
    }

    #[test]
    fn test_ordinals_dense_across_mixed_types() {
        let html = r#"<html><body>
            <header><a href="/">Home</a></header>
            <section class="hero"><h1>Big claim</h1><p>Hero copy that sells the thing.</p></section>
            <footer><p>Footer fine print text.</p></footer>
            </body></html>"#;
        let (_, sections) = extract(html, SOURCE);

        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["nav-0", "hero-1", "footer-2"]);
    }

    #[test]
    fn test_section_ids_unique() {
        let html = r#"<html><body>
            <section><p>First block of page text.</p></section>
            <section><p>Second block of page text.</p></section>
            <section><p>Third block of page text.</p></section>
            </body></html>"#;
        let (_, sections) = extract(html, SOURCE);

        let mut ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sections.len());
    }

    #[test]
    fn test_cookie_chrome_excluded_next_to_real_landmark() {
        let html = r#"<html><body>
            <div class="cookie-banner"><h2>Accept cookies</h2></div>
            <main><h1>Actual page</h1><p>Meaningful content lives here.</p></main>
            </body></html>"#;
        let (_, sections) = extract(html, SOURCE);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Actual page");
        assert!(!sections[0].raw_html.contains("Accept cookies"));
    }

    #[test]
    fn test_meta_and_sections_from_one_pass() {
        let html = r#"<html lang="de"><head><title>Seite</title></head><body>
            <main><h1>Hallo</h1><p>Ein Absatz mit etwas Text darin.</p></main>
            </body></html>"#;
        let (meta, sections) = extract(html, SOURCE);

        assert_eq!(meta.title, "Seite");
        assert_eq!(meta.language, "de");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.headings, vec!["Hallo"]);
    }

    #[test]
    fn test_content_volume_sums_all_sections() {
        let html = r#"<html><body>
            <section><p>aaaaaaaaaaaaaaaaaaaa</p></section>
            <section><p>bbbbbbbbbbbbbbbbbbbb</p></section>
            </body></html>"#;
        let (_, sections) = extract(html, SOURCE);

        assert_eq!(sections.len(), 2);
        assert_eq!(content_volume(&sections), 40);
    }

    #[test]
    fn test_unparseable_input_yields_body_section() {
        // The parser recovers from garbage; extraction still emits one
        // (empty-ish) body-tier section rather than nothing
        let (_, sections) = extract("<<<>>>", SOURCE);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Unknown);
    }
}
