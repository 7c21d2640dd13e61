use scraper::{ElementRef, Html, Selector};

/// Class/id substrings marking non-content chrome (cookie notices, modals,
/// banners). Matched case-insensitively against a region's serialized markup.
pub const DENYLIST: &[&str] = &["cookie", "banner", "modal", "popup", "overlay"];

/// Landmark elements used as natural content boundaries, checked first
const LANDMARK_SELECTOR: &str = "header, nav, main, section, footer, article";

/// Returns true when the element's serialized markup carries a denylist signal
pub fn is_denylisted(element: &ElementRef) -> bool {
    let markup = element.html().to_lowercase();
    DENYLIST.iter().any(|signal| markup.contains(signal))
}

/// Partitions a document into an ordered list of raw DOM regions.
///
/// Three-tier fallback, stopping at the first tier that yields at least one
/// region after denylist exclusion:
/// 1. landmark elements in document order
/// 2. parents of h1-h3 headings (one region per heading, duplicates kept)
/// 3. the single `<body>` element
pub fn segment_regions(doc: &Html) -> Vec<ElementRef<'_>> {
    let landmark_selector = Selector::parse(LANDMARK_SELECTOR).unwrap();
    let landmarks: Vec<ElementRef> = doc
        .select(&landmark_selector)
        .filter(|el| !is_denylisted(el))
        .collect();
    if !landmarks.is_empty() {
        ::log::debug!("segmented {} landmark regions", landmarks.len());
        return landmarks;
    }

    // No usable landmarks: fall back to heading parents. Two headings that
    // share a parent each contribute a region; they are not merged.
    let heading_selector = Selector::parse("h1, h2, h3").unwrap();
    let mut regions = Vec::new();
    for heading in doc.select(&heading_selector) {
        if let Some(parent) = heading.parent().and_then(ElementRef::wrap) {
            if !is_denylisted(&parent) {
                regions.push(parent);
            }
        }
    }
    if !regions.is_empty() {
        ::log::debug!("segmented {} heading-parent regions", regions.len());
        return regions;
    }

    // Last resort: the whole body as one region
    let body_selector = Selector::parse("body").unwrap();
    doc.select(&body_selector).take(1).collect()
}
