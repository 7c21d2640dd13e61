pub mod content;
pub mod meta;
pub mod segment;

#[cfg(test)]
mod tests;

use crate::results::{Meta, Section};
use crate::utils::char_len;
use scraper::Html;

/// One pure extraction pass over raw markup: metadata plus the ordered,
/// bounded section list. Shared by the static and rendered strategies so
/// both produce identical shapes from the same DOM.
pub fn extract(html: &str, source_url: &str) -> (Meta, Vec<Section>) {
    let doc = Html::parse_document(html);
    let meta = meta::extract_meta(&doc);
    let sections: Vec<Section> = segment::segment_regions(&doc)
        .into_iter()
        .enumerate()
        .map(|(ordinal, region)| content::build_section(region, source_url, ordinal))
        .collect();

    ::log::debug!(
        "extracted {} sections from {} ({} chars of markup)",
        sections.len(),
        source_url,
        html.len()
    );
    (meta, sections)
}

/// Aggregate character count of extracted section text. Drives the decision
/// to escalate from the static fetch to the render path.
pub fn content_volume(sections: &[Section]) -> usize {
    sections.iter().map(|s| char_len(&s.content.text)).sum()
}
