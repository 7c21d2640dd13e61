use crate::results::{Image, Link, Section, SectionContent, SectionType};
use crate::utils::{char_len, collapse_whitespace, resolve_url, truncate_chars};
use scraper::{ElementRef, Selector};

/// Hard caps on section content; every field is clamped, never a suggestion
const MAX_HEADINGS: usize = 10;
const MAX_TEXT_CHARS: usize = 5000;
const MAX_TEXT_FRAGMENTS: usize = 10;
const MAX_LINKS: usize = 50;
const MAX_LINK_TEXT_CHARS: usize = 100;
const MAX_IMAGES: usize = 20;
const MAX_LISTS: usize = 10;
const MAX_TABLES: usize = 5;
const MAX_LABEL_CHARS: usize = 100;
const MAX_RAW_HTML_CHARS: usize = 5000;

/// Minimum trimmed length for a paragraph fragment to count as text
const MIN_PARAGRAPH_CHARS: usize = 10;
/// Minimum trimmed length for a div/span fragment used as a supplement
const MIN_FALLBACK_CHARS: usize = 20;

/// Builds one typed, bounded section from a raw DOM region.
pub fn build_section(region: ElementRef, source_url: &str, ordinal: usize) -> Section {
    let section_type = classify(&region);
    let content = extract_content(&region, source_url);
    let label = derive_label(&content);
    let (raw_html, truncated) = snapshot_markup(&region);

    Section {
        id: format!("{}-{}", section_type, ordinal),
        section_type,
        label,
        source_url: source_url.to_string(),
        content,
        raw_html,
        truncated,
    }
}

/// Assigns a semantic type from the region's tag, then lets class signals
/// override it. The overrides are checked in order hero, faq, pricing with
/// the last match winning when several substrings co-occur.
fn classify(region: &ElementRef) -> SectionType {
    let mut section_type = match region.value().name() {
        "header" | "nav" => SectionType::Nav,
        "footer" => SectionType::Footer,
        "section" | "article" | "main" => SectionType::Section,
        _ => SectionType::Unknown,
    };

    let class_attr = region.value().attr("class").unwrap_or("").to_lowercase();
    if class_attr.contains("hero") {
        section_type = SectionType::Hero;
    }
    if class_attr.contains("faq") {
        section_type = SectionType::Faq;
    }
    if class_attr.contains("pricing") {
        section_type = SectionType::Pricing;
    }
    section_type
}

fn extract_content(region: &ElementRef, source_url: &str) -> SectionContent {
    SectionContent {
        headings: extract_headings(region),
        text: extract_text(region),
        links: extract_links(region, source_url),
        images: extract_images(region, source_url),
        lists: extract_lists(region),
        tables: extract_tables(region),
    }
}

fn extract_headings(region: &ElementRef) -> Vec<String> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let mut headings: Vec<String> = region
        .select(&selector)
        .map(|h| collapse_whitespace(&h.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();
    headings.truncate(MAX_HEADINGS);
    headings
}

/// Paragraph texts first; when the page barely uses `<p>`, div/span texts
/// fill in. The first 10 fragments are space-joined and capped at 5000 chars.
fn extract_text(region: &ElementRef) -> String {
    let p_selector = Selector::parse("p").unwrap();
    let mut fragments: Vec<String> = region
        .select(&p_selector)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|text| char_len(text) > MIN_PARAGRAPH_CHARS)
        .collect();

    if fragments.len() < 2 {
        let div_selector = Selector::parse("div, span").unwrap();
        for el in region.select(&div_selector) {
            let text = collapse_whitespace(&el.text().collect::<String>());
            if char_len(&text) > MIN_FALLBACK_CHARS && !fragments.contains(&text) {
                fragments.push(text);
            }
        }
    }

    fragments.truncate(MAX_TEXT_FRAGMENTS);
    truncate_chars(&fragments.join(" "), MAX_TEXT_CHARS)
}

fn extract_links(region: &ElementRef, source_url: &str) -> Vec<Link> {
    let selector = Selector::parse("a").unwrap();
    let mut links = Vec::new();
    for anchor in region.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        let text = collapse_whitespace(&anchor.text().collect::<String>());
        if text.is_empty() {
            continue;
        }
        let Some(absolute) = resolve_url(source_url, href) else {
            continue;
        };
        links.push(Link {
            text: truncate_chars(&text, MAX_LINK_TEXT_CHARS),
            href: absolute,
        });
        if links.len() == MAX_LINKS {
            break;
        }
    }
    links
}

fn extract_images(region: &ElementRef, source_url: &str) -> Vec<Image> {
    let selector = Selector::parse("img").unwrap();
    let mut images = Vec::new();
    for img in region.select(&selector) {
        // src wins over data-src (lazy-load markup); empty values don't count
        let src = img
            .value()
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| img.value().attr("data-src").filter(|s| !s.is_empty()));
        let Some(src) = src else {
            continue;
        };
        let Some(absolute) = resolve_url(source_url, src) else {
            continue;
        };
        images.push(Image {
            src: absolute,
            alt: img.value().attr("alt").unwrap_or("").to_string(),
        });
        if images.len() == MAX_IMAGES {
            break;
        }
    }
    images
}

fn extract_lists(region: &ElementRef) -> Vec<Vec<String>> {
    let list_selector = Selector::parse("ul, ol").unwrap();
    let item_selector = Selector::parse("li").unwrap();
    let mut lists = Vec::new();
    for list in region.select(&list_selector) {
        let items: Vec<String> = list
            .select(&item_selector)
            .map(|li| collapse_whitespace(&li.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            lists.push(items);
        }
        if lists.len() == MAX_LISTS {
            break;
        }
    }
    lists
}

fn extract_tables(region: &ElementRef) -> Vec<Vec<Vec<String>>> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();
    let mut tables = Vec::new();
    for table in region.select(&table_selector) {
        let mut rows = Vec::new();
        for tr in table.select(&row_selector) {
            // Empty cell text still counts as a cell; only cell-less rows drop
            let cells: Vec<String> = tr
                .select(&cell_selector)
                .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                .collect();
            if !cells.is_empty() {
                rows.push(cells);
            }
        }
        if !rows.is_empty() {
            tables.push(rows);
        }
        if tables.len() == MAX_TABLES {
            break;
        }
    }
    tables
}

/// First heading (cut to 50 chars), else the first 7 words of the text,
/// else the literal "Section". Always at most 100 chars.
fn derive_label(content: &SectionContent) -> String {
    let label = if let Some(first) = content.headings.first() {
        truncate_chars(first, 50)
    } else if !content.text.is_empty() {
        content
            .text
            .split_whitespace()
            .take(7)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        "Section".to_string()
    };
    truncate_chars(&label, MAX_LABEL_CHARS)
}

/// Serialized region markup, cut at 5000 chars with a marker when oversized
fn snapshot_markup(region: &ElementRef) -> (String, bool) {
    let markup = region.html();
    if char_len(&markup) > MAX_RAW_HTML_CHARS {
        let mut cut = truncate_chars(&markup, MAX_RAW_HTML_CHARS);
        cut.push_str("...");
        (cut, true)
    } else {
        (markup, false)
    }
}
