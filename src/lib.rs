// Re-export modules
pub mod config;
pub mod extract;
pub mod results;
pub mod session;
pub mod strategies;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use results::{PageEnvelope, Section, SectionType};

use crate::results::{ErrorPhase, Meta};
use crate::session::ScrapeSession;

/// Builder for scraping one page into a structured envelope.
///
/// Tries a fast static fetch first, then escalates to a WebDriver-rendered
/// session when the static result is too thin or the fetch failed outright.
pub struct PageScraper {
    url: String,
    config: ScrapeConfig,
}

impl PageScraper {
    /// Create a scraper for the given URL with default configuration.
    /// The URL is assumed pre-validated as http/https by the caller.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: ScrapeConfig::default(),
        }
    }

    /// Apply a full configuration
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the WebDriver URL for the render path
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    /// Set the static fetch timeout in seconds
    pub fn with_fetch_timeout(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    /// Set the content-volume threshold below which rendering is attempted
    pub fn with_score_threshold(mut self, chars: usize) -> Self {
        self.config.score_threshold = chars;
        self
    }

    /// Scrape the page. Never fails outward: every internal failure degrades
    /// to partial content plus error records in the envelope, and the
    /// envelope always carries at least one section.
    pub async fn scrape(mut self) -> PageEnvelope {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        let scraped_at = chrono::Utc::now().to_rfc3339();
        let mut session = ScrapeSession::new();
        let mut meta = Meta::default();
        let mut sections = Vec::new();

        // Static tier: one plain GET, failure is non-fatal
        let static_ok = match strategies::static_fetch::fetch_static(&self.url, &self.config).await
        {
            Ok(html) => {
                let (static_meta, static_sections) = extract::extract(&html, &self.url);
                meta = static_meta;
                sections = static_sections;
                true
            }
            Err(e) => {
                session.record_error(format!("Static fetch failed: {}", e), ErrorPhase::Fetch);
                false
            }
        };

        // Escalate when the static result is thin or missing
        let score = extract::content_volume(&sections);
        if needs_render(static_ok, score, self.config.score_threshold) {
            if static_ok {
                ::log::info!(
                    "content volume {} below threshold {}, escalating to render path for {}",
                    score,
                    self.config.score_threshold,
                    self.url
                );
            } else {
                ::log::info!(
                    "static fetch failed, escalating to render path for {}",
                    self.url
                );
            }
            match strategies::rendered::render_with_interactions(
                &self.url,
                &self.config,
                &mut session,
            )
            .await
            {
                Ok(html) => {
                    let rendered = extract::extract(&html, &self.url);
                    merge_rendered(&mut meta, &mut sections, rendered, static_ok);
                }
                Err(e) => {
                    session.record_error(format!("Rendering failed: {}", e), ErrorPhase::Render);
                    // Keep whatever the static tier produced
                }
            }
        }

        // Guarantee non-empty output
        if sections.is_empty() {
            sections.push(Section::sentinel(&self.url));
        }

        PageEnvelope {
            url: self.url,
            scraped_at,
            meta,
            sections,
            interactions: session.interactions,
            errors: session.errors,
        }
    }
}

/// Whether the static result warrants escalating to the render path:
/// the fetch failed outright, or the extracted text is under the threshold.
fn needs_render(static_ok: bool, score: usize, threshold: usize) -> bool {
    !static_ok || score < threshold
}

/// Merges a successful rendered pass into the running result. The rendered
/// meta always wins; the rendered sections replace the static ones unless
/// rendering found nothing while the static tier had a usable result.
fn merge_rendered(
    meta: &mut Meta,
    sections: &mut Vec<Section>,
    rendered: (Meta, Vec<Section>),
    static_ok: bool,
) {
    let (rendered_meta, rendered_sections) = rendered;
    *meta = rendered_meta;
    if !static_ok || !rendered_sections.is_empty() {
        *sections = rendered_sections;
    }
}
