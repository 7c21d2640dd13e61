use crate::results::{ErrorPhase, ErrorRecord, InteractionLog};
use std::collections::HashSet;

/// Pagination depth cap per scrape, seed URL included
pub const MAX_PAGES: usize = 3;

/// Mutable state accumulated over one scrape invocation.
///
/// Threaded by `&mut` through the strategies so that interaction records and
/// non-fatal errors collected anywhere end up in the final envelope. Created
/// at scrape start and consumed into the envelope at the end; never shared
/// across scrapes.
#[derive(Debug, Default)]
pub struct ScrapeSession {
    /// Absolute URLs visited during the rendered session, seed included.
    /// Bounds pagination depth and prevents revisiting.
    pub visited: HashSet<String>,

    /// Clicks, scrolls and pages recorded during rendering
    pub interactions: InteractionLog,

    /// Non-fatal failures, append-only
    pub errors: Vec<ErrorRecord>,
}

impl ScrapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal failure; never aborts anything.
    pub fn record_error(&mut self, message: impl Into<String>, phase: ErrorPhase) {
        let record = ErrorRecord::new(message, phase);
        ::log::warn!("scrape error ({:?}): {}", record.phase, record.message);
        self.errors.push(record);
    }

    /// Mark a URL as visited and log it as a page, keeping the two in step.
    pub fn record_page(&mut self, url: &str) {
        self.visited.insert(url.to_string());
        self.interactions.pages.push(url.to_string());
    }

    /// Whether a pagination candidate may still be visited: not seen before
    /// and under the depth cap.
    pub fn admits_page(&self, url: &str) -> bool {
        !self.visited.contains(url) && self.visited.len() < MAX_PAGES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_page_tracks_visited_and_log_together() {
        let mut session = ScrapeSession::new();
        session.record_page("https://a.test/");
        session.record_page("https://a.test/page2");

        assert_eq!(session.visited.len(), 2);
        assert_eq!(
            session.interactions.pages,
            vec!["https://a.test/", "https://a.test/page2"]
        );
        assert!(session.visited.contains("https://a.test/page2"));
    }

    #[test]
    fn test_page_admission_rejects_duplicates_and_caps_depth() {
        let mut session = ScrapeSession::new();
        session.record_page("https://a.test/");
        // Already visited: never admitted again
        assert!(!session.admits_page("https://a.test/"));
        // Fresh URL under the cap
        assert!(session.admits_page("https://a.test/p2"));

        session.record_page("https://a.test/p2");
        session.record_page("https://a.test/p3");
        // Depth cap reached: nothing further is admitted, so the log can
        // never record more than 3 pages
        assert!(!session.admits_page("https://a.test/p4"));
        assert_eq!(session.interactions.pages.len(), MAX_PAGES);
    }

    #[test]
    fn test_record_error_appends_only() {
        let mut session = ScrapeSession::new();
        session.record_error("first", ErrorPhase::Fetch);
        session.record_error("second", ErrorPhase::Scroll);

        assert_eq!(session.errors.len(), 2);
        assert_eq!(session.errors[0].message, "first");
        assert_eq!(session.errors[1].phase, ErrorPhase::Scroll);
    }
}
