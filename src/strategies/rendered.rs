use crate::config::ScrapeConfig;
use crate::results::ErrorPhase;
use crate::session::{MAX_PAGES, ScrapeSession};
use crate::utils::resolve_url;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};

/// Elements that look like tab controls; the first one gets activated
const TAB_SELECTOR: &str = r#"[role="tab"], .tab, [class*="tab"]"#;

/// Identifier recorded when a tab click succeeds
const TAB_CLICK_ID: &str = r#"[role="tab"] or .tab"#;

/// Selector patterns for "load more"-style expanders, tried in order.
/// At most one of these is ever activated per scrape.
const LOAD_MORE_PATTERNS: &[(&str, Locator<'static>)] = &[
    (
        r#"button:has-text("Load more")"#,
        Locator::XPath("//button[contains(., 'Load more')]"),
    ),
    (
        r#"button:has-text("Show more")"#,
        Locator::XPath("//button[contains(., 'Show more')]"),
    ),
    (
        r#"a:has-text("Load more")"#,
        Locator::XPath("//a[contains(., 'Load more')]"),
    ),
    (
        r#"[class*="load-more"]"#,
        Locator::Css(r#"[class*="load-more"]"#),
    ),
    (
        r#"[class*="show-more"]"#,
        Locator::Css(r#"[class*="show-more"]"#),
    ),
];

/// Selector patterns for next-page links, tried in order
const NEXT_PAGE_PATTERNS: &[(&str, Locator<'static>)] = &[
    (
        r#"a:has-text("Next")"#,
        Locator::XPath("//a[contains(text(), 'Next')]"),
    ),
    (
        r#"a:has-text("next")"#,
        Locator::XPath("//a[contains(text(), 'next')]"),
    ),
    (r#"[class*="next"]"#, Locator::Css(r#"[class*="next"]"#)),
    (
        r#"[class*="pagination"] a:last-child"#,
        Locator::Css(r#"[class*="pagination"] a:last-child"#),
    ),
];

/// Scroll-to-bottom cap per scrape
const MAX_SCROLLS: u32 = 3;
/// Timeout for each individual click so one stuck selector cannot stall
/// the whole session
const CLICK_TIMEOUT: Duration = Duration::from_secs(5);

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const DOCUMENT_HEIGHT: &str = "return document.body.scrollHeight;";

/// Failure that aborts the whole render path. Interaction and scroll
/// failures never surface here; they are swallowed into the session's
/// error records instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("WebDriver session failed: {0}")]
    Session(#[from] NewSessionError),
    #[error("browser command failed: {0}")]
    Command(#[from] CmdError),
    #[error("navigation timed out after {0} seconds")]
    NavigationTimeout(u64),
}

/// Renders the seed URL in a browser, drives the interactions that reveal
/// script-loaded content, and returns the final markup. The browser session
/// is closed on every exit path before control returns to the caller.
pub async fn render_with_interactions(
    url: &str,
    config: &ScrapeConfig,
    session: &mut ScrapeSession,
) -> Result<String, RenderError> {
    let client = connect(config).await?;
    let result = drive(&client, url, config, session).await;
    if let Err(e) = client.close().await {
        ::log::warn!("failed to close browser session: {}", e);
    }
    result
}

/// Connects to the WebDriver instance, falling back to common alternative
/// ports when the configured URL is unreachable.
async fn connect(config: &ScrapeConfig) -> Result<Client, NewSessionError> {
    let first = connect_to(&config.webdriver_url, config).await;
    let err = match first {
        Ok(client) => return Ok(client),
        Err(e) => {
            ::log::error!(
                "failed to connect to WebDriver at {}: {}",
                config.webdriver_url,
                e
            );
            e
        }
    };

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444", // IP instead of localhost
    ];
    for url in fallback_urls {
        if url == config.webdriver_url {
            continue;
        }
        ::log::info!("trying fallback WebDriver URL: {}", url);
        if let Ok(client) = connect_to(url, config).await {
            return Ok(client);
        }
    }

    Err(err)
}

async fn connect_to(webdriver_url: &str, config: &ScrapeConfig) -> Result<Client, NewSessionError> {
    let mut capabilities = serde_json::map::Map::new();
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({
            "args": [
                "--headless=new",
                format!("--user-agent={}", config.user_agent),
            ]
        }),
    );

    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities);
    builder.connect(webdriver_url).await
}

/// The strictly sequential interaction sequence: navigate, settle, tabs,
/// load-more, scroll/pagination, engagement floor, snapshot.
async fn drive(
    client: &Client,
    url: &str,
    config: &ScrapeConfig,
    session: &mut ScrapeSession,
) -> Result<String, RenderError> {
    if let Err(e) = client.set_window_size(1920, 1080).await {
        ::log::debug!("could not size browser window: {}", e);
    }

    // Navigation failure is the one thing that aborts the render path
    match timeout(
        Duration::from_secs(config.navigation_timeout_secs),
        client.goto(url),
    )
    .await
    {
        Ok(nav) => nav?,
        Err(_) => return Err(RenderError::NavigationTimeout(config.navigation_timeout_secs)),
    }
    session.record_page(url);

    // Let script-driven rendering finish before touching anything
    sleep(Duration::from_millis(config.settle_ms)).await;

    activate_tabs(client, session).await;
    activate_load_more(client, session).await;
    expand_content(client, url, session).await;

    Ok(client.source().await?)
}

/// Clicks the first tab-like element, if any. Failure is silent; a page
/// without tabs is the common case, not an error.
async fn activate_tabs(client: &Client, session: &mut ScrapeSession) {
    let tabs = match client.find_all(Locator::Css(TAB_SELECTOR)).await {
        Ok(tabs) => tabs,
        Err(e) => {
            session.record_error(
                format!("tab lookup failed: {}", e),
                ErrorPhase::Interaction,
            );
            return;
        }
    };
    let Some(tab) = tabs.into_iter().next() else {
        return;
    };
    match timeout(CLICK_TIMEOUT, tab.click()).await {
        Ok(Ok(())) => {
            session.interactions.clicks.push(TAB_CLICK_ID.to_string());
            sleep(Duration::from_millis(1000)).await;
        }
        Ok(Err(e)) => ::log::debug!("tab click failed: {}", e),
        Err(_) => ::log::debug!("tab click timed out"),
    }
}

/// Tries the load-more patterns in order and activates the first that
/// clicks successfully, then stops. Per-pattern failures move on to the
/// next pattern.
async fn activate_load_more(client: &Client, session: &mut ScrapeSession) {
    for (name, locator) in LOAD_MORE_PATTERNS {
        let Ok(button) = client.find(*locator).await else {
            continue;
        };
        match timeout(CLICK_TIMEOUT, button.click()).await {
            Ok(Ok(())) => {
                ::log::info!("activated load-more via {}", name);
                session.interactions.clicks.push((*name).to_string());
                // Wait for the expanded content to arrive
                sleep(Duration::from_millis(2000)).await;
                return;
            }
            Ok(Err(e)) => ::log::debug!("load-more click via {} failed: {}", name, e),
            Err(_) => {
                session.record_error(
                    format!("load-more click via {} timed out", name),
                    ErrorPhase::Interaction,
                );
            }
        }
    }
}

/// Scroll-based lazy-load triggering with a single bounded pagination
/// attempt, then an engagement floor of up to 3 total scrolls.
async fn expand_content(client: &Client, seed_url: &str, session: &mut ScrapeSession) {
    if let Err(e) = scroll_and_paginate(client, seed_url, session).await {
        session.record_error(format!("scroll/pagination failed: {}", e), ErrorPhase::Scroll);
    }
}

async fn scroll_and_paginate(
    client: &Client,
    seed_url: &str,
    session: &mut ScrapeSession,
) -> Result<(), CmdError> {
    for iteration in 0..MAX_SCROLLS {
        client.execute(SCROLL_TO_BOTTOM, vec![]).await?;
        session.interactions.scrolls += 1;
        sleep(Duration::from_millis(2000)).await;

        let before = document_height(client).await?;
        sleep(Duration::from_millis(1000)).await;
        let after = document_height(client).await?;

        // No infinite-scroll growth on the first pass: try pagination once
        if before == after && iteration == 0 {
            follow_next_page(client, seed_url, session).await;
        }
    }

    // Engagement floor: short pages still get scrolled up to the cap
    if session.interactions.pages.len() < MAX_PAGES && session.interactions.scrolls < MAX_SCROLLS {
        for _ in 0..(MAX_SCROLLS - session.interactions.scrolls) {
            client.execute(SCROLL_TO_BOTTOM, vec![]).await?;
            session.interactions.scrolls += 1;
            sleep(Duration::from_millis(1500)).await;
        }
    }

    Ok(())
}

async fn document_height(client: &Client) -> Result<i64, CmdError> {
    let value = client.execute(DOCUMENT_HEIGHT, vec![]).await?;
    Ok(value.as_i64().unwrap_or(0))
}

/// Admission decision for a pagination candidate: the href must resolve to
/// an absolute URL against the seed and pass the session's visit policy
/// (unvisited, under the depth cap).
fn admit_next_page(seed_url: &str, href: &str, session: &ScrapeSession) -> Option<String> {
    let next_url = resolve_url(seed_url, href)?;
    if session.admits_page(&next_url) {
        Some(next_url)
    } else {
        None
    }
}

/// Follows the first workable next-page link: resolvable absolute href, not
/// yet visited, and fewer than 3 pages visited so far. Per-pattern failures
/// fall through to the next pattern.
async fn follow_next_page(client: &Client, seed_url: &str, session: &mut ScrapeSession) {
    for (name, locator) in NEXT_PAGE_PATTERNS {
        let Ok(link) = client.find(*locator).await else {
            continue;
        };
        let Ok(Some(href)) = link.attr("href").await else {
            continue;
        };
        let Some(next_url) = admit_next_page(seed_url, &href, session) else {
            continue;
        };

        match timeout(CLICK_TIMEOUT, link.click()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                ::log::debug!("next-page click via {} failed: {}", name, e);
                continue;
            }
            Err(_) => {
                session.record_error(
                    format!("next-page click via {} timed out", name),
                    ErrorPhase::Scroll,
                );
                continue;
            }
        }

        // Let the next document come up before recording the visit
        if let Err(e) = client
            .wait()
            .at_most(Duration::from_secs(10))
            .for_element(Locator::Css("body"))
            .await
        {
            ::log::debug!("next page never became ready: {}", e);
            continue;
        }

        ::log::info!("followed pagination to {}", next_url);
        session.record_page(&next_url);
        return;
    }
}
