use crate::config::ScrapeConfig;
use std::time::Duration;
use thiserror::Error;

/// Failure of the static HTTP tier; never fatal to the scrape
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fetches raw markup with a single HTTP GET. One attempt, no retries;
/// non-2xx statuses and transport failures both surface as `FetchError`.
pub async fn fetch_static(url: &str, config: &ScrapeConfig) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    ::log::debug!("static fetch of {} returned {} bytes", url, body.len());
    Ok(body)
}
