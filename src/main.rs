use clap::Parser;
use distill_page::{PageScraper, ScrapeConfig};
use url::Url;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    // Scheme validation happens here at the boundary; the scraper itself
    // assumes a valid http/https URL
    match Url::parse(&args.url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => {
            eprintln!(
                "Only http and https URLs are supported (got scheme \"{}\")",
                parsed.scheme()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Invalid URL \"{}\": {}", args.url, e);
            std::process::exit(1);
        }
    }

    let mut config = match &args.config {
        Some(path) => match ScrapeConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ScrapeConfig::default(),
    };
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }
    if let Some(fetch_timeout) = args.fetch_timeout {
        config.fetch_timeout_secs = fetch_timeout;
    }

    ::log::info!("Starting scrape for URL: {}", args.url);
    ::log::info!(
        "Note: JS-heavy pages require a WebDriver server (e.g. ChromeDriver) at {}",
        config.webdriver_url
    );

    let start_time = std::time::Instant::now();
    let envelope = PageScraper::new(args.url.as_str())
        .with_config(config)
        .scrape()
        .await;

    ::log::info!(
        "Scrape complete - {} sections, {} errors in {:.2} seconds",
        envelope.sections.len(),
        envelope.errors.len(),
        start_time.elapsed().as_secs_f64()
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&envelope)
    } else {
        serde_json::to_string(&envelope)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}
