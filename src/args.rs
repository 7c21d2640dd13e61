use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "distill-page")]
#[command(about = "Extracts structured sections from a web page, rendering it when needed")]
#[command(version)]
pub struct Args {
    /// URL of the page to scrape (http or https)
    pub url: String,

    /// URL for the WebDriver instance used for JS rendering
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Static fetch timeout in seconds
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
