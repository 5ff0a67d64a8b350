use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

/// Bitcoin block fee scraper CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "btc-fee-scraper",
    version,
    about = "Scrape per-block Bitcoin fees and compute their trimmed mean"
)]
pub struct Cli {
    /// Defaults to `scrape` with interactive prompts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch fees for a height range, write the table, then report the trimmed mean
    Scrape(ScrapeArgs),
    /// Recompute the trimmed mean from an existing fee table
    Stats {
        /// Fee table to read (defaults to OUTPUT_PATH)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Also print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct ScrapeArgs {
    /// Top (newest) block height; thousands separators are allowed
    #[arg(long)]
    pub top: Option<String>,

    /// Bottom (oldest) block height
    #[arg(long)]
    pub bottom: Option<String>,

    /// Output CSV path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Block explorer base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Explorer locale path segment
    #[arg(long)]
    pub locale: Option<String>,

    /// Pause between requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Also print the run summary and report as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep the process alive this many seconds after reporting
    #[arg(long, default_value_t = 0)]
    pub linger_secs: u64,
}

impl ScrapeArgs {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.explorer_base_url = base_url.clone();
        }
        if let Some(locale) = &self.locale {
            config.explorer_locale = locale.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay = Duration::from_millis(delay_ms);
        }
    }
}
