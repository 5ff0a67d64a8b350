use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;

use btc_fee_scraper::cli::{Cli, Command, ScrapeArgs};
use btc_fee_scraper::config::Config;
use btc_fee_scraper::error::AppError;
use btc_fee_scraper::extractor::ExplorerFeeSource;
use btc_fee_scraper::height::{parse_block_height, HeightRange};
use btc_fee_scraper::logging::init_logging;
use btc_fee_scraper::scraper::{run_scrape, ScrapeSummary};
use btc_fee_scraper::services::explorer::ExplorerClient;
use btc_fee_scraper::stats::{self, TrimmedMeanReport, TRIM_FRACTION};
use btc_fee_scraper::store::{self, FeeTableWriter};

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scrape: Option<&'a ScrapeSummary>,
    report: &'a TrimmedMeanReport,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!("{}", err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env().map_err(AppError::Config)?;

    match cli
        .command
        .unwrap_or_else(|| Command::Scrape(ScrapeArgs::default()))
    {
        Command::Scrape(args) => scrape(args, config).await,
        Command::Stats { input, json } => {
            let path = input.unwrap_or(config.output_path);
            let report = report_from_table(&path)?;
            print_report(None, &report, json)
        }
    }
}

async fn scrape(args: ScrapeArgs, mut config: Config) -> Result<(), AppError> {
    args.apply_to(&mut config);

    // Validate both heights before touching the network or the file system.
    let top = match &args.top {
        Some(raw) => parse_block_height(raw)?,
        None => parse_block_height(&prompt("Top block height: ")?)?,
    };
    let bottom = match &args.bottom {
        Some(raw) => parse_block_height(raw)?,
        None => parse_block_height(&prompt("Bottom block height: ")?)?,
    };
    let range = HeightRange::new(top, bottom)?;

    let client = ExplorerClient::with_options(
        config.explorer_base_url.clone(),
        config.explorer_locale.clone(),
        config.request_timeout,
        &config.user_agent,
    )
    .map_err(|err| AppError::Config(format!("failed to build HTTP client: {}", err)))?;
    let source = ExplorerFeeSource::new(client);

    let mut writer = FeeTableWriter::create(&config.output_path)?;
    let summary = run_scrape(&source, range, &mut writer, config.request_delay).await?;
    writer.finish()?;
    tracing::info!("Fee table written to {}", config.output_path.display());

    let report = report_from_table(&config.output_path)?;
    print_report(Some(&summary), &report, args.json)?;

    if args.linger_secs > 0 {
        tokio::time::sleep(Duration::from_secs(args.linger_secs)).await;
    }

    Ok(())
}

fn report_from_table(path: &Path) -> Result<TrimmedMeanReport, AppError> {
    let samples = store::read_samples(path)?;
    tracing::info!("Read {} sample(s) from {}", samples.len(), path.display());
    Ok(stats::summarize(&samples)?)
}

fn print_report(
    summary: Option<&ScrapeSummary>,
    report: &TrimmedMeanReport,
    json: bool,
) -> Result<(), AppError> {
    println!(
        "Trimmed mean share after dropping {}% from each end: {:.5}%",
        TRIM_FRACTION * 100.0,
        report.percentage
    );

    if json {
        let output = JsonOutput {
            scrape: summary,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
