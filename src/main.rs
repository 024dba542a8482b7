use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use log::{LevelFilter, error, info};
use volby_scraper::{ResultsAggregator, ScrapingContext, export_results};

/// Scrapes per-municipality election results from one district overview
/// page into a single semicolon-delimited CSV.
#[derive(Parser)]
#[command(about, version)]
struct Opts {
    /// District overview page listing the municipalities to scrape.
    index_url: String,
    /// Where the aggregated CSV ends up.
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let opts = Opts::parse();
    if let Err(e) = run(opts).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let context = ScrapingContext::new()?;
    context.scraping_config.validate_index_url(&opts.index_url)?;

    let mut aggregator = ResultsAggregator::new(opts.index_url);
    aggregator
        .run(&context.request_client, context.scraping_config.base_url())
        .await?;

    // Only a fully scraped district is written out.
    export_results(&opts.output, &aggregator.rows, &aggregator.parties)?;
    info!(
        "done: {} municipalities written to {}",
        aggregator.rows.len(),
        opts.output.display()
    );
    Ok(())
}
