// src/main.rs
mod crawl;
mod extractors;
mod fetch;
mod pipeline;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use crawl::config::{CrawlConfig, DEFAULT_START_URL};
use fetch::{FetchConfig, HttpFetcher};
use pipeline::ExtractionPipeline;
use storage::DatasetSink;
use utils::AppError;

/// Crawls the college directory and extracts one record per institution page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Top hub page the three-level crawl starts from
    #[arg(long, default_value = DEFAULT_START_URL)]
    start_url: String,

    /// Extract a single institution page instead of crawling
    #[arg(short, long)]
    url: Option<String>,

    /// Output directory for the dataset and run summary
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Dataset file name inside the output directory
    #[arg(long, default_value = "colleges.csv")]
    file_name: String,

    /// Extra URL to exclude from extraction (repeatable)
    #[arg(long)]
    deny: Vec<String>,

    /// File with URLs to exclude, one per line
    #[arg(long)]
    denylist_file: Option<PathBuf>,

    /// Save annotated copies of pages that are not rich-layout pages here
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let mut config = CrawlConfig::new(args.start_url.clone()).deny(args.deny.iter().cloned());
    if let Some(path) = &args.denylist_file {
        config = config.deny_from_file(path)?;
    }

    // 3. Initialize fetcher, storage and pipeline
    let fetcher = HttpFetcher::new(&FetchConfig::default())?;
    let mut sink = DatasetSink::new(&args.output_dir, &args.file_name)?;
    let mut pipeline = ExtractionPipeline::new(&fetcher);
    if let Some(dir) = &args.debug_dir {
        pipeline = pipeline.with_debug_dir(dir);
    }

    // 4. Work out which leaf pages to extract
    let leaves = match &args.url {
        Some(url) if config.is_denied(url) => {
            return Err(AppError::Config(format!("{} is on the denylist", url)));
        }
        Some(url) => vec![url.clone()],
        None => crawl::crawl_leaf_urls(&fetcher, &config).await?,
    };

    if leaves.is_empty() {
        return Err(AppError::Processing(format!("No leaf pages found under {}", config.start_url)));
    }

    // 5. Extract each page in turn
    for url in &leaves {
        tracing::info!("{}", url);
        match pipeline.extract(url).await {
            Ok(extraction) => {
                tracing::debug!("{} read as {} layout", url, extraction.variant.as_str());
                sink.push(extraction.record);
            }
            Err(e) => pipeline.note_failure(url, &e),
        }
    }

    // 6. Write the dataset and summary
    let report = pipeline.report();
    report.log_summary();
    sink.save_dataset()?;
    sink.save_summary(report, &config.start_url)?;

    if sink.is_empty() && report.fetch_failures > 0 {
        return Err(AppError::Processing(format!(
            "Failed to fetch any of {} leaf pages",
            report.fetch_failures
        )));
    }

    tracing::info!("All done: {} rows", sink.len());
    Ok(())
}
