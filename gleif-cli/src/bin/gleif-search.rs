//! Search the registry for legal entities and print the results as JSON.
//!
//! Usage:
//!   gleif-search "Citibank"                           # legal-name search
//!   gleif-search --fulltext "Bank" --country CN       # all fields, one country
//!   gleif-search "Citibank" --include-instruments     # add BIC/ISIN identifiers
//!
//! Set `GLEIF_USE_MOCK=1` to run against the built-in demo dataset.

use std::process::ExitCode;

use clap::Parser;
use gleif::{SearchMode, SearchQuery};
use gleif_cli::common::{LogLevel, builder, init_tracing};
use gleif_cli::output::SearchOutput;

#[derive(Parser)]
#[command(name = "gleif-search")]
#[command(about = "Search legal entities in the GLEIF registry")]
struct Args {
    /// Search string to find matching legal entities
    query: String,

    /// Search across all fields (name, address, metadata) instead of legal names only
    #[arg(long)]
    fulltext: bool,

    /// Filter by legal-address country (2-letter ISO code, e.g. GB, US, CN)
    #[arg(short = 'c', long)]
    country: Option<String>,

    /// Include BIC/ISIN identifiers (issues extra requests)
    #[arg(long)]
    include_instruments: bool,

    /// Maximum number of instrument lookup requests
    #[arg(long, default_value_t = gleif::GleifConfig::default().enrichment_budget)]
    instrument_request_budget: u32,

    /// Logging level
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level);

    let mode = if args.fulltext {
        SearchMode::FullText
    } else {
        SearchMode::NameOnly
    };
    let query = match SearchQuery::builder(args.query.as_str())
        .mode(mode)
        .country_opt(args.country.as_deref())
        .include_instruments(args.include_instruments)
        .build()
    {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Validation error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let gleif = match builder().and_then(|b| {
        b.enrichment_budget(args.instrument_request_budget).build()
    }) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(query = query.text(), mode = %query.mode(), country = ?query.country(), "searching");
    let report = match gleif.search(&query).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }

    let output = SearchOutput {
        query: query.text(),
        search_type: query.mode().as_str(),
        country_filter: query.country(),
        results_count: report.entities.len(),
        results: &report.entities,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
