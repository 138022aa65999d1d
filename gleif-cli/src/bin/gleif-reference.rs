//! Snapshot the registry's reference-data lookup tables to JSON files.
//!
//! Usage:
//!   gleif-reference --list                    # show available types
//!   gleif-reference countries                 # one type
//!   gleif-reference --all --output ./data     # every type plus _summary.json
//!
//! Set `GLEIF_USE_MOCK=1` to run against the built-in demo dataset.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use gleif::ReferenceKind;
use gleif_cli::common::{LogLevel, builder, init_tracing};
use gleif_cli::output::{ensure_dir, save_report, save_snapshot};

#[derive(Parser)]
#[command(name = "gleif-reference")]
#[command(about = "Fetch GLEIF reference data and save it as JSON files")]
struct Args {
    /// Reference data type to fetch (see --list)
    data_type: Option<String>,

    /// Fetch every reference data type
    #[arg(short = 'a', long)]
    all: bool,

    /// List available reference data types and exit
    #[arg(short = 'l', long)]
    list: bool,

    /// Output directory for JSON files
    #[arg(short = 'o', long, default_value = "./reference_data")]
    output: PathBuf,

    /// Logging level
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    log_level: LogLevel,
}

fn list_types() {
    eprintln!("Available Reference Data Types:");
    eprintln!();
    for kind in ReferenceKind::ALL {
        eprintln!("  {:35} - {}", kind.as_str(), kind.description());
    }
    eprintln!();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level);

    if args.list {
        list_types();
        return ExitCode::SUCCESS;
    }

    let kind = match (&args.data_type, args.all) {
        (_, true) => None,
        (Some(name), false) => match name.parse::<ReferenceKind>() {
            Ok(k) => Some(k),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        (None, false) => {
            let _ = Args::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    let gleif = match builder().and_then(gleif::GleifBuilder::build) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match kind {
        None => {
            let report = gleif.reference_data_all().await;
            match save_report(&args.output, &report) {
                Ok(_) => {
                    eprintln!("All reference data saved to: {}", args.output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(kind) => {
            tracing::info!(kind = %kind, "fetching");
            let saved = match gleif.reference_data(kind).await {
                Ok(snapshot) => ensure_dir(&args.output)
                    .and_then(|()| save_snapshot(&args.output, &snapshot)),
                Err(e) => Err(e),
            };
            match saved {
                Ok(path) => {
                    eprintln!("Data saved to: {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
