//! ACH Batch Codec CLI
//!
//! Command-line interface for producing ACH batch files and reading bank
//! return files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- encode transactions.csv --config batch.json > batch.ach
//! cargo run -- encode transactions.csv --config batch.json \
//!     --effective-date 2024-03-15 --created-at 2024-03-14T09:30 \
//!     --output batch.ach --trace-map traces.csv
//! cargo run -- decode returns.ach > returns.csv
//! cargo run -- decode returns.ach --trace-map traces.csv > reconciliation.csv
//! cargo run -- decode returns.ach --skipped skipped.csv > returns.csv
//! ```
//!
//! Logs go to stderr so stdout only ever carries file output. An `--output`
//! file is only written once the whole run has succeeded.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid configuration, unencodable batch, etc.)

use ach_batch_codec::cli;
use ach_batch_codec::pipeline;
use std::io;
use std::process;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let args = cli::parse_args();

    let level = match args.log_level.parse::<LevelFilter>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Error: invalid log level '{}'", args.log_level);
            process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to install logger: {}", e);
        process::exit(1);
    }

    let pipeline = pipeline::create_pipeline(&args.command);

    if let Err(e) = pipeline::run_to_destination(pipeline.as_ref(), args.command.output_path()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
