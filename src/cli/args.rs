use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Encode ACH batch files and decode bank return files
#[derive(Parser, Debug)]
#[command(name = "ach-codec")]
#[command(about = "Encode ACH batch files and decode bank return files", long_about = None)]
pub struct CliArgs {
    /// Log verbosity written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        global = true,
        help = "Log level: error, warn, info, debug or trace"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Encode a transactions CSV into a batch file
    Encode {
        #[arg(value_name = "TRANSACTIONS_CSV", help = "Path to the transactions CSV file")]
        input_file: PathBuf,

        #[arg(long = "config", value_name = "JSON", help = "Path to the batch configuration")]
        config_file: PathBuf,

        #[arg(
            long = "effective-date",
            value_name = "YYYY-MM-DD",
            value_parser = parse_date,
            help = "Override the configured effective entry date"
        )]
        effective_date: Option<NaiveDate>,

        #[arg(
            long = "created-at",
            value_name = "YYYY-MM-DDTHH:MM",
            value_parser = parse_timestamp,
            help = "Override the configured file creation timestamp"
        )]
        created_at: Option<NaiveDateTime>,

        #[arg(
            long = "output",
            value_name = "FILE",
            help = "Write the batch file here instead of stdout"
        )]
        output: Option<PathBuf>,

        #[arg(long = "trace-map", value_name = "FILE", help = "Write trace assignments as CSV")]
        trace_map: Option<PathBuf>,
    },

    /// Decode a return file, optionally reconciling it against a trace map
    Decode {
        #[arg(value_name = "RETURN_FILE", help = "Path to the bank return file")]
        input_file: PathBuf,

        #[arg(long = "trace-map", value_name = "FILE", help = "Trace map written at encode time")]
        trace_map: Option<PathBuf>,

        #[arg(long = "output", value_name = "FILE", help = "Write the CSV here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long = "skipped", value_name = "FILE", help = "Write skipped lines as CSV")]
        skipped: Option<PathBuf>,
    },
}

impl Command {
    /// Destination for the primary output, `None` meaning stdout
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Command::Encode { output, .. } | Command::Decode { output, .. } => output.as_deref(),
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", value, e))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM, got '{}': {}", value, e))
}
