//! Pipeline module for the command-line tool
//!
//! Each subcommand is a complete pipeline: read input files, run the codec,
//! write the result. The pipelines are selected at runtime from the parsed
//! [`Command`], so `main` stays a thin dispatcher.

use crate::cli::Command;
use crate::types::AchError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub mod decode;
pub mod encode;

pub use decode::DecodePipeline;
pub use encode::EncodePipeline;

/// A complete input-to-output run of the codec
pub trait Pipeline: Send + Sync {
    /// Run the pipeline, writing its primary output to `output`
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions: unreadable input, invalid
    /// configuration, a batch that cannot be encoded, or failed output.
    /// Malformed transaction rows, degraded entries, skipped return lines and
    /// orphaned returns are logged and do not fail the run.
    fn run(&self, output: &mut dyn Write) -> Result<(), AchError>;
}

/// Create the pipeline for a parsed subcommand
pub fn create_pipeline(command: &Command) -> Box<dyn Pipeline> {
    match command {
        Command::Encode {
            input_file,
            config_file,
            effective_date,
            created_at,
            trace_map,
            ..
        } => Box::new(EncodePipeline {
            input_path: input_file.clone(),
            config_path: config_file.clone(),
            effective_date: *effective_date,
            created_at: *created_at,
            trace_map_path: trace_map.clone(),
        }),
        Command::Decode {
            input_file,
            trace_map,
            skipped,
            ..
        } => Box::new(DecodePipeline {
            input_path: input_file.clone(),
            trace_map_path: trace_map.clone(),
            skipped_path: skipped.clone(),
        }),
    }
}

/// Run a pipeline and deliver its output to `output_path`, or stdout if `None`
///
/// Output is buffered until the pipeline succeeds. A failed run never creates,
/// truncates or partially writes the destination file.
///
/// # Errors
///
/// Returns the pipeline's error, or `Io` if the destination cannot be written.
pub fn run_to_destination(
    pipeline: &dyn Pipeline,
    output_path: Option<&Path>,
) -> Result<(), AchError> {
    let mut buffer = Vec::new();
    pipeline.run(&mut buffer)?;

    match output_path {
        Some(path) => fs::write(path, &buffer).map_err(|e| AchError::Io {
            message: format!("Failed to write output '{}': {}", path.display(), e),
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&buffer)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
