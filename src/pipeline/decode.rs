//! Decode pipeline
//!
//! Reads a bank return file, decodes it and writes CSV. With a trace map the
//! returns are reconciled first and the reconciliation is written instead of
//! the raw entries. Lines the decoder skipped can be written to a side file.

use crate::core::{decode, reconcile};
use crate::io::csv_format::{
    write_reconciliation_csv, write_return_entries_csv, write_skipped_lines_csv,
};
use crate::io::trace_map::load_trace_map;
use crate::pipeline::Pipeline;
use crate::types::AchError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Pipeline behind `ach-codec decode`
#[derive(Debug, Clone, PartialEq)]
pub struct DecodePipeline {
    pub input_path: PathBuf,
    pub trace_map_path: Option<PathBuf>,
    /// Where to write the skipped lines, if anywhere
    pub skipped_path: Option<PathBuf>,
}

impl Pipeline for DecodePipeline {
    fn run(&self, output: &mut dyn Write) -> Result<(), AchError> {
        let raw_text = fs::read_to_string(&self.input_path).map_err(|e| AchError::Io {
            message: format!(
                "Failed to read return file '{}': {}",
                self.input_path.display(),
                e
            ),
        })?;

        let decoded = decode(&raw_text);

        match &self.trace_map_path {
            Some(path) => {
                let known_trace_numbers = load_trace_map(path)?;
                let result = reconcile(&decoded.entries, &known_trace_numbers);
                write_reconciliation_csv(&result, output)?;
                info!(
                    matched = result.matches.len(),
                    orphans = result.orphans.len(),
                    skipped = decoded.skipped.len(),
                    "Decode and reconcile finished"
                );
            }
            None => {
                write_return_entries_csv(&decoded.entries, output)?;
                info!(
                    entries = decoded.entries.len(),
                    skipped = decoded.skipped.len(),
                    "Decode finished"
                );
            }
        }

        if let Some(path) = &self.skipped_path {
            let file = File::create(path).map_err(|e| AchError::Io {
                message: format!(
                    "Failed to create skipped lines file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
            let mut writer = BufWriter::new(file);
            write_skipped_lines_csv(&decoded.skipped, &mut writer)?;
        }

        Ok(())
    }
}
