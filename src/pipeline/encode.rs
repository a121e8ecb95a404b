//! Encode pipeline
//!
//! Reads a transactions CSV and a JSON batch configuration, encodes the batch
//! and writes the file. Orchestration only:
//! - CSV parsing is delegated to `TransactionReader`
//! - configuration loading to `config_file::load_batch_config`
//! - file assembly to `core::encode`
//!
//! Transaction rows that fail to parse are logged and left out of the batch;
//! everything else that goes wrong is fatal.

use crate::core::encode;
use crate::io::config_file::load_batch_config;
use crate::io::csv_format::write_trace_map_csv;
use crate::io::transaction_reader::TransactionReader;
use crate::pipeline::Pipeline;
use crate::types::{AchError, BatchConfig};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Pipeline behind `ach-codec encode`
#[derive(Debug, Clone, PartialEq)]
pub struct EncodePipeline {
    pub input_path: PathBuf,
    pub config_path: PathBuf,
    /// Replaces the configured effective date when set
    pub effective_date: Option<NaiveDate>,
    /// Replaces the configured file creation timestamp when set
    pub created_at: Option<NaiveDateTime>,
    /// Where to write the trace assignments, if anywhere
    pub trace_map_path: Option<PathBuf>,
}

impl EncodePipeline {
    fn load_config(&self) -> Result<BatchConfig, AchError> {
        let mut config = load_batch_config(&self.config_path)?;
        if let Some(date) = self.effective_date {
            config.effective_date = date;
        }
        if let Some(timestamp) = self.created_at {
            config.file_creation = timestamp;
        }
        Ok(config)
    }
}

impl Pipeline for EncodePipeline {
    fn run(&self, output: &mut dyn Write) -> Result<(), AchError> {
        let config = self.load_config()?;

        let mut transactions = Vec::new();
        let mut rejected = 0usize;
        for result in TransactionReader::new(&self.input_path)? {
            match result {
                Ok(transaction) => transactions.push(transaction),
                Err(e) => {
                    rejected += 1;
                    warn!("Skipping transaction row: {}", e);
                }
            }
        }

        let encoded = encode(&transactions, &config)?;

        output.write_all(encoded.text.as_bytes())?;
        output.write_all(b"\n")?;
        output.flush()?;

        if let Some(path) = &self.trace_map_path {
            let file = File::create(path).map_err(|e| AchError::Io {
                message: format!("Failed to create trace map '{}': {}", path.display(), e),
            })?;
            let mut writer = BufWriter::new(file);
            write_trace_map_csv(&encoded.traces, &mut writer)?;
            info!(traces = encoded.traces.len(), "Wrote trace map to {}", path.display());
        }

        info!(
            encoded = transactions.len(),
            rejected,
            degraded = encoded.degraded.len(),
            "Encode finished"
        );
        Ok(())
    }
}
