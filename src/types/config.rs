//! Batch configuration
//!
//! Everything the encoder needs that is not a transaction: originator and
//! destination identity, dates, and the caller-supplied file creation clock.
//! Loaded from JSON by [`crate::io::config_file`].

use crate::types::transaction::is_routing_number;
use crate::types::AchError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Configuration for a single batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Date the receiving banks should settle the entries
    pub effective_date: NaiveDate,

    /// File creation timestamp, written to the file header
    ///
    /// Supplied by the caller so that encoding stays deterministic.
    pub file_creation: NaiveDateTime,

    /// Descriptive date for the batch header; falls back to `effective_date`
    #[serde(default)]
    pub descriptive_date: Option<NaiveDate>,

    /// Originating company name (batch header)
    pub company_name: String,

    /// Originating company identification (batch header and control)
    pub company_id: String,

    /// Entry description shown on the receiver's statement, e.g. `PAYROLL`
    pub entry_description: String,

    /// Immediate destination routing number, 9 digits
    pub destination_routing: String,

    /// Immediate destination bank name
    pub destination_name: String,

    /// Immediate origin identification, 9 digits
    pub origin_id: String,

    /// Immediate origin name
    pub origin_name: String,

    /// Originating DFI identification, 8 digits; also the trace number prefix
    pub originating_dfi_id: String,

    /// Batch sequence number within the file
    #[serde(default = "default_batch_number")]
    pub batch_number: u32,

    /// File ID modifier distinguishing files created on the same day
    #[serde(default = "default_file_id_modifier")]
    pub file_id_modifier: char,
}

fn default_batch_number() -> u32 {
    1
}

fn default_file_id_modifier() -> char {
    'A'
}

impl BatchConfig {
    /// Descriptive date rendered in the batch header
    pub fn descriptive_date(&self) -> NaiveDate {
        self.descriptive_date.unwrap_or(self.effective_date)
    }

    /// Check that every identifier has the shape its record field requires
    ///
    /// Names are free text and are truncated at render time, so only the
    /// numeric identifiers and the file ID modifier are checked here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), AchError> {
        if !is_routing_number(&self.destination_routing) {
            return Err(AchError::invalid_config(
                "destination_routing",
                "expected 9 digits",
            ));
        }
        if !is_routing_number(&self.origin_id) {
            return Err(AchError::invalid_config("origin_id", "expected 9 digits"));
        }
        if self.originating_dfi_id.len() != 8
            || !self.originating_dfi_id.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AchError::invalid_config(
                "originating_dfi_id",
                "expected 8 digits",
            ));
        }
        if self.company_id.trim().is_empty() {
            return Err(AchError::invalid_config("company_id", "must not be empty"));
        }
        if !(self.file_id_modifier.is_ascii_uppercase() || self.file_id_modifier.is_ascii_digit())
        {
            return Err(AchError::invalid_config(
                "file_id_modifier",
                "expected A-Z or 0-9",
            ));
        }
        Ok(())
    }
}
