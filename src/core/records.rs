//! Record builders for the five record kinds plus block filler
//!
//! Each builder is a pure function from typed input to one 94-character line.
//! [`Record`] ties them together so the encoder can treat the file as a
//! sequence of records and render them uniformly.

use crate::core::format::FixedWidthLine;
use crate::core::layout::{self, batch, file_header, record_type, RECORD_SIZE};
use crate::types::transaction::is_routing_number;
use crate::types::{Aggregate, AchError, BatchConfig};

/// Input for one entry detail record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail<'a> {
    /// `22` for credits, `27` for debits
    pub transaction_code: &'static str,

    /// Routing number as supplied; anything but 9 digits renders as the fallback
    pub routing_number: &'a str,

    /// Receiving account number (or its visible tail)
    pub account_number: &'a str,

    /// Amount in cents
    pub amount_cents: u64,

    /// Individual identification number
    pub individual_id: &'a str,

    /// Individual name
    pub individual_name: &'a str,

    /// 15-digit trace number
    pub trace_number: &'a str,
}

/// A record of the batch file, ready to render
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    FileHeader(&'a BatchConfig),
    BatchHeader(&'a BatchConfig),
    EntryDetail(EntryDetail<'a>),
    BatchControl(&'a BatchConfig, &'a Aggregate),
    FileControl(&'a Aggregate),
    Filler,
}

impl Record<'_> {
    /// Render this record as a 94-character line
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a count or total does not fit its field.
    pub fn render(&self) -> Result<String, AchError> {
        match self {
            Record::FileHeader(config) => render_file_header(config),
            Record::BatchHeader(config) => render_batch_header(config),
            Record::EntryDetail(entry) => render_entry_detail(entry),
            Record::BatchControl(config, aggregate) => render_batch_control(config, aggregate),
            Record::FileControl(aggregate) => render_file_control(aggregate),
            Record::Filler => Ok(filler_line()),
        }
    }
}

/// File header record (`1`)
pub fn render_file_header(config: &BatchConfig) -> Result<String, AchError> {
    let created = config.file_creation;

    FixedWidthLine::new("File Header")
        .literal(&record_type::FILE_HEADER.to_string())
        .literal(file_header::PRIORITY_CODE)
        .blank(1)
        .alpha(&config.destination_routing, 9)
        .blank(1)
        .alpha(&config.origin_id, 9)
        .literal(&created.format("%y%m%d").to_string())
        .literal(&created.format("%H%M").to_string())
        .literal(&config.file_id_modifier.to_string())
        .literal(file_header::RECORD_SIZE)
        .literal(file_header::BLOCKING_FACTOR)
        .literal(file_header::FORMAT_CODE)
        .alpha(&config.destination_name, 23)
        .alpha(&config.origin_name, 23)
        .blank(8)
        .finish()
}

/// Batch header record (`5`)
pub fn render_batch_header(config: &BatchConfig) -> Result<String, AchError> {
    FixedWidthLine::new("Batch Header")
        .literal(&record_type::BATCH_HEADER.to_string())
        .literal(batch::SERVICE_CLASS_CODE)
        .alpha(&config.company_name, 16)
        .blank(20)
        .alpha(&config.company_id, 10)
        .literal(batch::STANDARD_ENTRY_CLASS)
        .alpha(&config.entry_description, 10)
        .literal(&config.descriptive_date().format("%y%m%d").to_string())
        .literal(&config.effective_date.format("%y%m%d").to_string())
        .blank(3)
        .literal(batch::ORIGINATOR_STATUS)
        .alpha(&config.originating_dfi_id, 8)
        .numeric("batch number", u64::from(config.batch_number), 7)?
        .finish()
}

/// Entry detail record (`6`)
///
/// A routing number that is not exactly 9 digits is rendered as the fallback
/// `000000000`; reporting the entry as degraded is the encoder's job.
pub fn render_entry_detail(entry: &EntryDetail<'_>) -> Result<String, AchError> {
    let routing = if is_routing_number(entry.routing_number) {
        entry.routing_number
    } else {
        layout::FALLBACK_ROUTING_NUMBER
    };
    let (dfi_id, check_digit) = routing.split_at(8);

    FixedWidthLine::new("Entry Detail")
        .literal(&record_type::ENTRY_DETAIL.to_string())
        .literal(entry.transaction_code)
        .literal(dfi_id)
        .literal(check_digit)
        .right_aligned(entry.account_number, 17)
        .numeric("amount", entry.amount_cents, 10)?
        .alpha(entry.individual_id, 15)
        .alpha(entry.individual_name, 22)
        .blank(2)
        .literal(layout::entry_detail::NO_ADDENDA)
        .alpha(entry.trace_number, 15)
        .finish()
}

/// Batch control record (`8`)
pub fn render_batch_control(
    config: &BatchConfig,
    aggregate: &Aggregate,
) -> Result<String, AchError> {
    FixedWidthLine::new("Batch Control")
        .literal(&record_type::BATCH_CONTROL.to_string())
        .literal(batch::SERVICE_CLASS_CODE)
        .numeric("batch entry count", aggregate.entry_count, 6)?
        .numeric("entry hash", aggregate.entry_hash, 10)?
        .numeric("total debit", aggregate.total_debit_cents, 12)?
        .numeric("total credit", aggregate.total_credit_cents, 12)?
        .alpha(&config.company_id, 10)
        .blank(19)
        .alpha(&config.originating_dfi_id, 8)
        .numeric("batch number", u64::from(config.batch_number), 7)?
        .blank(6)
        .finish()
}

/// File control record (`9`)
pub fn render_file_control(aggregate: &Aggregate) -> Result<String, AchError> {
    FixedWidthLine::new("File Control")
        .literal(&record_type::FILE_CONTROL.to_string())
        .numeric("batch count", 1, 6)?
        .numeric("block count", aggregate.block_count, 6)?
        .numeric("file entry count", aggregate.entry_count, 8)?
        .numeric("entry hash", aggregate.entry_hash, 10)?
        .numeric("total debit", aggregate.total_debit_cents, 12)?
        .numeric("total credit", aggregate.total_credit_cents, 12)?
        .blank(39)
        .finish()
}

/// Block padding record: 94 nines
pub fn filler_line() -> String {
    std::iter::repeat(layout::FILLER_CHAR)
        .take(RECORD_SIZE)
        .collect()
}
