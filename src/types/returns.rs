//! Decode-side result types
//!
//! A [`ReturnEntry`] lives for the duration of one decode call; matching it back
//! to stored transaction state is the caller's job.

use crate::types::{TransactionId, TransactionKind};
use serde::Serialize;

/// One entry detail record read from a bank return file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnEntry {
    /// 1-based line number of the entry detail record
    pub line: usize,

    /// 15-digit trace number of the original entry
    pub trace_number: String,

    /// Two-digit transaction code as found in the file
    pub transaction_code: String,

    /// Direction decoded from the transaction code, if recognised
    pub kind: Option<TransactionKind>,

    /// Receiving DFI identification plus check digit
    pub routing_number: String,

    /// Entry amount in cents
    pub amount_cents: u64,

    /// Individual identification number, trimmed
    pub individual_id: String,

    /// Return reason code from the following addenda record, e.g. `R01`
    pub return_reason_code: Option<String>,

    /// Trace number of the original entry, as quoted by the return addenda
    pub original_trace_number: Option<String>,

    /// The entry detail line exactly as read
    pub raw_line: String,
}

/// A line the decoder could not use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the raw input
    pub line: usize,

    /// Why the line was skipped
    pub reason: String,
}

/// Output of a `decode` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeResult {
    /// Entries in file order
    pub entries: Vec<ReturnEntry>,

    /// Malformed or unusable lines in file order
    pub skipped: Vec<SkippedLine>,
}

/// A returned entry matched to one of the caller's transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledReturn {
    /// Caller's transaction the return applies to
    pub transaction_id: TransactionId,

    /// Trace number that produced the match
    pub trace_number: String,

    /// Reason the receiving bank gave, if an addenda was present
    pub return_reason_code: Option<String>,
}

/// Output of a `reconcile` call
///
/// Every input entry lands in exactly one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Entries whose trace number is known, in input order
    pub matches: Vec<ReconciledReturn>,

    /// Entries whose trace number is unknown, in input order
    pub orphans: Vec<ReturnEntry>,
}
