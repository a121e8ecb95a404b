//! Encode-side result types
//!
//! These are produced once per `encode` call and never mutated afterwards.

use crate::types::TransactionId;
use serde::Serialize;

/// Control totals for one encoded file
///
/// Built by [`crate::core::aggregate::AggregateAccumulator`]. Any change to the
/// input transactions requires a new `Aggregate`; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Number of entry detail records emitted
    pub entry_count: u64,

    /// Sum of the 8-digit receiving DFI identifications, modulo 10^10
    pub entry_hash: u64,

    /// Sum of debit entry amounts in cents
    pub total_debit_cents: u64,

    /// Sum of credit entry amounts in cents
    pub total_credit_cents: u64,

    /// Number of 10-record blocks in the padded file
    pub block_count: u64,

    /// Transactions emitted with the fallback routing number
    pub degraded: Vec<TransactionId>,
}

/// A trace number handed out to one transaction
///
/// Callers persist these to reconcile a later return file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceAssignment {
    /// 15-digit trace number written to the entry detail record
    pub trace_number: String,

    /// Transaction the entry was rendered from
    pub transaction_id: TransactionId,
}

/// A transaction that was encoded with fallback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedEntry {
    /// Transaction that needs manual review
    pub transaction_id: TransactionId,

    /// Human-readable reason, e.g. the routing number problem
    pub reason: String,
}

/// Output of a successful `encode` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeResult {
    /// Newline-joined batch file, without a trailing newline
    pub text: String,

    /// Control totals matching the rendered control records
    pub aggregate: Aggregate,

    /// Trace numbers in input order
    pub traces: Vec<TraceAssignment>,

    /// Entries emitted with fallback data, in input order
    pub degraded: Vec<DegradedEntry>,
}

impl EncodeResult {
    /// Rendered records, one per line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}
