//! Error types for the ACH batch codec
//!
//! This module defines every error that can occur while encoding a batch file,
//! decoding a return file, or loading the inputs for either.
//!
//! # Error Categories
//!
//! - **Fatal encode errors**: a numeric field overflows its width, an amount is
//!   not a whole, non-negative number of cents, or the configuration is unusable.
//!   These abort the current `encode` call.
//! - **Collected conditions**: invalid routing numbers, malformed return lines and
//!   unknown trace numbers. These never abort a call; they are returned alongside
//!   the successful result so the caller can decide policy.
//! - **I/O and parsing errors**: raised by the file adapters in [`crate::io`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ACH batch codec
///
/// Each variant carries enough context to locate the offending field, line or
/// transaction without re-reading the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AchError {
    /// A numeric value needs more digits than its fixed-width field allows
    ///
    /// Fatal: numeric fields are never truncated, since that would corrupt
    /// monetary totals.
    #[error("Field overflow: {field} value {value} does not fit in {width} digits")]
    FieldOverflow {
        /// Name of the record field
        field: String,
        /// The value that did not fit
        value: u64,
        /// Width of the field in characters
        width: usize,
    },

    /// Routing number is absent or not exactly 9 ASCII digits
    ///
    /// Non-fatal: the entry is emitted with the fallback routing number and
    /// the transaction is reported as degraded.
    #[error("Invalid routing number {} for transaction {transaction_id}", describe_value(.value))]
    InvalidRoutingNumber {
        /// Transaction carrying the bad routing number
        transaction_id: String,
        /// The routing number as supplied, if any
        value: Option<String>,
    },

    /// A return file line could not be parsed
    ///
    /// Non-fatal: recorded in the decode result's `skipped` list.
    #[error("Malformed return line {line}: {reason}")]
    MalformedReturnLine {
        /// 1-based line number in the raw input
        line: usize,
        /// Why the line was rejected
        reason: String,
    },

    /// A returned entry's trace number is unknown to the caller
    ///
    /// Non-fatal: recorded as an orphan during reconciliation.
    #[error("Unknown trace number {trace_number}")]
    UnknownTraceNumber {
        /// The trace number found in the return file
        trace_number: String,
    },

    /// Transaction amount is negative or has fractional cents
    ///
    /// Fatal: amounts are never rounded silently.
    #[error("Invalid amount {amount} for transaction {transaction_id}")]
    InvalidAmount {
        /// Transaction carrying the bad amount
        transaction_id: String,
        /// The amount as supplied
        amount: Decimal,
    },

    /// Batch configuration is structurally unusable
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// Name of the configuration field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// A rendered record does not have the fixed record width
    ///
    /// Indicates an inconsistency in a record layout rather than bad input.
    #[error("{record} record rendered {width} characters instead of 94")]
    RecordWidth {
        /// Record kind that was being rendered
        record: String,
        /// Actual rendered width
        width: usize,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing or writing error
    #[error("CSV error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the error
        message: String,
    },

    /// Batch configuration file could not be parsed
    #[error("Config parse error: {message}")]
    ConfigParse {
        /// Description of the parse error
        message: String,
    },
}

fn describe_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "<missing>".to_string(),
    }
}

impl From<std::io::Error> for AchError {
    fn from(error: std::io::Error) -> Self {
        AchError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AchError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AchError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AchError {
    fn from(error: serde_json::Error) -> Self {
        AchError::ConfigParse {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AchError {
    /// Create a FieldOverflow error
    pub fn field_overflow(field: &str, value: u64, width: usize) -> Self {
        AchError::FieldOverflow {
            field: field.to_string(),
            value,
            width,
        }
    }

    /// Create an InvalidRoutingNumber error
    pub fn invalid_routing_number(transaction_id: &str, value: Option<&str>) -> Self {
        AchError::InvalidRoutingNumber {
            transaction_id: transaction_id.to_string(),
            value: value.map(str::to_string),
        }
    }

    /// Create a MalformedReturnLine error
    pub fn malformed_return_line(line: usize, reason: impl Into<String>) -> Self {
        AchError::MalformedReturnLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create an UnknownTraceNumber error
    pub fn unknown_trace_number(trace_number: &str) -> Self {
        AchError::UnknownTraceNumber {
            trace_number: trace_number.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(transaction_id: &str, amount: Decimal) -> Self {
        AchError::InvalidAmount {
            transaction_id: transaction_id.to_string(),
            amount,
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        AchError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create a RecordWidth error
    pub fn record_width(record: &str, width: usize) -> Self {
        AchError::RecordWidth {
            record: record.to_string(),
            width,
        }
    }

    /// Whether this error aborts the call that raised it
    ///
    /// Invalid routing numbers, malformed return lines and unknown trace
    /// numbers are collected into results instead of being propagated.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AchError::InvalidRoutingNumber { .. }
                | AchError::MalformedReturnLine { .. }
                | AchError::UnknownTraceNumber { .. }
        )
    }
}
