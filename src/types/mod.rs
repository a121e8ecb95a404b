//! Types module
//!
//! Contains core data structures used throughout the codec.
//! This module organizes types into logical submodules:
//! - `transaction`: Input transactions and their identifiers
//! - `config`: Batch configuration supplied by the caller
//! - `batch`: Encode results and control totals
//! - `returns`: Decode and reconciliation results
//! - `error`: Error types for the codec

pub mod batch;
pub mod config;
pub mod error;
pub mod returns;
pub mod transaction;

pub use batch::{Aggregate, DegradedEntry, EncodeResult, TraceAssignment};
pub use config::BatchConfig;
pub use error::AchError;
pub use returns::{
    DecodeResult, ReconciledReturn, ReconciliationResult, ReturnEntry, SkippedLine,
};
pub use transaction::{Transaction, TransactionId, TransactionKind};
