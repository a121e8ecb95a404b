//! ACH Batch Codec Library
//! # Overview
//!
//! This library encodes payment transactions into a fixed-width ACH batch file
//! for submission to a bank, and decodes bank return files back into returned
//! entries that can be reconciled against the original transactions.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, BatchConfig, results, errors)
//! - [`core`] - Codec engine:
//!   - [`core::encoder`] - Batch file assembly with block padding
//!   - [`core::decoder`] - Return file parsing that never aborts on bad lines
//!   - [`core::reconcile`] - Matching returns to known trace numbers
//!   - [`core::records`] / [`core::format`] - Fixed-width record rendering
//! - [`io`] - CSV and JSON adapters for the command-line tool
//! - [`pipeline`] - Encode and decode pipelines over files
//! - [`cli`] - CLI arguments parsing
//!
//! # File Layout
//!
//! Every record is exactly 94 characters. An encoded file holds one batch:
//!
//! - **File Header** (`1`) and **Batch Header** (`5`) from the configuration
//! - one **Entry Detail** (`6`) per transaction, in input order
//! - **Batch Control** (`8`) and **File Control** (`9`) with counts, entry hash
//!   and debit/credit totals
//! - filler records of 94 `9`s until the line count is a multiple of 10
//!
//! # Errors
//!
//! Only fatal conditions (field overflow, invalid amounts, invalid
//! configuration) abort a call. Invalid routing numbers, malformed return lines
//! and unknown trace numbers are collected into the results.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use core::{compute_aggregate, decode, encode, reconcile};
pub use types::{
    AchError, Aggregate, BatchConfig, DecodeResult, DegradedEntry, EncodeResult,
    ReconciledReturn, ReconciliationResult, ReturnEntry, SkippedLine, TraceAssignment,
    Transaction, TransactionId, TransactionKind,
};
