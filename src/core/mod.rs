//! Core codec module
//!
//! This module contains the batch file encode/decode engine:
//! - `layout` - Record width, blocking factor and field positions
//! - `format` - Fixed-width field formatting
//! - `records` - Builders for each record kind
//! - `aggregate` - Entry hash, totals and block count
//! - `trace` - Sequential trace number allocation
//! - `encoder` - Batch file assembly
//! - `decoder` - Return file parsing
//! - `reconcile` - Matching returned entries to known transactions
//! - `return_codes` - Return reason code descriptions
//!
//! Everything here is synchronous and free of I/O and shared state, so
//! `encode`, `decode` and `reconcile` may run concurrently on distinct inputs.

pub mod aggregate;
pub mod decoder;
pub mod encoder;
pub mod format;
pub mod layout;
pub mod reconcile;
pub mod records;
pub mod return_codes;
pub mod trace;

pub use aggregate::compute_aggregate;
pub use decoder::decode;
pub use encoder::encode;
pub use reconcile::reconcile;
