//! I/O module
//!
//! Handles the files around the codec. The codec itself never touches a file.
//!
//! # Components
//!
//! - `csv_format` - CSV record conversion and output serialization
//! - `transaction_reader` - Transactions CSV reader with iterator interface
//! - `trace_map` - Trace number to transaction id lookup files
//! - `config_file` - JSON batch configuration loading

pub mod config_file;
pub mod csv_format;
pub mod trace_map;
pub mod transaction_reader;

pub use config_file::load_batch_config;
pub use csv_format::{
    convert_csv_record, write_reconciliation_csv, write_return_entries_csv,
    write_skipped_lines_csv, write_trace_map_csv, CsvTransaction,
};
pub use trace_map::{load_trace_map, trace_map_from_assignments};
pub use transaction_reader::TransactionReader;
