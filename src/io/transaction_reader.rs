//! Transaction CSV reader with iterator interface
//!
//! Provides a streaming iterator over transactions from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! TransactionReader implements the Iterator trait, yielding
//! `Result<Transaction, String>` for each CSV row:
//!
//! ```no_run
//! use ach_batch_codec::io::transaction_reader::TransactionReader;
//! use std::path::Path;
//!
//! let reader = TransactionReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(transaction) => println!("Read transaction: {:?}", transaction),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_record, CsvTransaction};
use crate::types::{AchError, Transaction};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over a transactions CSV file
#[derive(Debug)]
pub struct TransactionReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl TransactionReader {
    /// Open a transactions CSV file
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// expect a header row.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, AchError> {
        let file = File::open(path).map_err(|e| AchError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for TransactionReader {
    type Item = Result<Transaction, String>;

    /// Read and convert the next row
    ///
    /// Errors carry the 1-based file line number, counting the header.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvTransaction>();

        let row = deserializer.next()?;
        self.line_num += 1;
        let line = self.line_num + 1;

        Some(match row {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|e| format!("Line {}: {}", line, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,amount,kind,routing_number,account_last4,payee_id,payee_name\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .and_then(|_| file.write_all(rows.as_bytes()))
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_fails_on_missing_file() {
        let result = TransactionReader::new(Path::new("nonexistent.csv"));
        match result {
            Err(AchError::Io { message }) => assert!(message.contains("Failed to open file")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_iterates_valid_rows() {
        let file = create_temp_csv(
            "tx-1,10.00,debit,091000019,1234,P-1,Jane Doe\n\
             tx-2,20.00,credit,,5678,P-2,John Roe\n",
        );

        let records: Vec<_> = TransactionReader::new(file.path()).unwrap().collect();
        assert_eq!(records.len(), 2);

        let first = records[0].as_ref().unwrap();
        assert_eq!(first.id, "tx-1");
        assert_eq!(first.amount, Decimal::new(1000, 2));
        assert_eq!(first.kind, TransactionKind::Debit);
        assert_eq!(first.routing_number.as_deref(), Some("091000019"));

        let second = records[1].as_ref().unwrap();
        assert_eq!(second.kind, TransactionKind::Credit);
        assert_eq!(second.routing_number, None);
    }

    #[test]
    fn test_reader_handles_whitespace_and_quotes() {
        let file = create_temp_csv("  tx-1 , 5.50 , DEBIT , 091000019 , 1234 , P-1 ,\"Doe, Jane\"\n");

        let records: Vec<_> = TransactionReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "tx-1");
        assert_eq!(records[0].amount, Decimal::new(550, 2));
        assert_eq!(records[0].payee_name, "Doe, Jane");
    }

    #[test]
    fn test_reader_includes_line_numbers_and_continues() {
        let file = create_temp_csv(
            "tx-1,10.00,debit,091000019,1234,P-1,A\n\
             tx-2,abc,debit,091000019,1234,P-2,B\n\
             tx-3,1.00,refund,091000019,1234,P-3,C\n\
             tx-4,2.00,credit,091000019,1234,P-4,D\n",
        );

        let records: Vec<_> = TransactionReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        assert!(records[3].is_ok());

        let amount_error = records[1].as_ref().unwrap_err();
        assert!(amount_error.contains("Line 3"));
        assert!(amount_error.contains("Invalid amount"));

        let kind_error = records[2].as_ref().unwrap_err();
        assert!(kind_error.contains("Line 4"));
        assert!(kind_error.contains("Invalid transaction kind"));
    }

    #[test]
    fn test_reader_reports_short_rows() {
        let file = create_temp_csv("tx-1,10.00,debit\n");

        let records: Vec<_> = TransactionReader::new(file.path()).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].as_ref().unwrap_err().contains("CSV parse error"));
    }

    #[test]
    fn test_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("");
        let records: Vec<_> = TransactionReader::new(file.path()).unwrap().collect();
        assert!(records.is_empty());
    }
}
