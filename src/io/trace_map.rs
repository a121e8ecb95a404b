//! Trace map file loading
//!
//! A trace map is the CSV written by `ach-codec encode --trace-map`, with
//! columns `trace_number,transaction_id`. It is the caller's record of which
//! transaction each trace number was assigned to.

use crate::types::{AchError, TraceAssignment, TransactionId};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct TraceRow {
    trace_number: String,
    transaction_id: TransactionId,
}

/// Load a trace map into a lookup from trace number to transaction id
///
/// When a trace number appears twice, the later row wins and a warning is
/// logged.
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened and `Csv` for malformed rows.
pub fn load_trace_map(path: &Path) -> Result<HashMap<String, TransactionId>, AchError> {
    let file = File::open(path).map_err(|e| AchError::Io {
        message: format!("Failed to open trace map '{}': {}", path.display(), e),
    })?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let mut traces = HashMap::new();

    for row in reader.deserialize::<TraceRow>() {
        let row = row?;
        if let Some(previous) = traces.insert(row.trace_number.clone(), row.transaction_id) {
            warn!(
                trace_number = %row.trace_number,
                previous = %previous,
                "Duplicate trace number in trace map"
            );
        }
    }

    Ok(traces)
}

/// Build the lookup directly from encode output, without a file round trip
pub fn trace_map_from_assignments(
    assignments: &[TraceAssignment],
) -> HashMap<String, TransactionId> {
    assignments
        .iter()
        .map(|a| (a.trace_number.clone(), a.transaction_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_trace_map() {
        let file = create_temp_csv(
            "trace_number,transaction_id\n091000010000001,tx-1\n091000010000002, tx-2 \n",
        );

        let traces = load_trace_map(file.path()).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces["091000010000001"], "tx-1");
        assert_eq!(traces["091000010000002"], "tx-2");
    }

    #[test]
    fn test_duplicate_trace_keeps_last() {
        let file = create_temp_csv(
            "trace_number,transaction_id\n091000010000001,tx-1\n091000010000001,tx-9\n",
        );

        let traces = load_trace_map(file.path()).unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces["091000010000001"], "tx-9");
    }

    #[test]
    fn test_malformed_trace_map_is_an_error() {
        let file = create_temp_csv("trace_number,transaction_id\n091000010000001\n");
        assert!(matches!(
            load_trace_map(file.path()),
            Err(AchError::Csv { .. })
        ));
    }

    #[test]
    fn test_missing_trace_map() {
        assert!(matches!(
            load_trace_map(Path::new("missing-trace-map.csv")),
            Err(AchError::Io { .. })
        ));
    }

    #[test]
    fn test_trace_map_from_assignments() {
        let assignments = vec![TraceAssignment {
            trace_number: "091000010000001".to_string(),
            transaction_id: "tx-1".to_string(),
        }];

        let traces = trace_map_from_assignments(&assignments);
        assert_eq!(traces.get("091000010000001").map(String::as_str), Some("tx-1"));
    }
}
