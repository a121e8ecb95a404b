//! End-to-end integration tests
//!
//! These tests drive the encode and decode pipelines against fixture files in
//! tests/fixtures/ and compare the output with the expected files there:
//! - `encode_*` fixtures: transactions.csv -> expected.ach (+ trace map)
//! - `decode_returns`: returns.ach -> expected entries / reconciliation CSV
//!
//! The codec-level properties (round trips, block padding, entry hash,
//! resilience to garbage lines) are checked directly against the library.

#[cfg(test)]
mod tests {
    use ach_batch_codec::cli::Command;
    use ach_batch_codec::io::{load_batch_config, trace_map_from_assignments};
    use ach_batch_codec::pipeline::create_pipeline;
    use ach_batch_codec::{
        compute_aggregate, decode, encode, reconcile, BatchConfig, Transaction, TransactionKind,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    const CONFIG: &str = "tests/fixtures/config.json";

    fn fixture(name: &str, file: &str) -> PathBuf {
        let path = Path::new("tests/fixtures").join(name).join(file);
        assert!(path.exists(), "Fixture file not found: {}", path.display());
        path
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    fn run(command: Command) -> String {
        let mut output = Vec::new();
        create_pipeline(&command)
            .run(&mut output)
            .unwrap_or_else(|e| panic!("Pipeline failed: {}", e));
        String::from_utf8(output).expect("Output is not UTF-8")
    }

    fn config() -> BatchConfig {
        load_batch_config(Path::new(CONFIG)).expect("Failed to load fixture config")
    }

    fn transactions(count: usize) -> Vec<Transaction> {
        let routings = ["091000019", "021000021", "011000015", "322271627"];
        (0..count)
            .map(|i| Transaction {
                id: format!("tx-{}", i),
                amount: Decimal::new(1_000 + i as i64 * 37, 2),
                kind: if i % 3 == 0 {
                    TransactionKind::Credit
                } else {
                    TransactionKind::Debit
                },
                routing_number: Some(routings[i % routings.len()].to_string()),
                account_number_last4: format!("{:04}", i % 10_000),
                payee_id: format!("P-{}", i),
                payee_name: format!("Payee {}", i),
            })
            .collect()
    }

    #[rstest]
    #[case::basic("encode_basic")]
    #[case::degraded("encode_degraded")]
    #[case::empty("encode_empty")]
    fn test_encode_fixture(#[case] name: &str) {
        let actual = run(Command::Encode {
            input_file: fixture(name, "transactions.csv"),
            config_file: PathBuf::from(CONFIG),
            effective_date: None,
            created_at: None,
            output: None,
            trace_map: None,
        });

        assert_eq!(
            actual,
            read(&fixture(name, "expected.ach")),
            "Output mismatch for fixture '{}'",
            name
        );
    }

    #[rstest]
    #[case::basic("encode_basic")]
    #[case::degraded("encode_degraded")]
    fn test_encode_fixture_trace_map(#[case] name: &str) {
        let trace_map = NamedTempFile::new().expect("Failed to create temp file");

        run(Command::Encode {
            input_file: fixture(name, "transactions.csv"),
            config_file: PathBuf::from(CONFIG),
            effective_date: None,
            created_at: None,
            output: None,
            trace_map: Some(trace_map.path().to_path_buf()),
        });

        assert_eq!(
            read(trace_map.path()),
            read(&fixture(name, "expected_trace_map.csv"))
        );
    }

    #[test]
    fn test_decode_fixture_entries() {
        let actual = run(Command::Decode {
            input_file: fixture("decode_returns", "returns.ach"),
            trace_map: None,
            output: None,
            skipped: None,
        });

        assert_eq!(
            actual,
            read(&fixture("decode_returns", "expected_entries.csv"))
        );
    }

    #[test]
    fn test_decode_fixture_reconciliation() {
        let actual = run(Command::Decode {
            input_file: fixture("decode_returns", "returns.ach"),
            trace_map: Some(fixture("decode_returns", "trace_map.csv")),
            output: None,
            skipped: None,
        });

        assert_eq!(
            actual,
            read(&fixture("decode_returns", "expected_reconciliation.csv"))
        );
    }

    #[test]
    fn test_decode_fixture_skips_garbage() {
        let decoded = decode(&read(&fixture("decode_returns", "returns.ach")));

        let skipped: Vec<usize> = decoded.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![10, 11]);
        assert_eq!(decoded.entries.len(), 3);
    }

    #[test]
    fn test_encode_fails_without_output_on_fatal_error() {
        let input = NamedTempFile::new().expect("Failed to create temp file");
        fs::write(
            input.path(),
            "id,amount,kind,routing_number,account_last4,payee_id,payee_name\n\
             tx-1,100000000.00,debit,091000019,1234,P-1,Too Big\n",
        )
        .unwrap();

        let mut output = Vec::new();
        let result = create_pipeline(&Command::Encode {
            input_file: input.path().to_path_buf(),
            config_file: PathBuf::from(CONFIG),
            effective_date: None,
            created_at: None,
            output: None,
            trace_map: None,
        })
        .run(&mut output);

        assert!(result.is_err());
        assert!(output.is_empty());
    }

    /// Every encoded file is whole blocks of 94-character records whose
    /// control totals agree with the entries
    #[rstest]
    fn test_encoded_file_structure(#[values(0, 1, 6, 7, 16, 123)] count: usize) {
        let txs = transactions(count);
        let result = encode(&txs, &config()).unwrap();
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len() % 10, 0);
        assert!(lines.iter().all(|l| l.len() == 94));
        assert_eq!(lines.len() as u64, result.aggregate.block_count * 10);
        assert_eq!(
            lines.iter().filter(|l| l.starts_with('6')).count(),
            count
        );

        let expected_hash = txs
            .iter()
            .filter_map(|t| t.routing_number.as_deref())
            .map(|r| r[..8].parse::<u64>().unwrap())
            .sum::<u64>()
            % 10_000_000_000;
        assert_eq!(result.aggregate.entry_hash, expected_hash);

        let file_control = lines[count + 3];
        assert!(file_control.starts_with('9'));
        assert_eq!(
            file_control[21..31].parse::<u64>().unwrap(),
            expected_hash
        );

        assert_eq!(compute_aggregate(&txs).unwrap(), result.aggregate);
    }

    /// The standalone aggregate agrees with the one encoding produces, also
    /// when entries fall back to the default routing number
    #[rstest]
    fn test_compute_aggregate_matches_encode_with_degraded(
        #[values(1, 7, 16)] count: usize,
    ) {
        let mut txs = transactions(count);
        for (i, tx) in txs.iter_mut().enumerate() {
            if i % 2 == 0 {
                tx.routing_number = if i % 4 == 0 {
                    None
                } else {
                    Some("12345".to_string())
                };
            }
        }
        txs.push(Transaction {
            amount: Decimal::new(9_999_999_999, 2),
            ..transactions(1).remove(0)
        });

        let encoded = encode(&txs, &config()).unwrap();
        let aggregate = compute_aggregate(&txs).unwrap();

        assert_eq!(aggregate, encoded.aggregate);
        assert_eq!(aggregate.degraded.len(), count.div_ceil(2));
    }

    /// Decoding an encoded file recovers every entry with its trace number
    /// and amount, and reconciling it against the trace assignments matches
    /// every entry
    #[rstest]
    fn test_encode_decode_reconcile(#[values(0, 1, 6, 7, 16, 123)] count: usize) {
        let txs = transactions(count);
        let encoded = encode(&txs, &config()).unwrap();

        let decoded = decode(&encoded.text);
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.entries.len(), count);

        for ((entry, trace), tx) in decoded.entries.iter().zip(&encoded.traces).zip(&txs) {
            assert_eq!(entry.trace_number, trace.trace_number);
            assert_eq!(entry.amount_cents, tx.amount_cents().unwrap());
            assert_eq!(entry.kind, Some(tx.kind));
            assert_eq!(entry.return_reason_code, None);
        }

        let known = trace_map_from_assignments(&encoded.traces);
        let result = reconcile(&decoded.entries, &known);
        assert_eq!(result.matches.len(), count);
        assert!(result.orphans.is_empty());
    }

    /// Garbage interleaved between records is skipped line by line without
    /// losing any real entry
    #[rstest]
    fn test_decode_resilience(#[values(1, 7, 16)] count: usize) {
        let encoded = encode(&transactions(count), &config()).unwrap();

        let mut noisy = Vec::new();
        let mut garbage = 0;
        for (i, line) in encoded.lines().enumerate() {
            noisy.push(line.to_string());
            if i % 2 == 0 {
                noisy.push(format!("x{}", "-".repeat(i % 120)));
                garbage += 1;
            }
        }

        let decoded = decode(&noisy.join("\n"));
        assert_eq!(decoded.entries.len(), count);
        assert_eq!(decoded.skipped.len(), garbage);
    }
}
