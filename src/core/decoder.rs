//! Return file decoder
//!
//! Reads a bank return file and extracts one [`ReturnEntry`] per entry detail
//! record, attaching the return reason from an immediately following return
//! addenda record.
//!
//! # Resilience
//!
//! Decoding never fails. Every line that cannot be used is recorded in
//! [`DecodeResult::skipped`] with its line number and a reason, and decoding
//! carries on with the next line:
//!
//! - any non-blank line that is not exactly 94 ASCII characters
//! - entry details with a non-numeric amount or trace number
//! - addenda that are not return addenda, carry no valid reason code, or have
//!   no entry detail directly before them
//! - unknown record types
//!
//! Headers, controls and filler records are recognised and ignored.

use crate::core::layout::{entry_detail, record_type, return_addenda, RECORD_SIZE};
use crate::core::return_codes::is_return_code;
use crate::types::{AchError, DecodeResult, ReturnEntry, SkippedLine, TransactionKind};
use tracing::{debug, info, warn};

/// A successfully classified line
#[derive(Debug, PartialEq)]
enum ParsedLine {
    Entry(ReturnEntry),
    Addenda(ReturnAddenda),
    Structural,
}

/// Fields of a return addenda record (`7`, addenda type `99`)
#[derive(Debug, PartialEq)]
struct ReturnAddenda {
    reason_code: String,
    original_trace_number: String,
}

/// Decode a return file
///
/// Blank and whitespace-only lines are ignored; line numbers in the result
/// still count them.
pub fn decode(raw_text: &str) -> DecodeResult {
    let mut result = DecodeResult::default();
    // Index into `result.entries` of the entry an addenda may attach to
    let mut open_entry: Option<usize> = None;

    for (index, raw_line) in raw_text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let parsed = parse_line(line_number, line).and_then(|parsed| match parsed {
            ParsedLine::Addenda(addenda) => {
                attach_addenda(&mut result.entries, open_entry.take(), line_number, addenda)
                    .map(|_| ParsedLine::Structural)
            }
            other => Ok(other),
        });

        match parsed {
            Ok(ParsedLine::Entry(entry)) => {
                result.entries.push(entry);
                open_entry = Some(result.entries.len() - 1);
            }
            Ok(_) => open_entry = None,
            Err(e) => {
                warn!("{}", e);
                open_entry = None;
                result.skipped.push(skipped_line(line_number, e));
            }
        }
    }

    let returned = result
        .entries
        .iter()
        .filter(|e| e.return_reason_code.is_some())
        .count();
    debug!(returned, "Attached return reasons");
    info!(
        entries = result.entries.len(),
        skipped = result.skipped.len(),
        "Decoded return file"
    );

    result
}

/// Classify and parse a single non-blank line
fn parse_line(line_number: usize, line: &str) -> Result<ParsedLine, AchError> {
    if !line.is_ascii() {
        return Err(AchError::malformed_return_line(
            line_number,
            "contains non-ASCII characters",
        ));
    }
    if line.len() != RECORD_SIZE {
        return Err(AchError::malformed_return_line(
            line_number,
            format!("wrong length {}, expected {}", line.len(), RECORD_SIZE),
        ));
    }

    match line.as_bytes()[0] as char {
        record_type::ENTRY_DETAIL => parse_entry_detail(line_number, line).map(ParsedLine::Entry),
        record_type::ADDENDA => parse_return_addenda(line_number, line).map(ParsedLine::Addenda),
        record_type::FILE_HEADER
        | record_type::BATCH_HEADER
        | record_type::BATCH_CONTROL
        | record_type::FILE_CONTROL => Ok(ParsedLine::Structural),
        other => Err(AchError::malformed_return_line(
            line_number,
            format!("unknown record type '{}'", other),
        )),
    }
}

/// Parse an entry detail record; `line` is 94 ASCII characters
fn parse_entry_detail(line_number: usize, line: &str) -> Result<ReturnEntry, AchError> {
    let amount = &line[entry_detail::AMOUNT];
    if !is_digits(amount) {
        return Err(AchError::malformed_return_line(
            line_number,
            format!("non-numeric amount field '{}'", amount),
        ));
    }
    let amount_cents = amount.parse::<u64>().map_err(|e| {
        AchError::malformed_return_line(line_number, format!("amount field: {}", e))
    })?;

    let trace_number = &line[entry_detail::TRACE_NUMBER];
    if !is_digits(trace_number) {
        return Err(AchError::malformed_return_line(
            line_number,
            format!("non-numeric trace number '{}'", trace_number),
        ));
    }

    let transaction_code = &line[entry_detail::TRANSACTION_CODE];

    Ok(ReturnEntry {
        line: line_number,
        trace_number: trace_number.to_string(),
        transaction_code: transaction_code.to_string(),
        kind: TransactionKind::from_transaction_code(transaction_code),
        routing_number: line[entry_detail::ROUTING_NUMBER].to_string(),
        amount_cents,
        individual_id: line[entry_detail::INDIVIDUAL_ID].trim().to_string(),
        return_reason_code: None,
        original_trace_number: None,
        raw_line: line.to_string(),
    })
}

/// Parse a return addenda record; `line` is 94 ASCII characters
fn parse_return_addenda(line_number: usize, line: &str) -> Result<ReturnAddenda, AchError> {
    let addenda_type = &line[return_addenda::ADDENDA_TYPE];
    if addenda_type != return_addenda::RETURN_ADDENDA_TYPE {
        return Err(AchError::malformed_return_line(
            line_number,
            format!("unsupported addenda type '{}'", addenda_type),
        ));
    }

    let reason_code = &line[return_addenda::RETURN_REASON_CODE];
    if !is_return_code(reason_code) {
        return Err(AchError::malformed_return_line(
            line_number,
            format!("invalid return reason code '{}'", reason_code),
        ));
    }

    Ok(ReturnAddenda {
        reason_code: reason_code.to_string(),
        original_trace_number: line[return_addenda::ORIGINAL_TRACE_NUMBER].trim().to_string(),
    })
}

/// Attach a return addenda to the entry detail directly before it
fn attach_addenda(
    entries: &mut [ReturnEntry],
    open_entry: Option<usize>,
    line_number: usize,
    addenda: ReturnAddenda,
) -> Result<(), AchError> {
    let entry = open_entry
        .and_then(|index| entries.get_mut(index))
        .ok_or_else(|| {
            AchError::malformed_return_line(line_number, "addenda without preceding entry detail")
        })?;

    entry.return_reason_code = Some(addenda.reason_code);
    if !addenda.original_trace_number.is_empty() {
        entry.original_trace_number = Some(addenda.original_trace_number);
    }
    Ok(())
}

fn skipped_line(line_number: usize, error: AchError) -> SkippedLine {
    match error {
        AchError::MalformedReturnLine { line, reason } => SkippedLine { line, reason },
        other => SkippedLine {
            line: line_number,
            reason: other.to_string(),
        },
    }
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry_line(code: &str, amount: &str, individual_id: &str, trace: &str) -> String {
        format!(
            "6{}{}{:0>17}{}{:<15}{:<22}  0{}",
            code, "091000019", "4321", amount, individual_id, "Jane Doe", trace
        )
    }

    fn addenda_line(addenda_type: &str, reason: &str, original_trace: &str) -> String {
        format!(
            "7{}{}{:<15}{:<73}",
            addenda_type, reason, original_trace, "091000019"
        )
    }

    fn nines() -> String {
        "9".repeat(RECORD_SIZE)
    }

    #[test]
    fn test_helpers_build_full_width_lines() {
        assert_eq!(entry_line("27", "0000001000", "P-1", "091000010000001").len(), 94);
        assert_eq!(addenda_line("99", "R01", "091000010000001").len(), 94);
    }

    #[test]
    fn test_decodes_entry_fields() {
        let line = entry_line("27", "0000001550", "P-42", "091000010000007");
        let result = decode(&line);

        assert!(result.skipped.is_empty());
        assert_eq!(result.entries.len(), 1);

        let entry = &result.entries[0];
        assert_eq!(entry.line, 1);
        assert_eq!(entry.trace_number, "091000010000007");
        assert_eq!(entry.transaction_code, "27");
        assert_eq!(entry.kind, Some(TransactionKind::Debit));
        assert_eq!(entry.routing_number, "091000019");
        assert_eq!(entry.amount_cents, 1550);
        assert_eq!(entry.individual_id, "P-42");
        assert_eq!(entry.return_reason_code, None);
        assert_eq!(entry.raw_line, line);
    }

    #[test]
    fn test_one_good_line_and_one_short_line() {
        let text = format!(
            "{}\n{}",
            entry_line("22", "0000002000", "P-1", "091000010000001"),
            "6000000000"
        );

        let result = decode(&text);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 2);
        assert!(result.skipped[0].reason.contains("wrong length 10"));
    }

    #[test]
    fn test_attaches_addenda_to_preceding_entry() {
        let text = [
            entry_line("27", "0000001000", "P-1", "091000010000001"),
            addenda_line("99", "R01", "091000010000001"),
            entry_line("27", "0000000550", "P-3", "091000010000003"),
        ]
        .join("\n");

        let result = decode(&text);
        assert!(result.skipped.is_empty());
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].return_reason_code.as_deref(), Some("R01"));
        assert_eq!(
            result.entries[0].original_trace_number.as_deref(),
            Some("091000010000001")
        );
        assert_eq!(result.entries[1].return_reason_code, None);
    }

    #[test]
    fn test_ignores_structural_records_and_blank_lines() {
        let header = format!("101 091000019 123456789240314{:<65}", "0930A094101");
        let text = format!(
            "{}\n\n   \r\n{}\r\n{}\n{}",
            header,
            entry_line("22", "0000000100", "P-1", "091000010000001"),
            format!("8225{:<90}", "000001"),
            nines()
        );

        let result = decode(&text);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].line, 4);
        assert!(result.skipped.is_empty());
    }

    #[rstest]
    #[case::non_numeric_amount(
        entry_line("27", "00000010X0", "P-1", "091000010000001"),
        "non-numeric amount field"
    )]
    #[case::non_numeric_trace(
        entry_line("27", "0000001000", "P-1", "09100001000000A"),
        "non-numeric trace number"
    )]
    #[case::unknown_record_type(format!("X{}", "0".repeat(93)), "unknown record type 'X'")]
    #[case::long_line(format!("{}0", nines()), "wrong length 95")]
    #[case::non_ascii(format!("6{}é", "0".repeat(92)), "non-ASCII")]
    #[case::orphan_addenda(addenda_line("99", "R01", "091000010000001"), "without preceding entry")]
    #[case::non_return_addenda(addenda_line("05", "R01", ""), "unsupported addenda type '05'")]
    #[case::bad_reason_code(addenda_line("99", "X01", ""), "invalid return reason code 'X01'")]
    fn test_skips_malformed_lines(#[case] line: String, #[case] reason: &str) {
        let result = decode(&line);

        assert!(result.entries.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 1);
        assert!(
            result.skipped[0].reason.contains(reason),
            "reason '{}' does not mention '{}'",
            result.skipped[0].reason,
            reason
        );
    }

    #[test]
    fn test_second_addenda_is_skipped() {
        let text = [
            entry_line("27", "0000001000", "P-1", "091000010000001"),
            addenda_line("99", "R01", "091000010000001"),
            addenda_line("99", "R02", "091000010000001"),
        ]
        .join("\n");

        let result = decode(&text);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].return_reason_code.as_deref(), Some("R01"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 3);
    }

    #[test]
    fn test_addenda_after_malformed_line_is_not_attached() {
        let text = [
            entry_line("27", "0000001000", "P-1", "091000010000001"),
            "short".to_string(),
            addenda_line("99", "R01", "091000010000001"),
        ]
        .join("\n");

        let result = decode(&text);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].return_reason_code, None);
        assert_eq!(result.skipped.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), DecodeResult::default());
        assert_eq!(decode("\n\n  \n"), DecodeResult::default());
    }
}
