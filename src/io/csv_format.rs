//! CSV format handling for transaction input and codec output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvTransaction structure for deserialization
//! - Conversion from CSV records to domain types
//! - Trace map, return entry and reconciliation serialization
//!
//! All functions are pure (no file access) for easy testing.

use crate::core::return_codes;
use crate::types::{
    AchError, ReconciliationResult, ReturnEntry, SkippedLine, TraceAssignment, Transaction,
    TransactionKind,
};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// id, amount, kind, routing_number, account_last4, payee_id, payee_name.
/// An empty routing number deserializes to `None`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransaction {
    pub id: String,
    pub amount: String,
    pub kind: String,
    pub routing_number: Option<String>,
    pub account_last4: String,
    pub payee_id: String,
    pub payee_name: String,
}

/// Convert a CsvTransaction to a Transaction
///
/// This function:
/// - Parses the kind string (case-insensitive `debit` / `credit`)
/// - Parses the amount string into a Decimal
/// - Rejects account tails longer than four characters
///
/// Routing numbers are passed through untouched; a bad one degrades the entry
/// at encode time instead of rejecting the row here.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Transaction) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvTransaction) -> Result<Transaction, String> {
    let kind = match csv_record.kind.to_lowercase().as_str() {
        "debit" => TransactionKind::Debit,
        "credit" => TransactionKind::Credit,
        _ => {
            return Err(format!(
                "Invalid transaction kind '{}' for transaction {}",
                csv_record.kind, csv_record.id
            ))
        }
    };

    let amount = Decimal::from_str(csv_record.amount.trim()).map_err(|_| {
        format!(
            "Invalid amount '{}' for transaction {}",
            csv_record.amount, csv_record.id
        )
    })?;

    if csv_record.account_last4.chars().count() > 4 {
        return Err(format!(
            "Account tail '{}' for transaction {} is longer than 4 characters",
            csv_record.account_last4, csv_record.id
        ));
    }

    Ok(Transaction {
        id: csv_record.id,
        amount,
        kind,
        routing_number: csv_record.routing_number.filter(|r| !r.trim().is_empty()),
        account_number_last4: csv_record.account_last4,
        payee_id: csv_record.payee_id,
        payee_name: csv_record.payee_name,
    })
}

/// Write trace assignments as CSV with columns: trace_number, transaction_id
///
/// The header is written even when there are no assignments.
pub fn write_trace_map_csv(
    traces: &[TraceAssignment],
    output: &mut dyn Write,
) -> Result<(), AchError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["trace_number", "transaction_id"])?;
    for trace in traces {
        writer.serialize(trace)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write lines the decoder could not use as CSV with columns: line, reason
pub fn write_skipped_lines_csv(
    skipped: &[SkippedLine],
    output: &mut dyn Write,
) -> Result<(), AchError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["line", "reason"])?;
    for line in skipped {
        writer.serialize(line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write decoded return entries as CSV
///
/// Columns: line, trace_number, transaction_code, routing_number, amount,
/// individual_id, return_reason_code, description. Amounts are rendered in
/// major units with two decimal places.
pub fn write_return_entries_csv(
    entries: &[ReturnEntry],
    output: &mut dyn Write,
) -> Result<(), AchError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "line",
        "trace_number",
        "transaction_code",
        "routing_number",
        "amount",
        "individual_id",
        "return_reason_code",
        "description",
    ])?;

    for entry in entries {
        let reason = entry.return_reason_code.as_deref().unwrap_or("");
        writer.write_record([
            entry.line.to_string(),
            entry.trace_number.clone(),
            entry.transaction_code.clone(),
            entry.routing_number.clone(),
            format_cents(entry.amount_cents),
            entry.individual_id.clone(),
            reason.to_string(),
            describe_reason(reason).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a reconciliation result as CSV
///
/// Columns: status, transaction_id, trace_number, return_reason_code,
/// description. Matches come first with status `matched`, then orphans with
/// status `orphan` and an empty transaction id.
pub fn write_reconciliation_csv(
    result: &ReconciliationResult,
    output: &mut dyn Write,
) -> Result<(), AchError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "status",
        "transaction_id",
        "trace_number",
        "return_reason_code",
        "description",
    ])?;

    for matched in &result.matches {
        let reason = matched.return_reason_code.as_deref().unwrap_or("");
        writer.write_record([
            "matched",
            matched.transaction_id.as_str(),
            matched.trace_number.as_str(),
            reason,
            describe_reason(reason),
        ])?;
    }
    for orphan in &result.orphans {
        let reason = orphan.return_reason_code.as_deref().unwrap_or("");
        writer.write_record([
            "orphan",
            "",
            orphan.trace_number.as_str(),
            reason,
            describe_reason(reason),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn describe_reason(code: &str) -> &'static str {
    if code.is_empty() {
        ""
    } else {
        return_codes::describe(code)
    }
}

fn format_cents(cents: u64) -> String {
    match i64::try_from(cents) {
        Ok(cents) => format!("{:.2}", Decimal::new(cents, 2)),
        Err(_) => format!("{}.{:02}", cents / 100, cents % 100),
    }
}
