//! Reconciliation of returned entries against known trace numbers
//!
//! The caller supplies the trace numbers it assigned at encode time (see
//! [`crate::types::TraceAssignment`]). Each returned entry is either matched to
//! one of the caller's transactions or reported as an orphan; one orphan never
//! prevents the rest of the file from reconciling.

use crate::types::{
    AchError, ReconciledReturn, ReconciliationResult, ReturnEntry, TransactionId,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Match returned entries to the caller's transactions
///
/// The entry's own trace number is looked up first. Banks usually give a
/// returned entry a new trace number and quote the original one in the return
/// addenda, so that original trace number is tried next.
pub fn reconcile(
    entries: &[ReturnEntry],
    known_trace_numbers: &HashMap<String, TransactionId>,
) -> ReconciliationResult {
    let mut result = ReconciliationResult::default();

    for entry in entries {
        match lookup(entry, known_trace_numbers) {
            Ok((trace_number, transaction_id)) => result.matches.push(ReconciledReturn {
                transaction_id: transaction_id.clone(),
                trace_number: trace_number.to_string(),
                return_reason_code: entry.return_reason_code.clone(),
            }),
            Err(e) => {
                warn!(line = entry.line, "{}", e);
                result.orphans.push(entry.clone());
            }
        }
    }

    info!(
        matched = result.matches.len(),
        orphans = result.orphans.len(),
        "Reconciled return entries"
    );
    result
}

fn lookup<'a>(
    entry: &'a ReturnEntry,
    known_trace_numbers: &'a HashMap<String, TransactionId>,
) -> Result<(&'a str, &'a TransactionId), AchError> {
    std::iter::once(entry.trace_number.as_str())
        .chain(entry.original_trace_number.as_deref())
        .find_map(|trace| known_trace_numbers.get(trace).map(|id| (trace, id)))
        .ok_or_else(|| AchError::unknown_trace_number(&entry.trace_number))
}
