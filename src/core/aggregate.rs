//! Control totals for a batch file
//!
//! The encoder feeds every emitted entry into an [`AggregateAccumulator`] and
//! seals it into an immutable [`Aggregate`] once the file's line count is known.
//! [`compute_aggregate`] runs the same accumulation standalone, so callers can
//! preview totals without rendering a file.

use crate::core::layout::{BLOCKING_FACTOR, ENTRY_HASH_MODULUS, FALLBACK_ROUTING_NUMBER};
use crate::types::{Aggregate, AchError, Transaction, TransactionId, TransactionKind};

/// Records in a file besides its entries: file header, batch header,
/// batch control and file control
pub const STRUCTURAL_RECORDS: usize = 4;

/// Running totals for one encode call
///
/// Scoped to a single call; nothing is shared between encodes.
#[derive(Debug, Default)]
pub struct AggregateAccumulator {
    entry_count: u64,
    entry_hash: u64,
    total_debit_cents: u64,
    total_credit_cents: u64,
    degraded: Vec<TransactionId>,
}

impl AggregateAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one emitted entry
    ///
    /// `routing_number` must be the 9 digits actually rendered, which for
    /// degraded entries is the fallback.
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a running total exceeds `u64`. The record
    /// builders reject totals long before that, at 12 digits.
    pub fn add_entry(
        &mut self,
        kind: TransactionKind,
        routing_number: &str,
        amount_cents: u64,
    ) -> Result<(), AchError> {
        self.entry_hash = (self.entry_hash + dfi_prefix(routing_number)) % ENTRY_HASH_MODULUS;

        let (field, total) = match kind {
            TransactionKind::Debit => ("total debit", &mut self.total_debit_cents),
            TransactionKind::Credit => ("total credit", &mut self.total_credit_cents),
        };
        *total = total
            .checked_add(amount_cents)
            .ok_or_else(|| AchError::field_overflow(field, u64::MAX, 12))?;

        self.entry_count += 1;
        Ok(())
    }

    /// Record that a transaction was emitted with fallback data
    pub fn mark_degraded(&mut self, transaction_id: &str) {
        self.degraded.push(transaction_id.to_string());
    }

    /// Seal the totals into an [`Aggregate`]
    ///
    /// The block count is derived from the padded line count, which is fully
    /// determined by the number of entries.
    pub fn finish(self) -> Aggregate {
        let lines = STRUCTURAL_RECORDS as u64 + self.entry_count;
        Aggregate {
            entry_count: self.entry_count,
            entry_hash: self.entry_hash,
            total_debit_cents: self.total_debit_cents,
            total_credit_cents: self.total_credit_cents,
            block_count: padded_line_count(lines) / BLOCKING_FACTOR as u64,
            degraded: self.degraded,
        }
    }
}

/// Smallest multiple of the blocking factor that holds `lines` records
pub fn padded_line_count(lines: u64) -> u64 {
    let factor = BLOCKING_FACTOR as u64;
    lines.div_ceil(factor).max(1) * factor
}

/// First 8 digits of a routing number as an integer
///
/// Non-digit input contributes zero, matching the fallback routing number.
fn dfi_prefix(routing_number: &str) -> u64 {
    routing_number
        .get(..8)
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0)
}

/// Compute the control totals for a list of transactions
///
/// Produces the same [`Aggregate`] that encoding the list would.
///
/// # Errors
///
/// Returns `InvalidAmount` for negative or sub-cent amounts.
pub fn compute_aggregate(transactions: &[Transaction]) -> Result<Aggregate, AchError> {
    let mut accumulator = AggregateAccumulator::new();

    for transaction in transactions {
        let amount_cents = transaction.amount_cents()?;
        let routing = match transaction.validated_routing_number() {
            Ok(routing) => routing,
            Err(_) => {
                accumulator.mark_degraded(&transaction.id);
                FALLBACK_ROUTING_NUMBER
            }
        };
        accumulator.add_entry(transaction.kind, routing, amount_cents)?;
    }

    Ok(accumulator.finish())
}
