//! Batch file encoder
//!
//! Assembles a complete single-batch file from a transaction list:
//!
//! ```text
//! File Header
//! Batch Header
//! Entry Detail × n        (input order, sequential trace numbers)
//! Batch Control
//! File Control
//! Filler × k              (until the line count is a multiple of 10)
//! ```
//!
//! Encoding is a pure function of its inputs. The file creation timestamp comes
//! from [`BatchConfig::file_creation`], so the same inputs always produce
//! byte-identical output.

use crate::core::aggregate::{padded_line_count, AggregateAccumulator, STRUCTURAL_RECORDS};
use crate::core::layout::{BLOCKING_FACTOR, FALLBACK_ROUTING_NUMBER};
use crate::core::records::{EntryDetail, Record};
use crate::core::trace::TraceAllocator;
use crate::types::{
    AchError, BatchConfig, DegradedEntry, EncodeResult, TraceAssignment, Transaction,
};
use tracing::{debug, info, warn};

/// Encode a batch file
///
/// An empty transaction list still produces a structurally valid file with
/// zero totals and one block of padding.
///
/// # Errors
///
/// Aborts with:
/// - `InvalidConfig` if the configuration fails [`BatchConfig::validate`]
/// - `InvalidAmount` if an amount is negative or has fractional cents
/// - `FieldOverflow` if a count, amount or total does not fit its field
///
/// Invalid routing numbers do not abort; those entries are emitted with the
/// fallback routing number and listed in [`EncodeResult::degraded`].
pub fn encode(
    transactions: &[Transaction],
    config: &BatchConfig,
) -> Result<EncodeResult, AchError> {
    config.validate()?;

    let mut accumulator = AggregateAccumulator::new();
    let mut allocator = TraceAllocator::new(&config.originating_dfi_id);
    let mut traces = Vec::with_capacity(transactions.len());
    let mut degraded = Vec::new();

    let mut lines = Vec::with_capacity(transactions.len() + STRUCTURAL_RECORDS);
    lines.push(Record::FileHeader(config).render()?);
    lines.push(Record::BatchHeader(config).render()?);

    for transaction in transactions {
        let amount_cents = transaction.amount_cents()?;
        let routing_number = match transaction.validated_routing_number() {
            Ok(routing) => routing,
            Err(e) => {
                warn!(transaction = %transaction.id, "{}; using fallback routing number", e);
                accumulator.mark_degraded(&transaction.id);
                degraded.push(DegradedEntry {
                    transaction_id: transaction.id.clone(),
                    reason: e.to_string(),
                });
                FALLBACK_ROUTING_NUMBER
            }
        };

        let trace_number = allocator.allocate()?;
        let entry = EntryDetail {
            transaction_code: transaction.kind.transaction_code(),
            routing_number,
            account_number: &transaction.account_number_last4,
            amount_cents,
            individual_id: &transaction.payee_id,
            individual_name: &transaction.payee_name,
            trace_number: &trace_number,
        };
        lines.push(Record::EntryDetail(entry).render()?);

        accumulator.add_entry(transaction.kind, routing_number, amount_cents)?;
        traces.push(TraceAssignment {
            trace_number,
            transaction_id: transaction.id.clone(),
        });
    }

    let aggregate = accumulator.finish();
    lines.push(Record::BatchControl(config, &aggregate).render()?);
    lines.push(Record::FileControl(&aggregate).render()?);

    let padded = padded_line_count(lines.len() as u64) as usize;
    let filler = Record::Filler.render()?;
    lines.resize(padded, filler);
    debug_assert_eq!(
        aggregate.block_count * BLOCKING_FACTOR as u64,
        lines.len() as u64,
        "block count must describe the padded file"
    );

    debug!(
        lines = lines.len(),
        block_count = aggregate.block_count,
        "Rendered batch file"
    );
    info!(
        entries = aggregate.entry_count,
        total_debit_cents = aggregate.total_debit_cents,
        total_credit_cents = aggregate.total_credit_cents,
        degraded = degraded.len(),
        "Encoded batch {} effective {}",
        config.batch_number,
        config.effective_date
    );

    Ok(EncodeResult {
        text: lines.join("\n"),
        aggregate,
        traces,
        degraded,
    })
}
