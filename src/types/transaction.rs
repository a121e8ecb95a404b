//! Transaction-related types for the ACH batch codec
//!
//! A [`Transaction`] is the caller-owned input to the encoder: one debit or
//! credit instruction destined for a single receiving account.

use crate::types::AchError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Opaque to the codec; only echoed back in trace assignments, degraded
/// reports and reconciliation matches.
pub type TransactionId = String;

/// Direction of funds movement for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Pull funds from the receiving account (transaction code `27`)
    Debit,

    /// Push funds to the receiving account (transaction code `22`)
    Credit,
}

impl TransactionKind {
    /// Checking-account transaction code for a live entry of this kind
    pub fn transaction_code(self) -> &'static str {
        match self {
            TransactionKind::Credit => "22",
            TransactionKind::Debit => "27",
        }
    }

    /// Decode the direction from a two-digit transaction code
    ///
    /// Codes ending in 1-4 are credits and codes ending in 6-9 are debits,
    /// for both checking (`2x`) and savings (`3x`) accounts.
    pub fn from_transaction_code(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 2 || !matches!(bytes[0], b'2' | b'3') {
            return None;
        }
        match bytes[1] {
            b'1'..=b'4' => Some(TransactionKind::Credit),
            b'6'..=b'9' => Some(TransactionKind::Debit),
            _ => None,
        }
    }
}

/// A single payment instruction supplied by the caller
///
/// Immutable once handed to the encoder; the encoder only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Caller's identifier for this transaction
    pub id: TransactionId,

    /// Amount in major currency units, e.g. `10.50`
    pub amount: Decimal,

    /// Debit or credit
    pub kind: TransactionKind,

    /// Receiving bank routing number, expected to be 9 ASCII digits
    pub routing_number: Option<String>,

    /// Last four characters of the receiving account number
    pub account_number_last4: String,

    /// Payee identifier, rendered as the individual identification number
    pub payee_id: String,

    /// Payee display name, rendered as the individual name
    pub payee_name: String,
}

impl Transaction {
    /// Amount in minor currency units (cents)
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount is negative, has fractional cents,
    /// or does not fit in a `u64`.
    pub fn amount_cents(&self) -> Result<u64, AchError> {
        let invalid = || AchError::invalid_amount(&self.id, self.amount);

        let cents = self
            .amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?;
        if cents < Decimal::ZERO || !cents.fract().is_zero() {
            return Err(invalid());
        }
        cents.to_u64().ok_or_else(invalid)
    }

    /// The routing number, if it is exactly 9 ASCII digits
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoutingNumber` when the routing number is missing or
    /// malformed. Callers treat this as a degraded entry, not a failure.
    pub fn validated_routing_number(&self) -> Result<&str, AchError> {
        match self.routing_number.as_deref() {
            Some(routing) if is_routing_number(routing) => Ok(routing),
            other => Err(AchError::invalid_routing_number(&self.id, other)),
        }
    }
}

/// Whether `value` is exactly 9 ASCII digits
pub fn is_routing_number(value: &str) -> bool {
    value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit())
}
