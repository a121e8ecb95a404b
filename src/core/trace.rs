//! Sequential trace number allocation
//!
//! A trace number is the 8-digit originating DFI identification followed by a
//! 7-digit sequence. Sequences start at 1 for every encode call.

use crate::core::format::numeric;
use crate::types::AchError;

/// Width of the sequence part of a trace number
const SEQUENCE_WIDTH: usize = 7;

/// Hands out trace numbers in presentation order
///
/// Owned by a single encode call; there is no process-wide counter.
#[derive(Debug)]
pub struct TraceAllocator<'a> {
    prefix: &'a str,
    next_sequence: u64,
}

impl<'a> TraceAllocator<'a> {
    /// Create an allocator for the given originating DFI identification
    pub fn new(prefix: &'a str) -> Self {
        Self {
            prefix,
            next_sequence: 1,
        }
    }

    /// Allocate the next trace number
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` once the 7-digit sequence is exhausted.
    pub fn allocate(&mut self) -> Result<String, AchError> {
        let sequence = numeric("trace sequence", self.next_sequence, SEQUENCE_WIDTH)?;
        self.next_sequence += 1;
        Ok(format!("{}{}", self.prefix, sequence))
    }
}
