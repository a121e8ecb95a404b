//! Fixed-width layout constants shared by the encoder and decoder
//!
//! Offsets are 0-based character positions within a 94-character record.

use std::ops::Range;

/// Width of every record in the file
pub const RECORD_SIZE: usize = 94;

/// Records per block; the line count is padded to a multiple of this
pub const BLOCKING_FACTOR: usize = 10;

/// Character filling every column of a padding record
pub const FILLER_CHAR: char = '9';

/// Routing number substituted for missing or malformed ones
pub const FALLBACK_ROUTING_NUMBER: &str = "000000000";

/// Modulus applied to the entry hash
pub const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

/// Record type codes found in the first column
pub mod record_type {
    pub const FILE_HEADER: char = '1';
    pub const BATCH_HEADER: char = '5';
    pub const ENTRY_DETAIL: char = '6';
    pub const ADDENDA: char = '7';
    pub const BATCH_CONTROL: char = '8';
    pub const FILE_CONTROL: char = '9';
}

/// Literal values of the file header
pub mod file_header {
    pub const PRIORITY_CODE: &str = "01";
    pub const RECORD_SIZE: &str = "094";
    pub const BLOCKING_FACTOR: &str = "10";
    pub const FORMAT_CODE: &str = "1";
}

/// Literal values of the batch header and control
pub mod batch {
    /// Service class code written to both batch records
    pub const SERVICE_CLASS_CODE: &str = "225";
    pub const STANDARD_ENTRY_CLASS: &str = "PPD";
    pub const ORIGINATOR_STATUS: &str = "1";
}

/// Field positions of an entry detail record, used when decoding
pub mod entry_detail {
    use super::Range;

    pub const TRANSACTION_CODE: Range<usize> = 1..3;
    pub const ROUTING_NUMBER: Range<usize> = 3..12;
    pub const ACCOUNT_NUMBER: Range<usize> = 12..29;
    pub const AMOUNT: Range<usize> = 29..39;
    pub const INDIVIDUAL_ID: Range<usize> = 39..54;
    pub const INDIVIDUAL_NAME: Range<usize> = 54..76;
    pub const ADDENDA_INDICATOR: Range<usize> = 78..79;
    pub const TRACE_NUMBER: Range<usize> = 79..94;

    /// Addenda indicator for entries without addenda
    pub const NO_ADDENDA: &str = "0";
}

/// Field positions of a return addenda record
pub mod return_addenda {
    use super::Range;

    pub const ADDENDA_TYPE: Range<usize> = 1..3;
    pub const RETURN_REASON_CODE: Range<usize> = 3..6;
    pub const ORIGINAL_TRACE_NUMBER: Range<usize> = 6..21;

    /// Addenda type code of a return addenda
    pub const RETURN_ADDENDA_TYPE: &str = "99";
}
