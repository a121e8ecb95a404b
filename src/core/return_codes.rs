//! Return reason codes carried by return addenda records

/// Describe a return reason code, e.g. `R01`
pub fn describe(code: &str) -> &'static str {
    match code {
        "R01" => "Insufficient funds",
        "R02" => "Account closed",
        "R03" => "No account / unable to locate account",
        "R04" => "Invalid account number",
        "R05" => "Unauthorized debit to consumer account",
        "R06" => "Returned per ODFI request",
        "R07" => "Authorization revoked by customer",
        "R08" => "Payment stopped",
        "R09" => "Uncollected funds",
        "R10" => "Customer advises not authorized",
        "R12" => "Account sold to another DFI",
        "R13" => "Invalid ACH routing number",
        "R14" => "Representative payee deceased",
        "R15" => "Beneficiary or account holder deceased",
        "R16" => "Account frozen",
        "R17" => "File record edit criteria",
        "R20" => "Non-transaction account",
        "R23" => "Credit entry refused by receiver",
        "R24" => "Duplicate entry",
        "R29" => "Corporate customer advises not authorized",
        "R31" => "Permissible return entry",
        _ => "Unknown return reason",
    }
}

/// Whether the code has the `Rnn` shape of a return reason code
pub fn is_return_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 3 && bytes[0] == b'R' && bytes[1..].iter().all(u8::is_ascii_digit)
}
