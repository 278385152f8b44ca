use crate::error::{PaymentError, Result};

/// Parses a decimal-point-bearing amount string into minor currency units.
///
/// Exactly one decimal point (if any) is removed and the remaining characters
/// must all be ASCII digits, so `"12.34"` becomes `1234` and `"1234"` stays
/// `1234`. The position of the point is not checked.
pub fn decimal_amount(value: &str) -> Result<u64> {
    let cleaned = value.replacen('.', "", 1);
    if cleaned.is_empty() {
        return Err(PaymentError::FormatError(format!(
            "amount {value:?} has no digits"
        )));
    }
    if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PaymentError::FormatError(format!(
            "amount {value:?} is not a decimal number"
        )));
    }
    cleaned
        .parse::<u64>()
        .map_err(|e| PaymentError::FormatError(format!("amount {value:?} out of range: {e}")))
}
