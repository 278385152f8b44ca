use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum number of characters a boleto line code must carry.
pub const MIN_LINE_CODE_LEN: usize = 47;

const BANK_CODE: std::ops::Range<usize> = 0..3;
const CURRENCY_CODE: std::ops::Range<usize> = 3..4;
const AMOUNT: std::ops::Range<usize> = 37..47;

/// Bank code, currency code and amount read from fixed offsets of a boleto
/// line code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoletoData {
    /// Amount with two fractional digits, e.g. `"10.50"`.
    pub value: String,
    pub bank_code: String,
    pub currency_code: String,
}

impl BoletoData {
    /// Decodes a 47 or 48 character line code.
    ///
    /// Only the amount field is validated; bank and currency codes are copied
    /// verbatim.
    pub fn from_line_code(line_code: &str) -> Result<Self> {
        let prefix = line_code
            .get(..MIN_LINE_CODE_LEN)
            .filter(|prefix| prefix.is_ascii())
            .ok_or_else(|| PaymentError::MalformedInput("line code too short".to_string()))?;

        let raw_amount = &prefix[AMOUNT];
        if !raw_amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentError::FormatError(format!(
                "boleto amount {raw_amount:?} is not numeric"
            )));
        }
        let digits = raw_amount.trim_start_matches('0');
        let cents: i64 = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|e| PaymentError::FormatError(format!("boleto amount: {e}")))?
        };

        Ok(Self {
            value: format!("{:.2}", Self::amount_from_cents(cents)),
            bank_code: prefix[BANK_CODE].to_string(),
            currency_code: prefix[CURRENCY_CODE].to_string(),
        })
    }

    fn amount_from_cents(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    /// The amount as a decimal value.
    pub fn amount(&self) -> Result<Decimal> {
        self.value
            .parse()
            .map_err(|e| PaymentError::FormatError(format!("boleto value: {e}")))
    }
}
