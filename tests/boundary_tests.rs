mod common;

use paycode::domain::amount::decimal_amount;
use paycode::domain::boleto::{BoletoData, MIN_LINE_CODE_LEN};
use paycode::error::PaymentError;
use rust_decimal_macros::dec;

#[test]
fn test_boundary_boleto_amounts() {
    let max = BoletoData::from_line_code(&common::line_code("999", "9", "9999999999")).unwrap();
    assert_eq!(max.value, "99999999.99");
    assert_eq!(max.amount().unwrap(), dec!(99999999.99));

    let min = BoletoData::from_line_code(&common::line_code("001", "9", "0000000001")).unwrap();
    assert_eq!(min.value, "0.01");
}

#[test]
fn test_boundary_line_code_length() {
    let exact = common::line_code("001", "9", "0000001050");
    assert_eq!(exact.len(), MIN_LINE_CODE_LEN);
    assert!(BoletoData::from_line_code(&exact).is_ok());

    let one_short = &exact[..MIN_LINE_CODE_LEN - 1];
    assert!(matches!(
        BoletoData::from_line_code(one_short),
        Err(PaymentError::MalformedInput(_))
    ));
}

#[test]
fn test_boleto_ignores_trailing_digits() {
    let base = common::line_code("033", "9", "0000002500");
    let with_check_digit = format!("{base}4");
    assert_eq!(
        BoletoData::from_line_code(&base).unwrap(),
        BoletoData::from_line_code(&with_check_digit).unwrap()
    );
}

#[test]
fn test_non_ascii_line_code_is_malformed() {
    let code = format!("ção{}", "0".repeat(45));
    assert!(matches!(
        BoletoData::from_line_code(&code),
        Err(PaymentError::MalformedInput(_))
    ));
}

#[test]
fn test_boundary_decimal_amounts() {
    assert_eq!(decimal_amount("18446744073709551615").unwrap(), u64::MAX);
    assert!(matches!(
        decimal_amount("18446744073709551616"),
        Err(PaymentError::FormatError(_))
    ));
    assert_eq!(decimal_amount(".5").unwrap(), 5);
    assert_eq!(decimal_amount("5.").unwrap(), 5);
}
