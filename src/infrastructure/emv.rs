//! EMV Merchant Presented QR decoder.
//!
//! Splits the top-level payload into its data objects, checks the CRC and
//! maps each ID onto [`MpmCode`]. Every failure is reported as
//! [`PaymentError::DecodeError`].

use crate::domain::mpm::{MerchantInformation, MpmCode};
use crate::domain::ports::MpmDecoder;
use crate::domain::tlv::{self, TlvRecord};
use crate::error::{PaymentError, Result};

const PAYLOAD_FORMAT_INDICATOR: &str = "01";
const CRC_ID: &str = "63";

/// CRC-16/CCITT-FALSE (polynomial 0x1021, initial value 0xFFFF).
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Appends the CRC data object to a payload that does not carry one yet.
pub fn append_crc(payload: &str) -> String {
    let mut payload = format!("{payload}{CRC_ID}04");
    let crc = crc16(payload.as_bytes());
    payload.push_str(&format!("{crc:04X}"));
    payload
}

fn decode_error(message: impl Into<String>) -> PaymentError {
    PaymentError::DecodeError(message.into())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmvMpmDecoder;

impl EmvMpmDecoder {
    pub fn new() -> Self {
        Self
    }

    fn verify_crc(raw: &str, records: &[TlvRecord]) -> Result<()> {
        let last = records
            .last()
            .filter(|record| record.tag == CRC_ID)
            .ok_or_else(|| decode_error("CRC (ID 63) must be the last data object"))?;
        if last.value.len() != 4 || !last.value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(decode_error(format!("invalid CRC value {:?}", last.value)));
        }

        let covered = &raw[..raw.len() - last.value.len()];
        let expected = format!("{:04X}", crc16(covered.as_bytes()));
        if !expected.eq_ignore_ascii_case(&last.value) {
            return Err(decode_error(format!(
                "CRC mismatch: payload says {}, computed {expected}",
                last.value
            )));
        }
        Ok(())
    }

    fn merchant_information(value: &str) -> Result<MerchantInformation> {
        let mut info = MerchantInformation::default();
        for record in tlv::scan(value).map_err(|e| decode_error(format!("ID 64: {e}")))? {
            match record.tag.as_str() {
                "00" => info.language_preference = record.value,
                "01" => info.name = record.value,
                "02" => info.city = record.value,
                _ => {}
            }
        }
        Ok(info)
    }

    fn set_once(slot: &mut String, id: &str, value: String) -> Result<()> {
        if !slot.is_empty() {
            return Err(decode_error(format!("duplicate ID {id}")));
        }
        *slot = value;
        Ok(())
    }
}

impl MpmDecoder for EmvMpmDecoder {
    fn decode(&self, raw: &str) -> Result<MpmCode> {
        let raw = raw.trim();
        let records = tlv::scan(raw).map_err(|e| decode_error(e.to_string()))?;

        match records.first() {
            Some(first) if first.tag == "00" && first.value == PAYLOAD_FORMAT_INDICATOR => {}
            Some(first) if first.tag == "00" => {
                return Err(decode_error(format!(
                    "unsupported payload format indicator {:?}",
                    first.value
                )));
            }
            _ => return Err(decode_error("payload format indicator must come first")),
        }
        Self::verify_crc(raw, &records)?;

        let mut code = MpmCode::default();
        let mut has_merchant_information = false;
        for record in records {
            let id: u8 = record
                .tag
                .parse()
                .map_err(|_| decode_error(format!("invalid ID {:?}", record.tag)))?;
            let value = record.value.clone();
            match id {
                0 => Self::set_once(&mut code.payload_format_indicator, "00", value)?,
                1 => {
                    if value != "11" && value != "12" {
                        return Err(decode_error(format!(
                            "invalid point of initiation method {value:?}"
                        )));
                    }
                    Self::set_once(&mut code.point_of_initiation_method, "01", value)?
                }
                2..=51 => code.merchant_account_information.push(record),
                52 => Self::set_once(&mut code.merchant_category_code, "52", value)?,
                53 => Self::set_once(&mut code.transaction_currency, "53", value)?,
                54 => Self::set_once(&mut code.transaction_amount, "54", value)?,
                55 => Self::set_once(&mut code.tip_or_convenience_indicator, "55", value)?,
                56 => Self::set_once(&mut code.value_of_convenience_fee_fixed, "56", value)?,
                57 => {
                    Self::set_once(&mut code.value_of_convenience_fee_percentage, "57", value)?
                }
                58 => Self::set_once(&mut code.country_code, "58", value)?,
                59 => Self::set_once(&mut code.merchant_name, "59", value)?,
                60 => Self::set_once(&mut code.merchant_city, "60", value)?,
                61 => Self::set_once(&mut code.postal_code, "61", value)?,
                62 => Self::set_once(&mut code.additional_data_field_template, "62", value)?,
                63 => {}
                64 => {
                    if has_merchant_information {
                        return Err(decode_error("duplicate ID 64"));
                    }
                    has_merchant_information = true;
                    code.merchant_information = Self::merchant_information(&value)?;
                }
                80..=99 => code.unreserved_templates.push(record),
                // 65-79 are reserved for future use.
                _ => {}
            }
        }

        let required = [
            ("52", &code.merchant_category_code),
            ("53", &code.transaction_currency),
            ("58", &code.country_code),
            ("59", &code.merchant_name),
            ("60", &code.merchant_city),
        ];
        if let Some((id, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(decode_error(format!("missing required ID {id}")));
        }
        if code.merchant_account_information.is_empty() {
            return Err(decode_error("missing merchant account information"));
        }

        Ok(code)
    }
}
