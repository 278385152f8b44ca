use super::tlv::TlvRecord;
use serde::{Deserialize, Serialize};

/// Merchant information language template (ID 64).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MerchantInformation {
    #[serde(rename = "Language")]
    pub language_preference: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "City")]
    pub city: String,
}

/// Merchant Presented QR code as split by an EMV decoder.
///
/// Scalar fields absent from the payload are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MpmCode {
    pub payload_format_indicator: String,
    pub point_of_initiation_method: String,
    pub merchant_account_information: Vec<TlvRecord>,
    pub merchant_category_code: String,
    pub transaction_currency: String,
    pub transaction_amount: String,
    pub tip_or_convenience_indicator: String,
    pub value_of_convenience_fee_fixed: String,
    pub value_of_convenience_fee_percentage: String,
    pub country_code: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub postal_code: String,
    pub additional_data_field_template: String,
    pub merchant_information: MerchantInformation,
    pub unreserved_templates: Vec<TlvRecord>,
}

/// Decoded PIX payload with its resolved amount in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PixData {
    pub payload_format_indicator: String,
    pub point_of_initiation_method: String,
    pub merchant_account_information: Vec<TlvRecord>,
    pub merchant_category_code: String,
    pub transaction_currency: String,
    pub transaction_amount: u64,
    pub tip_or_convenience_indicator: String,
    pub value_of_convenience_fee_fixed: String,
    pub value_of_convenience_fee_percentage: String,
    pub country_code: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub postal_code: String,
    pub additional_data_field_template: String,
    pub merchant_information: MerchantInformation,
    pub unreserved_templates: Vec<TlvRecord>,
}

impl PixData {
    /// Reshapes a decoded code into the result structure.
    ///
    /// `transaction_amount` is the already resolved amount; the code's own
    /// amount string is not consulted here.
    pub fn new(code: MpmCode, transaction_amount: u64) -> Self {
        Self {
            payload_format_indicator: code.payload_format_indicator,
            point_of_initiation_method: code.point_of_initiation_method,
            merchant_account_information: code.merchant_account_information,
            merchant_category_code: code.merchant_category_code,
            transaction_currency: code.transaction_currency,
            transaction_amount,
            tip_or_convenience_indicator: code.tip_or_convenience_indicator,
            value_of_convenience_fee_fixed: code.value_of_convenience_fee_fixed,
            value_of_convenience_fee_percentage: code.value_of_convenience_fee_percentage,
            country_code: code.country_code,
            merchant_name: code.merchant_name,
            merchant_city: code.merchant_city,
            postal_code: code.postal_code,
            additional_data_field_template: code.additional_data_field_template,
            merchant_information: code.merchant_information,
            unreserved_templates: code.unreserved_templates,
        }
    }
}
