use super::boleto::BoletoData;
use super::checkout::InvoiceResponse;
use super::mpm::PixData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bar code as submitted by the point of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    pub bar_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Pix,
    Boleto,
}

impl PaymentType {
    /// Boleto line codes are purely numeric; anything else is treated as an
    /// EMV QR payload.
    pub fn classify(bar_code: &str) -> Self {
        let bar_code = bar_code.trim();
        if !bar_code.is_empty() && bar_code.bytes().all(|b| b.is_ascii_digit()) {
            Self::Boleto
        } else {
            Self::Pix
        }
    }
}

/// Ids handed out by the payment API during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_intention_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayOutput {
    pub transaction_id: Uuid,
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_data: Option<PixData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_data: Option<BoletoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<CheckoutReceipt>,
}

impl PayOutput {
    pub fn pix(pix_data: PixData) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            payment_type: PaymentType::Pix,
            pix_data: Some(pix_data),
            boleto_data: None,
            checkout: None,
        }
    }

    pub fn boleto(boleto_data: BoletoData) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            payment_type: PaymentType::Boleto,
            pix_data: None,
            boleto_data: Some(boleto_data),
            checkout: None,
        }
    }
}
