//! Request and response bodies of the remote payment API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub shipping_cents: u64,
    pub discount_cents: u64,
    pub items: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntentionPayload {
    pub supplier_company_id: String,
    pub merchant_document_number: String,
    pub email: String,
    pub url_callback: String,
    pub external_id: String,
    pub amount_cents: u64,
    pub contact: Contact,
    pub cart: Cart,
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntentionResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitReservationPayload {
    pub ip: String,
    pub payment_option: Vec<u32>,
    pub purchase_intention_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitReservationResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub amount_cents: u64,
    pub external_id: String,
    pub nfe_id: String,
    pub nfe_number: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLimitReservationPayload {
    /// RFC 3339 timestamp.
    pub approved_at: String,
    pub invoices: Vec<Invoice>,
    pub last_batch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Installment {
    pub id: String,
    pub amount_cents: u64,
    pub settlement_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpectedCashout {
    pub amount_cents: u64,
    pub settlement_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceResponse {
    pub id: String,
    pub short_id: String,
    pub external_id: String,
    pub amount_cents: u64,
    pub buyer_id: String,
    pub buyer_cnpj: String,
    pub status: String,
    pub description: String,
    pub created_at: String,
    pub installments: Vec<Installment>,
    pub expected_cashouts: Vec<ExpectedCashout>,
}
