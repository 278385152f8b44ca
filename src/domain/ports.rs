use super::checkout::{
    BillLimitReservationPayload, InvoiceResponse, LimitReservationPayload,
    LimitReservationResponse, PurchaseIntentionPayload, PurchaseIntentionResponse,
};
use super::mpm::MpmCode;
use crate::error::Result;
use async_trait::async_trait;

/// Splits a raw Merchant Presented QR string into its EMV fields.
pub trait MpmDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> Result<MpmCode>;
}

/// Raw response of an amount document fetch, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub content_type: Option<String>,
    pub body: String,
}

/// Fetches the signed document that carries a dynamic charge's amount.
#[async_trait]
pub trait AmountDocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument>;
}

/// Remote payment API: each call submits a built payload and parses the
/// response.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_purchase_intention(
        &self,
        payload: &PurchaseIntentionPayload,
    ) -> Result<PurchaseIntentionResponse>;

    async fn create_limit_reservation(
        &self,
        payload: &LimitReservationPayload,
    ) -> Result<LimitReservationResponse>;

    async fn bill_limit_reservation(
        &self,
        reservation_id: &str,
        payload: &BillLimitReservationPayload,
    ) -> Result<InvoiceResponse>;
}

pub type MpmDecoderBox = Box<dyn MpmDecoder>;
pub type AmountDocumentSourceBox = Box<dyn AmountDocumentSource>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
