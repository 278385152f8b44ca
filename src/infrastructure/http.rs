//! reqwest-backed adapters for the amount document fetch and the payment API.

use crate::config::{GatewayConfig, ResolverConfig};
use crate::domain::checkout::{
    BillLimitReservationPayload, InvoiceResponse, LimitReservationPayload,
    LimitReservationResponse, PurchaseIntentionPayload, PurchaseIntentionResponse,
};
use crate::domain::ports::{AmountDocumentSource, FetchedDocument, PaymentGateway};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

fn map_reqwest_error(url: &str, e: reqwest::Error) -> PaymentError {
    if e.is_timeout() {
        PaymentError::NetworkError(format!("request to {url} timed out"))
    } else {
        PaymentError::NetworkError(format!("request to {url} failed: {e}"))
    }
}

/// Fetches amount documents with a single GET per call. No retries.
pub struct HttpDocumentSource {
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PaymentError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AmountDocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::NetworkError(format!(
                "GET {url} returned status {status}"
            )));
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        debug!(%url, ?content_type, bytes = body.len(), "amount document fetched");
        Ok(FetchedDocument { content_type, body })
    }
}

/// JSON client for the remote payment API.
///
/// The bearer token comes from [`GatewayConfig`]; nothing is read from the
/// process environment here.
pub struct HttpPaymentGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl HttpPaymentGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PaymentError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn post<P: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
        expected: StatusCode,
    ) -> Result<T> {
        let url = self.config.url(path);
        debug!(%url, "submitting gateway request");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.config.auth_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(&url, e))?;
        if status != expected {
            return Err(PaymentError::GatewayError(format!(
                "unexpected status code {} with response: {body}",
                status.as_u16()
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::GatewayError(format!("error decoding response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_purchase_intention(
        &self,
        payload: &PurchaseIntentionPayload,
    ) -> Result<PurchaseIntentionResponse> {
        self.post("v1/purchase-intentions", payload, StatusCode::CREATED)
            .await
    }

    async fn create_limit_reservation(
        &self,
        payload: &LimitReservationPayload,
    ) -> Result<LimitReservationResponse> {
        self.post("v1/limit-reservations", payload, StatusCode::CREATED)
            .await
    }

    async fn bill_limit_reservation(
        &self,
        reservation_id: &str,
        payload: &BillLimitReservationPayload,
    ) -> Result<InvoiceResponse> {
        self.post(
            &format!("v1/limit-reservations/{reservation_id}/bill"),
            payload,
            StatusCode::OK,
        )
        .await
    }
}
