use crate::domain::checkout::{
    BillLimitReservationPayload, InvoiceResponse, LimitReservationPayload,
    LimitReservationResponse, PurchaseIntentionPayload, PurchaseIntentionResponse,
};
use crate::domain::ports::{AmountDocumentSource, FetchedDocument, PaymentGateway};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory source of amount documents keyed by URL.
///
/// Records every requested URL, so tests can assert what would have been
/// fetched. Unknown URLs fail like an unreachable host.
#[derive(Default, Clone)]
pub struct InMemoryDocumentSource {
    documents: Arc<RwLock<HashMap<String, FetchedDocument>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl InMemoryDocumentSource {
    /// Creates a new, empty in-memory document source.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, url: impl Into<String>, document: FetchedDocument) {
        let mut documents = self.documents.write().await;
        documents.insert(url.into(), document);
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl AmountDocumentSource for InMemoryDocumentSource {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        self.requests.write().await.push(url.to_string());
        let documents = self.documents.read().await;
        documents
            .get(url)
            .cloned()
            .ok_or_else(|| PaymentError::NetworkError(format!("no document at {url}")))
    }
}

/// One call received by [`InMemoryPaymentGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    PurchaseIntention(PurchaseIntentionPayload),
    LimitReservation(LimitReservationPayload),
    Bill {
        reservation_id: String,
        payload: BillLimitReservationPayload,
    },
}

/// A thread-safe in-memory payment API.
///
/// Hands out sequential ids and keeps every submitted payload. Can be told to
/// reject a given step to exercise the fail-fast path.
#[derive(Default, Clone)]
pub struct InMemoryPaymentGateway {
    calls: Arc<RwLock<Vec<GatewayCall>>>,
    reject: Arc<RwLock<Option<GatewayStep>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStep {
    PurchaseIntention,
    LimitReservation,
    Bill,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory gateway accepting every call.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reject(&self, step: GatewayStep) {
        *self.reject.write().await = Some(step);
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, step: GatewayStep, call: GatewayCall) -> Result<usize> {
        if *self.reject.read().await == Some(step) {
            return Err(PaymentError::GatewayError(format!(
                "{step:?} rejected with status 422"
            )));
        }
        let mut calls = self.calls.write().await;
        calls.push(call);
        Ok(calls.len())
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_purchase_intention(
        &self,
        payload: &PurchaseIntentionPayload,
    ) -> Result<PurchaseIntentionResponse> {
        let n = self
            .record(
                GatewayStep::PurchaseIntention,
                GatewayCall::PurchaseIntention(payload.clone()),
            )
            .await?;
        Ok(PurchaseIntentionResponse {
            id: format!("pi-{n}"),
        })
    }

    async fn create_limit_reservation(
        &self,
        payload: &LimitReservationPayload,
    ) -> Result<LimitReservationResponse> {
        let n = self
            .record(
                GatewayStep::LimitReservation,
                GatewayCall::LimitReservation(payload.clone()),
            )
            .await?;
        Ok(LimitReservationResponse {
            id: format!("lr-{n}"),
        })
    }

    async fn bill_limit_reservation(
        &self,
        reservation_id: &str,
        payload: &BillLimitReservationPayload,
    ) -> Result<InvoiceResponse> {
        let n = self
            .record(
                GatewayStep::Bill,
                GatewayCall::Bill {
                    reservation_id: reservation_id.to_string(),
                    payload: payload.clone(),
                },
            )
            .await?;
        Ok(InvoiceResponse {
            id: format!("inv-{n}"),
            amount_cents: payload.invoices.iter().map(|i| i.amount_cents).sum(),
            status: "pending".to_string(),
            ..Default::default()
        })
    }
}
