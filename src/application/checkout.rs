use crate::config::CheckoutProfile;
use crate::domain::checkout::{
    BillLimitReservationPayload, Cart, Contact, Invoice, LimitReservationPayload,
    PurchaseIntentionPayload,
};
use crate::domain::mpm::PixData;
use crate::domain::payment::CheckoutReceipt;
use crate::domain::ports::PaymentGatewayBox;
use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

/// Runs the purchase intention, limit reservation and billing calls for a
/// decoded PIX charge.
///
/// Calls are strictly sequential; the first failure aborts the flow.
pub struct CheckoutService {
    gateway: PaymentGatewayBox,
    profile: CheckoutProfile,
}

impl CheckoutService {
    pub fn new(gateway: PaymentGatewayBox, profile: CheckoutProfile) -> Self {
        Self { gateway, profile }
    }

    pub async fn checkout(&self, pix: &PixData, bar_code: &str) -> Result<CheckoutReceipt> {
        let mut receipt = CheckoutReceipt::default();
        let steps = self.profile.steps;
        if !steps.purchase_intention {
            return Ok(receipt);
        }

        let intention = self
            .gateway
            .create_purchase_intention(&self.purchase_intention(pix.transaction_amount))
            .await?;
        info!(id = %intention.id, "purchase intention created");
        receipt.purchase_intention_id = Some(intention.id.clone());
        if !steps.limit_reservation {
            return Ok(receipt);
        }

        let reservation = self
            .gateway
            .create_limit_reservation(&LimitReservationPayload {
                ip: self.profile.client_ip.clone(),
                payment_option: self.profile.payment_option.clone(),
                purchase_intention_id: intention.id,
            })
            .await?;
        info!(id = %reservation.id, "limit reservation created");
        receipt.limit_reservation_id = Some(reservation.id.clone());
        if !steps.bill {
            return Ok(receipt);
        }

        let invoice = self
            .gateway
            .bill_limit_reservation(
                &reservation.id,
                &self.bill(pix.transaction_amount, bar_code),
            )
            .await?;
        info!(id = %invoice.id, status = %invoice.status, "limit reservation billed");
        receipt.invoice = Some(invoice);
        Ok(receipt)
    }

    fn purchase_intention(&self, amount_cents: u64) -> PurchaseIntentionPayload {
        PurchaseIntentionPayload {
            supplier_company_id: self.profile.supplier_company_id.clone(),
            merchant_document_number: self.profile.merchant_document_number.clone(),
            email: self.profile.email.clone(),
            url_callback: self.profile.url_callback.clone(),
            external_id: Uuid::new_v4().to_string(),
            amount_cents,
            contact: Contact {
                phone: self.profile.contact_phone.clone(),
                channel: self.profile.contact_channel.clone(),
            },
            cart: Cart {
                shipping_cents: 0,
                discount_cents: 0,
                items: Vec::new(),
            },
            origin: self.profile.origin.clone(),
        }
    }

    fn bill(&self, amount_cents: u64, bar_code: &str) -> BillLimitReservationPayload {
        BillLimitReservationPayload {
            approved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            invoices: vec![Invoice {
                amount_cents,
                external_id: Uuid::new_v4().to_string(),
                nfe_id: bar_code.to_string(),
                nfe_number: bar_code.to_string(),
                notes: self.profile.notes.clone(),
            }],
            last_batch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckoutSteps;
    use crate::domain::mpm::MpmCode;
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::{GatewayCall, GatewayStep, InMemoryPaymentGateway};

    fn pix(amount: u64) -> PixData {
        PixData::new(MpmCode::default(), amount)
    }

    #[tokio::test]
    async fn test_full_checkout() {
        let gateway = InMemoryPaymentGateway::new();
        let service = CheckoutService::new(Box::new(gateway.clone()), CheckoutProfile::default());

        let receipt = service.checkout(&pix(1050), "000201...").await.unwrap();
        assert_eq!(receipt.purchase_intention_id.as_deref(), Some("pi-1"));
        assert_eq!(receipt.limit_reservation_id.as_deref(), Some("lr-2"));
        assert_eq!(receipt.invoice.unwrap().amount_cents, 1050);

        let calls = gateway.calls().await;
        assert_eq!(calls.len(), 3);
        match &calls[1] {
            GatewayCall::LimitReservation(payload) => {
                assert_eq!(payload.purchase_intention_id, "pi-1");
                assert_eq!(payload.payment_option, vec![7]);
            }
            other => panic!("unexpected call {other:?}"),
        }
        match &calls[2] {
            GatewayCall::Bill {
                reservation_id,
                payload,
            } => {
                assert_eq!(reservation_id, "lr-2");
                assert!(payload.last_batch);
                assert_eq!(payload.invoices[0].nfe_id, "000201...");
                assert!(chrono::DateTime::parse_from_rfc3339(&payload.approved_at).is_ok());
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_disabled_step_stops_the_flow() {
        let gateway = InMemoryPaymentGateway::new();
        let profile = CheckoutProfile {
            steps: CheckoutSteps {
                purchase_intention: true,
                limit_reservation: false,
                bill: true,
            },
            ..Default::default()
        };
        let service = CheckoutService::new(Box::new(gateway.clone()), profile);

        let receipt = service.checkout(&pix(100), "x").await.unwrap();
        assert!(receipt.purchase_intention_id.is_some());
        assert!(receipt.limit_reservation_id.is_none());
        assert!(receipt.invoice.is_none());
        assert_eq!(gateway.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_steps() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.reject(GatewayStep::LimitReservation).await;
        let service = CheckoutService::new(Box::new(gateway.clone()), CheckoutProfile::default());

        let result = service.checkout(&pix(100), "x").await;
        assert!(matches!(result, Err(PaymentError::GatewayError(_))));
        assert_eq!(gateway.calls().await.len(), 1);
    }
}
