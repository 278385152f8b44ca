use crate::config::ResolverConfig;
use crate::domain::amount::decimal_amount;
use crate::domain::claims::read_claims_without_verification;
use crate::domain::mpm::MpmCode;
use crate::domain::ports::AmountDocumentSourceBox;
use crate::domain::tlv;
use crate::error::{PaymentError, Result};
use tracing::{debug, warn};

/// Media type of a compact signed token.
pub const JOSE_CONTENT_TYPE: &str = "application/jose";

/// Sub-tag of a merchant account information entry holding the location of
/// the amount document.
pub const URL_TAG: &str = "25";

/// Determines the amount of a PIX charge in cents.
///
/// Static codes carry the amount inline. Dynamic codes only carry a location;
/// the amount is read from the signed document published there. Each call
/// performs at most one fetch and never retries.
pub struct AmountResolver {
    source: AmountDocumentSourceBox,
    config: ResolverConfig,
}

impl AmountResolver {
    pub fn new(source: AmountDocumentSourceBox, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub async fn resolve(&self, code: &MpmCode) -> Result<u64> {
        if !code.transaction_amount.is_empty() {
            debug!(amount = %code.transaction_amount, "using inline transaction amount");
            return decimal_amount(&code.transaction_amount);
        }

        debug!("transaction amount not in payload, looking up amount document");
        let account = code.merchant_account_information.first().ok_or_else(|| {
            PaymentError::ResolutionError("no merchant account information".to_string())
        })?;
        let location = tlv::find_value(&account.value, URL_TAG).map_err(|e| {
            warn!(error = %e, tag = %account.tag, "embedded URL not found");
            PaymentError::ResolutionError(format!("embedded URL not found: {e}"))
        })?;

        let url = self.config.document_url(&location);
        debug!(%url, "fetching amount document");
        let document = self.source.fetch(&url).await?;
        if document.content_type.as_deref() != Some(JOSE_CONTENT_TYPE) {
            warn!(%url, content_type = ?document.content_type, "unexpected content type");
            return Err(PaymentError::NetworkError(format!(
                "unexpected content type: {}",
                document.content_type.as_deref().unwrap_or("<none>")
            )));
        }

        let claims = read_claims_without_verification(&document.body).map_err(|e| {
            warn!(error = %e, "token parse failure");
            PaymentError::ResolutionError(format!("token parse failure: {e}"))
        })?;

        let original = claims
            .get("valor")
            .and_then(|valor| valor.as_object())
            .ok_or_else(|| PaymentError::ResolutionError("missing key \"valor\"".to_string()))?
            .get("original")
            .and_then(|original| original.as_str())
            .ok_or_else(|| {
                PaymentError::ResolutionError("missing key \"valor.original\"".to_string())
            })?;

        debug!(amount = %original, "amount read from document");
        decimal_amount(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FetchedDocument;
    use crate::domain::tlv::TlvRecord;
    use crate::infrastructure::in_memory::InMemoryDocumentSource;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    fn token(claims: serde_json::Value) -> String {
        format!(
            "eyJhbGciOiJQUzI1NiJ9.{}.c2ln",
            URL_SAFE_NO_PAD.encode(claims.to_string())
        )
    }

    fn dynamic_code(location: &str) -> MpmCode {
        let account = format!(
            "{}{}",
            TlvRecord::new("00", "br.gov.bcb.pix").encode(),
            TlvRecord::new("25", location).encode()
        );
        MpmCode {
            merchant_account_information: vec![TlvRecord::new("26", account)],
            ..Default::default()
        }
    }

    fn jose(body: String) -> FetchedDocument {
        FetchedDocument {
            content_type: Some(JOSE_CONTENT_TYPE.to_string()),
            body,
        }
    }

    #[tokio::test]
    async fn test_inline_amount_skips_fetch() {
        let source = InMemoryDocumentSource::new();
        let resolver = AmountResolver::new(Box::new(source.clone()), ResolverConfig::default());
        let code = MpmCode {
            transaction_amount: "12.34".to_string(),
            ..Default::default()
        };

        assert_eq!(resolver.resolve(&code).await.unwrap(), 1234);
        assert!(source.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_inline_amount_format_error() {
        let resolver = AmountResolver::new(
            Box::new(InMemoryDocumentSource::new()),
            ResolverConfig::default(),
        );
        let code = MpmCode {
            transaction_amount: "12.3.4".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            resolver.resolve(&code).await,
            Err(PaymentError::FormatError(_))
        ));
    }

    #[tokio::test]
    async fn test_dynamic_amount_from_document() {
        let source = InMemoryDocumentSource::new();
        source
            .insert(
                "https://pix.example.com/abc",
                jose(token(json!({"valor": {"original": "5.00"}}))),
            )
            .await;
        let resolver = AmountResolver::new(Box::new(source.clone()), ResolverConfig::default());

        let amount = resolver
            .resolve(&dynamic_code("pix.example.com/abc"))
            .await
            .unwrap();
        assert_eq!(amount, 500);
        assert_eq!(
            source.requests().await,
            vec!["https://pix.example.com/abc".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_accounts() {
        let resolver = AmountResolver::new(
            Box::new(InMemoryDocumentSource::new()),
            ResolverConfig::default(),
        );
        assert!(matches!(
            resolver.resolve(&MpmCode::default()).await,
            Err(PaymentError::ResolutionError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_url_tag() {
        let resolver = AmountResolver::new(
            Box::new(InMemoryDocumentSource::new()),
            ResolverConfig::default(),
        );
        let code = MpmCode {
            merchant_account_information: vec![TlvRecord::new("26", "0014br.gov.bcb.pix")],
            ..Default::default()
        };
        let err = resolver.resolve(&code).await.unwrap_err();
        assert!(
            matches!(err, PaymentError::ResolutionError(ref msg) if msg.starts_with("embedded URL not found"))
        );
    }

    #[tokio::test]
    async fn test_wrong_content_type() {
        let source = InMemoryDocumentSource::new();
        source
            .insert(
                "https://pix.example.com/abc",
                FetchedDocument {
                    content_type: Some("application/json".to_string()),
                    body: token(json!({"valor": {"original": "5.00"}})),
                },
            )
            .await;
        let resolver = AmountResolver::new(Box::new(source), ResolverConfig::default());

        assert!(matches!(
            resolver.resolve(&dynamic_code("pix.example.com/abc")).await,
            Err(PaymentError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_location_is_network_error() {
        let resolver = AmountResolver::new(
            Box::new(InMemoryDocumentSource::new()),
            ResolverConfig::default(),
        );
        assert!(matches!(
            resolver.resolve(&dynamic_code("pix.example.com/gone")).await,
            Err(PaymentError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_token() {
        let source = InMemoryDocumentSource::new();
        source
            .insert("https://pix.example.com/abc", jose("not-a-token".to_string()))
            .await;
        let resolver = AmountResolver::new(Box::new(source), ResolverConfig::default());

        let err = resolver
            .resolve(&dynamic_code("pix.example.com/abc"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, PaymentError::ResolutionError(ref msg) if msg.starts_with("token parse failure"))
        );
    }

    #[tokio::test]
    async fn test_missing_claims() {
        let cases = [
            (json!({"calendario": {}}), "valor"),
            (json!({"valor": "5.00"}), "valor"),
            (json!({"valor": {"final": "5.00"}}), "original"),
            (json!({"valor": {"original": 500}}), "original"),
        ];
        for (claims, key) in cases {
            let source = InMemoryDocumentSource::new();
            source
                .insert("https://pix.example.com/abc", jose(token(claims.clone())))
                .await;
            let resolver = AmountResolver::new(Box::new(source), ResolverConfig::default());

            let err = resolver
                .resolve(&dynamic_code("pix.example.com/abc"))
                .await
                .unwrap_err();
            assert!(
                matches!(err, PaymentError::ResolutionError(ref msg) if msg.contains(key)),
                "{claims} should fail naming {key}"
            );
        }
    }
}
