//! Reads the payload of a compact signed token (`header.payload.signature`).
//!
//! The signature is never checked. Claims read here are advisory and must not
//! back any settlement decision.

use crate::error::{PaymentError, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

/// Claim name to arbitrary JSON value.
pub type Claims = Map<String, Value>;

/// Decodes the middle segment of a compact token into its claims without
/// verifying the signature.
pub fn read_claims_without_verification(token: &str) -> Result<Claims> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [_header, payload, _signature] = segments.as_slice() else {
        return Err(PaymentError::FormatError(format!(
            "token has {} segments, expected 3",
            segments.len()
        )));
    };

    // Some issuers keep the padding even though the compact form forbids it.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| PaymentError::FormatError(format!("token payload is not base64url: {e}")))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(other) => Err(PaymentError::FormatError(format!(
            "token payload is not a JSON object: {other}"
        ))),
        Err(e) => Err(PaymentError::FormatError(format!(
            "token payload is not JSON: {e}"
        ))),
    }
}
