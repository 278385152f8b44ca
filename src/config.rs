//! Configuration values passed explicitly into the resolver, the gateway and
//! the checkout flow.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Settings for fetching a dynamic charge's amount document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Scheme prefixed to the location read from the QR payload.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Request timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

impl ResolverConfig {
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the document URL for a location such as `pix.example.com/abc`.
    pub fn document_url(&self, location: &str) -> String {
        format!("{}://{}", self.scheme, location)
    }
}

/// Connection settings for the remote payment API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Bearer token sent with every request.
    pub auth_token: String,

    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,
}

fn default_gateway_timeout() -> u64 {
    30
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            timeout_secs: default_gateway_timeout(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Values of the checkout requests that do not come from the decoded code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutProfile {
    pub supplier_company_id: String,
    pub merchant_document_number: String,
    pub email: String,
    pub url_callback: String,
    pub contact_phone: String,
    pub contact_channel: String,
    pub origin: String,
    pub client_ip: String,
    pub payment_option: Vec<u32>,
    pub notes: String,
    pub steps: CheckoutSteps,
}

impl Default for CheckoutProfile {
    fn default() -> Self {
        Self {
            supplier_company_id: String::new(),
            merchant_document_number: String::new(),
            email: String::new(),
            url_callback: String::new(),
            contact_phone: String::new(),
            contact_channel: "whatsapp".to_string(),
            origin: "link".to_string(),
            client_ip: "127.0.0.1".to_string(),
            payment_option: vec![7],
            notes: String::new(),
            steps: CheckoutSteps::default(),
        }
    }
}

impl CheckoutProfile {
    /// Loads a profile from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Which checkout calls to perform. A disabled step disables the ones after
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSteps {
    pub purchase_intention: bool,
    pub limit_reservation: bool,
    pub bill: bool,
}

impl Default for CheckoutSteps {
    fn default() -> Self {
        Self {
            purchase_intention: true,
            limit_reservation: true,
            bill: true,
        }
    }
}
