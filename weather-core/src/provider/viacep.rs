use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::LookupError;

use super::{LocalityResolver, truncate_body};

/// Resolves Brazilian postal codes (CEP) through the ViaCEP JSON API.
#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Client,
}

impl ViaCepResolver {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for ViaCEP")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn endpoint(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, postal_code)
    }
}

/// ViaCEP signals unknown codes with `"erro": true`, older deployments with `"erro": "true"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VcErrorFlag {
    Bool(bool),
    Text(String),
}

impl VcErrorFlag {
    fn is_set(&self) -> bool {
        match self {
            VcErrorFlag::Bool(flag) => *flag,
            VcErrorFlag::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VcResponse {
    #[serde(default)]
    localidade: String,
    erro: Option<VcErrorFlag>,
}

#[async_trait]
impl LocalityResolver for ViaCepResolver {
    async fn resolve_locality(&self, postal_code: &str) -> Result<String, LookupError> {
        let res = self.http.get(self.endpoint(postal_code)).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "ViaCEP returned non-success status");
            return Err(LookupError::Status(status));
        }

        let parsed: VcResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to parse ViaCEP response");
                return Err(LookupError::NotFound(postal_code.to_string()));
            }
        };

        if parsed.erro.as_ref().is_some_and(VcErrorFlag::is_set) || parsed.localidade.is_empty() {
            return Err(LookupError::NotFound(postal_code.to_string()));
        }

        tracing::debug!(postal_code, locality = %parsed.localidade, "Resolved postal code");
        Ok(parsed.localidade)
    }
}
