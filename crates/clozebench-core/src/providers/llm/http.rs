use super::LlmClient;
use crate::model::Loglikelihood;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

/// Provider backed by an HTTP scoring endpoint.
///
/// The endpoint receives `{"context": ..., "continuation": ...}` and answers
/// `{"logprob": <float>, "is_greedy": <bool>}`. Tokenization and batching
/// are the endpoint's business; one request yields one scalar.
pub struct HttpClient {
    pub endpoint: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmClient for HttpClient {
    async fn loglikelihood(
        &self,
        context: &str,
        continuation: &str,
    ) -> anyhow::Result<Loglikelihood> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "context": context,
                "continuation": continuation,
            }))
            .send()
            .await
            .with_context(|| format!("scoring request to {} failed", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("scoring endpoint {} returned {}", self.endpoint, status);
        }

        let ll: Loglikelihood = resp
            .json()
            .await
            .context("malformed scoring response")?;
        Ok(ll)
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
