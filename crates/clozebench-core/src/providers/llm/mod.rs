pub mod fake;
pub mod http;

use crate::model::Loglikelihood;
use async_trait::async_trait;

/// Inference collaborator.
///
/// Given identical (context, continuation) and a deterministic model, the
/// returned log-probability must be deterministic and comparable across
/// candidates of the same document. The provider may batch or parallelize
/// internally; failures propagate to the caller unretried — retry policy
/// lives behind this seam, not in front of it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn loglikelihood(
        &self,
        context: &str,
        continuation: &str,
    ) -> anyhow::Result<Loglikelihood>;

    fn provider_name(&self) -> &'static str;
}
