use super::LlmClient;
use crate::model::Loglikelihood;
use async_trait::async_trait;

/// Deterministic in-process provider for tests and dry runs.
///
/// Scores can be scripted per context suffix; the candidate substitution is
/// always the tail of a spliced context, so suffix matching selects scores
/// per candidate without caring about the fewshot prefix. Unscripted pairs
/// fall back to a length penalty, which is stable and comparable.
#[derive(Debug, Default)]
pub struct FakeClient {
    scores: Vec<(String, f64)>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_when_context_ends_with(mut self, suffix: impl Into<String>, logprob: f64) -> Self {
        self.scores.push((suffix.into(), logprob));
        self
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn loglikelihood(
        &self,
        context: &str,
        continuation: &str,
    ) -> anyhow::Result<Loglikelihood> {
        for (suffix, logprob) in &self.scores {
            if context.ends_with(suffix.as_str()) {
                return Ok(Loglikelihood {
                    logprob: *logprob,
                    is_greedy: false,
                });
            }
        }
        Ok(Loglikelihood {
            logprob: -((context.len() + continuation.len()) as f64),
            is_greedy: false,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
