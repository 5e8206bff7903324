use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scoring query for the inference provider: the log-probability of
/// `continuation` conditioned on `context`. Requests are ephemeral; they are
/// built per document, submitted once and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoglikelihoodRequest {
    pub context: String,
    pub continuation: String,
}

/// Provider answer to a [`LoglikelihoodRequest`].
///
/// `is_greedy` reports whether the continuation is the provider's greedy
/// decode of the context. Partial-evaluation scoring compares `logprob`
/// totals only and ignores the greedy signal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Loglikelihood {
    pub logprob: f64,
    #[serde(default)]
    pub is_greedy: bool,
}

/// Per-document metric values, keyed by submetric name.
#[derive(Debug, Clone, Serialize)]
pub struct DocResultRow {
    /// Position of the document within its split (stable ordering key).
    pub index: usize,
    pub metrics: BTreeMap<String, f64>,
}
