pub mod console;
pub mod json;

use crate::dataset::Split;
use crate::model::DocResultRow;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything one evaluation run produced. `metrics` holds the corpus-level
/// values (e.g. `{"acc": 0.75}`); `higher_is_better` is the parallel
/// directionality declaration, stated rather than computed.
#[derive(Debug, Clone, Serialize)]
pub struct EvalArtifacts {
    pub task: String,
    pub split: Split,
    pub num_fewshot: usize,
    pub seed: u64,
    pub num_docs: usize,
    pub metrics: BTreeMap<String, f64>,
    pub higher_is_better: BTreeMap<String, bool>,
    pub results: Vec<DocResultRow>,
}
