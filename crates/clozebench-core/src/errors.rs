//! Error types for task and dataset preconditions.
//!
//! Every condition here is a precondition violation: a malformed document,
//! an answer key outside its domain, or a split the task does not expose.
//! None of them is recoverable at this layer; callers propagate them as
//! fatal for the document (or run) being evaluated.

use crate::dataset::Split;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The sentence has no blank marker; the document is structurally invalid.
    #[error("no blank marker in sentence: {sentence:?}")]
    MissingBlank { sentence: String },

    /// The answer key is outside the task's answer domain.
    #[error("answer {answer:?} is not one of \"1\"/\"2\"")]
    InvalidAnswer { answer: String },

    /// The requested split does not exist for this task.
    #[error("split {split} is not available for task {task}")]
    SplitUnavailable { task: String, split: Split },

    /// A split name that no task understands.
    #[error("unknown split: {0:?} (expected train, validation or test)")]
    UnknownSplit(String),

    /// Result count does not match the number of requests the task issued.
    #[error("wrong number of results for task {task}: expected {expected}, got {got}")]
    ResultArity {
        task: String,
        expected: usize,
        got: usize,
    },

    #[error("failed to read dataset file {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset record at {path}:{line}: {source}")]
    DatasetParse {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
