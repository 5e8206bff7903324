//! Leakage-query extraction for an external contamination scanner.
//!
//! The corpus-level detection algorithm lives elsewhere; this side only
//! emits, per document, the string that process should check against a
//! model's training data.

use crate::task::Task;

/// Collect the decontamination queries for a set of documents. Tasks that
/// opt out (`should_decontaminate() == false`) yield nothing.
pub fn collect_queries<T: Task>(task: &T, docs: &[T::Doc]) -> Vec<String> {
    if !task.should_decontaminate() {
        return Vec::new();
    }
    docs.iter()
        .filter_map(|doc| task.doc_to_decontamination_query(doc))
        .collect()
}
