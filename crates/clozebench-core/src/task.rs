//! Task capability interface.
//!
//! A task bundles everything the runner needs to benchmark a model on one
//! dataset: which splits exist, how a document renders as an exemplar, which
//! scoring requests a document produces, and how per-document results reduce
//! to corpus metrics. The runner drives evaluation purely through this
//! interface; it never inspects concrete task types.

use crate::dataset::Split;
use crate::errors::TaskError;
use crate::metrics::Aggregation;
use crate::model::LoglikelihoodRequest;
use std::collections::BTreeMap;

pub trait Task: Send + Sync {
    type Doc: Clone + PartialEq + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    fn has_training_docs(&self) -> bool;
    fn has_validation_docs(&self) -> bool;
    fn has_test_docs(&self) -> bool;

    /// Training documents, materialized at most once per task instance and
    /// held for the rest of the process (load-once, no invalidation).
    fn training_docs(&self) -> Result<&[Self::Doc], TaskError>;

    fn validation_docs(&self) -> Result<Vec<Self::Doc>, TaskError>;

    fn test_docs(&self) -> Result<Vec<Self::Doc>, TaskError> {
        Err(TaskError::SplitUnavailable {
            task: self.name().to_string(),
            split: Split::Test,
        })
    }

    /// Split dispatch used by the runner. Availability is checked before any
    /// file is touched so an unsupported split fails with a split error, not
    /// a read error.
    fn docs(&self, split: Split) -> Result<Vec<Self::Doc>, TaskError> {
        let available = match split {
            Split::Train => self.has_training_docs(),
            Split::Validation => self.has_validation_docs(),
            Split::Test => self.has_test_docs(),
        };
        if !available {
            return Err(TaskError::SplitUnavailable {
                task: self.name().to_string(),
                split,
            });
        }
        match split {
            Split::Train => Ok(self.training_docs()?.to_vec()),
            Split::Validation => self.validation_docs(),
            Split::Test => self.test_docs(),
        }
    }

    /// Render the document as it appears when used as a fewshot exemplar
    /// for other documents (for cloze tasks: the gold-filled context).
    fn doc_to_text(&self, doc: &Self::Doc) -> Result<String, TaskError>;

    /// The continuation the model is scored on.
    fn doc_to_target(&self, doc: &Self::Doc) -> Result<String, TaskError>;

    fn should_decontaminate(&self) -> bool {
        false
    }

    /// Query string for an external contamination scanner. Only emitted
    /// here, never interpreted.
    fn doc_to_decontamination_query(&self, _doc: &Self::Doc) -> Option<String> {
        None
    }

    /// Build the ordered scoring requests for one document given the
    /// assembled fewshot prompt. Order is significant: `process_results`
    /// receives log-likelihoods positionally aligned with these requests.
    fn construct_requests(
        &self,
        doc: &Self::Doc,
        ctx: &str,
    ) -> Result<Vec<LoglikelihoodRequest>, TaskError>;

    /// Reduce one document's log-likelihoods to submetric values.
    fn process_results(
        &self,
        doc: &Self::Doc,
        results: &[f64],
    ) -> Result<BTreeMap<String, f64>, TaskError>;

    /// How each submetric aggregates across documents.
    fn aggregation(&self) -> BTreeMap<String, Aggregation>;

    /// Declared directionality per submetric (true = higher is better).
    fn higher_is_better(&self) -> BTreeMap<String, bool>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal multiple-choice task used by runner and fewshot tests.

    use super::*;
    use crate::metrics::argmax;

    #[derive(Debug, Clone, PartialEq)]
    pub struct ChoiceDoc {
        pub prompt: String,
        pub choices: Vec<String>,
        pub gold: usize,
    }

    pub struct ChoiceTask {
        pub train: Vec<ChoiceDoc>,
        pub validation: Vec<ChoiceDoc>,
    }

    impl Task for ChoiceTask {
        type Doc = ChoiceDoc;

        fn name(&self) -> &'static str {
            "choice"
        }

        fn has_training_docs(&self) -> bool {
            true
        }
        fn has_validation_docs(&self) -> bool {
            true
        }
        fn has_test_docs(&self) -> bool {
            false
        }

        fn training_docs(&self) -> Result<&[ChoiceDoc], TaskError> {
            Ok(&self.train)
        }

        fn validation_docs(&self) -> Result<Vec<ChoiceDoc>, TaskError> {
            Ok(self.validation.clone())
        }

        fn doc_to_text(&self, doc: &ChoiceDoc) -> Result<String, TaskError> {
            Ok(doc.prompt.clone())
        }

        fn doc_to_target(&self, doc: &ChoiceDoc) -> Result<String, TaskError> {
            Ok(format!(" {}", doc.choices[doc.gold]))
        }

        fn construct_requests(
            &self,
            doc: &ChoiceDoc,
            ctx: &str,
        ) -> Result<Vec<LoglikelihoodRequest>, TaskError> {
            Ok(doc
                .choices
                .iter()
                .map(|choice| LoglikelihoodRequest {
                    context: ctx.to_string(),
                    continuation: format!(" {choice}"),
                })
                .collect())
        }

        fn process_results(
            &self,
            doc: &ChoiceDoc,
            results: &[f64],
        ) -> Result<BTreeMap<String, f64>, TaskError> {
            let correct = argmax(results) == doc.gold;
            Ok(BTreeMap::from([(
                "acc".to_string(),
                if correct { 1.0 } else { 0.0 },
            )]))
        }

        fn aggregation(&self) -> BTreeMap<String, Aggregation> {
            BTreeMap::from([("acc".to_string(), Aggregation::Mean)])
        }

        fn higher_is_better(&self) -> BTreeMap<String, bool> {
            BTreeMap::from([("acc".to_string(), true)])
        }
    }

    pub fn choice_doc(prompt: &str, choices: &[&str], gold: usize) -> ChoiceDoc {
        ChoiceDoc {
            prompt: prompt.to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
            gold,
        }
    }
}
