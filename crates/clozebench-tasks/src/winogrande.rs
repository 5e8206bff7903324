//! WinoGrande: fill-in-a-blank commonsense sentences with binary options,
//! scored by partial evaluation.
//!
//! Instead of comparing full-sentence likelihoods across candidates, only
//! the text *after* the blank is scored, conditioned on a context that ends
//! right after the candidate substitution. That isolates the model's
//! preference from length and frequency artifacts of the candidates
//! themselves.

use clozebench_core::dataset::{DocSource, Split};
use clozebench_core::errors::TaskError;
use clozebench_core::fewshot::FEWSHOT_DELIMITER;
use clozebench_core::metrics::{argmax, Aggregation};
use clozebench_core::model::LoglikelihoodRequest;
use clozebench_core::task::Task;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blank marker in WinoGrande sentences. Exactly one occurrence per
/// sentence is a dataset invariant.
const BLANK: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinograndeDoc {
    pub sentence: String,
    pub option1: String,
    pub option2: String,
    /// `"1"` or `"2"`, naming the gold option.
    pub answer: String,
}

/// Map the answer key to a candidate index. Total over {"1","2"} and
/// nothing else; any other value fails closed.
pub fn answer_to_num(answer: &str) -> Result<usize, TaskError> {
    match answer {
        "1" => Ok(0),
        "2" => Ok(1),
        other => Err(TaskError::InvalidAnswer {
            answer: other.to_string(),
        }),
    }
}

fn blank_index(doc: &WinograndeDoc) -> Result<usize, TaskError> {
    doc.sentence
        .find(BLANK)
        .ok_or_else(|| TaskError::MissingBlank {
            sentence: doc.sentence.clone(),
        })
}

/// Substitute the candidate into the sentence and drop everything after the
/// blank: the text up to the marker, then the option.
pub fn partial_context(doc: &WinograndeDoc, option: &str) -> Result<String, TaskError> {
    let loc = blank_index(doc)?;
    Ok(format!("{}{}", &doc.sentence[..loc], option))
}

/// The continuation to score: everything after the blank, trimmed and
/// prefixed with a single space. Identical no matter which candidate was
/// substituted, which keeps the scoring boundary consistent across options.
pub fn partial_target(doc: &WinograndeDoc) -> Result<String, TaskError> {
    let loc = blank_index(doc)? + BLANK.len_utf8();
    Ok(format!(" {}", doc.sentence[loc..].trim()))
}

/// Splice a candidate context into an assembled fewshot prompt.
///
/// The prompt's final block is the gold-filled context of the document
/// under test (put there by `doc_to_text`); exactly that block is replaced
/// by the candidate's partial context, so the block count is preserved. A
/// prompt with zero exemplar blocks passes the candidate through unchanged.
pub fn append_context(ctx: &str, partial_ctx: &str) -> String {
    if ctx.is_empty() {
        return partial_ctx.to_string();
    }
    let mut blocks: Vec<&str> = ctx.split(FEWSHOT_DELIMITER).collect();
    let count = blocks.len();
    blocks.pop();
    blocks.push(partial_ctx);
    debug_assert_eq!(
        blocks.len(),
        count,
        "last-block replacement must preserve the block count"
    );
    blocks.join(FEWSHOT_DELIMITER)
}

/// The WinoGrande task over some document source. Exposes `train` and
/// `validation` splits; there is no public `test` split.
pub struct Winogrande<S> {
    source: S,
    // Materialized once on first access, read-only afterwards.
    training: OnceCell<Vec<WinograndeDoc>>,
}

impl<S> Winogrande<S>
where
    S: DocSource<Doc = WinograndeDoc>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            training: OnceCell::new(),
        }
    }

    fn gold_option<'a>(&self, doc: &'a WinograndeDoc) -> Result<&'a str, TaskError> {
        match answer_to_num(&doc.answer)? {
            0 => Ok(&doc.option1),
            _ => Ok(&doc.option2),
        }
    }
}

impl<S> Task for Winogrande<S>
where
    S: DocSource<Doc = WinograndeDoc>,
{
    type Doc = WinograndeDoc;

    fn name(&self) -> &'static str {
        "winogrande"
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

    fn training_docs(&self) -> Result<&[WinograndeDoc], TaskError> {
        self.training
            .get_or_try_init(|| self.source.load(Split::Train))
            .map(Vec::as_slice)
    }

    fn validation_docs(&self) -> Result<Vec<WinograndeDoc>, TaskError> {
        self.source.load(Split::Validation)
    }

    /// The gold partial context: how this document reads when it serves as
    /// a fewshot exemplar for other documents.
    fn doc_to_text(&self, doc: &WinograndeDoc) -> Result<String, TaskError> {
        partial_context(doc, self.gold_option(doc)?)
    }

    fn doc_to_target(&self, doc: &WinograndeDoc) -> Result<String, TaskError> {
        partial_target(doc)
    }

    fn should_decontaminate(&self) -> bool {
        true
    }

    fn doc_to_decontamination_query(&self, doc: &WinograndeDoc) -> Option<String> {
        Some(doc.sentence.clone())
    }

    /// One request per candidate, in declaration order (option1, option2),
    /// each splicing its partial context into the fewshot prompt. The
    /// continuation is the same target for both.
    fn construct_requests(
        &self,
        doc: &WinograndeDoc,
        ctx: &str,
    ) -> Result<Vec<LoglikelihoodRequest>, TaskError> {
        let target = partial_target(doc)?;
        let mut requests = Vec::with_capacity(2);
        for option in [&doc.option1, &doc.option2] {
            let partial_ctx = partial_context(doc, option)?;
            requests.push(LoglikelihoodRequest {
                context: append_context(ctx, &partial_ctx),
                continuation: target.clone(),
            });
        }
        Ok(requests)
    }

    fn process_results(
        &self,
        doc: &WinograndeDoc,
        results: &[f64],
    ) -> Result<BTreeMap<String, f64>, TaskError> {
        if results.len() != 2 {
            return Err(TaskError::ResultArity {
                task: self.name().to_string(),
                expected: 2,
                got: results.len(),
            });
        }
        let gold = answer_to_num(&doc.answer)?;
        let correct = argmax(results) == gold;
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
