//! Fewshot prompt assembly.
//!
//! A prompt is a sequence of exemplar blocks joined by [`FEWSHOT_DELIMITER`],
//! with the gold-filled context of the document under test as the final
//! block. Tasks that score candidates by splicing rely on that structure:
//! they replace exactly the last block, so the delimiter here and in the
//! task's context splicing must be the same constant.

use crate::errors::TaskError;
use crate::task::Task;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Block separator between fewshot exemplars.
pub const FEWSHOT_DELIMITER: &str = "\n\n";

/// Assemble the prompt for one document.
///
/// With `num_fewshot == 0` this is just the document's own gold context.
/// Otherwise `num_fewshot` exemplars are sampled from the training split
/// with a seeded shuffle (StdRng, so the same seed reproduces the same
/// prompt), rendered as text + target, and the gold context is appended as
/// the last block. The document under test is never used as its own
/// exemplar.
pub fn fewshot_context<T: Task>(
    task: &T,
    doc: &T::Doc,
    num_fewshot: usize,
    seed: u64,
) -> Result<String, TaskError> {
    let gold = task.doc_to_text(doc)?;
    if num_fewshot == 0 {
        return Ok(gold);
    }

    let train = task.training_docs()?;
    let mut order: Vec<usize> = (0..train.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut blocks = Vec::with_capacity(num_fewshot + 1);
    for &i in &order {
        if blocks.len() == num_fewshot {
            break;
        }
        let exemplar = &train[i];
        if exemplar == doc {
            continue;
        }
        blocks.push(format!(
            "{}{}",
            task.doc_to_text(exemplar)?,
            task.doc_to_target(exemplar)?
        ));
    }
    blocks.push(gold);
    Ok(blocks.join(FEWSHOT_DELIMITER))
}
