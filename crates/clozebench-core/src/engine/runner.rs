use crate::dataset::Split;
use crate::fewshot::fewshot_context;
use crate::model::DocResultRow;
use crate::providers::llm::LlmClient;
use crate::report::EvalArtifacts;
use crate::task::Task;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Max documents scored concurrently.
    pub parallel: usize,
    pub num_fewshot: usize,
    /// Cap on evaluated documents (None = whole split).
    pub limit: Option<usize>,
    /// Base seed for fewshot sampling; each document derives its own seed
    /// from it, so completion order cannot change the prompts.
    pub seed: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: 4,
            num_fewshot: 0,
            limit: None,
            seed: 42,
        }
    }
}

pub struct Runner {
    pub client: Arc<dyn LlmClient>,
    pub options: RunOptions,
}

impl Runner {
    pub fn new(client: Arc<dyn LlmClient>, options: RunOptions) -> Self {
        Self { client, options }
    }

    /// Evaluate `task` over one split.
    ///
    /// Per-document work (prompt assembly, request construction, scoring,
    /// result processing) is independent and runs under a semaphore-bounded
    /// JoinSet. Rows are collected in completion order and sorted by
    /// document index for deterministic artifacts; aggregation is a pure
    /// reduction at the end. Any document failure aborts the run — there is
    /// no partial-failure scoring.
    pub async fn run_task<T>(&self, task: Arc<T>, split: Split) -> anyhow::Result<EvalArtifacts>
    where
        T: Task + 'static,
    {
        let mut docs = task.docs(split)?;
        if let Some(limit) = self.options.limit {
            docs.truncate(limit);
        }
        let total = docs.len();
        tracing::info!(
            task = task.name(),
            split = %split,
            docs = total,
            num_fewshot = self.options.num_fewshot,
            provider = self.client.provider_name(),
            "starting evaluation"
        );

        let sem = Arc::new(Semaphore::new(self.options.parallel.max(1)));
        let mut join_set = JoinSet::new();
        for (index, doc) in docs.into_iter().enumerate() {
            let permit = sem.clone().acquire_owned().await?;
            let task = Arc::clone(&task);
            let client = Arc::clone(&self.client);
            let num_fewshot = self.options.num_fewshot;
            let seed = self.options.seed.wrapping_add(index as u64);
            join_set.spawn(async move {
                let _permit = permit;
                let ctx = fewshot_context(task.as_ref(), &doc, num_fewshot, seed)?;
                let requests = task.construct_requests(&doc, &ctx)?;
                let mut lls = Vec::with_capacity(requests.len());
                for req in &requests {
                    let ll = client.loglikelihood(&req.context, &req.continuation).await?;
                    // Only the log-probability total matters for this
                    // scoring scheme; the greedy signal is dropped.
                    lls.push(ll.logprob);
                }
                let metrics = task.process_results(&doc, &lls)?;
                anyhow::Ok(DocResultRow { index, metrics })
            });
        }

        let mut rows = Vec::with_capacity(total);
        while let Some(res) = join_set.join_next().await {
            rows.push(res??);
        }

        // Deterministic order for artifacts regardless of completion order.
        rows.sort_by_key(|r| r.index);

        let mut metrics = BTreeMap::new();
        for (name, agg) in task.aggregation() {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|r| r.metrics.get(&name).copied())
                .collect();
            metrics.insert(name, agg.apply(&values));
        }
        tracing::info!(task = task.name(), ?metrics, "evaluation finished");

        Ok(EvalArtifacts {
            task: task.name().to_string(),
            split,
            num_fewshot: self.options.num_fewshot,
            seed: self.options.seed,
            num_docs: total,
            metrics,
            higher_is_better: task.higher_is_better(),
            results: rows,
        })
    }
}
