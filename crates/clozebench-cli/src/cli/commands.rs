use crate::cli::args::{Cli, Command};
use crate::exit_codes;
use anyhow::Context;
use clozebench_core::config::{load_config, write_sample_config, EvalConfig, ProviderConfig};
use clozebench_core::dataset::{JsonlSource, Split};
use clozebench_core::decontamination::collect_queries;
use clozebench_core::engine::runner::{RunOptions, Runner};
use clozebench_core::providers::llm::{fake::FakeClient, http::HttpClient, LlmClient};
use clozebench_core::report;
use clozebench_core::task::Task;
use clozebench_tasks::winogrande::{Winogrande, WinograndeDoc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Run {
            config,
            split,
            limit,
            num_fewshot,
            parallel,
            seed,
            json,
        } => run(&config, split, limit, num_fewshot, parallel, seed, json).await,
        Command::Decontam { config, split } => decontam(&config, split),
        Command::Init { path } => init(&path),
    }
}

fn build_task(cfg: &EvalConfig) -> anyhow::Result<Winogrande<JsonlSource<WinograndeDoc>>> {
    match cfg.task.as_str() {
        "winogrande" => Ok(Winogrande::new(JsonlSource::new(cfg.dataset.clone()))),
        other => anyhow::bail!("unknown task: {other}"),
    }
}

fn build_client(cfg: &EvalConfig) -> Arc<dyn LlmClient> {
    match &cfg.provider {
        ProviderConfig::Fake => Arc::new(FakeClient::new()),
        ProviderConfig::Http { endpoint } => Arc::new(HttpClient::new(endpoint.clone())),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run(
    config: &Path,
    split: Option<Split>,
    limit: Option<usize>,
    num_fewshot: Option<usize>,
    parallel: Option<usize>,
    seed: Option<u64>,
    json: Option<PathBuf>,
) -> anyhow::Result<i32> {
    let cfg = load_config(config)?;
    let split = split.unwrap_or(cfg.split);
    let options = RunOptions {
        parallel: parallel.or(cfg.parallel).unwrap_or(4),
        num_fewshot: num_fewshot.unwrap_or(cfg.num_fewshot),
        limit: limit.or(cfg.limit),
        seed: seed.or(cfg.seed).unwrap_or(42),
    };

    let task = Arc::new(build_task(&cfg)?);
    let runner = Runner::new(build_client(&cfg), options);
    let artifacts = runner.run_task(task, split).await?;

    report::console::print_summary(&artifacts);
    // Machine-readable corpus metrics on stdout.
    println!(
        "{}",
        serde_json::to_string(&artifacts.metrics).context("failed to serialize metrics")?
    );
    if let Some(path) = json {
        report::json::write(&artifacts, &path)?;
        eprintln!("wrote artifacts to {}", path.display());
    }
    Ok(exit_codes::OK)
}

fn decontam(config: &Path, split: Option<Split>) -> anyhow::Result<i32> {
    let cfg = load_config(config)?;
    let split = split.unwrap_or(cfg.split);
    let task = build_task(&cfg)?;
    let docs = task.docs(split)?;
    for query in collect_queries(&task, &docs) {
        println!("{query}");
    }
    Ok(exit_codes::OK)
}

fn init(path: &Path) -> anyhow::Result<i32> {
    write_sample_config(path)?;
    eprintln!("wrote sample config to {}", path.display());
    Ok(exit_codes::OK)
}
