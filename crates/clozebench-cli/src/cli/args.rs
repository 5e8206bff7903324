use clap::{Parser, Subcommand};
use clozebench_core::dataset::Split;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "clozebench",
    about = "Benchmark language models on cloze tasks with partial-evaluation scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a task and print corpus metrics.
    Run {
        #[arg(long, default_value = "eval.yaml")]
        config: PathBuf,
        /// Override the configured split.
        #[arg(long)]
        split: Option<Split>,
        /// Cap the number of evaluated documents.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        num_fewshot: Option<usize>,
        #[arg(long)]
        parallel: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write full artifacts (per-document rows included) as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Emit one decontamination query per document for an external scanner.
    Decontam {
        #[arg(long, default_value = "eval.yaml")]
        config: PathBuf,
        #[arg(long)]
        split: Option<Split>,
    },
    /// Write a sample config file.
    Init {
        #[arg(long, default_value = "eval.yaml")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_parses_overrides() {
        let cli = Cli::try_parse_from([
            "clozebench",
            "run",
            "--config",
            "eval.yaml",
            "--split",
            "train",
            "--limit",
            "100",
            "--num-fewshot",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                split,
                limit,
                num_fewshot,
                ..
            } => {
                assert_eq!(split, Some(Split::Train));
                assert_eq!(limit, Some(100));
                assert_eq!(num_fewshot, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_split_name_is_rejected() {
        assert!(Cli::try_parse_from(["clozebench", "run", "--split", "dev"]).is_err());
    }
}
