use super::EvalArtifacts;

pub fn print_summary(artifacts: &EvalArtifacts) {
    eprintln!(
        "Task: {} split={} docs={} fewshot={} seed={}",
        artifacts.task, artifacts.split, artifacts.num_docs, artifacts.num_fewshot, artifacts.seed
    );
    for (name, value) in &artifacts.metrics {
        let dir = match artifacts.higher_is_better.get(name) {
            Some(true) => " (higher is better)",
            Some(false) => " (lower is better)",
            None => "",
        };
        eprintln!("  {name} = {value:.4}{dir}");
    }
}
