use super::EvalArtifacts;
use anyhow::Context;
use std::path::Path;

pub fn render(artifacts: &EvalArtifacts) -> anyhow::Result<String> {
    serde_json::to_string_pretty(artifacts).context("failed to serialize artifacts")
}

pub fn write(artifacts: &EvalArtifacts, path: &Path) -> anyhow::Result<()> {
    let body = render(artifacts)?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write artifacts to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Split;
    use std::collections::BTreeMap;

    #[test]
    fn rendered_artifacts_carry_metrics_and_directionality() {
        let artifacts = EvalArtifacts {
            task: "winogrande".into(),
            split: Split::Validation,
            num_fewshot: 0,
            seed: 42,
            num_docs: 4,
            metrics: BTreeMap::from([("acc".to_string(), 0.75)]),
            higher_is_better: BTreeMap::from([("acc".to_string(), true)]),
            results: Vec::new(),
        };
        let body = render(&artifacts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["metrics"]["acc"], 0.75);
        assert_eq!(value["higher_is_better"]["acc"], true);
        assert_eq!(value["split"], "validation");
    }
}
