use crate::dataset::Split;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    Fake,
    Http { endpoint: String },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Fake
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub version: u32,
    pub task: String,
    pub split: Split,
    /// Directory holding `<split>.jsonl` files.
    pub dataset: PathBuf,
    #[serde(default)]
    pub num_fewshot: usize,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub parallel: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let cfg: EvalConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.task.is_empty() {
        return Err(ConfigError("config has no task".into()));
    }
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, include_str!("../../../eval.yaml"))
        .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_cfg(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_a_minimal_config_with_defaults() {
        let f = write_cfg(
            "version: 1\ntask: winogrande\nsplit: validation\ndataset: data/winogrande\n",
        );
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.task, "winogrande");
        assert_eq!(cfg.split, Split::Validation);
        assert_eq!(cfg.num_fewshot, 0);
        assert!(matches!(cfg.provider, ProviderConfig::Fake));
    }

    #[test]
    fn rejects_unsupported_version() {
        let f = write_cfg("version: 2\ntask: winogrande\nsplit: validation\ndataset: d\n");
        let err = load_config(f.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn rejects_empty_task() {
        let f = write_cfg("version: 1\ntask: \"\"\nsplit: validation\ndataset: d\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn parses_http_provider() {
        let f = write_cfg(
            "version: 1\ntask: winogrande\nsplit: validation\ndataset: d\nprovider:\n  kind: http\n  endpoint: http://localhost:8080/score\n",
        );
        let cfg = load_config(f.path()).unwrap();
        match cfg.provider {
            ProviderConfig::Http { endpoint } => {
                assert_eq!(endpoint, "http://localhost:8080/score")
            }
            other => panic!("unexpected provider: {other:?}"),
        }
    }

    #[test]
    fn sample_config_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.yaml");
        write_sample_config(&path).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.version, SUPPORTED_CONFIG_VERSION);
    }
}
