//! Dataset collaborator seam: named splits of already-materialized documents.
//!
//! Acquisition and caching of raw datasets is out of scope; a [`DocSource`]
//! only reads what is on disk. Splits are loaded once and held read-only for
//! the process's evaluation lifetime.

use crate::errors::TaskError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Split {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "validation" => Ok(Split::Validation),
            "test" => Ok(Split::Test),
            other => Err(TaskError::UnknownSplit(other.to_string())),
        }
    }
}

/// Source of typed documents for a task.
pub trait DocSource: Send + Sync {
    type Doc;

    fn has_split(&self, split: Split) -> bool;

    /// Materialize a split. Errors are fatal: a missing file or a malformed
    /// record means the dataset is not in a usable state.
    fn load(&self, split: Split) -> Result<Vec<Self::Doc>, TaskError>;
}

/// File-backed source reading `<dir>/<split>.jsonl`, one JSON document per
/// line. Blank lines are skipped; anything else must parse.
pub struct JsonlSource<D> {
    dir: PathBuf,
    _marker: PhantomData<fn() -> D>,
}

impl<D> JsonlSource<D> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            _marker: PhantomData,
        }
    }

    fn split_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("{split}.jsonl"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl<D> DocSource for JsonlSource<D>
where
    D: DeserializeOwned + Send + Sync,
{
    type Doc = D;

    fn has_split(&self, split: Split) -> bool {
        self.split_path(split).is_file()
    }

    fn load(&self, split: Split) -> Result<Vec<D>, TaskError> {
        let path = self.split_path(split);
        let raw = std::fs::read_to_string(&path).map_err(|e| TaskError::DatasetIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut docs = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc = serde_json::from_str(line).map_err(|e| TaskError::DatasetParse {
                path: path.display().to_string(),
                line: lineno + 1,
                source: e,
            })?;
            docs.push(doc);
        }
        tracing::debug!(split = %split, docs = docs.len(), "loaded split");
        Ok(docs)
    }
}
