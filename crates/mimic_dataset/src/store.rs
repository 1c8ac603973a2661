//! Corpus and statistics artifacts on disk.

use std::fs;
use std::path::{Path, PathBuf};

use mimic_core::TrainingPair;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::stats::CorpusStatistics;

/// The two artifacts produced by a dataset build: the corpus and its statistics.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    pub dataset_path: PathBuf,
    pub stats_path: PathBuf,
}

impl DatasetStore {
    pub fn new(dataset_path: impl Into<PathBuf>, stats_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            stats_path: stats_path.into(),
        }
    }

    /// Write both artifacts as pretty JSON. Non-ASCII text is written verbatim.
    pub fn save(&self, corpus: &[TrainingPair], stats: &CorpusStatistics) -> Result<()> {
        write_json(&self.dataset_path, &corpus)?;
        info!(path = %self.dataset_path.display(), pairs = corpus.len(), "Corpus saved");
        write_json(&self.stats_path, stats)?;
        info!(path = %self.stats_path.display(), "Statistics saved");
        Ok(())
    }

    pub fn load_corpus(&self) -> Result<Vec<TrainingPair>> {
        read_json(&self.dataset_path)
    }

    pub fn load_statistics(&self) -> Result<CorpusStatistics> {
        read_json(&self.stats_path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
