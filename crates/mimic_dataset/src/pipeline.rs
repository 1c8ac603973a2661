//! Aggregate + persist, the batch dataset build.

use std::path::PathBuf;

use mimic_core::{Extractor, ExtractorConfig};
use tracing::warn;

use crate::aggregate::{aggregate, Aggregation};
use crate::error::{DatasetError, Result};
use crate::stats::CorpusStatistics;
use crate::store::DatasetStore;
use crate::volume::DataVolume;

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub input_dir: PathBuf,
    pub store: DatasetStore,
    pub extractor: ExtractorConfig,
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct DatasetBuild {
    pub aggregation: Aggregation,
    pub statistics: CorpusStatistics,
    pub volume: DataVolume,
}

/// Extract every chat log under `input_dir` and write the corpus and statistics.
///
/// Nothing is written when no pair was found; the caller gets
/// [`DatasetError::NoTrainingData`] with hints instead.
pub fn build_dataset(config: &DatasetConfig) -> Result<DatasetBuild> {
    let extractor = Extractor::new(config.extractor.clone());
    let aggregation = aggregate(&config.input_dir, &extractor)?;

    if aggregation.is_empty() {
        warn!(
            input.dir = %config.input_dir.display(),
            owner = %config.extractor.owner,
            "No training pairs extracted"
        );
        return Err(DatasetError::no_training_data(
            &config.input_dir,
            &config.extractor.owner,
        ));
    }

    let statistics = aggregation.statistics();
    config.store.save(&aggregation.corpus, &statistics)?;

    Ok(DatasetBuild {
        volume: DataVolume::assess(aggregation.corpus.len()),
        aggregation,
        statistics,
    })
}
