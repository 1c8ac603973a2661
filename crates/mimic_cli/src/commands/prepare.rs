//! `mimic prepare`: corpus to train/eval JSONL.

use anyhow::{Context, Result};
use mimic_core::{PromptTemplate, TrainingPair};
use mimic_dataset::TrainingSplit;
use mimic_runtime::RuntimeConfig;
use serde_json::json;

use crate::output;

pub fn handle(config: &RuntimeConfig) -> Result<()> {
    let corpus = load_corpus(config)?;
    let job = config.training_job();
    let split = job.prepare(&corpus, &PromptTemplate::default())?;

    if output::is_json() {
        output::data(
            "split",
            &json!({
                "train": split.train.len(),
                "eval": split.eval.len(),
                "train_file": job.train_file,
                "eval_file": job.eval_file,
            }),
        );
        return Ok(());
    }
    report(&split, &job.train_file, &job.eval_file);
    Ok(())
}

pub(crate) fn load_corpus(config: &RuntimeConfig) -> Result<Vec<TrainingPair>> {
    let store = config.dataset_store();
    store.load_corpus().with_context(|| {
        format!(
            "Could not read {}; run `mimic build` first",
            store.dataset_path.display()
        )
    })
}

pub(crate) fn report(split: &TrainingSplit, train: &std::path::Path, eval: &std::path::Path) {
    output::success(&format!(
        "{} training and {} evaluation examples",
        split.train.len(),
        split.eval.len()
    ));
    output::kv("Train:", &train.display().to_string());
    output::kv("Eval:", &eval.display().to_string());
}
