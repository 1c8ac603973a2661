//! `mimic build`: chat exports to training corpus.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use mimic_dataset::{build_dataset, DatasetBuild, DatasetError};
use mimic_observability::{pipeline_span, record_duration, record_error};
use mimic_runtime::RuntimeConfig;
use serde_json::json;

use crate::output;

/// Pairs echoed after a build so the user can eyeball the extraction.
const SAMPLE_PAIRS: usize = 3;

pub fn handle(
    mut config: RuntimeConfig,
    input: Option<PathBuf>,
    owner: Option<String>,
    window: Option<usize>,
) -> Result<()> {
    if let Some(input) = input {
        config = config.with_input_dir(input);
    }
    if let Some(owner) = owner {
        config = config.with_owner(owner);
    }
    if let Some(window) = window {
        if window == 0 {
            bail!("--window must be at least 1");
        }
        config.window = window;
    }

    let dataset = config.dataset_config()?;
    let span = pipeline_span!("build", dataset.input_dir.display());
    let _guard = span.enter();

    let spinner = output::spinner(&format!(
        "Extracting dialogues from {}",
        dataset.input_dir.display()
    ));
    let start = Instant::now();
    let result = build_dataset(&dataset);
    record_duration("duration_ms", start.elapsed());

    let build = match result {
        Ok(build) => build,
        Err(DatasetError::NoTrainingData { dir, hints }) => {
            output::spinner_error(&spinner, "No training pairs found");
            output::header("Things to check:");
            for hint in &hints {
                output::item("-", hint);
            }
            bail!("no training pairs in {}", dir.display());
        }
        Err(e) => {
            record_error(&e);
            output::spinner_error(&spinner, "Dataset build failed");
            return Err(e.into());
        }
    };
    output::spinner_success(
        &spinner,
        &format!(
            "Saved {} dialogues to {}",
            build.aggregation.corpus.len(),
            dataset.store.dataset_path.display()
        ),
    );

    report(&build);
    Ok(())
}

fn report(build: &DatasetBuild) {
    let aggregation = &build.aggregation;

    if output::is_json() {
        output::data(
            "build",
            &json!({
                "pairs": aggregation.corpus.len(),
                "processed_files": aggregation.processed_files,
                "total_files": aggregation.total_files,
                "failed_files": aggregation
                    .failed_files
                    .iter()
                    .map(|f| json!({ "path": f.path, "reason": f.reason }))
                    .collect::<Vec<_>>(),
                "sufficient": build.volume.is_sufficient(),
                "statistics": build.statistics,
            }),
        );
        return;
    }

    println!();
    output::kv(
        "Files processed:",
        &format!("{}/{}", aggregation.processed_files, aggregation.total_files),
    );
    for failed in &aggregation.failed_files {
        output::warning(&format!(
            "Skipped {}: {}",
            failed.path.display(),
            failed.reason
        ));
    }
    output::kv("Dialogues:", &aggregation.corpus.len().to_string());

    println!();
    output::header("Examples:");
    for pair in aggregation.corpus.iter().take(SAMPLE_PAIRS) {
        output::dim(&format!("[{}]", pair.chat_name));
        output::dialogue(&pair.context, &pair.response);
    }

    println!();
    if build.volume.is_sufficient() {
        output::success(build.volume.headline());
    } else {
        output::warning(build.volume.headline());
    }
    output::dim(build.volume.advice());
}
