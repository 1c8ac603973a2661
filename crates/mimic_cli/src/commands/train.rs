//! `mimic train`: prepare the split and hand it to the training command.

use anyhow::Result;
use mimic_core::PromptTemplate;
use mimic_dataset::DataVolume;
use mimic_runtime::{CommandTrainer, FineTuner, RuntimeConfig};

use crate::commands::prepare;
use crate::output;

pub async fn handle(config: RuntimeConfig, command: Option<String>) -> Result<()> {
    let command_line = command.or_else(|| config.train_command.clone()).unwrap_or_default();
    let trainer = CommandTrainer::from_command_line(&command_line, &config.workdir)?;

    let corpus = prepare::load_corpus(&config)?;
    let volume = DataVolume::assess(corpus.len());
    if !volume.is_sufficient() {
        output::warning(volume.headline());
        output::dim(volume.advice());
    }

    let job = config.training_job();
    let split = job.prepare(&corpus, &PromptTemplate::default())?;
    prepare::report(&split, &job.train_file, &job.eval_file);

    output::header(&format!("Fine-tuning {}", job.arguments.base_model));
    output::dim(&format!("Running {}", trainer.command_line()));
    let checkpoint = trainer.fine_tune(&job).await?;

    output::success(&format!("Model saved to {}", checkpoint.display()));
    output::dim("Serve the checkpoint and run `mimic check` to verify it is reachable.");
    Ok(())
}
