//! Fine-tuning launcher.
//!
//! Training itself is delegated to an external command. mimic writes the
//! formatted split and the hyperparameters, runs the command, and checks that a
//! checkpoint directory came out of it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Instant, SystemTime};

use async_trait::async_trait;
use mimic_constant::defaults;
use mimic_core::{PromptTemplate, TrainingPair};
use mimic_dataset::{write_jsonl, TrainingSplit};
use mimic_observability::{record_duration, record_error, training_span};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};

use crate::error::{Result, RuntimeError};

/// Hyperparameters handed to the training command as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingArguments {
    pub base_model: String,
    pub num_train_epochs: u32,
    pub per_device_train_batch_size: u32,
    pub per_device_eval_batch_size: u32,
    pub gradient_accumulation_steps: u32,
    pub warmup_steps: u32,
    pub weight_decay: f32,
    pub logging_steps: u32,
    pub save_strategy: String,
    pub save_total_limit: u32,
    pub load_best_model_at_end: bool,
    pub report_to: String,
    /// Tokenizer truncation length.
    pub max_length: u32,
    pub eval_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingArguments {
    fn default() -> Self {
        Self {
            base_model: defaults::BASE_MODEL.to_string(),
            num_train_epochs: defaults::EPOCHS,
            per_device_train_batch_size: defaults::TRAIN_BATCH_SIZE,
            per_device_eval_batch_size: defaults::EVAL_BATCH_SIZE,
            gradient_accumulation_steps: defaults::GRADIENT_ACCUMULATION_STEPS,
            warmup_steps: defaults::WARMUP_STEPS,
            weight_decay: defaults::WEIGHT_DECAY,
            logging_steps: defaults::LOGGING_STEPS,
            save_strategy: "epoch".to_string(),
            save_total_limit: defaults::SAVE_TOTAL_LIMIT,
            load_best_model_at_end: true,
            report_to: "none".to_string(),
            max_length: defaults::MAX_SEQUENCE_LENGTH,
            eval_fraction: defaults::EVAL_FRACTION,
            seed: defaults::SEED,
        }
    }
}

/// Where a fine-tuning run reads from and writes to.
#[derive(Debug, Clone)]
pub struct TrainingJob {
    pub train_file: PathBuf,
    pub eval_file: PathBuf,
    /// Hyperparameters JSON written before launch.
    pub config_file: PathBuf,
    pub output_dir: PathBuf,
    pub arguments: TrainingArguments,
}

impl TrainingJob {
    /// Format, shuffle and split the corpus, then write both JSONL files.
    pub fn prepare(&self, corpus: &[TrainingPair], template: &PromptTemplate) -> Result<TrainingSplit> {
        if corpus.is_empty() {
            return Err(RuntimeError::Training(
                "the corpus is empty, build the dataset first".to_string(),
            ));
        }
        let split = TrainingSplit::prepare(
            corpus,
            template,
            self.arguments.eval_fraction,
            self.arguments.seed,
        );
        write_jsonl(&self.train_file, &split.train)?;
        write_jsonl(&self.eval_file, &split.eval)?;
        info!(
            train = split.train.len(),
            eval = split.eval.len(),
            train.file = %self.train_file.display(),
            "Training split written"
        );
        Ok(split)
    }

    pub fn write_arguments(&self) -> Result<()> {
        if let Some(parent) = self.config_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.arguments)?;
        std::fs::write(&self.config_file, json)?;
        Ok(())
    }
}

#[async_trait]
pub trait FineTuner: Send + Sync {
    /// Run to completion and return the checkpoint directory.
    async fn fine_tune(&self, job: &TrainingJob) -> Result<PathBuf>;
}

/// Runs an external program as
/// `<program> <args>... --train T --eval E --config C --output O`.
#[derive(Debug, Clone)]
pub struct CommandTrainer {
    program: String,
    args: Vec<String>,
    workdir: PathBuf,
}

impl CommandTrainer {
    pub fn new(program: impl Into<String>, args: Vec<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            workdir: workdir.into(),
        }
    }

    /// Split a whitespace-separated command line, e.g. `python3 train.py --fp16`.
    pub fn from_command_line(command: &str, workdir: impl Into<PathBuf>) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| {
            RuntimeError::Config(
                "no training command: set MIMIC_TRAIN_COMMAND or pass --command".to_string(),
            )
        })?;
        Ok(Self::new(program, parts.collect(), workdir))
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn job_args(job: &TrainingJob) -> Vec<(&'static str, &Path)> {
        vec![
            ("--train", job.train_file.as_path()),
            ("--eval", job.eval_file.as_path()),
            ("--config", job.config_file.as_path()),
            ("--output", job.output_dir.as_path()),
        ]
    }

    async fn run(&self, job: &TrainingJob) -> Result<PathBuf> {
        job.write_arguments()?;
        let before = checkpoint_files(&job.output_dir)?;

        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args).current_dir(&self.workdir);
        for (flag, path) in Self::job_args(job) {
            command.arg(flag).arg(path);
        }
        // Progress output of the training script goes straight to the terminal.
        command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        info!(command = %self.command_line(), "Launching fine-tuning");
        let status = command.status().await.map_err(|e| {
            RuntimeError::Training(format!("could not start '{}': {e}", self.program))
        })?;

        if !status.success() {
            return Err(RuntimeError::Training(format!(
                "'{}' exited with {}",
                self.command_line(),
                status
            )));
        }
        if !job.output_dir.is_dir() {
            return Err(RuntimeError::Training(format!(
                "'{}' finished but {} does not exist",
                self.command_line(),
                job.output_dir.display()
            )));
        }

        let after = checkpoint_files(&job.output_dir)?;
        let written = after
            .iter()
            .filter(|(path, modified)| before.get(*path) != Some(*modified))
            .count();
        if written == 0 {
            return Err(RuntimeError::Training(format!(
                "'{}' finished but wrote nothing to {}",
                self.command_line(),
                job.output_dir.display()
            )));
        }
        info!(files = written, "Checkpoint files written");

        Ok(job.output_dir.clone())
    }
}

/// Every file under `dir` with its modification time. Empty when `dir` is absent.
fn checkpoint_files(dir: &Path) -> Result<BTreeMap<PathBuf, Option<SystemTime>>> {
    let mut files = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if metadata.is_dir() {
                pending.push(entry.path());
            } else {
                files.insert(entry.path(), metadata.modified().ok());
            }
        }
    }
    Ok(files)
}

#[async_trait]
impl FineTuner for CommandTrainer {
    async fn fine_tune(&self, job: &TrainingJob) -> Result<PathBuf> {
        let span = training_span!(self.command_line(), job.output_dir.display());
        async {
            let start = Instant::now();
            let result = self.run(job).await;
            record_duration("duration_ms", start.elapsed());
            match &result {
                Ok(dir) => info!(checkpoint = %dir.display(), "Fine-tuning finished"),
                Err(e) => record_error(e),
            }
            result
        }
        .instrument(span)
        .await
    }
}
