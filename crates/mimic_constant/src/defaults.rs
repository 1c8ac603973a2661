//! Default paths, decoding parameters and training hyperparameters.

/// Directory holding exported chat logs, relative to the working directory.
pub const INPUT_DIR: &str = "chats";
/// Merged corpus artifact.
pub const DATASET_FILE: &str = "training_dataset.json";
/// Corpus statistics artifact.
pub const STATS_FILE: &str = "dataset_statistics.json";
/// Training split artifacts.
pub const TRAIN_FILE: &str = "train.jsonl";
pub const EVAL_FILE: &str = "eval.jsonl";
/// Hyperparameters handed to the training command.
pub const TRAINING_CONFIG_FILE: &str = "training_args.json";
/// Where the fine-tuned checkpoint is written.
pub const CHECKPOINT_DIR: &str = "my_dialogpt";

/// Inference backend
pub const BASE_URL: &str = "http://localhost:8000/v1";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const BASE_MODEL: &str = "microsoft/DialoGPT-small";

/// Decoding
pub const MAX_NEW_TOKENS: u32 = 100;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 50;
pub const REPETITION_PENALTY: f32 = 1.1;
pub const NO_REPEAT_NGRAM_SIZE: u32 = 3;
/// Number of candidates offered in interactive mode.
pub const CANDIDATES: usize = 3;
/// Temperature increment between successive candidates.
pub const TEMPERATURE_STEP: f32 = 0.1;

/// Training
pub const EPOCHS: u32 = 3;
pub const TRAIN_BATCH_SIZE: u32 = 2;
pub const EVAL_BATCH_SIZE: u32 = 2;
pub const GRADIENT_ACCUMULATION_STEPS: u32 = 4;
pub const WARMUP_STEPS: u32 = 50;
pub const WEIGHT_DECAY: f32 = 0.01;
pub const LOGGING_STEPS: u32 = 25;
pub const SAVE_TOTAL_LIMIT: u32 = 2;
pub const MAX_SEQUENCE_LENGTH: u32 = 256;
pub const EVAL_FRACTION: f64 = 0.1;
pub const SEED: u64 = 42;

/// Data-volume thresholds (pairs)
pub const MIN_RECOMMENDED_PAIRS: usize = 500;
pub const GOOD_PAIRS: usize = 2000;
