//! mimic-runtime: configuration plus the two stages that talk to the outside
//! world, reply generation over HTTP and fine-tuning through an external command.

pub mod config;
pub mod error;
pub mod generator;
pub mod trainer;

pub use config::{Backend, RuntimeConfig, ENV_KEYS};
pub use error::{Result, RuntimeError};
pub use generator::{GeneratorConfig, ReplyGenerator};
pub use trainer::{CommandTrainer, FineTuner, TrainingArguments, TrainingJob};
