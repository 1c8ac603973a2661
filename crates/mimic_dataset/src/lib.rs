//! mimic-dataset: builds the fine-tuning corpus from a directory of chat exports.
//!
//! ```text
//! chats/*.json ──▶ Extractor (per file) ──▶ Aggregation ──▶ DatasetStore
//!                                              │             ├─ training_dataset.json
//!                                              │             └─ dataset_statistics.json
//!                                              └──▶ TrainingSplit ──▶ train.jsonl / eval.jsonl
//! ```
//!
//! Files are independent: a broken export is reported and skipped, never fatal.

pub mod aggregate;
pub mod error;
pub mod pipeline;
pub mod split;
pub mod stats;
pub mod store;
pub mod volume;

pub use aggregate::{aggregate, Aggregation, FailedFile};
pub use error::{DatasetError, Result};
pub use pipeline::{build_dataset, DatasetBuild, DatasetConfig};
pub use split::{write_jsonl, TrainingSplit};
pub use stats::{CorpusStatistics, LengthSummary};
pub use store::DatasetStore;
pub use volume::DataVolume;
