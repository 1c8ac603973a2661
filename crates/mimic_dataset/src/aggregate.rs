//! Merge pairs from every chat export in a directory.

use std::path::{Path, PathBuf};

use mimic_core::{Extractor, TrainingPair};
use tracing::{info, warn};

use crate::error::{DatasetError, Result};
use crate::stats::CorpusStatistics;

/// File that could not be read or parsed; excluded from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Pairs in per-file order; files are visited sorted by path.
    pub corpus: Vec<TrainingPair>,
    /// Files matching `*.json`.
    pub total_files: usize,
    /// Files that contributed at least one pair.
    pub processed_files: usize,
    pub failed_files: Vec<FailedFile>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn statistics(&self) -> CorpusStatistics {
        CorpusStatistics::from_corpus(&self.corpus, self.processed_files, self.total_files)
    }
}

/// Extract every `*.json` file in `dir`.
///
/// A file that fails to load is logged, recorded in `failed_files` and skipped; the
/// run always continues. Only a missing directory, or one whose path is not UTF-8
/// (glob patterns are strings), is an error.
pub fn aggregate(dir: &Path, extractor: &Extractor) -> Result<Aggregation> {
    if !dir.is_dir() {
        return Err(DatasetError::MissingInputDir(dir.to_path_buf()));
    }

    let span = tracing::info_span!("dataset.aggregate", input.dir = %dir.display());
    let _guard = span.enter();

    let dir_str = dir
        .to_str()
        .ok_or_else(|| DatasetError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern = format!("{}/*.json", glob::Pattern::escape(dir_str));

    let mut aggregation = Aggregation::default();
    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                aggregation.total_files += 1;
                warn!(path = %e.path().display(), error = %e, "Unreadable chat log");
                aggregation.failed_files.push(FailedFile {
                    path: e.path().to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        aggregation.total_files += 1;

        match extractor.extract_file(&path) {
            Ok(pairs) if pairs.is_empty() => {
                info!(file = %path.display(), "No dialogues found");
            }
            Ok(pairs) => {
                info!(file = %path.display(), pairs = pairs.len(), "Extracted dialogues");
                aggregation.processed_files += 1;
                aggregation.corpus.extend(pairs);
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping chat log");
                aggregation.failed_files.push(FailedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        total_files = aggregation.total_files,
        processed_files = aggregation.processed_files,
        failed_files = aggregation.failed_files.len(),
        pairs = aggregation.corpus.len(),
        "Aggregation finished"
    );

    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::ExtractorConfig;
    use std::fs;
    use tempfile::TempDir;

    fn chat(owner_reply: &str) -> String {
        format!(
            r#"{{"type":"personal_chat","name":"Chat","messages":[
                {{"type":"message","from":"Bob","text":"question"}},
                {{"type":"message","from":"Me","text":"{owner_reply}"}}
            ]}}"#
        )
    }

    #[test]
    fn test_missing_dir() {
        let extractor = Extractor::new(ExtractorConfig::new("Me"));
        let err = aggregate(Path::new("/definitely/not/here"), &extractor).unwrap_err();
        assert!(matches!(err, DatasetError::MissingInputDir(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_dir_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = TempDir::new().unwrap();
        let dir = root.path().join(OsStr::from_bytes(b"chats\xff"));
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("a.json"), chat("answer")).unwrap();

        let extractor = Extractor::new(ExtractorConfig::new("Me"));
        let err = aggregate(&dir, &extractor).unwrap_err();
        assert!(matches!(err, DatasetError::NonUtf8Path(path) if path == dir));
    }

    #[test]
    fn test_only_json_files_are_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), chat("answer a")).unwrap();
        fs::write(dir.path().join("notes.txt"), chat("ignored")).unwrap();

        let extractor = Extractor::new(ExtractorConfig::new("Me"));
        let aggregation = aggregate(dir.path(), &extractor).unwrap();

        assert_eq!(aggregation.total_files, 1);
        assert_eq!(aggregation.corpus.len(), 1);
        assert_eq!(aggregation.corpus[0].response, "answer a");
    }

    #[test]
    fn test_files_without_pairs_are_not_processed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), chat("answer")).unwrap();
        fs::write(
            dir.path().join("group.json"),
            r#"{"type":"private_group","messages":[]}"#,
        )
        .unwrap();

        let extractor = Extractor::new(ExtractorConfig::new("Me"));
        let aggregation = aggregate(dir.path(), &extractor).unwrap();

        assert_eq!(aggregation.total_files, 2);
        assert_eq!(aggregation.processed_files, 1);
        assert!(aggregation.failed_files.is_empty());
    }
}
