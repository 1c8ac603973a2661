//! Training/evaluation split of formatted dialogues.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use mimic_core::{PromptTemplate, TrainingPair};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::Result;

/// Formatted training texts, shuffled and split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingSplit {
    pub train: Vec<String>,
    pub eval: Vec<String>,
}

impl TrainingSplit {
    /// Render every pair as a training target and split off `eval_fraction` of them.
    ///
    /// The eval share is rounded up, but a corpus of one pair goes entirely to
    /// training and at least one pair always stays in training.
    pub fn prepare(
        corpus: &[TrainingPair],
        template: &PromptTemplate,
        eval_fraction: f64,
        seed: u64,
    ) -> Self {
        let mut texts: Vec<String> = corpus
            .iter()
            .map(|pair| template.format(&pair.context, Some(pair.response.as_str())))
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        texts.shuffle(&mut rng);

        let eval_len = eval_len(texts.len(), eval_fraction);
        let eval = texts.split_off(texts.len() - eval_len);
        Self { train: texts, eval }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.eval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn eval_len(total: usize, eval_fraction: f64) -> usize {
    if total < 2 || eval_fraction <= 0.0 {
        return 0;
    }
    // Tolerate float noise so 10 * 0.1 rounds up to 1, not 2.
    let wanted = (total as f64 * eval_fraction - 1e-9).ceil() as usize;
    wanted.clamp(1, total - 1)
}

#[derive(Serialize)]
struct TextRecord<'a> {
    text: &'a str,
}

/// One `{"text": ...}` object per line.
pub fn write_jsonl(path: &Path, texts: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for text in texts {
        serde_json::to_writer(&mut writer, &TextRecord { text })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(n: usize) -> Vec<TrainingPair> {
        (0..n)
            .map(|i| TrainingPair::new(vec![format!("q{i}")], format!("a{i}"), "x.json", "X"))
            .collect()
    }

    #[test]
    fn test_eval_len() {
        assert_eq!(eval_len(0, 0.1), 0);
        assert_eq!(eval_len(1, 0.1), 0);
        assert_eq!(eval_len(2, 0.1), 1);
        assert_eq!(eval_len(10, 0.1), 1);
        assert_eq!(eval_len(11, 0.1), 2);
        assert_eq!(eval_len(100, 0.1), 10);
        assert_eq!(eval_len(10, 1.0), 9);
        assert_eq!(eval_len(10, 0.0), 0);
    }

    #[test]
    fn test_prepare_formats_and_splits() {
        let template = PromptTemplate::default();
        let split = TrainingSplit::prepare(&corpus(20), &template, 0.1, 42);

        assert_eq!(split.train.len(), 18);
        assert_eq!(split.eval.len(), 2);
        assert!(split
            .train
            .iter()
            .chain(split.eval.iter())
            .all(|t| t.starts_with("A: q") && t.ends_with("<|endoftext|>")));
    }

    #[test]
    fn test_prepare_is_deterministic_per_seed() {
        let template = PromptTemplate::default();
        let a = TrainingSplit::prepare(&corpus(30), &template, 0.1, 7);
        let b = TrainingSplit::prepare(&corpus(30), &template, 0.1, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_jsonl() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("train.jsonl");
        let texts = vec!["A: hi\nB: yo<|endoftext|>".to_string(), "B: ок".to_string()];

        write_jsonl(&path, &texts).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["text"], texts[0]);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["text"], "B: ок");
    }
}
