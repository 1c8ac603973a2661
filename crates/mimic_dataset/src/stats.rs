//! Corpus statistics: a pure fold over the merged corpus.

use std::collections::BTreeMap;

use mimic_core::TrainingPair;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    pub total_conversations: usize,
    pub processed_files: usize,
    pub total_files: usize,
    /// Pairs per source file name.
    pub chat_sources: BTreeMap<String, usize>,
    /// Context length of every pair, corpus order.
    pub context_lengths: Vec<usize>,
    /// Response length in characters of every pair, corpus order.
    pub response_lengths: Vec<usize>,
}

impl CorpusStatistics {
    pub fn from_corpus(corpus: &[TrainingPair], processed_files: usize, total_files: usize) -> Self {
        let mut stats = Self {
            total_conversations: corpus.len(),
            processed_files,
            total_files,
            ..Self::default()
        };

        for pair in corpus {
            *stats
                .chat_sources
                .entry(pair.source_file.clone())
                .or_insert(0) += 1;
            stats.context_lengths.push(pair.context.len());
            stats.response_lengths.push(pair.response_chars());
        }

        stats
    }

    /// Number of pairs per context length.
    pub fn context_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for len in &self.context_lengths {
            *histogram.entry(*len).or_insert(0) += 1;
        }
        histogram
    }

    pub fn response_summary(&self) -> Option<LengthSummary> {
        LengthSummary::of(&self.response_lengths)
    }
}

/// Min / max / mean of a list of lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl LengthSummary {
    pub fn of(lengths: &[usize]) -> Option<Self> {
        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
        Some(Self { min, max, mean })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(context: &[&str], response: &str, source: &str) -> TrainingPair {
        TrainingPair::new(
            context.iter().map(|s| s.to_string()).collect(),
            response,
            source,
            "Chat",
        )
    }

    #[test]
    fn test_from_corpus() {
        let corpus = vec![
            pair(&["a", "b"], "hello", "x.json"),
            pair(&["c"], "да", "y.json"),
            pair(&["d", "e", "f"], "hey", "x.json"),
        ];

        let stats = CorpusStatistics::from_corpus(&corpus, 2, 5);

        assert_eq!(stats.total_conversations, 3);
        assert_eq!(stats.processed_files, 2);
        assert_eq!(stats.total_files, 5);
        assert_eq!(stats.chat_sources.get("x.json"), Some(&2));
        assert_eq!(stats.chat_sources.get("y.json"), Some(&1));
        assert_eq!(stats.context_lengths, vec![2, 1, 3]);
        assert_eq!(stats.response_lengths, vec![5, 2, 3]);
    }

    #[test]
    fn test_json_field_names() {
        let stats = CorpusStatistics::from_corpus(&[pair(&["a"], "ok", "x.json")], 1, 1);
        let value = serde_json::to_value(&stats).unwrap();

        for field in [
            "total_conversations",
            "processed_files",
            "total_files",
            "chat_sources",
            "context_lengths",
            "response_lengths",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["chat_sources"]["x.json"], 1);
    }

    #[test]
    fn test_histogram_and_summary() {
        let corpus = vec![
            pair(&["a"], "1234", "x.json"),
            pair(&["a"], "12", "x.json"),
            pair(&["a", "b", "c"], "123456", "x.json"),
        ];
        let stats = CorpusStatistics::from_corpus(&corpus, 1, 1);

        let histogram = stats.context_histogram();
        assert_eq!(histogram.get(&1), Some(&2));
        assert_eq!(histogram.get(&3), Some(&1));
        assert_eq!(histogram.get(&2), None);

        let summary = stats.response_summary().unwrap();
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 6);
        assert!((summary.mean - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_corpus() {
        let stats = CorpusStatistics::from_corpus(&[], 0, 3);
        assert_eq!(stats.total_conversations, 0);
        assert!(stats.response_summary().is_none());
        assert!(stats.context_histogram().is_empty());
    }
}
