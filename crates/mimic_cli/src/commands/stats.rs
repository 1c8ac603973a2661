//! `mimic stats`: summary of the last build.

use anyhow::{Context, Result};
use mimic_dataset::{CorpusStatistics, DataVolume};
use mimic_runtime::RuntimeConfig;

use crate::output;

pub fn handle(config: &RuntimeConfig) -> Result<()> {
    let store = config.dataset_store();
    let stats = store.load_statistics().with_context(|| {
        format!(
            "Could not read {}; run `mimic build` first",
            store.stats_path.display()
        )
    })?;

    if output::is_json() {
        output::data("statistics", &stats);
        return Ok(());
    }
    render(&stats);
    Ok(())
}

fn render(stats: &CorpusStatistics) {
    output::header("Corpus");
    output::kv("Dialogues:", &stats.total_conversations.to_string());
    output::kv(
        "Files processed:",
        &format!("{}/{}", stats.processed_files, stats.total_files),
    );
    if let Some(summary) = stats.response_summary() {
        output::kv(
            "Reply length:",
            &format!(
                "{:.1} chars on average ({} to {})",
                summary.mean, summary.min, summary.max
            ),
        );
    }
    println!();

    let mut sources = output::table();
    output::table_header(&mut sources, &["Chat file", "Dialogues"]);
    let mut by_size: Vec<(&String, &usize)> = stats.chat_sources.iter().collect();
    // Largest chats first.
    by_size.sort_by_key(|(file, count)| (std::cmp::Reverse(**count), *file));
    let rows: Vec<(String, String)> = by_size
        .into_iter()
        .map(|(file, count)| (file.clone(), count.to_string()))
        .collect();
    for (file, count) in &rows {
        output::table_row(&mut sources, file, count);
    }
    output::table_print(&sources, "sources", &rows);
    println!();

    let mut contexts = output::table();
    output::table_header(&mut contexts, &["Context messages", "Dialogues"]);
    let histogram: Vec<(String, String)> = stats
        .context_histogram()
        .into_iter()
        .map(|(len, count)| (len.to_string(), count.to_string()))
        .collect();
    for (len, count) in &histogram {
        output::table_row(&mut contexts, len, count);
    }
    output::table_print(&contexts, "context_lengths", &histogram);
    println!();

    let volume = DataVolume::assess(stats.total_conversations);
    if volume.is_sufficient() {
        output::success(volume.headline());
    } else {
        output::warning(volume.headline());
    }
}
