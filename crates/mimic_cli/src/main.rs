//! CLI entry point for mimic.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use mimic_constant::app;
use mimic_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Nearest `rel` in `start` or one of its ancestors.
fn find_upwards(start: &Path, rel: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(rel))
        .find(|candidate| candidate.is_file())
}

/// Load env files. Variables already set are never overridden, so the first
/// file to define a key wins: `.mimic/env` (project), then `.env`, then
/// `~/.mimic/env`.
fn load_mimic_env() {
    if let Ok(cwd) = std::env::current_dir() {
        let project = Path::new(app::DATA_DIR).join(app::ENV_FILE);
        if let Some(path) = find_upwards(&cwd, &project) {
            let _ = dotenvy::from_path(&path);
        }
        if let Some(path) = find_upwards(&cwd, Path::new(".env")) {
            let _ = dotenvy::from_path(&path);
        }
    }
    if let Some(home) = dirs::home_dir() {
        let global = home.join(app::DATA_DIR).join(app::ENV_FILE);
        if global.is_file() {
            let _ = dotenvy::from_path(&global);
        }
    }
}

fn init_tracing(verbose: bool, command: &str) {
    let mut config = ObservabilityConfig::from_env()
        .with_version(app::VERSION)
        .with_resource_attribute("mimic.command", command);
    if verbose && config.log_level.is_none() {
        config = config.with_log_level("debug");
    }
    if let Err(e) = mimic_observability::init(config) {
        output::warning(&format!("Logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_mimic_env();
    let cli = Cli::parse();
    output::init(cli.output);
    init_tracing(cli.verbose, cli.command.name());

    let result = commands::handle(cli).await;
    mimic_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
