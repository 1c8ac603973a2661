//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mimic_constant::{app, defaults};

#[derive(Parser)]
#[command(name = app::NAME, about = app::DESCRIPTION, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

/// Overrides for the inference backend (default: MIMIC_BACKEND, MIMIC_BASE_URL, MIMIC_MODEL).
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Backend type: openai (any /completions server) or ollama
    #[arg(long)]
    pub backend: Option<String>,
    /// Backend base URL, e.g. http://localhost:8000/v1
    #[arg(long)]
    pub base_url: Option<String>,
    /// Model name as served by the backend
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the training corpus from exported chat logs
    Build {
        /// Directory with one exported JSON file per chat (default: ./chats)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Your name as it appears in the `from` field of the export
        #[arg(long)]
        owner: Option<String>,
        /// Number of preceding messages kept as context
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Show statistics of the built corpus
    Stats,
    /// Write the shuffled train/eval split as JSONL
    Prepare,
    /// Prepare the split and run the fine-tuning command
    Train {
        /// Training command, e.g. "python3 train.py" (default: MIMIC_TRAIN_COMMAND)
        #[arg(short, long)]
        command: Option<String>,
    },
    /// Check that the inference backend serves the model
    Check {
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Generate one reply to the given messages (oldest first)
    Reply {
        /// Messages from your interlocutor
        #[arg(required = true)]
        messages: Vec<String>,
        /// Sampling temperature (default: MIMIC_TEMPERATURE or 0.7)
        #[arg(short, long)]
        temperature: Option<f32>,
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Interactive mode: enter messages, pick one of several suggested replies
    Chat {
        /// Number of reply candidates per round
        #[arg(short = 'n', long, default_value_t = defaults::CANDIDATES)]
        candidates: usize,
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Inspect or change mimic settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build { .. } => "build",
            Command::Stats => "stats",
            Command::Prepare => "prepare",
            Command::Train { .. } => "train",
            Command::Check { .. } => "check",
            Command::Reply { .. } => "reply",
            Command::Chat { .. } => "chat",
            Command::Config { .. } => "config",
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Persist a setting to ~/.mimic/env
    Set {
        /// Setting name, e.g. MIMIC_OWNER (the MIMIC_ prefix is optional)
        key: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reply_with_backend_overrides() {
        let cli = Cli::try_parse_from([
            "mimic", "-o", "json", "reply", "hi", "how are you", "--base-url", "http://x/v1",
            "-m", "ckpt",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Command::Reply {
                messages, backend, ..
            } => {
                assert_eq!(messages, vec!["hi", "how are you"]);
                assert_eq!(backend.base_url.as_deref(), Some("http://x/v1"));
                assert_eq!(backend.model.as_deref(), Some("ckpt"));
            }
            _ => panic!("expected reply"),
        }
    }

    #[test]
    fn test_command_names_match_subcommands() {
        let cli = Cli::command();
        for args in [
            vec!["mimic", "build"],
            vec!["mimic", "stats"],
            vec!["mimic", "train"],
            vec!["mimic", "chat"],
            vec!["mimic", "config", "show"],
        ] {
            let parsed = Cli::try_parse_from(&args).unwrap();
            assert_eq!(parsed.command.name(), args[1]);
            assert!(cli.find_subcommand(args[1]).is_some());
        }
        assert_eq!(cli.get_name(), "mimic");
    }

    #[test]
    fn test_reply_requires_messages() {
        assert!(Cli::try_parse_from(["mimic", "reply"]).is_err());
    }

    #[test]
    fn test_chat_default_candidates() {
        let cli = Cli::try_parse_from(["mimic", "chat"]).unwrap();
        assert!(matches!(cli.command, Command::Chat { candidates: 3, .. }));
    }
}
