//! Command dispatch.

pub mod build;
pub mod chat;
pub mod check;
pub mod config;
pub mod prepare;
pub mod reply;
pub mod stats;
pub mod train;

use anyhow::{anyhow, Context, Result};
use mimic_runtime::{Backend, RuntimeConfig};

use crate::cli::{BackendArgs, Cli, Command, ConfigAction};

pub async fn handle(cli: Cli) -> Result<()> {
    // `config set` must work even when the current settings do not parse.
    if let Command::Config {
        action: ConfigAction::Set { key, value },
    } = &cli.command
    {
        return config::set(key, value);
    }

    let config = load_config()?;
    match cli.command {
        Command::Build {
            input,
            owner,
            window,
        } => build::handle(config, input, owner, window),
        Command::Stats => stats::handle(&config),
        Command::Prepare => prepare::handle(&config),
        Command::Train { command } => train::handle(config, command).await,
        Command::Check { backend } => check::handle(apply_backend(config, backend)?).await,
        Command::Reply {
            messages,
            temperature,
            backend,
        } => reply::handle(apply_backend(config, backend)?, messages, temperature).await,
        Command::Chat {
            candidates,
            backend,
        } => chat::handle(apply_backend(config, backend)?, candidates).await,
        Command::Config { action } => match action {
            ConfigAction::Show => config::show(&config),
            ConfigAction::Set { key, value } => config::set(&key, &value),
        },
    }
}

fn load_config() -> Result<RuntimeConfig> {
    let workdir = std::env::current_dir().context("Could not determine the working directory")?;
    Ok(RuntimeConfig::from_env(workdir)?)
}

/// Command-line backend flags win over the environment.
fn apply_backend(mut config: RuntimeConfig, args: BackendArgs) -> Result<RuntimeConfig> {
    if let Some(backend) = args.backend {
        let parsed: Backend = backend
            .parse()
            .map_err(|_| anyhow!("Unknown backend '{backend}'. Available: openai, ollama"))?;
        // A URL configured for the other backend does not carry over.
        if parsed != config.backend && args.base_url.is_none() {
            config.base_url = None;
        }
        config = config.with_backend(parsed);
    }
    if let Some(url) = args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn base() -> RuntimeConfig {
        RuntimeConfig::new(PathBuf::from("/w")).with_base_url("http://gpu:8000/v1")
    }

    #[test]
    fn test_apply_backend_overrides() {
        let config = apply_backend(
            base(),
            BackendArgs {
                backend: None,
                base_url: Some("http://other/v1".into()),
                model: Some("ckpt-2".into()),
            },
        )
        .unwrap();
        assert_eq!(config.effective_base_url(), "http://other/v1");
        assert_eq!(config.model, "ckpt-2");
    }

    #[test]
    fn test_switching_backend_drops_foreign_url() {
        let config = apply_backend(
            base(),
            BackendArgs {
                backend: Some("ollama".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Ollama);
        assert_eq!(config.effective_base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = apply_backend(
            base(),
            BackendArgs {
                backend: Some("llamafile".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("llamafile"));
    }
}
