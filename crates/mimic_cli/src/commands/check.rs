//! `mimic check`: is the model being served?

use anyhow::Result;
use mimic_runtime::{ReplyGenerator, RuntimeConfig};
use serde_json::json;

use crate::output;

pub async fn handle(config: RuntimeConfig) -> Result<()> {
    let spinner = output::spinner(&format!(
        "Looking for '{}' at {}",
        config.model,
        config.effective_base_url()
    ));

    match ReplyGenerator::load(config.provider()?, config.generator_config()).await {
        Ok(_) => {
            output::spinner_success(
                &spinner,
                &format!(
                    "{} serves '{}'",
                    config.effective_base_url(),
                    config.model
                ),
            );
            output::data(
                "check",
                &json!({
                    "backend": config.backend.as_str(),
                    "base_url": config.effective_base_url(),
                    "model": config.model,
                    "available": true,
                }),
            );
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Model not available");
            output::header("To serve a fine-tuned checkpoint:");
            output::item(
                "vLLM:",
                &format!(
                    "vllm serve ./{} --served-model-name {}",
                    config.checkpoint_dir.display(),
                    config.model
                ),
            );
            output::item(
                "Ollama:",
                "import the checkpoint with `ollama create` and pass --backend ollama",
            );
            Err(e.into())
        }
    }
}
