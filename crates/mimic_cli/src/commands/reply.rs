//! `mimic reply`: one reply, non-interactive.

use anyhow::Result;
use mimic_runtime::{ReplyGenerator, RuntimeConfig};
use serde_json::json;

use crate::output;

pub async fn handle(
    config: RuntimeConfig,
    messages: Vec<String>,
    temperature: Option<f32>,
) -> Result<()> {
    let temperature = temperature.unwrap_or(config.temperature);
    let generator = ReplyGenerator::load(config.provider()?, config.generator_config()).await?;
    let reply = generator.reply(&messages, temperature).await;

    if output::is_json() {
        output::data(
            "reply",
            &json!({
                "context": messages,
                "reply": reply,
                "temperature": temperature,
            }),
        );
    } else {
        println!("{reply}");
    }
    Ok(())
}
