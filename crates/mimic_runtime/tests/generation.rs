//! Reply generation against a mocked inference backend.

use std::path::PathBuf;

use mimic_constant::markers;
use mimic_runtime::{Backend, ReplyGenerator, RuntimeConfig, RuntimeError};
use mockito::Matcher;
use serde_json::json;

fn config(base_url: String) -> RuntimeConfig {
    RuntimeConfig::new(PathBuf::from("/tmp"))
        .with_base_url(base_url)
        .with_model("my_dialogpt")
}

async fn serve_models(server: &mut mockito::ServerGuard, path: &str, body: serde_json::Value) {
    server
        .mock("GET", path)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;
}

#[tokio::test]
async fn reply_round_trip_through_openai_backend() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    serve_models(&mut server, "/v1/models", json!({"data": [{"id": "my_dialogpt"}]})).await;
    let completion = server
        .mock("POST", "/v1/completions")
        .match_body(Matcher::PartialJson(json!({
            "prompt": "A: hi\nA: are you free tonight\nB: ",
            "stop": ["<|endoftext|>", "\nA:"]
        })))
        .with_status(200)
        .with_body(json!({"choices": [{"text": " yes, after 8<|endoftext|>", "finish_reason": "stop"}]}).to_string())
        .create_async()
        .await;

    let config = config(format!("{}/v1", server.url()));
    let generator = ReplyGenerator::load(config.provider()?, config.generator_config()).await?;
    let reply = generator
        .reply(&["hi", "are you free tonight"], config.temperature)
        .await;

    assert_eq!(reply, "yes, after 8");
    completion.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn server_error_yields_fallback_reply() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    serve_models(&mut server, "/models", json!({"data": [{"id": "my_dialogpt"}]})).await;
    server
        .mock("POST", "/completions")
        .with_status(500)
        .with_body("CUDA out of memory")
        .expect(3)
        .create_async()
        .await;

    let config = config(server.url());
    let generator = ReplyGenerator::load(config.provider()?, config.generator_config()).await?;

    let err = generator.try_generate(&["hi"], 0.7).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Generation(_)));

    let candidates = generator.candidates(&["hi"], 2, 0.7).await;
    assert_eq!(candidates, vec![markers::FALLBACK_REPLY; 2]);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_model_unavailable() {
    let config = config("http://127.0.0.1:9/v1".to_string());
    let err = ReplyGenerator::load(config.provider().unwrap(), config.generator_config())
        .await
        .unwrap_err();

    match err {
        RuntimeError::ModelUnavailable { model, base_url, .. } => {
            assert_eq!(model, "my_dialogpt");
            assert_eq!(base_url, "http://127.0.0.1:9/v1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ollama_backend_accepts_latest_tag() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    serve_models(&mut server, "/api/tags", json!({"models": [{"name": "my_dialogpt:latest"}]})).await;
    server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({"raw": true, "model": "my_dialogpt"})))
        .with_status(200)
        .with_body(json!({"response": "ok!", "done": true}).to_string())
        .create_async()
        .await;

    let config = config(server.url()).with_backend(Backend::Ollama);
    let generator = ReplyGenerator::load(config.provider()?, config.generator_config()).await?;

    assert_eq!(generator.reply(&["hey"], 0.7).await, "ok!");
    Ok(())
}
