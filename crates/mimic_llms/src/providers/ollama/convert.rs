use super::types::{OllamaGenerateRequest, OllamaGenerateResponse, OllamaOptions};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateRequest, GenerateResponse};

pub fn to_ollama_request(req: &GenerateRequest) -> OllamaGenerateRequest {
    let params = &req.params;
    OllamaGenerateRequest {
        model: req.model.clone(),
        prompt: req.prompt.clone(),
        raw: true,
        stream: false,
        options: OllamaOptions {
            num_predict: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            repeat_penalty: params.repetition_penalty,
            stop: params.stop.clone(),
        },
    }
}

pub fn from_ollama_response(resp: OllamaGenerateResponse) -> Result<GenerateResponse> {
    if !resp.done {
        return Err(Error::invalid_response("ollama returned a partial generation"));
    }
    Ok(GenerateResponse {
        text: resp.response,
        finish_reason: FinishReason::from_raw(resp.done_reason.as_deref()),
        model: resp.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_raw_and_unstreamed() {
        let json = serde_json::to_value(to_ollama_request(&GenerateRequest::new(
            "mimic",
            "A: hi\nB: ",
        )))
        .unwrap();

        assert_eq!(json["raw"], true);
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 100);
        assert_eq!(json["options"]["top_k"], 50);
        assert!(json["options"].get("stop").is_none());
    }

    #[test]
    fn test_partial_response_rejected() {
        let resp: OllamaGenerateResponse =
            serde_json::from_str(r#"{"model":"m","response":"he","done":false}"#).unwrap();
        assert!(from_ollama_response(resp).is_err());
    }

    #[test]
    fn test_done_response() {
        let resp: OllamaGenerateResponse = serde_json::from_str(
            r#"{"model":"m","response":" hey","done":true,"done_reason":"length"}"#,
        )
        .unwrap();
        let out = from_ollama_response(resp).unwrap();
        assert_eq!(out.text, " hey");
        assert_eq!(out.finish_reason, FinishReason::Length);
    }
}
