//! Conversion between unified types and completions wire types

use super::types::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateRequest, GenerateResponse};

pub fn to_completion_request(req: &GenerateRequest) -> CompletionRequest {
    let params = &req.params;
    CompletionRequest {
        model: req.model.clone(),
        prompt: req.prompt.clone(),
        max_tokens: params.max_new_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
        top_k: params.top_k,
        repetition_penalty: params.repetition_penalty,
        stop: (!params.stop.is_empty()).then(|| params.stop.clone()),
        stream: false,
    }
}

/// Only the first choice is used.
pub fn from_completion_response(resp: CompletionResponse) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_response("completion has no choices"))?;

    Ok(GenerateResponse {
        text: choice.text,
        finish_reason: FinishReason::from_raw(choice.finish_reason.as_deref()),
        model: resp.model,
    })
}
