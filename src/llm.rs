//! LLM answer service.
//!
//! Turns a raw question into an answer plus a constrained list of recommended
//! external-source ids by calling an OpenAI-style chat-completions endpoint.
//!
//! The request embeds the full external-source catalog in a system message
//! and declares a strict structured-output contract: the model must reply
//! with a JSON object holding a required string `answer` and an optional
//! string array `recommendedSourceIds`, nothing else.
//!
//! # Failure handling
//!
//! - Blank question → [`AskError::Validation`], rejected before any I/O.
//! - Missing credential or disabled provider → [`AskError::Configuration`].
//! - Transport error or non-2xx status → [`AskError::Upstream`]; the raw
//!   provider body is logged but never returned to the caller. No retry.
//! - Unparseable or malformed model content is recovered locally: the caller
//!   gets a canned fallback answer and an empty recommendation list, never
//!   an error.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::config::LlmConfig;
use crate::models::{ExternalSource, PreparedAnswer, AI_GENERATED_ID};

/// Fixed sampling temperature; kept low for determinism.
const TEMPERATURE: f64 = 0.2;

/// Environment variable holding the model credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Answer text substituted when the model is silent or returns content that
/// cannot be parsed against the structured-output contract.
pub const FALLBACK_ANSWER: &str =
    "Model nevrátil žádnou odpověď. Zkuste prosím dotaz formulovat trochu jinak.";

const PERSONA_PROMPT: &str = "You are Statikum AI Assistant. Answer clearly and concisely \
     in Czech or Slovak, based on the user's question about financial and legal documents. \
     Keep a neutral, professional register.";

/// Errors surfaced to the boundary. Parse failures of model output are not
/// here — they degrade into [`FALLBACK_ANSWER`] instead.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Upstream(String),
}

/// Final result of a resolution: the answer text and the recommended
/// external-source ids, already filtered to ids present in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAnswer {
    pub answer: String,
    #[serde(rename = "recommendedSourceIds")]
    pub recommended_source_ids: Vec<String>,
}

impl ResolvedAnswer {
    /// Wrap the result as the synthetic `ai-generated` prepared answer the
    /// presentation layer consumes, shaped like a canned answer. Built fresh
    /// per request and never written back to the catalog.
    pub fn into_prepared_answer(self, question: &str) -> PreparedAnswer {
        PreparedAnswer {
            id: AI_GENERATED_ID.to_string(),
            match_keyword: question.to_lowercase(),
            title: "AI odpověď".to_string(),
            answer_text: self.answer,
            related_client: String::new(),
            related_docs: Vec::new(),
            related_metrics: Vec::new(),
            related_external_sources: Some(self.recommended_source_ids),
        }
    }
}

/// Resolve a question through the model.
///
/// One synchronous call per invocation — no retry, no caching, no shared
/// state between concurrent resolutions.
pub async fn resolve_question(
    llm: &LlmConfig,
    catalog: &Catalog,
    question: &str,
) -> Result<ResolvedAnswer, AskError> {
    validate_question(question)?;

    if !llm.is_enabled() {
        return Err(AskError::Configuration(
            "llm provider is disabled".to_string(),
        ));
    }

    let model = llm.model.as_ref().ok_or_else(|| {
        AskError::Configuration("llm.model is not configured".to_string())
    })?;

    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| AskError::Configuration(format!("{} is not set", API_KEY_ENV)))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(llm.timeout_secs))
        .build()
        .map_err(|e| AskError::Upstream(e.to_string()))?;

    let body = build_request_body(model, &catalog.external_sources, question);

    let response = client
        .post(&llm.api_url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            error!("model call failed: {}", e);
            AskError::Upstream("failed to reach the model provider".to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        error!("model provider error {}: {}", status, error_body);
        return Err(AskError::Upstream(format!(
            "model provider returned {}",
            status
        )));
    }

    let payload: serde_json::Value = response.json().await.map_err(|e| {
        error!("failed to decode model provider response: {}", e);
        AskError::Upstream("invalid response from the model provider".to_string())
    })?;

    let content = payload
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str());

    let resolved = match content.and_then(parse_structured_answer) {
        Some(parsed) => ResolvedAnswer {
            answer: parsed.answer,
            recommended_source_ids: filter_recommended(parsed.recommended_source_ids, catalog),
        },
        None => {
            debug!("model content missing or unparseable, using fallback answer");
            ResolvedAnswer {
                answer: FALLBACK_ANSWER.to_string(),
                recommended_source_ids: Vec::new(),
            }
        }
    };

    Ok(resolved)
}

/// Reject empty or whitespace-only questions before any network call.
pub fn validate_question(question: &str) -> Result<(), AskError> {
    if question.trim().is_empty() {
        return Err(AskError::Validation("Missing question".to_string()));
    }
    Ok(())
}

/// Serialize the external-source catalog into the system-context block:
/// one stanza per source in catalog order, double-newline separated.
pub fn build_source_context(sources: &[ExternalSource]) -> String {
    sources
        .iter()
        .map(|source| {
            format!(
                "id: {}\ntyp: {}\nnázev: {}\nURL: {}\npopis: {}\ntagy: {}",
                source.id,
                source.source_type.as_str(),
                source.name,
                source.url.as_deref().unwrap_or("není k dispozici"),
                source.description,
                source.tags.join(", "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// JSON schema for the structured-output contract: required string `answer`,
/// optional string array `recommendedSourceIds`, no additional properties.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "answer": { "type": "string" },
            "recommendedSourceIds": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["answer"],
        "additionalProperties": false
    })
}

/// Build the chat-completions request body: persona system message, catalog
/// system message, user question, fixed temperature, strict response schema.
fn build_request_body(
    model: &str,
    sources: &[ExternalSource],
    question: &str,
) -> serde_json::Value {
    let catalog_prompt = format!(
        "Níže je katalog externích zdrojů Statikum. Do pole recommendedSourceIds \
         doporuč zdroje vhodné k ověření odpovědi a použij výhradně id, která se \
         v tomto katalogu vyskytují.\n\n{}",
        build_source_context(sources)
    );

    serde_json::json!({
        "model": model,
        "temperature": TEMPERATURE,
        "messages": [
            { "role": "system", "content": PERSONA_PROMPT },
            { "role": "system", "content": catalog_prompt },
            { "role": "user", "content": question }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "statikum_answer",
                "strict": true,
                "schema": response_schema()
            }
        }
    })
}

struct ParsedAnswer {
    answer: String,
    recommended_source_ids: Vec<String>,
}

/// Parse the model's message content against the structured-output contract.
///
/// Returns `None` when the content is not valid JSON or `answer` is missing
/// or not a string. An absent or non-array `recommendedSourceIds` becomes an
/// empty list rather than a failure.
fn parse_structured_answer(content: &str) -> Option<ParsedAnswer> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;

    let answer = value.get("answer")?.as_str()?.to_string();

    let recommended_source_ids = value
        .get("recommendedSourceIds")
        .and_then(|ids| ids.as_array())
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Some(ParsedAnswer {
        answer,
        recommended_source_ids,
    })
}

/// Keep only ids that exist in the external-source catalog; dangling ids are
/// dropped silently.
fn filter_recommended(ids: Vec<String>, catalog: &Catalog) -> Vec<String> {
    ids.into_iter()
        .filter(|id| catalog.has_external_source(id))
        .collect()
}
