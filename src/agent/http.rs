//! HTTP completion provider.
//!
//! Gemini models go to the Generative Language `generateContent` endpoint
//! with a response schema, thinking budget, and safety settings. Everything
//! else goes to an OpenAI-compatible `/chat/completions` endpoint with a
//! `json_schema` response format.
//!
//! Transport failures and non-success statuses surface as
//! [`TrendCardError::Provider`]; the binding never retries them.

use super::provider::{CompletionProvider, CompletionRequest, Role};
use crate::card::FIELD_NAMES;
use crate::config::SamplingProfile;
use crate::config::types::bare_model_name;
use crate::error::{Result, TrendCardError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest response body excerpt carried in an error message.
const ERROR_BODY_CAP: usize = 500;

/// Provider backed by the Gemini and OpenAI-compatible HTTP APIs.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    gemini_api_key: Option<String>,
    gemini_base_url: String,
    openai_api_key: Option<String>,
    openai_base_url: String,
}

impl HttpProvider {
    /// Build a provider from environment variables.
    ///
    /// - `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) for Gemini models
    /// - `OPENAI_API_KEY` and optional `OPENAI_BASE_URL` for everything else
    ///
    /// Missing keys are reported when a request needs them, not here.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok();
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openai_base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| OPENAI_BASE_URL.to_string());

        let client = Client::builder().build().map_err(|e| {
            TrendCardError::Provider(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            gemini_api_key,
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            openai_api_key,
            openai_base_url,
        })
    }

    async fn complete_gemini(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let api_key = self.gemini_api_key.as_deref().ok_or_else(|| {
            TrendCardError::Provider("GEMINI_API_KEY (or GOOGLE_API_KEY) is not set".to_string())
        })?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.gemini_base_url.trim_end_matches('/'),
            bare_model_name(request.model)
        );
        let body = gemini_body(request);

        debug!(model = request.model, retry = request.retry_number(), "gemini request");
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TrendCardError::Provider(e.to_string()))?;

        let value = read_json(response, "Gemini").await?;
        gemini_text(&value)
    }

    async fn complete_openai(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let api_key = self
            .openai_api_key
            .as_deref()
            .ok_or_else(|| TrendCardError::Provider("OPENAI_API_KEY is not set".to_string()))?;
        let url = format!(
            "{}/chat/completions",
            self.openai_base_url.trim_end_matches('/')
        );
        let body = openai_body(request);

        debug!(model = request.model, retry = request.retry_number(), "chat completion request");
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TrendCardError::Provider(e.to_string()))?;

        let value = read_json(response, "chat completion").await?;
        value
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                TrendCardError::Provider("chat completion response has no message content".to_string())
            })
    }
}

#[async_trait]
impl CompletionProvider for HttpProvider {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        match request.sampling {
            SamplingProfile::Gemini { .. } => self.complete_gemini(request).await,
            SamplingProfile::Generic { .. } => self.complete_openai(request).await,
        }
    }
}

async fn read_json(response: reqwest::Response, context: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());
        let excerpt: String = body.chars().take(ERROR_BODY_CAP).collect();
        return Err(TrendCardError::Provider(format!(
            "{} returned HTTP {}: {}",
            context,
            status.as_u16(),
            excerpt
        )));
    }

    response
        .json()
        .await
        .map_err(|e| TrendCardError::Provider(format!("{} response is not JSON: {}", context, e)))
}

fn gemini_body(request: &CompletionRequest<'_>) -> Value {
    let contents: Vec<Value> = request
        .turns
        .iter()
        .map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            json!({ "role": role, "parts": [{ "text": turn.content }] })
        })
        .collect();

    let mut generation_config = json!({
        "temperature": request.sampling.temperature(),
        "maxOutputTokens": request.sampling.max_tokens(),
        "responseMimeType": "application/json",
        "responseSchema": gemini_schema(request.output_schema),
    });

    let mut body = json!({
        "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
        "contents": contents,
    });

    if let SamplingProfile::Gemini {
        thinking_budget,
        safety_policy,
        ..
    } = request.sampling
    {
        generation_config["thinkingConfig"] = json!({ "thinkingBudget": thinking_budget });
        body["safetySettings"] = json!([safety_policy]);
    }
    body["generationConfig"] = generation_config;
    body
}

/// Reduce a JSON schema to the OpenAPI subset Gemini accepts.
fn gemini_schema(schema: &Value) -> Value {
    let mut schema = schema.clone();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
        object.remove("definitions");
        object.insert("propertyOrdering".to_string(), json!(FIELD_NAMES));
    }
    schema
}

fn gemini_text(value: &Value) -> Result<String> {
    let parts = value
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            let reason = value
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("no candidates");
            TrendCardError::Provider(format!("Gemini returned no content ({})", reason))
        })?;

    Ok(parts
        .iter()
        .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(""))
}

fn openai_body(request: &CompletionRequest<'_>) -> Value {
    let mut messages = vec![json!({ "role": "system", "content": request.system_instruction })];
    messages.extend(request.turns.iter().map(|turn| json!(turn)));

    json!({
        "model": bare_model_name(request.model),
        "messages": messages,
        "temperature": request.sampling.temperature(),
        "max_tokens": request.sampling.max_tokens(),
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "TrendCard",
                "schema": request.output_schema,
                "strict": false
            }
        }
    })
}
