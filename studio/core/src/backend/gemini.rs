//! Gemini Backend
//!
//! [`CampaignBackend`] implementation over the Gemini `generateContent` REST
//! API. Every request carries the prompt plus the operation's response
//! schema, so the endpoint constrains the model to structured JSON output;
//! the decode here re-validates that shape before a result reaches the
//! state machine.
//!
//! The API key is optional at construction time. A missing key is reported
//! as [`GatewayError::Configuration`] at the start of each operation, before
//! any request is built; it is never inferred from a transport failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::backend::traits::CampaignBackend;
use crate::campaign::{AdCreative, CampaignSuggestion};
use crate::config::StudioConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::prompt;

/// Backend over the hosted Gemini generateContent endpoint.
pub struct GeminiBackend {
    model: String,
    api_base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend from resolved configuration.
    #[must_use]
    pub fn new(config: &StudioConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            model: config.model.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        }
    }

    /// Create a backend from environment configuration.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(&StudioConfig::from_env())
    }

    /// Whether a credential is available without revealing it.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }

    /// Run one generateContent round-trip and return the generated payload
    /// text (the model's JSON document, still unparsed).
    async fn invoke(&self, prompt_text: String, schema: serde_json::Value) -> GatewayResult<String> {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => return Err(GatewayError::Configuration),
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt_text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&error_body);
            tracing::warn!(status = status.as_u16(), %message, "generateContent rejected");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        payload_text(&envelope)
    }
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CampaignBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_campaign(&self, url: &str) -> GatewayResult<CampaignSuggestion> {
        tracing::debug!(model = %self.model, %url, "requesting campaign generation");
        let payload = self
            .invoke(prompt::campaign_prompt(url), prompt::campaign_schema())
            .await?;
        decode_campaign(&payload)
    }

    async fn generate_variations(
        &self,
        business_summary: &str,
        original: &AdCreative,
    ) -> GatewayResult<Vec<AdCreative>> {
        tracing::debug!(model = %self.model, headline = %original.headline, "requesting creative variations");
        let payload = self
            .invoke(
                prompt::variation_prompt(business_summary, original),
                prompt::variation_schema(),
            )
            .await?;
        decode_variations(&payload)
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Envelope returned by generateContent. Only the fields the decode needs.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Wire item for variation responses. Decoding through this type means
/// nested variations can never enter via the variation flow.
#[derive(Debug, Deserialize)]
struct VariationItem {
    headline: String,
    description: String,
}

/// Extract the generated text from a raw response body: first candidate,
/// its content parts concatenated. An unreadable envelope or an empty
/// candidate list is a shape violation on the endpoint's side.
fn payload_text(body: &str) -> GatewayResult<String> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::Shape(format!("unreadable response envelope: {e}")))?;

    let text: String = envelope
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<Vec<_>>()
                .concat()
        })
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::Shape(
            "response contained no generated text".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Parse and shape-check a campaign payload. Parsing and shape failures are
/// classified separately so the surface message names what actually broke.
fn decode_campaign(payload: &str) -> GatewayResult<CampaignSuggestion> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| GatewayError::Json(e.to_string()))?;
    let campaign: CampaignSuggestion =
        serde_json::from_value(value).map_err(|e| GatewayError::Shape(e.to_string()))?;

    if campaign.business_summary.trim().is_empty() {
        return Err(GatewayError::Shape("businessSummary is empty".to_string()));
    }
    Ok(campaign)
}

/// Parse and shape-check a variation payload: a bare array of creative
/// objects. Whatever length validates is returned as-is.
fn decode_variations(payload: &str) -> GatewayResult<Vec<AdCreative>> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| GatewayError::Json(e.to_string()))?;
    let items: Vec<VariationItem> =
        serde_json::from_value(value).map_err(|e| GatewayError::Shape(e.to_string()))?;

    Ok(items
        .into_iter()
        .map(|item| AdCreative {
            headline: item.headline,
            description: item.description,
            variations: None,
        })
        .collect())
}

/// Best-effort extraction of a human-readable message from an error body.
/// The endpoint nests it as `{"error": {"message": ...}}`; some proxies
/// flatten it to `{"message": ...}`; anything else is passed through raw.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_string()
    } else {
        trimmed.to_string()
    }
}
