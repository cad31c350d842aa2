//! JSON-mode text generation clients (Gemini, `OpenAI`).
//!
//! Every model-backed capability in this crate (profile analysis, relevance
//! scoring, briefs) asks for a single JSON document and parses it strictly.
//! [`JsonModel`] is the seam tests replace with canned responses.

use async_trait::async_trait;
use reelscout_search::http::{parse_base_url, send_json};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::IntelError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const OPENAI_BASE_URL: &str = "https://api.openai.com/";

pub const GEMINI_FLASH: &str = "gemini-2.5-flash";
pub const GEMINI_PRO: &str = "gemini-2.5-pro";
pub const OPENAI_CHAT: &str = "gpt-4o";

/// One JSON-mode generation request.
#[derive(Debug, Clone, Copy)]
pub struct JsonRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
}

/// A model that answers with a JSON document.
#[async_trait]
pub trait JsonModel: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Return the raw JSON text produced by the model.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError`] on a missing key, transport failure, or an
    /// empty completion.
    async fn generate_json(&self, request: JsonRequest<'_>) -> Result<String, IntelError>;
}

/// Parse a model's JSON text into `T`.
///
/// # Errors
///
/// Returns [`IntelError::Deserialize`] when the text is not valid JSON for `T`.
pub fn parse_json<T: serde::de::DeserializeOwned>(text: &str, context: &str) -> Result<T, IntelError> {
    serde_json::from_str(text).map_err(|e| IntelError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` in JSON response mode.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: &'static str,
    base_url: Url,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Never fails for the built-in base URL.
    pub fn new(client: Client, api_key: Option<String>, model: &'static str) -> Result<Self, IntelError> {
        Self::with_base_url(client, api_key, model, GEMINI_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`IntelError::Search`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        api_key: Option<String>,
        model: &'static str,
        base_url: &str,
    ) -> Result<Self, IntelError> {
        Ok(Self {
            client,
            api_key,
            model,
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl JsonModel for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_json(&self, request: JsonRequest<'_>) -> Result<String, IntelError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(IntelError::MissingCredential("GEMINI_API_KEY"));
        };

        let url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| IntelError::Other(format!("invalid Gemini URL: {e}")))?;

        let text = format!("{}\n\n{}", request.system, request.prompt);
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &text }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: "application/json",
            },
        };

        tracing::debug!(model = self.model, "calling gemini generateContent");
        let response: GenerateContentResponse = send_json(
            self.client.post(url).header("x-goog-api-key", api_key).json(&body),
            "gemini",
            &format!("gemini({})", self.model),
        )
        .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(IntelError::Schema {
                context: format!("gemini({})", self.model),
                reason: "response has no candidate text".into(),
            });
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// OpenAI
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// `OpenAI` chat completions with `response_format: json_object`.
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Never fails for the built-in base URL.
    pub fn new(client: Client, api_key: Option<String>) -> Result<Self, IntelError> {
        Self::with_base_url(client, api_key, OPENAI_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`IntelError::Search`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        api_key: Option<String>,
        base_url: &str,
    ) -> Result<Self, IntelError> {
        Ok(Self {
            client,
            api_key,
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl JsonModel for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate_json(&self, request: JsonRequest<'_>) -> Result<String, IntelError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(IntelError::MissingCredential("OPENAI_API_KEY"));
        };

        let url = self
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| IntelError::Other(format!("invalid OpenAI URL: {e}")))?;

        let body = ChatRequest {
            model: OPENAI_CHAT,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            temperature: request.temperature,
            response_format: ResponseFormat { kind: "json_object" },
        };

        tracing::debug!(model = OPENAI_CHAT, "calling openai chat completions");
        let response: ChatResponse = send_json(
            self.client.post(url).bearer_auth(api_key).json(&body),
            "openai",
            "openai(chat.completions)",
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| IntelError::Schema {
                context: "openai(chat.completions)".into(),
                reason: "response has no message content".into(),
            })
    }
}
