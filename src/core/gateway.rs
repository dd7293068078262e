//! OpenAI-compatible chat completions against the shared inference gateway.
//!
//! Each client is bound to one tenant: the bearer key and the `id` tenant header are
//! installed as default headers when the client is built, not per request.

use crate::core::http::{self, ensure_success, http_error};
use crate::error::AppError;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

pub const TENANT_HEADER: &str = "id";
const SERVICE: &str = "inference gateway";

pub struct GatewayClient {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl GatewayClient {
    pub fn new(
        url: String,
        api_key: &str,
        tenant_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, AppError> {
        let headers = tenant_headers(api_key, tenant_id)?;
        let client = http::build_client(SERVICE, timeout_secs, headers)?;
        Ok(Self { client, url, timeout_secs })
    }

    /// Send a non-streaming completion and return the first choice's message content.
    pub fn complete(&self, request: &ChatCompletionRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|err| http_error(SERVICE, self.timeout_secs, err))?;
        let response = ensure_success(SERVICE, response)?;

        let completion: ChatCompletionResponse = response.json().map_err(|err| {
            AppError::invalid_response(SERVICE, format!("Failed to parse JSON response: {err}"))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                AppError::invalid_response(SERVICE, "missing choices[0].message.content")
            })
    }
}

fn tenant_headers(api_key: &str, tenant_id: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| AppError::config_error("API key contains characters not valid in a header"))?;
    let tenant = HeaderValue::from_str(tenant_id)
        .map_err(|_| AppError::config_error(format!("Invalid tenant id '{tenant_id}'")))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(HeaderName::from_static(TENANT_HEADER), tenant);
    Ok(headers)
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn user(content: MessageContent) -> Self {
        Self { role: "user".into(), content }
    }
}

/// Plain-text turn or a list of typed parts (text plus inline image).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageBase64 { image_base64: String },
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
