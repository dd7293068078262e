use serde::{Deserialize, Serialize};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.simplismart.live";
pub const DEFAULT_AUDIO_SERVICE_URL: &str =
    "https://http.whisper.proxy.prod.s9t.link/model/infer/whisper";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 60;

/// Shared OpenAI-compatible gateway used by the text and image probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { base_url: default_gateway_base_url() }
    }
}

impl GatewayConfig {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioServiceConfig {
    #[serde(default = "default_audio_service_url")]
    pub url: String,
}

impl Default for AudioServiceConfig {
    fn default() -> Self {
        Self { url: default_audio_service_url() }
    }
}

/// Per-call timeouts; every network call carries one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_fetch_secs")]
    pub fetch_secs: u64,
    #[serde(default = "default_download_secs")]
    pub download_secs: u64,
    #[serde(default = "default_inference_secs")]
    pub inference_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            fetch_secs: default_fetch_secs(),
            download_secs: default_download_secs(),
            inference_secs: default_inference_secs(),
        }
    }
}

fn default_gateway_base_url() -> String {
    DEFAULT_GATEWAY_BASE_URL.to_string()
}

fn default_audio_service_url() -> String {
    DEFAULT_AUDIO_SERVICE_URL.to_string()
}

fn default_fetch_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_download_secs() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

fn default_inference_secs() -> u64 {
    DEFAULT_INFERENCE_TIMEOUT_SECS
}
