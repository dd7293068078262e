use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEXT_TENANT_ID: &str = "524436ef-5d4c-4d55-9351-71d67036b92b";
pub const DEFAULT_TEXT_PROMPT: &str = "Summarize this text:";
pub const DEFAULT_TEXT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEXT_MAX_INPUT_CHARS: usize = 2000;
pub const DEFAULT_TEXT_SOURCES: [&str; 3] = [
    "https://www.gutenberg.org/files/84/84-0.txt",
    "https://www.gutenberg.org/files/1342/1342-0.txt",
    "https://www.gutenberg.org/files/11/11-0.txt",
];

pub const DEFAULT_AUDIO_TASK: &str = "transcribe";
pub const DEFAULT_AUDIO_LANGUAGE: &str = "en";
pub const DEFAULT_AUDIO_SOURCES: [&str; 2] = [
    "https://upload.wikimedia.org/wikipedia/commons/4/45/En-us-hello.ogg",
    "https://upload.wikimedia.org/wikipedia/commons/3/3c/En-us-weather.ogg",
];

pub const DEFAULT_IMAGE_MODEL: &str = "deepseek-ai/DeepSeek-OCR";
pub const DEFAULT_IMAGE_TENANT_ID: &str = "81095ce8-515a-442a-8514-d4424ec84ce2";
pub const DEFAULT_IMAGE_PROMPT: &str = "Extract all readable text from this image";
pub const DEFAULT_IMAGE_MAX_TOKENS: u32 = 500;
pub const DEFAULT_IMAGE_SOURCES: [&str; 2] = [
    "https://upload.wikimedia.org/wikipedia/commons/4/4b/ReceiptSwiss.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/3/3f/Fax2.png",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextProbeConfig {
    #[serde(default = "default_text_model")]
    pub model: String,
    #[serde(default = "default_text_tenant_id")]
    pub tenant_id: String,
    #[serde(default = "default_text_prompt")]
    pub prompt: String,
    #[serde(default = "default_text_max_tokens")]
    pub max_tokens: u32,
    /// Cap on characters of the fetched document forwarded to the model.
    #[serde(default = "default_text_max_input_chars")]
    pub max_input_chars: usize,
    #[serde(default = "default_text_sources")]
    pub sources: Vec<String>,
}

impl Default for TextProbeConfig {
    fn default() -> Self {
        Self {
            model: default_text_model(),
            tenant_id: default_text_tenant_id(),
            prompt: default_text_prompt(),
            max_tokens: default_text_max_tokens(),
            max_input_chars: default_text_max_input_chars(),
            sources: default_text_sources(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioProbeConfig {
    #[serde(default = "default_audio_task")]
    pub task: String,
    #[serde(default = "default_audio_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub without_timestamps: bool,
    #[serde(default = "default_audio_sources")]
    pub sources: Vec<String>,
}

impl Default for AudioProbeConfig {
    fn default() -> Self {
        Self {
            task: default_audio_task(),
            language: default_audio_language(),
            without_timestamps: default_true(),
            sources: default_audio_sources(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageProbeConfig {
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_tenant_id")]
    pub tenant_id: String,
    #[serde(default = "default_image_prompt")]
    pub prompt: String,
    #[serde(default = "default_image_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_image_sources")]
    pub sources: Vec<String>,
}

impl Default for ImageProbeConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            tenant_id: default_image_tenant_id(),
            prompt: default_image_prompt(),
            max_tokens: default_image_max_tokens(),
            sources: default_image_sources(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_text_tenant_id() -> String {
    DEFAULT_TEXT_TENANT_ID.to_string()
}

fn default_text_prompt() -> String {
    DEFAULT_TEXT_PROMPT.to_string()
}

fn default_text_max_tokens() -> u32 {
    DEFAULT_TEXT_MAX_TOKENS
}

fn default_text_max_input_chars() -> usize {
    DEFAULT_TEXT_MAX_INPUT_CHARS
}

fn default_text_sources() -> Vec<String> {
    to_owned_list(&DEFAULT_TEXT_SOURCES)
}

fn default_audio_task() -> String {
    DEFAULT_AUDIO_TASK.to_string()
}

fn default_audio_language() -> String {
    DEFAULT_AUDIO_LANGUAGE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_audio_sources() -> Vec<String> {
    to_owned_list(&DEFAULT_AUDIO_SOURCES)
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_image_tenant_id() -> String {
    DEFAULT_IMAGE_TENANT_ID.to_string()
}

fn default_image_prompt() -> String {
    DEFAULT_IMAGE_PROMPT.to_string()
}

fn default_image_max_tokens() -> u32 {
    DEFAULT_IMAGE_MAX_TOKENS
}

fn default_image_sources() -> Vec<String> {
    to_owned_list(&DEFAULT_IMAGE_SOURCES)
}
