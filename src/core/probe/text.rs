use super::{Probe, ProbeSuccess, SourcePicker, choose_source};
use crate::core::config::{DEFAULT_TEXT_MAX_INPUT_CHARS, TextProbeConfig};
use crate::core::context::RunContext;
use crate::core::gateway::{ChatCompletionRequest, ChatMessage, GatewayClient, MessageContent};
use crate::core::http::{self, truncate_chars};
use crate::core::report::TEXT_MODEL_KEY;
use crate::error::AppError;
use reqwest::header::HeaderMap;
use tracing::debug;

/// Summarises the head of a public-domain text document.
pub struct TextProbe;

impl Probe for TextProbe {
    fn model_key(&self) -> &'static str {
        TEXT_MODEL_KEY
    }

    fn run(
        &self,
        ctx: &RunContext,
        picker: &mut dyn SourcePicker,
    ) -> Result<ProbeSuccess, AppError> {
        let cfg = &ctx.config().text;
        let timeouts = &ctx.config().timeouts;
        let source = choose_source(picker, &cfg.sources, "text")?;

        let fetcher = http::build_client("text source", timeouts.fetch_secs, HeaderMap::new())?;
        let document = http::fetch_text(&fetcher, &source, timeouts.fetch_secs)?;
        let excerpt = excerpt(cfg, &document);
        debug!(model = TEXT_MODEL_KEY, chars = excerpt.chars().count(), "fetched text excerpt");

        let gateway = GatewayClient::new(
            ctx.config().gateway.chat_completions_url(),
            ctx.api_key(),
            &cfg.tenant_id,
            timeouts.inference_secs,
        )?;
        let summary = gateway.complete(&summary_request(cfg, excerpt))?;

        Ok(ProbeSuccess::new(source, summary))
    }
}

/// Head of the document, never longer than the hard input cap whatever the config says.
fn excerpt<'a>(cfg: &TextProbeConfig, document: &'a str) -> &'a str {
    truncate_chars(document, cfg.max_input_chars.min(DEFAULT_TEXT_MAX_INPUT_CHARS))
}

fn summary_request(cfg: &TextProbeConfig, excerpt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: cfg.model.clone(),
        messages: vec![ChatMessage::user(MessageContent::Text(format!(
            "{}\n{excerpt}",
            cfg.prompt
        )))],
        max_tokens: cfg.max_tokens,
        temperature: 0.0,
    }
}
