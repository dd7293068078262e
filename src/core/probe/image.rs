use super::{Probe, ProbeSuccess, SourcePicker, choose_source};
use crate::core::config::ImageProbeConfig;
use crate::core::context::RunContext;
use crate::core::gateway::{
    ChatCompletionRequest, ChatMessage, ContentPart, GatewayClient, MessageContent,
};
use crate::core::http;
use crate::core::report::IMAGE_MODEL_KEY;
use crate::error::AppError;
use base64::Engine;
use base64::engine::general_purpose;
use reqwest::header::HeaderMap;
use tracing::debug;

/// OCR over a scanned document. The image travels inline as base64 because the backend
/// refuses to fetch some remote URLs itself.
pub struct ImageProbe;

impl Probe for ImageProbe {
    fn model_key(&self) -> &'static str {
        IMAGE_MODEL_KEY
    }

    fn run(
        &self,
        ctx: &RunContext,
        picker: &mut dyn SourcePicker,
    ) -> Result<ProbeSuccess, AppError> {
        let cfg = &ctx.config().image;
        let timeouts = &ctx.config().timeouts;
        let source = choose_source(picker, &cfg.sources, "image")?;

        let fetcher = http::build_client("image source", timeouts.fetch_secs, HeaderMap::new())?;
        let image = http::fetch_bytes(&fetcher, &source, timeouts.fetch_secs)?;
        debug!(model = IMAGE_MODEL_KEY, bytes = image.len(), "fetched image");
        let encoded = general_purpose::STANDARD.encode(&image);

        let gateway = GatewayClient::new(
            ctx.config().gateway.chat_completions_url(),
            ctx.api_key(),
            &cfg.tenant_id,
            timeouts.inference_secs,
        )?;
        let extracted = gateway.complete(&ocr_request(cfg, encoded))?;

        Ok(ProbeSuccess::new(source, extracted))
    }
}

fn ocr_request(cfg: &ImageProbeConfig, image_base64: String) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: cfg.model.clone(),
        messages: vec![ChatMessage::user(MessageContent::Parts(vec![
            ContentPart::Text { text: cfg.prompt.clone() },
            ContentPart::ImageBase64 { image_base64 },
        ]))],
        max_tokens: cfg.max_tokens,
        temperature: 0.0,
    }
}
