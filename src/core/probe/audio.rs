use super::{Probe, ProbeSuccess, SourcePicker, choose_source};
use crate::core::config::AudioProbeConfig;
use crate::core::context::RunContext;
use crate::core::http::{self, ensure_success, http_error};
use crate::core::report::AUDIO_MODEL_KEY;
use crate::error::AppError;
use base64::Engine;
use base64::engine::general_purpose;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use std::fs;
use tracing::debug;

const SERVICE: &str = "audio service";

/// Transcription request body. The service only accepts inline audio, never a URL.
#[derive(Debug, Serialize)]
pub struct TranscriptionRequest {
    pub audio_file: String,
    pub task: String,
    pub language: String,
    pub without_timestamps: bool,
}

impl TranscriptionRequest {
    fn new(cfg: &AudioProbeConfig, audio: &[u8]) -> Self {
        Self {
            audio_file: general_purpose::STANDARD.encode(audio),
            task: cfg.task.clone(),
            language: cfg.language.clone(),
            without_timestamps: cfg.without_timestamps,
        }
    }
}

/// Transcribes a short clip through the standalone audio service.
pub struct AudioProbe;

impl Probe for AudioProbe {
    fn model_key(&self) -> &'static str {
        AUDIO_MODEL_KEY
    }

    fn run(
        &self,
        ctx: &RunContext,
        picker: &mut dyn SourcePicker,
    ) -> Result<ProbeSuccess, AppError> {
        let cfg = &ctx.config().audio;
        let timeouts = &ctx.config().timeouts;
        let source = choose_source(picker, &cfg.sources, "audio")?;

        // Removed when dropped, whichever way this function returns.
        let mut scratch = tempfile::Builder::new()
            .prefix("sample_audio")
            .suffix(&scratch_suffix(&source))
            .tempfile_in(ctx.temp_dir())?;

        let downloader =
            http::build_client("audio source", timeouts.download_secs, HeaderMap::new())?;
        let written =
            http::download_to(&downloader, &source, timeouts.download_secs, scratch.as_file_mut())?;
        debug!(
            model = AUDIO_MODEL_KEY,
            bytes = written,
            path = %scratch.path().display(),
            "downloaded audio"
        );

        let audio = fs::read(scratch.path())?;
        let request = TranscriptionRequest::new(cfg, &audio);
        let transcript = transcribe(ctx, &request)?;

        Ok(ProbeSuccess::new(source, transcript.to_string()))
    }
}

fn transcribe(
    ctx: &RunContext,
    request: &TranscriptionRequest,
) -> Result<serde_json::Value, AppError> {
    let timeout_secs = ctx.config().timeouts.inference_secs;
    let client = http::build_client(SERVICE, timeout_secs, HeaderMap::new())?;

    let response = client
        .post(&ctx.config().audio_service.url)
        .header(AUTHORIZATION, format!("Bearer {}", ctx.api_key()))
        .header(CONTENT_TYPE, "application/json")
        .json(request)
        .send()
        .map_err(|err| http_error(SERVICE, timeout_secs, err))?;
    let response = ensure_success(SERVICE, response)?;

    response.json::<serde_json::Value>().map_err(|err| {
        AppError::invalid_response(SERVICE, format!("Failed to parse JSON response: {err}"))
    })
}

/// Keep the clip's extension on the scratch file when the URL has a plausible one.
fn scratch_suffix(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit_once('/')
        .and_then(|(_, file)| file.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
