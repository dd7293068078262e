//! The three model probes and the pieces they share: source selection and result capture.

use crate::core::context::RunContext;
use crate::core::http::truncate_chars;
use crate::error::AppError;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

mod audio;
mod image;
mod text;

pub use audio::{AudioProbe, TranscriptionRequest};
pub use image::ImageProbe;
pub use text::TextProbe;

/// Maximum characters of model output kept in a report entry.
pub const PREVIEW_CHARS: usize = 300;

/// One isolated check against a single inference endpoint.
pub trait Probe {
    /// Key under which the result appears in the report.
    fn model_key(&self) -> &'static str;

    fn run(
        &self,
        ctx: &RunContext,
        picker: &mut dyn SourcePicker,
    ) -> Result<ProbeSuccess, AppError>;
}

/// Chooses one sample input out of a candidate list.
pub trait SourcePicker {
    fn pick<'a>(&mut self, candidates: &'a [String]) -> Option<&'a str>;
}

/// Uniform selection backed by any `rand` generator.
pub struct RandomPicker<R> {
    rng: R,
}

impl RandomPicker<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl RandomPicker<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> SourcePicker for RandomPicker<R> {
    fn pick<'a>(&mut self, candidates: &'a [String]) -> Option<&'a str> {
        candidates.choose(&mut self.rng).map(String::as_str)
    }
}

pub(crate) fn choose_source(
    picker: &mut dyn SourcePicker,
    candidates: &[String],
    probe: &str,
) -> Result<String, AppError> {
    picker.pick(candidates).map(str::to_string).ok_or_else(|| {
        AppError::config_error(format!("No candidate sources configured for the {probe} probe"))
    })
}

/// Raw outcome of a successful probe, before truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSuccess {
    pub input: String,
    pub output: String,
}

impl ProbeSuccess {
    pub fn new(input: String, output: String) -> Self {
        Self { input, output }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeResult {
    Success { input: String, output_preview: String },
    Failure { error: String },
}

impl ProbeResult {
    pub fn from_outcome(outcome: Result<ProbeSuccess, AppError>) -> Self {
        match outcome {
            Ok(ProbeSuccess { input, output }) => ProbeResult::Success {
                input,
                output_preview: truncate_chars(&output, PREVIEW_CHARS).to_string(),
            },
            Err(err) => {
                let error = err.to_string();
                let error = if error.trim().is_empty() { format!("{err:?}") } else { error };
                ProbeResult::Failure { error }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeResult::Success { .. })
    }
}
