use crate::core::context::{RunContext, RunSettings};
use crate::core::probe::{AudioProbe, ImageProbe, Probe, ProbeResult, SourcePicker, TextProbe};
use crate::core::report::{self, ModelResults, PersistedReport, Report, RunMetadata};
use crate::error::AppError;
use tracing::{info, warn};

/// The probes executed by one run, in report order.
pub struct ProbeSet {
    pub text: Box<dyn Probe>,
    pub audio: Box<dyn Probe>,
    pub image: Box<dyn Probe>,
}

impl ProbeSet {
    pub fn standard() -> Self {
        Self { text: Box::new(TextProbe), audio: Box::new(AudioProbe), image: Box::new(ImageProbe) }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub persisted: PersistedReport,
}

/// Initialize the context, run every probe in order, and persist the merged report.
///
/// Only context initialization and the final write can fail; probe failures end up as
/// `Failure` entries in the report.
pub fn execute(
    api_key: Option<String>,
    settings: RunSettings,
    metadata: RunMetadata,
    probes: &ProbeSet,
    picker: &mut dyn SourcePicker,
) -> Result<RunOutcome, AppError> {
    let ctx = RunContext::initialize(api_key, settings, metadata)?;
    let results = run_probes(&ctx, probes, picker);
    let report = Report::new(ctx.metadata().clone(), results);
    let persisted = report::persist(&report, ctx.output_dir())?;
    info!(
        path = %persisted.path.display(),
        succeeded = report.results.success_count(),
        "report written"
    );
    Ok(RunOutcome { report, persisted })
}

pub fn run_probes(
    ctx: &RunContext,
    probes: &ProbeSet,
    picker: &mut dyn SourcePicker,
) -> ModelResults {
    let gpt_oss_120b = run_isolated(probes.text.as_ref(), ctx, picker);
    let whisper_large_v2 = run_isolated(probes.audio.as_ref(), ctx, picker);
    let deepseek_ocr = run_isolated(probes.image.as_ref(), ctx, picker);
    ModelResults { gpt_oss_120b, whisper_large_v2, deepseek_ocr }
}

fn run_isolated(
    probe: &dyn Probe,
    ctx: &RunContext,
    picker: &mut dyn SourcePicker,
) -> ProbeResult {
    let model = probe.model_key();
    info!(model, "probing");
    let result = ProbeResult::from_outcome(probe.run(ctx, picker));
    match &result {
        ProbeResult::Success { input, .. } => info!(model, input = %input, "probe succeeded"),
        ProbeResult::Failure { error } => warn!(model, error = %error, "probe failed"),
    }
    result
}
