//! Run metadata, per-model results, and the persisted daily report.

use crate::core::probe::ProbeResult;
use crate::error::AppError;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

pub const TEXT_MODEL_KEY: &str = "gpt_oss_120b";
pub const AUDIO_MODEL_KEY: &str = "whisper_large_v2";
pub const IMAGE_MODEL_KEY: &str = "deepseek_ocr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hour_minute")]
    pub run_time: NaiveTime,
}

impl RunMetadata {
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self { date: timestamp.date(), run_time: timestamp.time() }
    }
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

fn serialize_hour_minute<S: Serializer>(
    time: &NaiveTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// One entry per model. Named fields keep the entry count fixed at three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelResults {
    pub gpt_oss_120b: ProbeResult,
    pub whisper_large_v2: ProbeResult,
    pub deepseek_ocr: ProbeResult,
}

impl ModelResults {
    pub fn entries(&self) -> [(&'static str, &ProbeResult); 3] {
        [
            (TEXT_MODEL_KEY, &self.gpt_oss_120b),
            (AUDIO_MODEL_KEY, &self.whisper_large_v2),
            (IMAGE_MODEL_KEY, &self.deepseek_ocr),
        ]
    }

    pub fn success_count(&self) -> usize {
        self.entries().iter().filter(|(_, result)| result.is_success()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub metadata: RunMetadata,
    pub results: ModelResults,
}

impl Report {
    pub fn new(metadata: RunMetadata, results: ModelResults) -> Self {
        Self { metadata, results }
    }

    /// One file per calendar day.
    pub fn file_name(&self) -> String {
        format!("daily_model_health_{}.json", self.metadata.date.format("%Y-%m-%d"))
    }

    pub fn render(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|err| AppError::Io(err.into()))
    }
}

/// What was written, so the caller can echo exactly the same bytes.
#[derive(Debug, Clone)]
pub struct PersistedReport {
    pub path: PathBuf,
    pub rendered: String,
}

/// Write the report into `output_dir`, replacing any earlier report for the same date.
pub fn persist(report: &Report, output_dir: &Path) -> Result<PersistedReport, AppError> {
    let rendered = report.render()?;
    let path = output_dir.join(report.file_name());
    fs::write(&path, &rendered)?;
    Ok(PersistedReport { path, rendered })
}
