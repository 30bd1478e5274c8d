use super::format::AudioFormat;
use super::language::LanguageCode;
use serde::Serialize;
use std::path::PathBuf;

/// One text-to-audio conversion
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub text: String,
    pub output_path: PathBuf,
    pub format: AudioFormat,
    pub language: LanguageCode,
}

/// Which path the orchestrator took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisPath {
    SingleShot,
    Chunked,
}

/// Raised when only part of the text made it into the output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialOutputWarning {
    pub fragments_total: usize,
    pub fragments_written: usize,
}

impl std::fmt::Display for PartialOutputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ffmpeg is not available: only {} of {} text fragments were written to the output",
            self.fragments_written, self.fragments_total
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub output_path: PathBuf,
    pub format: AudioFormat,
    pub language: LanguageCode,
    pub path: SynthesisPath,
    pub fragments: usize,
    pub characters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<PartialOutputWarning>,
}

impl ConversionOutcome {
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}
