use super::dto::PartialOutputWarning;
use super::error::TtsServiceError;
use super::format::AudioFormat;
use crate::infrastructure::audio::{output, AudioTranscoder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CombineOutcome {
    /// Total duration of the decoded fragments, when a transcoder was available
    pub duration_secs: Option<f64>,
    pub warning: Option<PartialOutputWarning>,
}

/// Joins synthesized MP3 fragments into the requested output format.
///
/// Without a transcoder only MP3 can be produced, and only the first
/// fragment can be written. That case is reported as a
/// `PartialOutputWarning`, or refused when `strict_output` is set.
pub struct AudioCombiner {
    transcoder: Option<Arc<dyn AudioTranscoder>>,
    strict_output: bool,
}

impl AudioCombiner {
    pub fn new(transcoder: Option<Arc<dyn AudioTranscoder>>, strict_output: bool) -> Self {
        Self {
            transcoder,
            strict_output,
        }
    }

    pub fn has_transcoder(&self) -> bool {
        self.transcoder.is_some()
    }

    pub fn strict_output(&self) -> bool {
        self.strict_output
    }

    /// Combine `fragments` in order into `destination`.
    ///
    /// `work_dir` receives intermediate files; `destination` is only written
    /// once the complete result exists.
    pub async fn combine(
        &self,
        fragments: &[PathBuf],
        format: AudioFormat,
        work_dir: &Path,
        destination: &Path,
    ) -> Result<CombineOutcome, TtsServiceError> {
        if fragments.is_empty() {
            return Err(TtsServiceError::Validation(
                "No audio fragments to combine".to_string(),
            ));
        }

        match &self.transcoder {
            Some(transcoder) => {
                self.transcode(transcoder.as_ref(), fragments, format, work_dir, destination)
                    .await
            }
            None => self.copy_without_transcoder(fragments, format, destination),
        }
    }

    async fn transcode(
        &self,
        transcoder: &dyn AudioTranscoder,
        fragments: &[PathBuf],
        format: AudioFormat,
        work_dir: &Path,
        destination: &Path,
    ) -> Result<CombineOutcome, TtsServiceError> {
        let mut duration_secs = 0.0;
        for (index, fragment) in fragments.iter().enumerate() {
            duration_secs += transcoder
                .probe_duration(fragment)
                .await
                .map_err(|e| TtsServiceError::from_transcode(Some(index), e))?;
        }

        let combined = work_dir.join(format!("combined.{}", format.extension()));
        transcoder
            .concat(fragments, format, &combined)
            .await
            .map_err(|e| TtsServiceError::from_transcode(None, e))?;

        output::copy_atomically(&combined, destination)?;

        tracing::info!(
            fragment_count = fragments.len(),
            format = %format,
            duration_secs = format!("{:.2}", duration_secs),
            output = %destination.display(),
            "Audio fragments combined"
        );

        Ok(CombineOutcome {
            duration_secs: Some(duration_secs),
            warning: None,
        })
    }

    fn copy_without_transcoder(
        &self,
        fragments: &[PathBuf],
        format: AudioFormat,
        destination: &Path,
    ) -> Result<CombineOutcome, TtsServiceError> {
        if format.requires_transcoder() {
            return Err(TtsServiceError::MissingDependency(format!(
                "converting to {} requires ffmpeg and ffprobe",
                format
            )));
        }

        if fragments.len() == 1 {
            output::copy_atomically(&fragments[0], destination)?;
            return Ok(CombineOutcome {
                duration_secs: None,
                warning: None,
            });
        }

        if self.strict_output {
            return Err(TtsServiceError::MissingDependency(format!(
                "joining {} audio fragments requires ffmpeg and ffprobe",
                fragments.len()
            )));
        }

        let warning = PartialOutputWarning {
            fragments_total: fragments.len(),
            fragments_written: 1,
        };
        tracing::warn!(
            fragments_total = warning.fragments_total,
            fragments_written = warning.fragments_written,
            "ffmpeg missing, writing only the first fragment"
        );

        output::copy_atomically(&fragments[0], destination)?;

        Ok(CombineOutcome {
            duration_secs: None,
            warning: Some(warning),
        })
    }
}
