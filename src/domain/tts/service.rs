use super::chunker::{self, DEFAULT_MAX_CHUNK_CHARS};
use super::combiner::{AudioCombiner, CombineOutcome};
use super::dto::{ConversionOutcome, ConversionRequest, SynthesisPath};
use super::error::TtsServiceError;
use super::format::AudioFormat;
use super::language::LanguageCode;
use crate::infrastructure::audio::output;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Texts up to this many characters are synthesized in one call
pub const DEFAULT_SINGLE_SHOT_THRESHOLD: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSettings {
    pub max_chunk_chars: usize,
    pub single_shot_threshold: usize,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            single_shot_threshold: DEFAULT_SINGLE_SHOT_THRESHOLD,
        }
    }
}

/// Receives progress of the per-fragment synthesis calls
pub trait SynthesisProgress: Send + Sync {
    fn started(&self, _total: usize) {}
    fn fragment_done(&self, _index: usize, _total: usize) {}
    fn finished(&self) {}
}

pub struct NoProgress;

impl SynthesisProgress for NoProgress {}

enum Plan {
    SingleShot,
    Chunked(Vec<String>),
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    combiner: AudioCombiner,
    settings: ConversionSettings,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        combiner: AudioCombiner,
        settings: ConversionSettings,
    ) -> Self {
        Self {
            tts_repo,
            combiner,
            settings,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Convert text to an audio file
    ///
    /// This operation:
    /// - Synthesizes short text in a single provider call
    /// - Splits longer text into sentence-aligned fragments and synthesizes
    ///   them one after another
    /// - Combines the fragments and encodes the requested format
    ///
    /// Temporary files are removed on every exit path and the output file is
    /// only created once complete.
    async fn convert(
        &self,
        request: ConversionRequest,
        progress: &dyn SynthesisProgress,
    ) -> Result<ConversionOutcome, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn convert(
        &self,
        request: ConversionRequest,
        progress: &dyn SynthesisProgress,
    ) -> Result<ConversionOutcome, TtsServiceError> {
        let start_time = std::time::Instant::now();

        let text = request.text.trim();
        if text.is_empty() {
            return Err(TtsServiceError::Validation(
                "Text cannot be empty".to_string(),
            ));
        }
        let characters = text.chars().count();

        // 1. Decide between a single call and chunked synthesis
        let plan = if characters <= self.settings.single_shot_threshold {
            Plan::SingleShot
        } else {
            Plan::Chunked(chunker::split(text, self.settings.max_chunk_chars))
        };
        let fragment_count = match &plan {
            Plan::SingleShot => 1,
            Plan::Chunked(fragments) => fragments.len(),
        };

        tracing::info!(
            provider = self.tts_repo.provider_name(),
            language = %request.language,
            format = %request.format,
            characters = characters,
            fragment_count = fragment_count,
            output = %request.output_path.display(),
            "Starting conversion"
        );

        // 2. Refuse early what cannot be produced, before any provider call
        self.guard_dependencies(request.format, fragment_count)?;

        // 3. Scoped work area, removed when dropped
        let work_dir = tempfile::Builder::new().prefix("tts_tmp_").tempdir()?;

        progress.started(fragment_count);
        let result = match &plan {
            Plan::SingleShot => self.single_shot(text, &request, &work_dir, progress).await,
            Plan::Chunked(fragments) => {
                self.chunked(fragments, &request, &work_dir, progress).await
            }
        };
        progress.finished();
        drop(work_dir);

        let combined = result?;
        let duration = start_time.elapsed();

        let outcome = ConversionOutcome {
            output_path: request.output_path,
            format: request.format,
            language: request.language,
            path: match plan {
                Plan::SingleShot => SynthesisPath::SingleShot,
                Plan::Chunked(_) => SynthesisPath::Chunked,
            },
            fragments: fragment_count,
            characters,
            duration_secs: combined.duration_secs,
            warning: combined.warning,
        };

        tracing::info!(
            path = ?outcome.path,
            fragment_count = outcome.fragments,
            latency_ms = duration.as_millis(),
            degraded = outcome.is_degraded(),
            output = %outcome.output_path.display(),
            "Conversion completed"
        );

        Ok(outcome)
    }
}

impl TtsService {
    fn guard_dependencies(
        &self,
        format: AudioFormat,
        fragment_count: usize,
    ) -> Result<(), TtsServiceError> {
        if self.combiner.has_transcoder() {
            return Ok(());
        }

        if format.requires_transcoder() {
            return Err(TtsServiceError::MissingDependency(format!(
                "converting to {} requires ffmpeg and ffprobe",
                format
            )));
        }

        if fragment_count > 1 && self.combiner.strict_output() {
            return Err(TtsServiceError::MissingDependency(format!(
                "joining {} audio fragments requires ffmpeg and ffprobe",
                fragment_count
            )));
        }

        Ok(())
    }

    async fn single_shot(
        &self,
        text: &str,
        request: &ConversionRequest,
        work_dir: &TempDir,
        progress: &dyn SynthesisProgress,
    ) -> Result<CombineOutcome, TtsServiceError> {
        let audio = self.synthesize_fragment(text, &request.language, 0, 1).await?;
        progress.fragment_done(0, 1);

        if request.format.is_native() {
            output::write_atomically(&request.output_path, &audio)?;
            return Ok(CombineOutcome {
                duration_secs: None,
                warning: None,
            });
        }

        let part = write_fragment(work_dir.path(), 0, &audio).await?;
        self.combiner
            .combine(&[part], request.format, work_dir.path(), &request.output_path)
            .await
    }

    async fn chunked(
        &self,
        fragments: &[String],
        request: &ConversionRequest,
        work_dir: &TempDir,
        progress: &dyn SynthesisProgress,
    ) -> Result<CombineOutcome, TtsServiceError> {
        let total = fragments.len();
        let mut parts = Vec::with_capacity(total);

        // Sequential on purpose: output order is fragment order
        for (index, fragment) in fragments.iter().enumerate() {
            let audio = self
                .synthesize_fragment(fragment, &request.language, index, total)
                .await?;
            parts.push(write_fragment(work_dir.path(), index, &audio).await?);
            progress.fragment_done(index, total);
        }

        self.combiner
            .combine(&parts, request.format, work_dir.path(), &request.output_path)
            .await
    }

    async fn synthesize_fragment(
        &self,
        text: &str,
        language: &LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, TtsServiceError> {
        tracing::debug!(
            fragment_index = index,
            fragment_count = total,
            fragment_size = text.len(),
            "Synthesizing fragment"
        );

        let audio = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(|e| {
                TtsServiceError::Provider(format!("fragment {} of {}: {}", index + 1, total, e))
            })?;

        tracing::debug!(
            fragment_index = index,
            audio_size = audio.len(),
            "Fragment synthesized"
        );

        Ok(audio)
    }
}

async fn write_fragment(
    work_dir: &Path,
    index: usize,
    audio: &[u8],
) -> Result<PathBuf, TtsServiceError> {
    let path = work_dir.join(format!("part_{}.{}", index, AudioFormat::NATIVE.extension()));
    tokio::fs::write(&path, audio).await?;
    Ok(path)
}
