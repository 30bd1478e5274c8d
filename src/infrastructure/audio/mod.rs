pub mod dependencies;
pub mod ffmpeg;
pub mod output;

pub use dependencies::{check_dependencies, DependencyReport};
pub use ffmpeg::FfmpegTranscoder;

use crate::domain::tts::AudioFormat;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decode/encode provider used to join MP3 fragments and convert formats.
///
/// Inputs are always MP3 files produced by a synthesis provider.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Decode `input` and return its duration in seconds
    ///
    /// # Errors
    /// `TranscodeError::Decode` if the file is not decodable audio
    async fn probe_duration(&self, input: &Path) -> Result<f64, TranscodeError>;

    /// Concatenate `inputs` in order and encode the result as `format` into `output`
    async fn concat(
        &self,
        inputs: &[PathBuf],
        format: AudioFormat,
        output: &Path,
    ) -> Result<(), TranscodeError>;
}
