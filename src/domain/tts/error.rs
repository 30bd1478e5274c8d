use crate::error::AppError;
use crate::infrastructure::audio::TranscodeError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("synthesis provider error: {0}")]
    Provider(String),
    #[error("missing dependency: {0}")]
    MissingDependency(String),
    #[error("audio decode error: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TtsServiceError {
    /// Map a transcoder failure, naming the fragment when one is known.
    pub fn from_transcode(fragment: Option<usize>, err: TranscodeError) -> Self {
        match (err, fragment) {
            (TranscodeError::Io(e), _) => TtsServiceError::Io(e),
            (TranscodeError::Decode(msg), Some(index)) => {
                TtsServiceError::Decode(format!("fragment {}: {}", index, msg))
            }
            (TranscodeError::Decode(msg), None) | (TranscodeError::Encode(msg), _) => {
                TtsServiceError::Decode(msg)
            }
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Validation(msg) => AppError::InvalidInput(msg),
            TtsServiceError::Provider(msg) => AppError::ExternalService(msg),
            TtsServiceError::MissingDependency(msg) => AppError::MissingDependency(msg),
            TtsServiceError::Decode(msg) => AppError::Audio(msg),
            TtsServiceError::Io(e) => AppError::Io(e),
        }
    }
}
