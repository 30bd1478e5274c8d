use std::process::ExitCode;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not read input text: {0}")]
    Input(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Audio processing error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this error. Every failure is non-zero.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }

    /// Report the error on stderr
    pub fn report(&self) {
        tracing::debug!(error = ?self, "Conversion failed");
        eprintln!("Error creating audio file: {}", self);
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
