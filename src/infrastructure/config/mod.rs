use crate::domain::tts::chunker::DEFAULT_MAX_CHUNK_CHARS;
use crate::domain::tts::service::DEFAULT_SINGLE_SHOT_THRESHOLD;
use crate::domain::tts::{AudioFormat, LanguageCode};
use crate::error::AppError;
use crate::infrastructure::repositories::google_tts_repository::DEFAULT_GOOGLE_TTS_URL;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub default_language: LanguageCode,
    pub default_format: AudioFormat,
    pub max_chunk_chars: usize,
    pub single_shot_threshold: usize,
    pub strict_output: bool,
    pub request_timeout_secs: u64,
    pub google_tts_url: String,
    // AWS Polly
    pub aws_region: String,
    // OpenAI
    pub openai_model: String,
    pub openai_voice: String,
    // Decode/encode binaries
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provider {
    Google,
    Polly,
    OpenAi,
}

impl FromStr for Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gtts" => Ok(Provider::Google),
            "polly" | "aws" => Ok(Provider::Polly),
            "openai" => Ok(Provider::OpenAi),
            other => Err(AppError::Config(format!(
                "unknown TTS_PROVIDER '{}' (expected google, polly or openai)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            provider: var("TTS_PROVIDER", "google").parse()?,
            default_language: LanguageCode::parse(&var("TTS_LANGUAGE", "de"))
                .map_err(|e| AppError::Config(format!("TTS_LANGUAGE: {}", e)))?,
            default_format: var("TTS_FORMAT", "mp3")
                .parse::<AudioFormat>()
                .map_err(|e| AppError::Config(format!("TTS_FORMAT: {}", e)))?,
            max_chunk_chars: parse_number(
                "TTS_MAX_CHUNK_CHARS",
                &var("TTS_MAX_CHUNK_CHARS", &DEFAULT_MAX_CHUNK_CHARS.to_string()),
            )?,
            single_shot_threshold: parse_number(
                "TTS_SINGLE_SHOT_THRESHOLD",
                &var(
                    "TTS_SINGLE_SHOT_THRESHOLD",
                    &DEFAULT_SINGLE_SHOT_THRESHOLD.to_string(),
                ),
            )?,
            strict_output: var("TTS_STRICT", "false").to_lowercase() == "true",
            request_timeout_secs: parse_number(
                "TTS_REQUEST_TIMEOUT_SECS",
                &var("TTS_REQUEST_TIMEOUT_SECS", "30"),
            )?,
            google_tts_url: var("GOOGLE_TTS_URL", DEFAULT_GOOGLE_TTS_URL),
            aws_region: var("AWS_REGION", "eu-west-1"),
            openai_model: var("OPENAI_TTS_MODEL", "tts-1"),
            openai_voice: var("OPENAI_TTS_VOICE", ""),
            ffmpeg_path: lookup("FFMPEG_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
            ffprobe_path: lookup("FFPROBE_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
            log_format: match var("LOG_FORMAT", "pretty").to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        if config.max_chunk_chars == 0 {
            return Err(AppError::Config(
                "TTS_MAX_CHUNK_CHARS must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, value)))
}
