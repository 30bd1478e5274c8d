use super::error::TtsServiceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output audio formats. MP3 is what every synthesis provider returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
}

impl AudioFormat {
    /// Format produced by the synthesis providers
    pub const NATIVE: AudioFormat = AudioFormat::Mp3;

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    /// Whether producing this format needs the decode/encode provider
    pub fn requires_transcoder(&self) -> bool {
        !self.is_native()
    }

    /// Default output file name for this format
    pub fn default_output_name(&self) -> String {
        format!("output.{}", self.extension())
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::NATIVE
    }
}

impl FromStr for AudioFormat {
    type Err = TtsServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            "ogg" => Ok(AudioFormat::Ogg),
            other => Err(TtsServiceError::Validation(format!(
                "Unsupported format: {} (expected mp3, wav or ogg)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
