use super::{AudioTranscoder, TranscodeError};
use crate::domain::tts::AudioFormat;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

/// Name of the concat demuxer list written next to the output
const CONCAT_LIST_FILE: &str = "concat.txt";

/// ffmpeg/ffprobe backed transcoder
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg: PathBuf, ffprobe: PathBuf) -> Self {
        Self { ffmpeg, ffprobe }
    }

    /// Codec arguments for each output format
    fn codec_args(format: AudioFormat) -> &'static [&'static str] {
        match format {
            AudioFormat::Mp3 => &["-c:a", "libmp3lame", "-q:a", "2", "-f", "mp3"],
            AudioFormat::Wav => &["-c:a", "pcm_s16le", "-f", "wav"],
            AudioFormat::Ogg => &["-c:a", "libvorbis", "-q:a", "5", "-f", "ogg"],
        }
    }

    /// Render the concat demuxer list, one `file '<path>'` line per input
    fn concat_list(inputs: &[PathBuf]) -> String {
        inputs
            .iter()
            .map(|path| {
                let escaped = path.to_string_lossy().replace('\'', r"'\''");
                format!("file '{}'\n", escaped)
            })
            .collect()
    }

    fn stderr_of(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).trim().to_string()
    }

    fn is_decode_failure(stderr: &str) -> bool {
        const DECODE_MARKERS: &[&str] = &[
            "Invalid data found when processing input",
            "could not find codec parameters",
            "Failed to read frame size",
            "Header missing",
        ];
        DECODE_MARKERS.iter().any(|marker| stderr.contains(marker))
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn probe_duration(&self, input: &Path) -> Result<f64, TranscodeError> {
        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(input)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            tracing::error!(input = %input.display(), stderr = %stderr, "ffprobe failed");
            return Err(TranscodeError::Decode(format!(
                "ffprobe could not read {}: {}",
                input.display(),
                stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.trim().parse::<f64>().map_err(|_| {
            TranscodeError::Decode(format!(
                "{} has no readable duration (ffprobe reported '{}')",
                input.display(),
                stdout.trim()
            ))
        })
    }

    async fn concat(
        &self,
        inputs: &[PathBuf],
        format: AudioFormat,
        output: &Path,
    ) -> Result<(), TranscodeError> {
        let list_dir = output.parent().unwrap_or_else(|| Path::new("."));
        let list_path = list_dir.join(CONCAT_LIST_FILE);
        tokio::fs::write(&list_path, Self::concat_list(inputs)).await?;

        tracing::debug!(
            inputs = inputs.len(),
            format = %format,
            output = %output.display(),
            "Running ffmpeg concat"
        );

        let result = Command::new(&self.ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .arg("-vn")
            .args(Self::codec_args(format))
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = Self::stderr_of(&result);
            tracing::error!(stderr = %stderr, format = %format, "ffmpeg concat failed");
            return Err(if Self::is_decode_failure(&stderr) {
                TranscodeError::Decode(stderr)
            } else {
                TranscodeError::Encode(format!("ffmpeg failed to encode {}: {}", format, stderr))
            });
        }

        Ok(())
    }
}
