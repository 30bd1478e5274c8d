use super::FfmpegTranscoder;
use std::env;
use std::path::{Path, PathBuf};

/// Presence of the ffmpeg binaries needed for combining and converting audio
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReport {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
}

impl DependencyReport {
    pub fn all_present(&self) -> bool {
        self.ffmpeg.is_some() && self.ffprobe.is_some()
    }

    /// Build a transcoder if both binaries were found
    pub fn transcoder(&self) -> Option<FfmpegTranscoder> {
        match (&self.ffmpeg, &self.ffprobe) {
            (Some(ffmpeg), Some(ffprobe)) => {
                Some(FfmpegTranscoder::new(ffmpeg.clone(), ffprobe.clone()))
            }
            _ => None,
        }
    }
}

/// Install suggestions for the current platform
pub fn install_hints() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["choco install ffmpeg", "scoop install ffmpeg"]
    } else if cfg!(target_os = "macos") {
        &["brew install ffmpeg"]
    } else {
        &[
            "sudo apt install ffmpeg",
            "sudo dnf install ffmpeg",
            "sudo pacman -S ffmpeg",
        ]
    }
}

/// Locate ffmpeg and ffprobe, preferring explicitly configured paths
pub fn check_dependencies(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> DependencyReport {
    let report = DependencyReport {
        ffmpeg: locate("ffmpeg", ffmpeg),
        ffprobe: locate("ffprobe", ffprobe),
    };

    tracing::debug!(
        ffmpeg = ?report.ffmpeg,
        ffprobe = ?report.ffprobe,
        "Dependency check completed"
    );

    report
}

fn locate(name: &str, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(binary = name, path = %path.display(), "Configured binary does not exist");
        return None;
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| candidate.is_file())
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        vec![dir.join(format!("{}.exe", name)), dir.join(name)]
    } else {
        vec![dir.join(name)]
    }
}
