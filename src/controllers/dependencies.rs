use crate::infrastructure::audio::{check_dependencies, dependencies::install_hints};
use crate::infrastructure::config::Config;
use std::process::ExitCode;

/// Exit status when ffmpeg or ffprobe is missing
pub const MISSING_DEPENDENCY_EXIT: u8 = 2;

/// Report whether ffmpeg and ffprobe can be found and how to install them
pub fn check(config: &Config) -> ExitCode {
    let report = check_dependencies(config.ffmpeg_path.as_deref(), config.ffprobe_path.as_deref());

    match &report.ffmpeg {
        Some(path) => println!("ffmpeg found: {}", path.display()),
        None => {
            println!("ffmpeg not found. Install it with:");
            for hint in install_hints() {
                println!("  - {}", hint);
            }
        }
    }

    match &report.ffprobe {
        Some(path) => println!("ffprobe found: {}", path.display()),
        None => println!("ffprobe not found (needed to decode audio fragments)."),
    }

    if report.all_present() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(MISSING_DEPENDENCY_EXIT)
    }
}
