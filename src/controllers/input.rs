use crate::error::{AppError, AppResult};
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

/// Where the text to speak came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Argument,
    Stdin,
    File(PathBuf),
    Prompt,
}

/// Pick the text in priority order: argument, piped stdin, input file.
///
/// `piped` is only consulted when no argument was given.
pub fn select_text<F>(
    explicit: Option<String>,
    piped: F,
    input_file: &Path,
) -> AppResult<Option<(String, InputSource)>>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(text) = explicit.filter(|t| !t.trim().is_empty()) {
        return Ok(Some((text, InputSource::Argument)));
    }

    if let Some(text) = piped().filter(|t| !t.trim().is_empty()) {
        return Ok(Some((text, InputSource::Stdin)));
    }

    if input_file.is_file() {
        let text = std::fs::read_to_string(input_file).map_err(|e| {
            AppError::Input(format!("{}: {}", input_file.display(), e))
        })?;
        if !text.trim().is_empty() {
            return Ok(Some((text, InputSource::File(input_file.to_path_buf()))));
        }
    }

    Ok(None)
}

/// Read the text from the process surroundings, prompting as a last resort
pub fn read_text(explicit: Option<String>, input_file: &Path) -> AppResult<(String, InputSource)> {
    if let Some(found) = select_text(explicit, read_piped_stdin, input_file)? {
        return Ok(found);
    }

    let text = prompt("Please enter the text to speak: ")?;
    Ok((text, InputSource::Prompt))
}

fn read_piped_stdin() -> Option<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buffer = String::new();
    match stdin.lock().read_to_string(&mut buffer) {
        Ok(_) => Some(buffer.trim().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read piped stdin");
            None
        }
    }
}

fn prompt(message: &str) -> AppResult<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", message)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
