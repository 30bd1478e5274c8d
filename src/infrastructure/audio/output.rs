//! Atomic placement of the finished audio file.
//!
//! The result is written to a temporary file in the destination directory and
//! renamed over the destination only once complete, so a failed run never
//! leaves a truncated file behind.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

fn temp_file_beside(destination: &Path) -> io::Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tempfile::Builder::new()
        .prefix(".tts_out_")
        .tempfile_in(dir)
}

/// Write `bytes` to `destination` atomically
pub fn write_atomically(destination: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = temp_file_beside(destination)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

/// Copy `source` to `destination` atomically
pub fn copy_atomically(source: &Path, destination: &Path) -> io::Result<()> {
    let mut tmp = temp_file_beside(destination)?;
    let mut input = File::open(source)?;
    io::copy(&mut input, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}
