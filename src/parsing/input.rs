//! Opening gene matrix inputs.
//!
//! Supported inputs:
//! - plain text files (`.csv`, `.tsv`, `.txt`, ...)
//! - gzip compressed files (`.gz`, `.bgz`)
//! - `-` for standard input

use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a gene matrix for reading.
///
/// The returned reader owns the file handle, which is closed when it is dropped.
///
/// # Errors
///
/// Returns the underlying `io::Error` if the file cannot be opened.
pub fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.as_os_str() == STDIN_PATH {
        debug!("Reading gene matrix from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        debug!("Reading gzipped gene matrix {}", path.display());
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        debug!("Reading gene matrix {}", path.display());
        Ok(Box::new(file))
    }
}
