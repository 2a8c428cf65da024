//! Writing run artifacts.
//!
//! Every artifact is written to a temporary file next to its destination and
//! then renamed over it, so readers never observe a partially written file.
//! A run stages all of its artifacts before persisting any of them.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::core::result::RunResult;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// An artifact fully written to a temporary file next to its destination
#[derive(Debug)]
pub struct StagedArtifact {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedArtifact {
    /// Move the artifact into place
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Persist` if the rename fails.
    pub fn persist(self) -> Result<(), OutputError> {
        self.temp.persist(&self.path)?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Write `contents` to a temporary file in the directory of `path`.
///
/// Nothing is visible at `path` until [`StagedArtifact::persist`]; dropping
/// the staged artifact removes the temporary file.
///
/// # Errors
///
/// Returns `OutputError::Io` if the temporary file cannot be created or written.
pub fn stage(path: &Path, contents: &[u8]) -> Result<StagedArtifact, OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    debug!("Staged {} bytes for {}", contents.len(), path.display());
    Ok(StagedArtifact {
        temp,
        path: path.to_path_buf(),
    })
}

/// Persist staged artifacts; call only once every artifact of a run is staged
///
/// # Errors
///
/// Returns `OutputError::Persist` for the first artifact that cannot be moved
/// into place.
pub fn persist_all(artifacts: Vec<StagedArtifact>) -> Result<(), OutputError> {
    for artifact in artifacts {
        artifact.persist()?;
    }
    Ok(())
}

/// Atomically replace `path` with `contents`
///
/// # Errors
///
/// Returns `OutputError::Io` if the temporary file cannot be written or
/// `OutputError::Persist` if it cannot be moved into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    stage(path, contents)?.persist()
}

/// Serialize the run result as pretty-printed JSON
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization fails.
pub fn result_json(result: &RunResult) -> Result<Vec<u8>, OutputError> {
    let mut json = serde_json::to_vec_pretty(result)?;
    json.push(b'\n');
    Ok(json)
}

/// Write the run result as pretty-printed JSON
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization fails, otherwise the errors of
/// [`write_atomic`].
pub fn write_result_json(path: &Path, result: &RunResult) -> Result<(), OutputError> {
    write_atomic(path, &result_json(result)?)
}
