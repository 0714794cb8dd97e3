//! Manual chat export to JSON
//!
//! A thread is written as a JSON array of `[sender, text]` pairs. Exports
//! are never read back at startup; `load_export` exists for inspection and
//! tests.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::{ChatMessage, ChatThread};

/// Errors from writing or reading an export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chat JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filesystem-safe file name for a thread
///
/// `Chat 1 - 10:15:00` becomes `Chat 1 - 10-15-00.json`.
pub fn export_file_name(thread_name: &str) -> String {
    let stem: String = thread_name
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '-',
            other => other,
        })
        .collect();
    format!("{stem}.json")
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError {
    let path = path.to_path_buf();
    move |source| ExportError::Io { path, source }
}

/// Write a thread into `dir`, returning the file path
pub fn save_thread(dir: &Path, thread: &ChatThread) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;

    let final_path = dir.join(export_file_name(thread.name()));
    let tmp_path = final_path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(thread.messages())?;

    fs::write(&tmp_path, bytes).map_err(io_err(&tmp_path))?;
    fs::rename(&tmp_path, &final_path).map_err(io_err(&final_path))?;

    info!(path = %final_path.display(), messages = thread.messages().len(), "Exported chat");
    Ok(final_path)
}

/// Read an export file back into messages
pub fn load_export(path: &Path) -> Result<Vec<ChatMessage>, ExportError> {
    let data = fs::read(path).map_err(io_err(path))?;
    Ok(serde_json::from_slice(&data)?)
}
