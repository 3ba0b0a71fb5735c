//! Persistence of the latest submission.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use formkit_core::{to_json_pretty, Document};

use crate::error::ServerError;

/// Writes validated documents to one JSON file.
///
/// Writes are serialized through a lock and land atomically: the document is
/// written to a temporary file next to the target, then renamed over it.
/// Concurrent submissions are last-write-wins.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Persist`] if the temporary file cannot be
    /// created, written or renamed.
    pub fn save(&self, document: &Document) -> Result<(), ServerError> {
        let mut text = to_json_pretty(document)?;
        text.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let persist_error = |source| ServerError::Persist {
            path: self.path.clone(),
            source,
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(persist_error)?;
        file.write_all(text.as_bytes()).map_err(persist_error)?;
        file.as_file().sync_all().map_err(persist_error)?;
        file.persist(&self.path)
            .map_err(|e| persist_error(e.error))?;

        tracing::info!(path = %self.path.display(), bytes = text.len(), "saved submission");
        Ok(())
    }

    /// Read back the stored document, if one has been written.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Persist`] for read failures other than a
    /// missing file, and [`ServerError::Core`] for invalid JSON.
    pub fn load(&self) -> Result<Option<Document>, ServerError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ServerError::Persist {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| {
                ServerError::Core(formkit_core::CoreError::Json {
                    what: self.path.display().to_string(),
                    source,
                })
            })
    }
}
