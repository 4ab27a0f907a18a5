//! # Write-Through State Store
//!
//! The explicitly owned state container: one [`AppDocument`], one file,
//! one write path.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Store (single writer)                       │
//! │                                                                 │
//! │  command ──► mutate(|doc| ...) ──► flush whole document ──► ok  │
//! │                                                                 │
//! │  • Every mutation is followed by a full synchronous flush       │
//! │    (write-through): a later read, including a process restart,  │
//! │    observes the latest state.                                   │
//! │  • Flush writes a temp file then renames over the target, so    │
//! │    the last successful flush wins even on a crash mid-write.    │
//! │  • No write-behind buffering, no partial-write recovery.        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::AppDocument;
use crate::error::{StoreError, StoreResult};
use granel_core::CoreResult;

/// The owned application state plus its backing file.
///
/// Single-threaded by design: one logical thread of control, so no lock
/// discipline is needed around the document.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    document: AppDocument,
}

impl Store {
    /// Opens the store at `path`.
    ///
    /// A missing file starts an empty document (first run). A file that
    /// exists but does not parse is a hard error: the store never clobbers
    /// state it cannot read.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(StoreError::CorruptDocument)?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppDocument::empty(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), "state document loaded");
        Ok(Store { path, document })
    }

    /// Read access to the current state.
    pub fn document(&self) -> &AppDocument {
        &self.document
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The single authoritative write path: applies `f` and immediately
    /// flushes the whole document.
    pub fn mutate<F, R>(&mut self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut AppDocument) -> R,
    {
        let result = f(&mut self.document);
        self.flush()?;
        Ok(result)
    }

    /// Like [`Store::mutate`] for closures that can reject.
    ///
    /// Core operations guard before mutating, so a rejection leaves the
    /// document unchanged and nothing is flushed.
    pub fn try_mutate<F, R>(&mut self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut AppDocument) -> CoreResult<R>,
    {
        let result = f(&mut self.document)?;
        self.flush()?;
        Ok(result)
    }

    /// Replaces the whole document (backup restore) and flushes.
    pub fn replace(&mut self, document: AppDocument) -> StoreResult<()> {
        self.document = document;
        self.flush()
    }

    /// Restores the empty document ("reset system").
    pub fn reset(&mut self) -> StoreResult<()> {
        self.replace(AppDocument::empty())
    }

    /// Serializes the document and writes it via temp file + rename.
    fn flush(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "state document flushed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
