//! Storage path resolution. Pure joins over a caller-supplied base
//! directory; no I/O happens here.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File holding the id-keyed map of all note documents.
pub const NOTES_FILE: &str = "notes.json";

/// File holding the derived index.
pub const INDEX_FILE: &str = "note-index.json";

/// Whether the host application runs from a packaged build or a dev
/// checkout. Dev builds get their own store so they never touch real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Packaged,
    Dev,
}

#[derive(Debug, Clone)]
pub struct NotePaths {
    root: PathBuf,
}

impl NotePaths {
    /// Derives the storage root from the host-provided user data directory.
    pub fn new(user_data_dir: &Path, mode: ExecMode) -> Self {
        let dir_name = match mode {
            ExecMode::Packaged => "notes",
            ExecMode::Dev => "notes-dev",
        };
        Self {
            root: user_data_dir.join(dir_name),
        }
    }

    /// Resolves the platform user data directory for `app_name` and derives
    /// the storage root from it. Returns `None` when the platform provides
    /// no home directory.
    pub fn discover(app_name: &str, mode: ExecMode) -> Option<Self> {
        ProjectDirs::from("", "", app_name).map(|dirs| Self::new(dirs.data_dir(), mode))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes_file(&self) -> PathBuf {
        self.root.join(NOTES_FILE)
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }
}
