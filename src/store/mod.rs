//! # Storage Layer
//!
//! Two storage contracts live here, mirroring the two on-disk artifacts:
//!
//! 1. **[`NoteStore`]**: the source of truth. A key-value contract over
//!    full note documents, keyed by note id.
//! 2. **[`IndexStore`]**: the derived index. A single document holding one
//!    lightweight entry per note, always recomputable from the note store.
//!
//! ## Write Order Invariant
//!
//! Every mutation path writes the note store first and the index second.
//! If the process dies between the two writes, the index is stale but never
//! points at a phantom document; a rebuild restores consistency. The index
//! is therefore treated as a cache at all times; corruption or loss of the
//! index file alone is non-fatal.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── notes.json        # {"notes": {"<uuid>": {...note...}}}
//! └── note-index.json   # {"version", "lastUpdated", "totalNotes", "notes": [...]}
//! ```
//!
//! The single-file map layout is deliberate: the historical per-file layout
//! encoded `{id}_{mtime}_{title}` into filenames, which forced a rename on
//! every update and an id-prefix directory scan as a lookup fallback. The
//! map layout removes both concerns.
//!
//! ## Implementations
//!
//! - [`fs::FsNoteStore`] / [`fs::FsIndexStore`]: production stores with
//!   atomic writes (tmp file + rename).
//! - [`memory::MemNoteStore`] / [`memory::MemIndexStore`]: for testing
//!   logic without filesystem I/O, with simulated write failures.
//!
//! Single-process, single-writer: no locking is provided, and concurrent
//! external modification of the storage directory is undefined behavior.

use uuid::Uuid;

use crate::error::Result;
use crate::index::{IndexEntry, NoteIndex};
use crate::model::Note;

pub mod fs;
pub mod memory;

/// Key-value contract over full note documents. The source of truth.
pub trait NoteStore {
    /// Fails with `NotFound` when no document exists for `id`, or
    /// `CorruptDocument` when the stored bytes do not decode.
    fn get(&self, id: &Uuid) -> Result<Note>;

    /// Whole-document replacement; no field-level update at this layer.
    fn put(&mut self, note: &Note) -> Result<()>;

    /// Permanent removal. A no-op when the document is already absent.
    fn delete(&mut self, id: &Uuid) -> Result<()>;

    /// Enumerates all stored documents as raw bytes, re-reading the
    /// current state on every call. Corrupt documents are included; the
    /// caller decides whether to decode or skip them.
    fn scan(&self) -> Result<Vec<(Uuid, Vec<u8>)>>;
}

/// Contract over the derived index document.
pub trait IndexStore {
    /// Loads the index, lazily initializing (and persisting) an empty one
    /// on first run.
    fn read(&self) -> Result<NoteIndex>;

    /// Stamps `lastUpdated`/`totalNotes` and overwrites the index in full.
    fn write(&mut self, index: NoteIndex) -> Result<()>;

    /// Read-modify-write: replace the matching entry or append.
    fn upsert(&mut self, entry: IndexEntry) -> Result<()> {
        let mut index = self.read()?;
        index.upsert(entry);
        self.write(index)
    }

    /// Read-modify-write: drop the matching entry if present.
    fn remove(&mut self, id: &Uuid) -> Result<()> {
        let mut index = self.read()?;
        index.remove(id);
        self.write(index)
    }
}
