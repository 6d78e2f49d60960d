//! # Note Service
//!
//! [`NoteService`] is the single entry point callers use. It composes a
//! [`NoteStore`] (source of truth) with an [`IndexStore`] (derived cache)
//! and exposes every operation as an [`ApiResponse`] envelope: no panics,
//! no raw `Err` crossing the boundary.
//!
//! Mutations follow a fixed write order: note store first, index second.
//! A failure after the first write leaves the index stale, which is
//! recoverable by [`NoteService::rebuild_index`] and tolerated everywhere
//! else because the index is never the source of truth.

use uuid::Uuid;

use crate::api::{
    ApiResponse, CreateNoteRequest, MetadataPatch, RebuildReport, StatusPatch, UpdateNoteRequest,
};
use crate::codec;
use crate::error::{NoteError, Result};
use crate::filter::NoteFilter;
use crate::index::{IndexEntry, NoteIndex};
use crate::model::{Note, NoteStatus};
use crate::paths::NotePaths;
use crate::store::fs::{FsIndexStore, FsNoteStore};
use crate::store::memory::{MemIndexStore, MemNoteStore};
use crate::store::{IndexStore, NoteStore};

pub struct NoteService<S: NoteStore, I: IndexStore> {
    notes: S,
    index: I,
}

impl NoteService<FsNoteStore, FsIndexStore> {
    /// Opens a filesystem-backed service rooted at `paths`.
    pub fn open(paths: NotePaths) -> Self {
        Self {
            notes: FsNoteStore::new(paths.clone()),
            index: FsIndexStore::new(paths),
        }
    }

    /// The directory holding the note and index files, for callers that
    /// want to reveal it to the user.
    pub fn notes_directory(&self) -> std::path::PathBuf {
        self.notes.paths().root().to_path_buf()
    }
}

impl NoteService<MemNoteStore, MemIndexStore> {
    /// Fully in-memory service, used in tests.
    pub fn in_memory() -> Self {
        Self {
            notes: MemNoteStore::new(),
            index: MemIndexStore::new(),
        }
    }
}

impl<S: NoteStore, I: IndexStore> NoteService<S, I> {
    pub fn new(notes: S, index: I) -> Self {
        Self { notes, index }
    }

    pub fn note_store(&self) -> &S {
        &self.notes
    }

    pub fn index_store(&self) -> &I {
        &self.index
    }

    // ---- Create ----

    pub fn create_note(&mut self, request: CreateNoteRequest) -> ApiResponse<Note> {
        let note = Note::new(request);
        match self.persist(&note) {
            Ok(()) => ApiResponse::ok(note, "Note created successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to create note"),
        }
    }

    // ---- Read ----

    /// Fetches a note and records the view: on the first fetch of a
    /// calendar day (UTC), `last_viewed_at` is stamped, `edit_count`
    /// incremented, and the note persisted. Subsequent fetches the same
    /// day are pure reads.
    pub fn get_note_by_id(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.fetch_and_track(id) {
            Ok(note) => ApiResponse::ok(note, "Note fetched successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to fetch note"),
        }
    }

    /// Fetch without the view-tracking side effect.
    pub fn peek_note(&self, id: &Uuid) -> ApiResponse<Note> {
        match self.fetch(id) {
            Ok(note) => ApiResponse::ok(note, "Note fetched successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to fetch note"),
        }
    }

    /// Lists all index entries, most recently updated first.
    pub fn notes_list(&mut self) -> ApiResponse<Vec<IndexEntry>> {
        match self.load_index_healing() {
            Ok(index) => {
                let mut entries = index.notes;
                entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                ApiResponse::ok(entries, "Notes listed successfully")
            }
            Err(e) => ApiResponse::fail(&e, "Failed to list notes"),
        }
    }

    /// Lists index entries matching `filter`, most recently updated first.
    pub fn notes_list_by_filter(&mut self, filter: &NoteFilter) -> ApiResponse<Vec<IndexEntry>> {
        match self.load_index_healing() {
            Ok(index) => {
                let mut entries: Vec<IndexEntry> = index
                    .notes
                    .into_iter()
                    .filter(|e| filter.matches(e))
                    .collect();
                entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                ApiResponse::ok(entries, "Notes listed successfully")
            }
            Err(e) => ApiResponse::fail(&e, "Failed to list notes"),
        }
    }

    // ---- Update ----

    pub fn update_note(&mut self, request: UpdateNoteRequest) -> ApiResponse<Note> {
        match self.apply_patches(&request.id, &request.metadata, &request.status) {
            Ok(note) => ApiResponse::ok(note, "Note updated successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to update note"),
        }
    }

    pub fn toggle_favorite(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.toggle(id, |s| &mut s.favorite) {
            Ok(note) => ApiResponse::ok(note, "Favorite toggled successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to toggle favorite"),
        }
    }

    pub fn toggle_archive(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.toggle(id, |s| &mut s.archived) {
            Ok(note) => ApiResponse::ok(note, "Archive toggled successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to toggle archive"),
        }
    }

    pub fn toggle_pin(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.toggle(id, |s| &mut s.pinned) {
            Ok(note) => ApiResponse::ok(note, "Pin toggled successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to toggle pin"),
        }
    }

    // ---- Trash lifecycle ----

    pub fn move_to_trash(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.set_trashed(id, true) {
            Ok(note) => ApiResponse::ok(note, "Note moved to trash"),
            Err(e) => ApiResponse::fail(&e, "Failed to move note to trash"),
        }
    }

    pub fn restore_from_trash(&mut self, id: &Uuid) -> ApiResponse<Note> {
        match self.set_trashed(id, false) {
            Ok(note) => ApiResponse::ok(note, "Note restored from trash"),
            Err(e) => ApiResponse::fail(&e, "Failed to restore note"),
        }
    }

    /// Permanent, unrecoverable removal. Only trashed notes qualify.
    pub fn permanently_delete_note(&mut self, id: &Uuid) -> ApiResponse<Uuid> {
        match self.purge(id) {
            Ok(()) => ApiResponse::ok(*id, "Note permanently deleted"),
            Err(e) => ApiResponse::fail(&e, "Failed to delete note"),
        }
    }

    // ---- Index maintenance ----

    /// Rebuilds the index from scratch by scanning every stored document.
    /// Corrupt documents are skipped and counted, never deleted.
    pub fn rebuild_index(&mut self) -> ApiResponse<RebuildReport> {
        match self.rebuild() {
            Ok(report) => ApiResponse::ok(report, "Index rebuilt successfully"),
            Err(e) => ApiResponse::fail(&e, "Failed to rebuild index"),
        }
    }

    // ---- Inner fallible operations ----

    /// Reads through to the note store. A corrupt document reads as not
    /// found; rebuild is the repair path, not the read path.
    fn fetch(&self, id: &Uuid) -> Result<Note> {
        match self.notes.get(id) {
            Err(NoteError::CorruptDocument(_)) => Err(NoteError::NotFound(*id)),
            other => other,
        }
    }

    fn fetch_and_track(&mut self, id: &Uuid) -> Result<Note> {
        let mut note = self.fetch(id)?;
        if !note.viewed_today() {
            note.mark_viewed();
            self.persist(&note)?;
        }
        Ok(note)
    }

    /// Writes the note, then its index entry. The order is load-bearing:
    /// see the module docs.
    fn persist(&mut self, note: &Note) -> Result<()> {
        self.notes.put(note)?;
        self.index.upsert(IndexEntry::project(note))
    }

    fn apply_patches(
        &mut self,
        id: &Uuid,
        metadata: &MetadataPatch,
        status: &StatusPatch,
    ) -> Result<Note> {
        let mut note = self.fetch(id)?;
        note.apply_update(metadata, status);
        self.persist(&note)?;
        Ok(note)
    }

    fn toggle(&mut self, id: &Uuid, flag: fn(&mut NoteStatus) -> &mut bool) -> Result<Note> {
        let mut note = self.fetch(id)?;
        {
            let slot = flag(&mut note.status);
            *slot = !*slot;
        }
        note.stats.edit_count += 1;
        note.touch_revision();
        self.persist(&note)?;
        Ok(note)
    }

    fn set_trashed(&mut self, id: &Uuid, trashed: bool) -> Result<Note> {
        let mut note = self.fetch(id)?;
        if note.status.trashed == trashed {
            let state = if trashed {
                "note is already in trash"
            } else {
                "note is not in trash"
            };
            return Err(NoteError::InvalidState(state.to_string()));
        }
        note.status.trashed = trashed;
        note.stats.edit_count += 1;
        note.touch_revision();
        self.persist(&note)?;
        Ok(note)
    }

    fn purge(&mut self, id: &Uuid) -> Result<()> {
        let note = self.fetch(id)?;
        if !note.status.trashed {
            return Err(NoteError::InvalidState(
                "only trashed notes can be permanently deleted".to_string(),
            ));
        }
        self.notes.delete(id)?;
        self.index.remove(id)
    }

    /// Reads the index, rebuilding it in place when the stored document is
    /// unreadable. Loss of the index alone is never fatal.
    fn load_index_healing(&mut self) -> Result<NoteIndex> {
        match self.index.read() {
            Ok(index) => Ok(index),
            Err(NoteError::Serialization(_)) | Err(NoteError::CorruptDocument(_)) => {
                self.rebuild()?;
                self.index.read()
            }
            Err(e) => Err(e),
        }
    }

    fn rebuild(&mut self) -> Result<RebuildReport> {
        let mut fresh = NoteIndex::empty();
        let mut report = RebuildReport::default();

        for (_, bytes) in self.notes.scan()? {
            match codec::decode(&bytes) {
                Ok(note) => {
                    fresh.upsert(IndexEntry::project(&note));
                    report.indexed += 1;
                }
                Err(_) => report.skipped += 1,
            }
        }

        self.index.write(fresh)?;
        Ok(report)
    }
}
