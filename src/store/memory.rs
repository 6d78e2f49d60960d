use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

use super::{IndexStore, NoteStore};
use crate::codec;
use crate::error::{NoteError, Result};
use crate::index::NoteIndex;
use crate::model::Note;

/// In-memory note store for testing.
///
/// Uses `RefCell` for interior mutability since the store is
/// single-threaded. Documents are held as encoded bytes so tests can plant
/// corrupt documents with [`MemNoteStore::insert_raw`].
pub struct MemNoteStore {
    documents: RefCell<HashMap<Uuid, Vec<u8>>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemNoteStore {
    fn default() -> Self {
        Self {
            documents: RefCell::new(HashMap::new()),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper: store arbitrary bytes under an id, bypassing the codec.
    pub fn insert_raw(&self, id: Uuid, bytes: Vec<u8>) {
        self.documents.borrow_mut().insert(id, bytes);
    }

    pub fn len(&self) -> usize {
        self.documents.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.borrow().is_empty()
    }
}

impl NoteStore for MemNoteStore {
    fn get(&self, id: &Uuid) -> Result<Note> {
        let documents = self.documents.borrow();
        let bytes = documents.get(id).ok_or(NoteError::NotFound(*id))?;
        codec::decode(bytes)
    }

    fn put(&mut self, note: &Note) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NoteError::Store("Simulated write error".to_string()));
        }
        let bytes = codec::encode(note)?;
        self.documents.borrow_mut().insert(note.id, bytes);
        Ok(())
    }

    fn delete(&mut self, id: &Uuid) -> Result<()> {
        self.documents.borrow_mut().remove(id);
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(Uuid, Vec<u8>)>> {
        Ok(self
            .documents
            .borrow()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }
}

/// In-memory index store for testing.
pub struct MemIndexStore {
    index: RefCell<Option<NoteIndex>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemIndexStore {
    fn default() -> Self {
        Self {
            index: RefCell::new(None),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl IndexStore for MemIndexStore {
    fn read(&self) -> Result<NoteIndex> {
        let mut slot = self.index.borrow_mut();
        // Lazy first-run bootstrap, mirroring the filesystem store.
        let index = slot.get_or_insert_with(|| {
            let mut index = NoteIndex::empty();
            index.stamp();
            index
        });
        Ok(index.clone())
    }

    fn write(&mut self, mut index: NoteIndex) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NoteError::Store("Simulated write error".to_string()));
        }
        index.stamp();
        *self.index.borrow_mut() = Some(index);
        Ok(())
    }
}
