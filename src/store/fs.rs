use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use super::{IndexStore, NoteStore};
use crate::codec;
use crate::error::{NoteError, Result};
use crate::index::NoteIndex;
use crate::model::Note;
use crate::paths::NotePaths;

/// Wire shape of `notes.json`. Documents are kept as raw JSON values so a
/// single malformed document does not poison the whole map: `get` surfaces
/// it as `CorruptDocument`, `scan` hands the bytes to the caller untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesFile {
    notes: HashMap<Uuid, Value>,
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(NoteError::Io)?;
    }
    Ok(())
}

/// Atomic overwrite: write to a uniquely named tmp file in the same
/// directory, then rename over the target.
fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    ensure_dir(dir)?;
    let tmp = dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, bytes).map_err(NoteError::Io)?;
    fs::rename(&tmp, target).map_err(NoteError::Io)?;
    Ok(())
}

/// Filesystem note store using the single-file map layout.
pub struct FsNoteStore {
    paths: NotePaths,
}

impl FsNoteStore {
    pub fn new(paths: NotePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &NotePaths {
        &self.paths
    }

    fn load_map(&self) -> Result<HashMap<Uuid, Value>> {
        let file = self.paths.notes_file();
        if !file.exists() {
            return Ok(HashMap::new());
        }
        let bytes = fs::read(&file).map_err(NoteError::Io)?;
        let parsed: NotesFile = serde_json::from_slice(&bytes).map_err(NoteError::Serialization)?;
        Ok(parsed.notes)
    }

    fn save_map(&self, notes: HashMap<Uuid, Value>) -> Result<()> {
        let wrapped = NotesFile { notes };
        let bytes = serde_json::to_vec_pretty(&wrapped).map_err(NoteError::Serialization)?;
        write_atomic(self.paths.root(), &self.paths.notes_file(), &bytes)
    }
}

impl NoteStore for FsNoteStore {
    fn get(&self, id: &Uuid) -> Result<Note> {
        let map = self.load_map()?;
        let value = map.get(id).cloned().ok_or(NoteError::NotFound(*id))?;
        codec::from_value(value)
    }

    fn put(&mut self, note: &Note) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(note.id, codec::to_value(note)?);
        self.save_map(map)
    }

    fn delete(&mut self, id: &Uuid) -> Result<()> {
        let mut map = self.load_map()?;
        if map.remove(id).is_some() {
            self.save_map(map)?;
        }
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(Uuid, Vec<u8>)>> {
        let map = self.load_map()?;
        let mut documents = Vec::with_capacity(map.len());
        for (id, value) in map {
            let bytes = serde_json::to_vec(&value).map_err(NoteError::Serialization)?;
            documents.push((id, bytes));
        }
        Ok(documents)
    }
}

/// Filesystem store for the derived index document.
pub struct FsIndexStore {
    paths: NotePaths,
}

impl FsIndexStore {
    pub fn new(paths: NotePaths) -> Self {
        Self { paths }
    }

    fn persist(&self, index: &NoteIndex) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(index).map_err(NoteError::Serialization)?;
        write_atomic(self.paths.root(), &self.paths.index_file(), &bytes)
    }
}

impl IndexStore for FsIndexStore {
    fn read(&self) -> Result<NoteIndex> {
        let file = self.paths.index_file();
        if !file.exists() {
            // First-run bootstrap: persist an empty index before returning.
            let mut index = NoteIndex::empty();
            index.stamp();
            self.persist(&index)?;
            return Ok(index);
        }
        let bytes = fs::read(&file).map_err(NoteError::Io)?;
        serde_json::from_slice(&bytes).map_err(NoteError::Serialization)
    }

    fn write(&mut self, mut index: NoteIndex) -> Result<()> {
        index.stamp();
        self.persist(&index)
    }
}
