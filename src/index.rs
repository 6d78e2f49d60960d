//! # The Derived Index
//!
//! The index is a single JSON document holding one lightweight entry per
//! note, so listing and filtering never have to open every document. It is
//! derived data in the strictest sense: every entry can be recomputed from
//! the note store by a full rebuild, and the index is never consulted as a
//! source of truth. That is why every mutation writes the note store first
//! and the index second: a crash between the two leaves a stale index, not
//! a phantom document, and `rebuild` repairs it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Note, NoteStatus, SearchIndex};

pub const INDEX_VERSION: &str = "1.0.0";

/// Denormalized, intentionally lossy projection of one note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub word_count: usize,
    pub status: NoteStatus,
    pub search_index: SearchIndex,
}

impl IndexEntry {
    /// Projects a note into its index entry.
    pub fn project(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.metadata.title.clone(),
            summary: note.metadata.summary.clone(),
            icon: note.metadata.icon.clone(),
            cover: note.metadata.cover.clone(),
            tags: note.metadata.tags.clone(),
            created_at: note.metadata.created_at,
            updated_at: note.metadata.updated_at,
            word_count: note.metadata.word_count,
            status: note.status,
            search_index: note.search_index.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteIndex {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub total_notes: usize,
    pub notes: Vec<IndexEntry>,
}

impl NoteIndex {
    pub fn empty() -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            last_updated: Utc::now(),
            total_notes: 0,
            notes: Vec::new(),
        }
    }

    /// Replaces the entry with a matching id, or appends.
    pub fn upsert(&mut self, entry: IndexEntry) {
        match self.notes.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.notes.push(entry),
        }
    }

    /// Removes the entry with the given id. Returns whether one was present.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        let before = self.notes.len();
        self.notes.retain(|e| e.id != *id);
        self.notes.len() != before
    }

    pub fn entry(&self, id: &Uuid) -> Option<&IndexEntry> {
        self.notes.iter().find(|e| e.id == *id)
    }

    /// Stamps `last_updated` and recomputes `total_notes`. Every persist
    /// path calls this before writing.
    pub fn stamp(&mut self) {
        self.last_updated = Utc::now();
        self.total_notes = self.notes.len();
    }
}
