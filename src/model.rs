//! # Domain Model: Notes and Derived Fields
//!
//! This module defines the core data structures for notekeep: [`Note`],
//! [`NoteMetadata`], [`NoteStatus`], [`NoteStats`], and [`SearchIndex`].
//! It also owns every derived-field computation, which is crucial for data
//! integrity: a stored note must never carry a `word_count` or `reading_time`
//! that disagrees with its content, and `search_index` must always reflect
//! the metadata it was flattened from.
//!
//! ## Status Flags Are Orthogonal
//!
//! `NoteStatus` is a bundle of independent booleans, not an enum. A note can
//! be archived *and* favorited *and* pinned at the same time. The only
//! lifecycle-like pair is `trashed` (soft delete, reversible) versus the
//! terminal permanent delete, which is a service-level operation and only
//! reachable from the trashed state.
//!
//! ## Derived Fields
//!
//! - `word_count`: whitespace-token count of `content`.
//! - `reading_time`: `ceil(word_count / 200)` minutes.
//! - `search_index.searchable_text`: title, content, summary, and tags
//!   joined with single spaces, empty components skipped. The per-field
//!   weights are static constants; ranking is out of scope here, the
//!   weights are just carried for consumers that want them.
//!
//! All three are recomputed by [`Note::apply_update`] whenever the fields
//! they derive from change. Nothing else in the crate writes them.
//!
//! ## Revision Counter
//!
//! Every metadata or status mutation goes through [`Note::apply_update`] or
//! [`Note::touch_revision`], which stamp `updated_at` and increment
//! `version`. `created_at` is set once in [`Note::new`] and never touched
//! again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{CreateNoteRequest, MetadataPatch, StatusPatch};

/// Title used when a note is created or updated with an empty title.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled Note";

/// Reading speed assumed when estimating `reading_time`, in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

pub const TITLE_WEIGHT: f32 = 1.0;
pub const CONTENT_WEIGHT: f32 = 0.8;
pub const TAGS_WEIGHT: f32 = 0.9;

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque references (emoji or file path); the store never interprets them.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub version: u32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub word_count: usize,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub reading_time: u32,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Independent boolean status dimensions. Not a state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteStatus {
    pub favorite: bool,
    pub archived: bool,
    pub trashed: bool,
    pub pinned: bool,
    pub read_only: bool,
    pub starred: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteStats {
    pub edit_count: u64,
    pub relation_count: u32,
    pub children_count: u32,
}

/// Flattened projection of metadata for lightweight matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub searchable_text: String,
    pub title_weight: f32,
    pub content_weight: f32,
    pub tags_weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub metadata: NoteMetadata,
    #[serde(default)]
    pub status: NoteStatus,
    #[serde(default)]
    pub stats: NoteStats,
    /// Dangling references are tolerated; no referential integrity here.
    #[serde(default)]
    pub related_note_ids: Vec<Uuid>,
    pub search_index: SearchIndex,
}

impl Note {
    /// Assembles a new note from a create request: fresh id, version 1,
    /// all status flags off, stats zeroed, derived fields computed.
    pub fn new(request: CreateNoteRequest) -> Self {
        let now = Utc::now();
        let content = request.content.unwrap_or_default();
        let word_count = count_words(&content);

        let metadata = NoteMetadata {
            title: title_or_placeholder(request.title.as_deref().unwrap_or("")),
            content,
            summary: request.summary,
            tags: request.tags,
            icon: request.icon.unwrap_or_default(),
            cover: request.cover.unwrap_or_default(),
            attachments: request.attachments,
            created_at: now,
            updated_at: now,
            last_viewed_at: None,
            version: 1,
            language: request.language.unwrap_or_else(default_language),
            word_count,
            reading_time: reading_time_minutes(word_count),
        };

        let search_index = build_search_index(&metadata);

        Self {
            id: Uuid::new_v4(),
            metadata,
            status: NoteStatus::default(),
            stats: NoteStats::default(),
            related_note_ids: request.related_note_ids,
            search_index,
        }
    }

    /// Applies an explicit update patch: each field has a fixed merge rule
    /// (replace), unknown fields cannot exist by construction.
    ///
    /// Bumps `updated_at`/`version`, increments `stats.edit_count`,
    /// recomputes `word_count`/`reading_time` when content changed, and
    /// always recomputes the search index.
    pub fn apply_update(&mut self, metadata: &MetadataPatch, status: &StatusPatch) {
        if let Some(title) = &metadata.title {
            self.metadata.title = title_or_placeholder(title);
        }
        if let Some(content) = &metadata.content {
            self.metadata.content = content.clone();
            self.metadata.word_count = count_words(content);
            self.metadata.reading_time = reading_time_minutes(self.metadata.word_count);
        }
        if let Some(summary) = &metadata.summary {
            self.metadata.summary = Some(summary.clone());
        }
        if let Some(tags) = &metadata.tags {
            self.metadata.tags = tags.clone();
        }
        if let Some(icon) = &metadata.icon {
            self.metadata.icon = icon.clone();
        }
        if let Some(cover) = &metadata.cover {
            self.metadata.cover = cover.clone();
        }
        if let Some(attachments) = &metadata.attachments {
            self.metadata.attachments = attachments.clone();
        }
        if let Some(language) = &metadata.language {
            self.metadata.language = language.clone();
        }

        if let Some(flag) = status.favorite {
            self.status.favorite = flag;
        }
        if let Some(flag) = status.archived {
            self.status.archived = flag;
        }
        if let Some(flag) = status.trashed {
            self.status.trashed = flag;
        }
        if let Some(flag) = status.pinned {
            self.status.pinned = flag;
        }
        if let Some(flag) = status.read_only {
            self.status.read_only = flag;
        }
        if let Some(flag) = status.starred {
            self.status.starred = flag;
        }

        self.stats.edit_count += 1;
        self.touch_revision();
        self.search_index = build_search_index(&self.metadata);
    }

    /// Stamps `updated_at` and increments `version`. Used by every mutation
    /// path, including trash/restore which bypass the full update patch.
    pub fn touch_revision(&mut self) {
        self.metadata.updated_at = Utc::now();
        self.metadata.version += 1;
    }

    /// Whether the calendar date of `last_viewed_at` is today (UTC).
    pub fn viewed_today(&self) -> bool {
        self.metadata.last_viewed_at.map(|t| t.date_naive()) == Some(Utc::now().date_naive())
    }

    /// View-tracking side effect of a read: stamp the view time and count
    /// it as an edit. Callers persist the note afterwards.
    pub fn mark_viewed(&mut self) {
        self.metadata.last_viewed_at = Some(Utc::now());
        self.stats.edit_count += 1;
    }
}

fn title_or_placeholder(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

pub fn reading_time_minutes(word_count: usize) -> u32 {
    (word_count.div_ceil(WORDS_PER_MINUTE)) as u32
}

/// Flattens the searchable metadata fields into one text blob and attaches
/// the static field weights.
pub fn build_search_index(metadata: &NoteMetadata) -> SearchIndex {
    let mut parts: Vec<&str> = Vec::new();
    if !metadata.title.is_empty() {
        parts.push(&metadata.title);
    }
    if !metadata.content.is_empty() {
        parts.push(&metadata.content);
    }
    if let Some(summary) = &metadata.summary {
        if !summary.is_empty() {
            parts.push(summary);
        }
    }
    for tag in &metadata.tags {
        if !tag.is_empty() {
            parts.push(tag);
        }
    }

    SearchIndex {
        searchable_text: parts.join(" "),
        title_weight: TITLE_WEIGHT,
        content_weight: CONTENT_WEIGHT,
        tags_weight: TAGS_WEIGHT,
    }
}
