//! # API Surface Types
//!
//! Request payloads, update patches, and the uniform response envelope used
//! by [`crate::service::NoteService`].
//!
//! ## The Envelope
//!
//! Every service operation returns [`ApiResponse<T>`]: `success` plus an
//! optional `data` payload, machine-oriented `error` text, and a
//! human-readable `message`. The service boundary never lets an error
//! escape as a panic or a raw `Err`; callers branching on `success` is
//! the whole error contract.
//!
//! ## Explicit Patches
//!
//! Updates are expressed as [`MetadataPatch`] and [`StatusPatch`]: every
//! mutable field is listed with an `Option`, `None` meaning "leave
//! unchanged" and `Some` meaning "replace". There is no dynamic merge of
//! arbitrary payload shapes, so unknown fields cannot be silently accepted.
//! Immutable fields (`id`, `created_at`, `version`, the derived fields) are
//! simply absent from the patch types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NoteError;

/// Uniform result envelope for all service operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(error: &NoteError, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub icon: Option<String>,
    pub cover: Option<String>,
    pub attachments: Vec<String>,
    pub language: Option<String>,
    pub related_note_ids: Vec<Uuid>,
}

/// Patch over the mutable metadata fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub icon: Option<String>,
    pub cover: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub language: Option<String>,
}

/// Patch over the independent status flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusPatch {
    pub favorite: Option<bool>,
    pub archived: Option<bool>,
    pub trashed: Option<bool>,
    pub pinned: Option<bool>,
    pub read_only: Option<bool>,
    pub starred: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub id: Uuid,
    #[serde(default)]
    pub metadata: MetadataPatch,
    #[serde(default)]
    pub status: StatusPatch,
}

impl UpdateNoteRequest {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            metadata: MetadataPatch::default(),
            status: StatusPatch::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: MetadataPatch) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_status(mut self, status: StatusPatch) -> Self {
        self.status = status;
        self
    }
}

/// Outcome of a full index rebuild. Skipped documents are corrupt files
/// left in place for manual repair.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildReport {
    pub indexed: usize,
    pub skipped: usize,
}
