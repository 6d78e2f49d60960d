//! In-memory filtering over index entries. All predicates are conjunctive;
//! an omitted field imposes no constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::index::IndexEntry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteFilter {
    pub is_trashed: Option<bool>,
    pub is_favorite: Option<bool>,
    pub is_archived: Option<bool>,
    pub is_pinned: Option<bool>,
    /// Any-of membership: an entry matches if it carries at least one of
    /// these tags.
    pub tags: Option<Vec<String>>,
    /// Case-insensitive substring over title, summary, and tags.
    pub search_keyword: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
}

impl NoteFilter {
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        if let Some(trashed) = self.is_trashed {
            if entry.status.trashed != trashed {
                return false;
            }
        }
        if let Some(favorite) = self.is_favorite {
            if entry.status.favorite != favorite {
                return false;
            }
        }
        if let Some(archived) = self.is_archived {
            if entry.status.archived != archived {
                return false;
            }
        }
        if let Some(pinned) = self.is_pinned {
            if entry.status.pinned != pinned {
                return false;
            }
        }

        if let Some(tags) = &self.tags {
            if !tags.is_empty() && !tags.iter().any(|t| entry.tags.contains(t)) {
                return false;
            }
        }

        if let Some(keyword) = &self.search_keyword {
            let keyword = keyword.to_lowercase();
            if !keyword.is_empty() && !keyword_matches(entry, &keyword) {
                return false;
            }
        }

        // Range bounds are inclusive on both ends.
        if let Some(after) = self.created_after {
            if entry.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if entry.created_at > before {
                return false;
            }
        }
        if let Some(after) = self.updated_after {
            if entry.updated_at < after {
                return false;
            }
        }
        if let Some(before) = self.updated_before {
            if entry.updated_at > before {
                return false;
            }
        }

        true
    }
}

fn keyword_matches(entry: &IndexEntry, lowered_keyword: &str) -> bool {
    if entry.title.to_lowercase().contains(lowered_keyword) {
        return true;
    }
    if let Some(summary) = &entry.summary {
        if summary.to_lowercase().contains(lowered_keyword) {
            return true;
        }
    }
    entry
        .tags
        .iter()
        .any(|t| t.to_lowercase().contains(lowered_keyword))
}
