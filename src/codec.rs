//! Document codec: JSON text with ISO-8601 timestamps.
//!
//! The storage format has no temporal type, so all `DateTime<Utc>` fields
//! cross the wire as ISO-8601 strings (chrono's serde representation).
//! Decoding failures are reported as [`NoteError::CorruptDocument`]; read
//! paths treat that as "not found", the rebuild path skips the document.

use serde_json::Value;

use crate::error::{NoteError, Result};
use crate::model::Note;

pub fn encode(note: &Note) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(note).map_err(NoteError::Serialization)
}

pub fn decode(bytes: &[u8]) -> Result<Note> {
    serde_json::from_slice(bytes).map_err(|e| NoteError::CorruptDocument(e.to_string()))
}

/// Value-level encode for the single-file map layout.
pub fn to_value(note: &Note) -> Result<Value> {
    serde_json::to_value(note).map_err(NoteError::Serialization)
}

/// Value-level decode for the single-file map layout.
pub fn from_value(value: Value) -> Result<Note> {
    serde_json::from_value(value).map_err(|e| NoteError::CorruptDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CreateNoteRequest;
    use chrono::Utc;

    fn sample_note() -> Note {
        let mut note = Note::new(CreateNoteRequest {
            title: Some("Round Trip".to_string()),
            content: Some("alpha beta gamma".to_string()),
            summary: Some("short".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
            icon: Some("📝".to_string()),
            ..Default::default()
        });
        note.metadata.last_viewed_at = Some(Utc::now());
        note.stats.edit_count = 7;
        note.status.favorite = true;
        note
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let note = sample_note();
        let bytes = encode(&note).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, note);
    }

    #[test]
    fn test_round_trip_preserves_instants_exactly() {
        let note = sample_note();
        let decoded = decode(&encode(&note).unwrap()).unwrap();

        assert_eq!(decoded.metadata.created_at, note.metadata.created_at);
        assert_eq!(decoded.metadata.updated_at, note.metadata.updated_at);
        assert_eq!(decoded.metadata.last_viewed_at, note.metadata.last_viewed_at);
    }

    #[test]
    fn test_timestamps_encode_as_iso8601_strings() {
        let note = sample_note();
        let value = to_value(&note).unwrap();
        let created = value["metadata"]["createdAt"].as_str().unwrap();
        // RFC 3339 / ISO-8601 shape: date, 'T', time.
        assert!(created.contains('T'));
        assert!(created.starts_with(&note.metadata.created_at.format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn test_decode_invalid_json_is_corrupt() {
        let err = decode(b"{not json").unwrap_err();
        assert!(matches!(err, NoteError::CorruptDocument(_)));
    }

    #[test]
    fn test_decode_missing_required_fields_is_corrupt() {
        let err = decode(br#"{"id": "not-even-a-uuid"}"#).unwrap_err();
        assert!(matches!(err, NoteError::CorruptDocument(_)));
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        // A document written by an older revision: no status/stats blocks.
        let note = sample_note();
        let mut value = to_value(&note).unwrap();
        value.as_object_mut().unwrap().remove("status");
        value.as_object_mut().unwrap().remove("stats");
        value.as_object_mut().unwrap().remove("relatedNoteIds");

        let decoded = from_value(value).unwrap();
        assert_eq!(decoded.id, note.id);
        assert!(!decoded.status.favorite);
        assert_eq!(decoded.stats.edit_count, 0);
    }
}
