//! End-to-end lifecycle tests against the filesystem stores.

use serde_json::Value;
use tempfile::TempDir;

use notekeep::api::{CreateNoteRequest, MetadataPatch, UpdateNoteRequest};
use notekeep::filter::NoteFilter;
use notekeep::paths::{ExecMode, NotePaths};
use notekeep::service::NoteService;
use notekeep::store::fs::{FsIndexStore, FsNoteStore};

fn setup() -> (TempDir, NotePaths, NoteService<FsNoteStore, FsIndexStore>) {
    let temp = TempDir::new().unwrap();
    let paths = NotePaths::new(temp.path(), ExecMode::Packaged);
    let service = NoteService::open(paths.clone());
    (temp, paths, service)
}

#[test]
fn test_full_note_lifecycle_on_disk() {
    let (_temp, _paths, mut svc) = setup();

    // Create.
    let created = svc
        .create_note(CreateNoteRequest {
            title: Some("Meeting notes".to_string()),
            content: Some("Discussed roadmap and staffing.".to_string()),
            tags: vec!["work".to_string()],
            ..Default::default()
        })
        .data
        .unwrap();
    assert_eq!(created.metadata.version, 1);

    // Fetch tracks the view and persists it.
    let fetched = svc.get_note_by_id(&created.id).data.unwrap();
    assert_eq!(fetched.stats.edit_count, 1);
    assert!(fetched.metadata.last_viewed_at.is_some());

    // Update.
    let updated = svc
        .update_note(
            UpdateNoteRequest::new(created.id).with_metadata(MetadataPatch {
                title: Some("Meeting notes (final)".to_string()),
                ..Default::default()
            }),
        )
        .data
        .unwrap();
    assert_eq!(updated.metadata.title, "Meeting notes (final)");

    // List reflects the update.
    let listed = svc.notes_list().data.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Meeting notes (final)");

    // Trash, then permanently delete.
    svc.move_to_trash(&created.id);
    let deleted = svc.permanently_delete_note(&created.id);
    assert!(deleted.success);
    assert!(svc.notes_list().data.unwrap().is_empty());
}

#[test]
fn test_state_survives_reopening_the_service() {
    let (_temp, paths, mut svc) = setup();

    let created = svc
        .create_note(CreateNoteRequest {
            title: Some("Durable".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();
    drop(svc);

    let mut reopened = NoteService::open(paths.clone());
    assert_eq!(reopened.notes_directory(), paths.root());
    let fetched = reopened.peek_note(&created.id).data.unwrap();
    assert_eq!(fetched.metadata.title, "Durable");

    let listed = reopened.notes_list().data.unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn test_rebuild_skips_hand_corrupted_document() {
    let (_temp, paths, mut svc) = setup();

    let keep = svc
        .create_note(CreateNoteRequest {
            title: Some("Survivor".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();
    let victim = svc
        .create_note(CreateNoteRequest {
            title: Some("Victim".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();

    // Corrupt one entry in notes.json, leaving the file itself valid JSON.
    let raw = std::fs::read(paths.notes_file()).unwrap();
    let mut doc: Value = serde_json::from_slice(&raw).unwrap();
    doc["notes"][victim.id.to_string()] = Value::String("garbage".to_string());
    std::fs::write(paths.notes_file(), serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

    let report = svc.rebuild_index().data.unwrap();
    assert_eq!(report.indexed, 1);
    assert_eq!(report.skipped, 1);

    let listed = svc.notes_list().data.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[test]
fn test_list_heals_a_corrupt_index_file() {
    let (_temp, paths, mut svc) = setup();

    let created = svc
        .create_note(CreateNoteRequest {
            title: Some("Healed".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();

    std::fs::write(paths.index_file(), b"{{{ corrupted").unwrap();

    // Listing triggers the in-place rebuild instead of failing.
    let listed = svc.notes_list().data.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    // And the repaired index was written back to disk.
    let raw = std::fs::read(paths.index_file()).unwrap();
    let doc: Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(doc["totalNotes"], 1);
}

#[test]
fn test_filtering_against_disk_backed_index() {
    let (_temp, _paths, mut svc) = setup();

    let fav = svc
        .create_note(CreateNoteRequest {
            title: Some("Starred thoughts".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();
    svc.create_note(CreateNoteRequest {
        title: Some("Plain".to_string()),
        ..Default::default()
    });
    svc.toggle_favorite(&fav.id);

    let favorites = svc
        .notes_list_by_filter(&NoteFilter {
            is_favorite: Some(true),
            ..Default::default()
        })
        .data
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, fav.id);

    let keyword = svc
        .notes_list_by_filter(&NoteFilter {
            search_keyword: Some("starred".to_string()),
            ..Default::default()
        })
        .data
        .unwrap();
    assert_eq!(keyword.len(), 1);
    assert_eq!(keyword[0].id, fav.id);
}
