//! # notekeep
//!
//! Embedded storage engine for a note-taking application: a JSON document
//! store as the source of truth, a derived single-file index for cheap
//! listing and filtering, and a service facade that wraps every operation
//! in a uniform response envelope.
//!
//! ## Layers
//!
//! - [`model`]: the note document and all derived-field computation.
//! - [`store`]: `NoteStore`/`IndexStore` contracts with filesystem and
//!   in-memory implementations.
//! - [`index`]: the derived index document and per-note projections.
//! - [`filter`]: conjunctive in-memory filtering over index entries.
//! - [`service`]: the public facade, [`service::NoteService`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use notekeep::api::CreateNoteRequest;
//! use notekeep::paths::{ExecMode, NotePaths};
//! use notekeep::service::NoteService;
//!
//! let paths = NotePaths::discover("myapp", ExecMode::Packaged).unwrap();
//! let mut service = NoteService::open(paths);
//!
//! let response = service.create_note(CreateNoteRequest {
//!     title: Some("Hello".to_string()),
//!     content: Some("First note.".to_string()),
//!     ..Default::default()
//! });
//! assert!(response.success);
//! ```

pub mod api;
pub mod codec;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod paths;
pub mod service;
pub mod store;

pub use api::{ApiResponse, CreateNoteRequest, MetadataPatch, StatusPatch, UpdateNoteRequest};
pub use error::{NoteError, Result};
pub use filter::NoteFilter;
pub use model::Note;
pub use service::NoteService;
