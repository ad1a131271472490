//! jotter-core - Core library for Jotter
//!
//! This crate contains the note models, the remote store client, the note
//! access layer, and the client-side state used by the desktop app.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod util;

pub use controller::NotesController;
pub use error::{NoteError, NoteResult, StoreError, StoreResult};
pub use models::{Note, NoteDraft, NoteId, Theme};
pub use services::NoteService;
pub use state::{NotesState, UiMode};
