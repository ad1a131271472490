//! Note access layer
//!
//! Services that wrap the raw store calls used by all Jotter clients.

mod notes;

pub use notes::{NoteService, NEW_NOTE_CONTENT, NEW_NOTE_TITLE};
