//! Data models for Jotter

mod note;
mod theme;

pub use note::{normalize_title, Note, NoteDraft, NoteId, PREVIEW_CHARS, UNTITLED};
pub use theme::Theme;
