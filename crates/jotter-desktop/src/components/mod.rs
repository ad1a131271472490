//! UI Components
//!
//! Presentation components: they render [`jotter_core::NotesState`] and hand
//! user intents to [`crate::state::AppState`].

mod confirm_dialog;
mod empty_state;
mod error_banner;
mod header;
mod note_card;
mod note_editor;
mod note_viewer;
mod sidebar;

pub use confirm_dialog::ConfirmDeleteDialog;
pub use empty_state::EmptyState;
pub use error_banner::ErrorBanner;
pub use header::Header;
pub use note_card::NoteCard;
pub use note_editor::NoteEditor;
pub use note_viewer::NoteViewer;
pub use sidebar::Sidebar;
