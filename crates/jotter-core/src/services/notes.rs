//! Shared note service used by the state controller.

use chrono::Utc;

use crate::error::{NoteError, NoteResult};
use crate::models::{normalize_title, Note, NoteDraft, NoteId};
use crate::store::{NewNote, NoteChanges, NoteStore};

/// Title given to notes created from the "Add" action
pub const NEW_NOTE_TITLE: &str = "New note";
/// Content given to notes created from the "Add" action
pub const NEW_NOTE_CONTENT: &str = "";

/// Thin async wrapper translating note operations into store calls.
///
/// Every store fault is logged with its real cause and returned as a
/// [`NoteError`] whose message is safe to show.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// List notes newest-first, optionally filtered by `search`.
    ///
    /// Blank search text lists everything.
    pub async fn list(&self, search: &str) -> NoteResult<Vec<Note>> {
        let search = search.trim();
        let filter = (!search.is_empty()).then_some(search);

        self.store.list(filter).await.map_err(|error| {
            tracing::error!("Error fetching notes: {}", error);
            NoteError::Fetch(error)
        })
    }

    /// Create a note; a blank title becomes "Untitled".
    pub async fn create(&self, title: &str, content: &str) -> NoteResult<Note> {
        let now = Utc::now();
        let record = NewNote {
            title: normalize_title(title),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        let note = self.store.insert(record).await.map_err(|error| {
            tracing::error!("Error creating note: {}", error);
            NoteError::Create(error)
        })?;
        tracing::info!("Created note: {}", note.id);
        Ok(note)
    }

    /// Replace title and content of note `id`.
    pub async fn update(&self, id: &NoteId, draft: &NoteDraft) -> NoteResult<Note> {
        let changes = NoteChanges {
            title: draft.stored_title(),
            content: draft.content.clone(),
            updated_at: Utc::now(),
        };

        let note = self.store.update(id, changes).await.map_err(|error| {
            tracing::error!("Error updating note {}: {}", id, error);
            NoteError::Update(error)
        })?;
        tracing::debug!("Updated note: {}", note.id);
        Ok(note)
    }

    /// Delete note `id` permanently. Unknown ids succeed.
    pub async fn delete(&self, id: &NoteId) -> NoteResult<()> {
        self.store.delete(id).await.map_err(|error| {
            tracing::error!("Error deleting note {}: {}", id, error);
            NoteError::Delete(error)
        })?;
        tracing::info!("Deleted note: {}", id);
        Ok(())
    }
}
