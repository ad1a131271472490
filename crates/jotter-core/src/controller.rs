//! Application state controller
//!
//! Composes [`NotesState`] transitions with [`NoteService`] calls into the
//! user-facing operations. The state lives behind [`StateAccess`] so the same
//! flows run against a plain owned state in tests and against a reactive
//! signal in the desktop app.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::models::{Note, NoteDraft, NoteId, Theme};
use crate::services::{NoteService, NEW_NOTE_CONTENT, NEW_NOTE_TITLE};
use crate::state::{LoadTicket, NotesState};
use crate::store::NoteStore;

/// Short-lived mutable access to a [`NotesState`].
///
/// Implementations must not hold the borrow beyond the closure; the
/// controller never awaits while inside it.
pub trait StateAccess {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut NotesState) -> R) -> R;
}

impl StateAccess for NotesState {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        f(self)
    }
}

impl StateAccess for Rc<RefCell<NotesState>> {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut NotesState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Owner of the note workflow: the only component that calls the store.
pub struct NotesController<S: NoteStore, H: StateAccess = NotesState> {
    service: Arc<NoteService<S>>,
    state: H,
}

impl<S: NoteStore, H: StateAccess + Clone> Clone for NotesController<S, H> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: self.state.clone(),
        }
    }
}

impl<S: NoteStore> NotesController<S> {
    /// Controller with its own fresh state
    pub fn new(service: Arc<NoteService<S>>) -> Self {
        Self::from_parts(service, NotesState::new())
    }

    /// Read-only view of the owned state
    pub const fn state(&self) -> &NotesState {
        &self.state
    }
}

impl<S: NoteStore, H: StateAccess> NotesController<S, H> {
    pub const fn from_parts(service: Arc<NoteService<S>>, state: H) -> Self {
        Self { service, state }
    }

    pub fn service(&self) -> &NoteService<S> {
        &self.service
    }

    /// Run `f` against the current state
    pub fn inspect<R>(&mut self, f: impl FnOnce(&NotesState) -> R) -> R {
        self.state.with_state(|state| f(state))
    }

    /// Issue a load for `search` without awaiting it.
    ///
    /// Pair with [`Self::fetch`]; any later `begin_load` supersedes this one.
    pub fn begin_load(&mut self, search: &str) -> LoadTicket {
        self.state.with_state(|state| state.begin_load(search))
    }

    /// Fetch and apply the result for `ticket`; stale results are dropped.
    pub async fn fetch(&mut self, ticket: LoadTicket) -> bool {
        let result = self.service.list(ticket.search()).await;
        self.state
            .with_state(|state| state.finish_load(&ticket, result))
    }

    /// Replace the collection with the notes matching `search`.
    ///
    /// Returns `false` when a newer load superseded this one.
    pub async fn load(&mut self, search: &str) -> bool {
        let ticket = self.begin_load(search);
        self.fetch(ticket).await
    }

    /// Create a "New note", select it and start editing it.
    pub async fn add_note(&mut self) -> Option<Note> {
        self.state.with_state(NotesState::begin_create);
        let result = self.service.create(NEW_NOTE_TITLE, NEW_NOTE_CONTENT).await;
        let created = result.as_ref().ok().cloned();
        self.state
            .with_state(|state| state.finish_create(result))
            .then_some(created)
            .flatten()
    }

    /// Mark `id` as awaiting confirmation. `false` when there is nothing to delete.
    pub fn request_delete(&mut self, id: &NoteId) -> bool {
        self.state.with_state(|state| state.request_delete(id))
    }

    pub fn cancel_delete(&mut self) {
        self.state.with_state(NotesState::cancel_delete);
    }

    /// Delete the note awaiting confirmation.
    ///
    /// Returns `true` when the store confirmed the removal.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.state.with_state(NotesState::confirm_delete) else {
            return false;
        };
        let result = self.service.delete(&id).await;
        self.state
            .with_state(|state| state.finish_delete(&id, result))
    }

    /// Delete `id` after `confirm` approves it.
    ///
    /// The gate runs before any request is issued; declining aborts with no
    /// state change beyond clearing the pending prompt.
    pub async fn delete_note(&mut self, id: &NoteId, confirm: impl FnOnce(&Note) -> bool) -> bool {
        if !self.request_delete(id) {
            return false;
        }

        let approved = self.state.with_state(|state| {
            state.pending_delete().cloned().is_some_and(|note| confirm(&note))
        });
        if !approved {
            tracing::debug!("Delete of note {} declined", id);
            self.cancel_delete();
            return false;
        }
        self.confirm_delete().await
    }

    /// Save `draft` over the active note. No-op without a selection.
    pub async fn save_note(&mut self, draft: &NoteDraft) -> bool {
        let Some(id) = self.state.with_state(NotesState::begin_save) else {
            return false;
        };
        let result = self.service.update(&id, draft).await;
        self.state.with_state(|state| state.finish_save(result))
    }

    /// Change selection only
    pub fn select_note(&mut self, id: Option<NoteId>) {
        self.state.with_state(|state| state.select_note(id));
    }

    /// Select and switch to viewing
    pub fn open_note(&mut self, id: NoteId) {
        self.state.with_state(|state| state.open_note(id));
    }

    pub fn begin_edit(&mut self) -> bool {
        self.state.with_state(NotesState::begin_edit)
    }

    pub fn cancel_edit(&mut self) {
        self.state.with_state(NotesState::cancel_edit);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.with_state(NotesState::toggle_theme)
    }
}
