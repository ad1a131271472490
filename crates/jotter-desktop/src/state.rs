//! Application state management
//!
//! Global state accessible via Dioxus context providers. All note workflow
//! rules live in [`NotesState`]; this module only routes UI intents to a
//! [`NotesController`] bound to the reactive signal.

use std::sync::Arc;

use dioxus::prelude::*;

use jotter_core::controller::StateAccess;
use jotter_core::store::SupabaseNoteStore;
use jotter_core::{NoteDraft, NoteId, NoteService, NotesController, NotesState, Theme};

use crate::theme::{palette, ColorPalette};

/// Note service shared by every spawned task
pub type SharedService = Arc<NoteService<SupabaseNoteStore>>;

/// [`NotesState`] held in a Dioxus signal.
///
/// Every controller step writes through the signal, so components re-render
/// as soon as a transition is applied.
#[derive(Clone, Copy)]
pub struct SignalState(pub Signal<NotesState>);

impl StateAccess for SignalState {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut NotesState) -> R) -> R {
        f(&mut self.0.write())
    }
}

pub type DesktopController = NotesController<SupabaseNoteStore, SignalState>;

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Notes, selection, mode and flags
    pub notes: Signal<NotesState>,
    /// Text currently typed into the search box
    pub search_input: Signal<String>,
    controller: DesktopController,
}

impl AppState {
    pub fn new(service: SharedService, notes: Signal<NotesState>, search_input: Signal<String>) -> Self {
        Self {
            notes,
            search_input,
            controller: NotesController::from_parts(service, SignalState(notes)),
        }
    }

    pub fn theme(&self) -> Theme {
        self.notes.read().theme()
    }

    #[must_use]
    pub fn palette(&self) -> &'static ColorPalette {
        palette(self.theme())
    }

    pub fn is_busy(&self) -> bool {
        self.notes.read().is_busy()
    }

    /// Reload the collection for `search`; superseded loads are dropped.
    pub fn load(&self, search: String) {
        let mut controller = self.controller.clone();
        spawn(async move {
            controller.load(&search).await;
        });
    }

    pub fn add_note(&self) {
        let mut controller = self.controller.clone();
        spawn(async move {
            controller.add_note().await;
        });
    }

    pub fn save_note(&self, draft: NoteDraft) {
        let mut controller = self.controller.clone();
        spawn(async move {
            controller.save_note(&draft).await;
        });
    }

    /// Open the delete confirmation for `id`
    pub fn request_delete(&self, id: &NoteId) {
        self.controller.clone().request_delete(id);
    }

    pub fn cancel_delete(&self) {
        self.controller.clone().cancel_delete();
    }

    pub fn confirm_delete(&self) {
        let mut controller = self.controller.clone();
        spawn(async move {
            controller.confirm_delete().await;
        });
    }

    pub fn open_note(&self, id: NoteId) {
        self.controller.clone().open_note(id);
    }

    pub fn begin_edit(&self) {
        self.controller.clone().begin_edit();
    }

    pub fn cancel_edit(&self) {
        self.controller.clone().cancel_edit();
    }

    pub fn toggle_theme(&self) {
        let theme = self.controller.clone().toggle_theme();
        tracing::debug!("Theme switched to {}", theme.as_str());
    }
}
