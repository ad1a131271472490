//! Client-side note state
//!
//! [`NotesState`] is the single owner of the note collection, the active
//! selection, the view/edit mode and the transient loading/busy/error flags.
//! Every async operation is split into a `begin_*` step, taken before the store
//! call, and a `finish_*` step that reconciles the result. The split lets any
//! executor (tokio in tests, the Dioxus runtime in the desktop app) drive the
//! same transitions without holding a borrow across an await.

use crate::error::NoteResult;
use crate::models::{Note, NoteId, Theme};

/// How the active note is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Viewing,
    Editing,
}

/// Token identifying one issued load.
///
/// Only the ticket with the highest generation may apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    search: String,
}

impl LoadTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Search text this load was issued for
    pub fn search(&self) -> &str {
        &self.search
    }
}

/// Authoritative in-memory view of the user's notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesState {
    notes: Vec<Note>,
    active_id: Option<NoteId>,
    mode: UiMode,
    loading: bool,
    busy: bool,
    error: Option<String>,
    pending_delete: Option<NoteId>,
    search: String,
    theme: Theme,
    latest_load: u64,
    /// Notes created after the latest load was issued
    created_since_load: Vec<NoteId>,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a specific theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Notes in store order (newest update first)
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn active_id(&self) -> Option<&NoteId> {
        self.active_id.as_ref()
    }

    /// The selected note, if it is part of the current collection
    pub fn active_note(&self) -> Option<&Note> {
        let id = self.active_id.as_ref()?;
        self.find(id)
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.find(id).is_some()
    }

    pub const fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == UiMode::Editing
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last failure message, if the most recent operation failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The search text of the most recently issued load
    pub fn search(&self) -> &str {
        &self.search
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Note awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&Note> {
        let id = self.pending_delete.as_ref()?;
        self.find(id)
    }

    /// True when the main panel should offer the "create your first note" call to action
    pub fn shows_empty_state(&self) -> bool {
        self.active_note().is_none() && !self.loading
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Issue a new load for `search`, superseding any load still in flight.
    pub fn begin_load(&mut self, search: impl Into<String>) -> LoadTicket {
        self.latest_load += 1;
        self.created_since_load.clear();
        self.search = search.into();
        self.loading = true;
        self.error = None;
        LoadTicket {
            generation: self.latest_load,
            search: self.search.clone(),
        }
    }

    /// Apply a list result. Returns `false` if the ticket was superseded and
    /// the result was discarded.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: NoteResult<Vec<Note>>) -> bool {
        if ticket.generation != self.latest_load {
            tracing::debug!(
                "Discarding stale load #{} for {:?} (latest is #{})",
                ticket.generation,
                ticket.search,
                self.latest_load
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes for {:?}", notes.len(), ticket.search);
                self.notes = self.keep_created_since_load(notes);
                self.reconcile_selection();
            }
            Err(error) => self.error = Some(error.to_string()),
        }
        true
    }

    /// Put notes created while the load was in flight back in front of the
    /// result; the request predates them so the server could not list them.
    fn keep_created_since_load(&mut self, loaded: Vec<Note>) -> Vec<Note> {
        let created = std::mem::take(&mut self.created_since_load);
        let mut merged: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| created.contains(&note.id))
            .filter(|note| !loaded.iter().any(|other| other.id == note.id))
            .cloned()
            .collect();
        merged.extend(loaded);
        merged
    }

    /// Keep a still-visible selection; otherwise fall back to the first note.
    ///
    /// A selection that dropped out of the result is replaced rather than
    /// kept dangling, so the active note is always one the list shows. A
    /// pending delete for a note that is no longer listed is withdrawn.
    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.pending_delete {
            if !self.contains(id) {
                tracing::debug!("Dropping delete request for unlisted note {}", id);
                self.pending_delete = None;
            }
        }

        let still_visible = self
            .active_id
            .as_ref()
            .is_some_and(|id| self.contains(id));
        if still_visible {
            return;
        }

        let fallback = self.notes.first().map(|note| note.id.clone());
        if fallback != self.active_id {
            self.active_id = fallback;
            self.mode = UiMode::Viewing;
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    fn begin_mutation(&mut self) {
        self.busy = true;
        self.error = None;
    }

    fn finish_mutation<T>(&mut self, result: NoteResult<T>) -> Option<T> {
        self.busy = false;
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    pub fn begin_create(&mut self) {
        self.begin_mutation();
    }

    /// Put a created note at the front, select it and open it for editing.
    pub fn finish_create(&mut self, result: NoteResult<Note>) -> bool {
        let Some(note) = self.finish_mutation(result) else {
            return false;
        };

        self.notes.retain(|existing| existing.id != note.id);
        if self.loading {
            self.created_since_load.push(note.id.clone());
        }
        self.active_id = Some(note.id.clone());
        self.notes.insert(0, note);
        self.mode = UiMode::Editing;
        true
    }

    /// Ask for confirmation before deleting `id`.
    ///
    /// Returns `false` (and changes nothing) for blank or unknown ids.
    pub fn request_delete(&mut self, id: &NoteId) -> bool {
        if id.is_blank() || !self.contains(id) {
            return false;
        }
        self.pending_delete = Some(id.clone());
        true
    }

    /// Decline the pending delete
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Accept the pending delete and mark the state busy.
    ///
    /// Returns the id to delete, or `None` when nothing was pending.
    pub fn confirm_delete(&mut self) -> Option<NoteId> {
        let id = self.pending_delete.take()?;
        self.begin_mutation();
        Some(id)
    }

    /// Drop a deleted note; if it was active, move selection to the first
    /// remaining note and return to viewing.
    pub fn finish_delete(&mut self, id: &NoteId, result: NoteResult<()>) -> bool {
        if self.finish_mutation(result).is_none() {
            return false;
        }

        self.notes.retain(|note| &note.id != id);
        if self.active_id.as_ref() == Some(id) {
            self.active_id = self.notes.first().map(|note| note.id.clone());
            self.mode = UiMode::Viewing;
        }
        true
    }

    /// Mark the state busy for saving the active note.
    ///
    /// Returns `None` (no-op) when nothing is selected.
    pub fn begin_save(&mut self) -> Option<NoteId> {
        let id = self.active_id.clone()?;
        self.begin_mutation();
        Some(id)
    }

    /// Swap in the server's version of a saved note and return to viewing.
    ///
    /// On failure the mode stays `Editing` so the caller's draft survives.
    pub fn finish_save(&mut self, result: NoteResult<Note>) -> bool {
        let Some(updated) = self.finish_mutation(result) else {
            return false;
        };

        if let Some(slot) = self.notes.iter_mut().find(|note| note.id == updated.id) {
            *slot = updated;
        }
        self.mode = UiMode::Viewing;
        true
    }

    // -----------------------------------------------------------------------
    // Local transitions
    // -----------------------------------------------------------------------

    /// Change the selection without touching the mode
    pub fn select_note(&mut self, id: Option<NoteId>) {
        self.active_id = id;
    }

    /// Select `id` and show it read-only
    pub fn open_note(&mut self, id: NoteId) {
        self.active_id = Some(id);
        self.mode = UiMode::Viewing;
    }

    /// Switch to editing; only possible while a note is selected
    pub fn begin_edit(&mut self) -> bool {
        if self.active_note().is_none() {
            return false;
        }
        self.mode = UiMode::Editing;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.mode = UiMode::Viewing;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{NoteError, StoreError};

    fn note(id: &str, title: &str, content: &str, minute: u32) -> Note {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap();
        Note {
            id: NoteId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn loaded(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::new();
        let ticket = state.begin_load("");
        assert!(state.finish_load(&ticket, Ok(notes)));
        state
    }

    fn ids(state: &NotesState) -> Vec<&str> {
        state.notes().iter().map(|note| note.id.as_str()).collect()
    }

    fn fetch_error() -> NoteError {
        NoteError::Fetch(StoreError::Simulated("down".to_string()))
    }

    #[test]
    fn begin_load_sets_loading_and_clears_error() {
        let mut state = NotesState::new();
        let ticket = state.begin_load("x");
        state.finish_load(&ticket, Err(fetch_error()));
        assert!(state.error().is_some());

        let _ = state.begin_load("y");
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.search(), "y");
    }

    #[test]
    fn load_selects_first_note_when_nothing_selected() {
        let state = loaded(vec![note("1", "A", "", 2), note("2", "B", "", 1)]);
        assert_eq!(state.active_id(), Some(&NoteId::from("1")));
        assert!(!state.is_loading());
    }

    #[test]
    fn load_keeps_visible_selection() {
        let mut state = loaded(vec![note("1", "A", "", 2), note("2", "B", "", 1)]);
        state.open_note(NoteId::from("2"));

        let ticket = state.begin_load("b");
        state.finish_load(&ticket, Ok(vec![note("2", "B", "", 1)]));
        assert_eq!(state.active_id(), Some(&NoteId::from("2")));
    }

    #[test]
    fn load_replaces_selection_the_result_no_longer_lists() {
        let mut state = loaded(vec![note("1", "A", "", 2), note("2", "B", "", 1)]);
        state.open_note(NoteId::from("2"));
        state.begin_edit();

        let ticket = state.begin_load("a");
        state.finish_load(&ticket, Ok(vec![note("1", "A", "", 2)]));
        assert_eq!(state.active_id(), Some(&NoteId::from("1")));
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn load_keeps_editing_when_selection_survives() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        assert!(state.begin_edit());

        let ticket = state.begin_load("");
        state.finish_load(&ticket, Ok(vec![note("1", "A", "", 2)]));
        assert_eq!(state.mode(), UiMode::Editing);
    }

    #[test]
    fn load_with_empty_result_clears_selection() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        let ticket = state.begin_load("zzz");
        state.finish_load(&ticket, Ok(Vec::new()));
        assert_eq!(state.active_id(), None);
        assert!(state.shows_empty_state());
    }

    #[test]
    fn load_failure_keeps_collection() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        let ticket = state.begin_load("");
        state.finish_load(&ticket, Err(fetch_error()));

        assert_eq!(ids(&state), vec!["1"]);
        assert_eq!(state.error(), Some("Failed to fetch notes. Please try again."));
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = NotesState::new();
        let first = state.begin_load("a");
        let second = state.begin_load("b");

        assert!(state.finish_load(&second, Ok(vec![note("2", "B", "", 1)])));
        assert!(!state.finish_load(&first, Ok(vec![note("1", "A", "", 2)])));

        assert_eq!(ids(&state), vec!["2"]);
        assert_eq!(state.search(), "b");
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_load_does_not_clear_loading_of_newer_request() {
        let mut state = NotesState::new();
        let first = state.begin_load("a");
        let _second = state.begin_load("b");

        state.finish_load(&first, Ok(Vec::new()));
        assert!(state.is_loading());
    }

    #[test]
    fn create_inserts_at_front_selects_and_edits() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        state.begin_create();
        assert!(state.is_busy());

        assert!(state.finish_create(Ok(note("9", "New note", "", 5))));
        assert_eq!(ids(&state), vec!["9", "1"]);
        assert_eq!(state.active_id(), Some(&NoteId::from("9")));
        assert_eq!(state.mode(), UiMode::Editing);
        assert!(!state.is_busy());
    }

    #[test]
    fn load_issued_before_create_keeps_the_new_note_open() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        let ticket = state.begin_load("");
        state.begin_create();
        state.finish_create(Ok(note("9", "New note", "", 5)));

        assert!(state.finish_load(&ticket, Ok(vec![note("1", "A", "", 2)])));
        assert_eq!(ids(&state), vec!["9", "1"]);
        assert_eq!(state.active_id(), Some(&NoteId::from("9")));
        assert_eq!(state.mode(), UiMode::Editing);
    }

    #[test]
    fn later_load_lists_created_note_from_the_server_only() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        let first = state.begin_load("");
        state.begin_create();
        state.finish_create(Ok(note("9", "New note", "", 5)));
        assert!(state.finish_load(&first, Ok(vec![note("1", "A", "", 2)])));

        let second = state.begin_load("zzz");
        state.finish_load(&second, Ok(Vec::new()));
        assert!(state.notes().is_empty());
    }

    #[test]
    fn create_failure_keeps_collection_and_sets_error() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        state.begin_create();
        let failed = state.finish_create(Err(NoteError::Create(StoreError::EmptyResponse)));

        assert!(!failed);
        assert_eq!(ids(&state), vec!["1"]);
        assert_eq!(state.error(), Some("Failed to create note."));
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn delete_requires_confirmation_step() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        assert_eq!(state.confirm_delete(), None);

        assert!(state.request_delete(&NoteId::from("1")));
        assert_eq!(state.pending_delete().map(|n| n.id.as_str()), Some("1"));
        assert!(!state.is_busy());

        state.cancel_delete();
        assert_eq!(state.confirm_delete(), None);
        assert_eq!(ids(&state), vec!["1"]);
    }

    #[test]
    fn request_delete_ignores_blank_and_unknown_ids() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        assert!(!state.request_delete(&NoteId::from("")));
        assert!(!state.request_delete(&NoteId::from("7")));
        assert!(state.pending_delete().is_none());
    }

    #[test]
    fn filtering_load_withdraws_pending_delete() {
        let mut state = loaded(vec![note("1", "A", "egg", 2), note("2", "B", "", 1)]);
        assert!(state.request_delete(&NoteId::from("2")));

        let narrow = state.begin_load("egg");
        state.finish_load(&narrow, Ok(vec![note("1", "A", "egg", 2)]));
        assert!(state.pending_delete().is_none());

        let wide = state.begin_load("");
        state.finish_load(
            &wide,
            Ok(vec![note("1", "A", "egg", 2), note("2", "B", "", 1)]),
        );
        assert!(state.pending_delete().is_none());
        assert_eq!(state.confirm_delete(), None);
        assert!(!state.is_busy());
    }

    #[test]
    fn load_keeps_pending_delete_of_listed_note() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        state.request_delete(&NoteId::from("1"));

        let ticket = state.begin_load("");
        state.finish_load(&ticket, Ok(vec![note("1", "A", "", 2)]));
        assert_eq!(state.pending_delete().map(|n| n.id.as_str()), Some("1"));
    }

    #[test]
    fn deleting_active_note_reselects_first_and_views() {
        let mut state = loaded(vec![
            note("1", "A", "", 3),
            note("2", "B", "", 2),
            note("3", "C", "", 1),
        ]);
        state.open_note(NoteId::from("2"));
        state.begin_edit();

        state.request_delete(&NoteId::from("2"));
        let id = state.confirm_delete().unwrap();
        assert!(state.is_busy());
        assert!(state.finish_delete(&id, Ok(())));

        assert_eq!(ids(&state), vec!["1", "3"]);
        assert_eq!(state.active_id(), Some(&NoteId::from("1")));
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn deleting_other_note_keeps_selection_and_mode() {
        let mut state = loaded(vec![note("1", "A", "", 2), note("2", "B", "", 1)]);
        state.begin_edit();

        state.request_delete(&NoteId::from("2"));
        let id = state.confirm_delete().unwrap();
        state.finish_delete(&id, Ok(()));

        assert_eq!(state.active_id(), Some(&NoteId::from("1")));
        assert_eq!(state.mode(), UiMode::Editing);
    }

    #[test]
    fn deleting_only_note_leaves_nothing_selected() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        state.request_delete(&NoteId::from("1"));
        let id = state.confirm_delete().unwrap();
        state.finish_delete(&id, Ok(()));

        assert!(state.notes().is_empty());
        assert_eq!(state.active_id(), None);
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn delete_failure_keeps_note() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        state.request_delete(&NoteId::from("1"));
        let id = state.confirm_delete().unwrap();
        state.finish_delete(&id, Err(NoteError::Delete(StoreError::NotConfigured)));

        assert_eq!(ids(&state), vec!["1"]);
        assert_eq!(state.error(), Some("Failed to delete note."));
        assert!(!state.is_busy());
    }

    #[test]
    fn save_is_noop_without_selection() {
        let mut state = NotesState::new();
        assert_eq!(state.begin_save(), None);
        assert!(!state.is_busy());
    }

    #[test]
    fn save_replaces_in_place_and_views() {
        let mut state = loaded(vec![note("1", "A", "", 3), note("2", "B", "", 2)]);
        state.open_note(NoteId::from("2"));
        state.begin_edit();

        let id = state.begin_save().unwrap();
        assert_eq!(id, NoteId::from("2"));
        let mut saved = note("2", "B2", "body", 2);
        saved.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert!(state.finish_save(Ok(saved.clone())));

        assert_eq!(ids(&state), vec!["1", "2"]);
        assert_eq!(state.find(&id), Some(&saved));
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn save_failure_stays_editing() {
        let mut state = loaded(vec![note("1", "A", "", 3)]);
        state.begin_edit();
        state.begin_save().unwrap();
        state.finish_save(Err(NoteError::Update(StoreError::NotConfigured)));

        assert_eq!(state.mode(), UiMode::Editing);
        assert_eq!(state.error(), Some("Failed to update note."));
        assert_eq!(state.notes()[0].title, "A");
    }

    #[test]
    fn select_note_does_not_change_mode_but_open_note_does() {
        let mut state = loaded(vec![note("1", "A", "", 2), note("2", "B", "", 1)]);
        state.begin_edit();

        state.select_note(Some(NoteId::from("2")));
        assert_eq!(state.mode(), UiMode::Editing);

        state.open_note(NoteId::from("1"));
        assert_eq!(state.mode(), UiMode::Viewing);
        assert_eq!(state.active_id(), Some(&NoteId::from("1")));
    }

    #[test]
    fn begin_edit_requires_selection() {
        let mut state = NotesState::new();
        assert!(!state.begin_edit());
        assert_eq!(state.mode(), UiMode::Viewing);
    }

    #[test]
    fn toggle_theme_is_independent_of_notes() {
        let mut state = loaded(vec![note("1", "A", "", 2)]);
        let before = state.notes().to_vec();
        assert_eq!(state.toggle_theme(), Theme::Dark);
        assert_eq!(state.toggle_theme(), Theme::Light);
        assert_eq!(state.notes(), before.as_slice());
    }
}
