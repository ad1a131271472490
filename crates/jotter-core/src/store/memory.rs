//! In-process note store.
//!
//! Mirrors the hosted table's observable behaviour (ordering, filter semantics,
//! id assignment, idempotent delete) and can be told to fail or stall specific
//! operations.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use super::{NewNote, NoteChanges, NoteStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{Note, NoteId};

/// Store operations that can be targeted by fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Inner {
    notes: Vec<Note>,
    last_stamp: Option<DateTime<Utc>>,
    failing: HashSet<StoreOp>,
    list_delays: HashMap<String, Duration>,
    calls: Vec<StoreOp>,
}

impl Inner {
    /// Timestamps handed out are strictly increasing so ordering is total.
    fn stamp(&mut self, requested: DateTime<Utc>) -> DateTime<Utc> {
        let stamp = match self.last_stamp {
            Some(last) if requested <= last => last + TimeDelta::microseconds(1),
            _ => requested,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn check(&mut self, op: StoreOp) -> StoreResult<()> {
        self.calls.push(op);
        if self.failing.contains(&op) {
            Err(StoreError::Simulated(format!("{op:?} rejected")))
        } else {
            Ok(())
        }
    }
}

/// Thread-safe in-memory note table.
#[derive(Clone, Default)]
pub struct InMemoryNoteStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the table with fully formed notes
    pub async fn seed(&self, notes: impl IntoIterator<Item = Note>) {
        let mut inner = self.inner.lock().await;
        for note in notes {
            if inner.last_stamp.map_or(true, |last| note.updated_at > last) {
                inner.last_stamp = Some(note.updated_at);
            }
            inner.notes.push(note);
        }
    }

    /// Make every call of `op` fail until [`Self::recover`] is called
    pub async fn fail_on(&self, op: StoreOp) {
        self.inner.lock().await.failing.insert(op);
    }

    /// Clear all injected failures
    pub async fn recover(&self) {
        self.inner.lock().await.failing.clear();
    }

    /// Delay list responses for this filter text (trimmed, case-insensitive)
    pub async fn delay_list(&self, filter: &str, delay: Duration) {
        self.inner
            .lock()
            .await
            .list_delays
            .insert(filter.trim().to_lowercase(), delay);
    }

    /// Every note currently stored, newest first
    pub async fn snapshot(&self) -> Vec<Note> {
        let inner = self.inner.lock().await;
        sorted_newest_first(inner.notes.clone())
    }

    /// Operations received so far, in arrival order
    pub async fn calls(&self) -> Vec<StoreOp> {
        self.inner.lock().await.calls.clone()
    }
}

impl NoteStore for InMemoryNoteStore {
    async fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Note>> {
        let filter = filter.map(str::trim).unwrap_or_default().to_lowercase();
        let (notes, delay) = {
            let mut inner = self.inner.lock().await;
            inner.check(StoreOp::List)?;
            let delay = inner.list_delays.get(&filter).copied();
            let notes: Vec<Note> = inner
                .notes
                .iter()
                .filter(|note| {
                    filter.is_empty()
                        || note.title.to_lowercase().contains(&filter)
                        || note.content.to_lowercase().contains(&filter)
                })
                .cloned()
                .collect();
            (sorted_newest_first(notes), delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(notes)
    }

    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        let mut inner = self.inner.lock().await;
        inner.check(StoreOp::Insert)?;
        let stamp = inner.stamp(note.created_at.max(note.updated_at));
        let stored = Note {
            id: NoteId::generate(),
            title: note.title,
            content: note.content,
            created_at: stamp,
            updated_at: stamp,
        };
        inner.notes.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &NoteId, changes: NoteChanges) -> StoreResult<Note> {
        let mut inner = self.inner.lock().await;
        inner.check(StoreOp::Update)?;
        let stamp = inner.stamp(changes.updated_at);
        let note = inner
            .notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        note.title = changes.title;
        note.content = changes.content;
        note.updated_at = stamp;
        Ok(note.clone())
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check(StoreOp::Delete)?;
        inner.notes.retain(|note| &note.id != id);
        Ok(())
    }
}

fn sorted_newest_first(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    notes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn new_note(title: &str, content: &str) -> NewNote {
        let now = Utc::now();
        NewNote {
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn insert_assigns_id_and_equal_timestamps() {
        let store = InMemoryNoteStore::new();
        let note = store.insert(new_note("Hello", "world")).await.unwrap();
        assert!(!note.id.is_blank());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_orders_newest_first() {
        let store = InMemoryNoteStore::new();
        let first = store.insert(new_note("First", "")).await.unwrap();
        let second = store.insert(new_note("Second", "")).await.unwrap();

        let ids: Vec<NoteId> = store
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_filter_matches_title_or_content_ignoring_case() {
        let store = InMemoryNoteStore::new();
        store.insert(new_note("Shopping", "milk, EGGS")).await.unwrap();
        store.insert(new_note("Eggplant recipe", "")).await.unwrap();
        store.insert(new_note("Ideas", "rewrite app")).await.unwrap();

        let titles: Vec<String> = store
            .list(Some(" egg "))
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.title)
            .collect();
        assert_eq!(titles, vec!["Eggplant recipe", "Shopping"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn update_bumps_updated_at_and_keeps_created_at() {
        let store = InMemoryNoteStore::new();
        let note = store.insert(new_note("Draft", "")).await.unwrap();
        let changes = NoteChanges {
            title: "Final".to_string(),
            content: "body".to_string(),
            updated_at: note.updated_at,
        };

        let updated = store.update(&note.id, changes).await.unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn update_unknown_id_is_not_found() {
        let store = InMemoryNoteStore::new();
        let changes = NoteChanges {
            title: "x".to_string(),
            content: String::new(),
            updated_at: Utc::now(),
        };
        let error = store.update(&NoteId::from("missing"), changes).await.unwrap_err();
        assert!(matches!(error, StoreError::NotFound(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn delete_is_idempotent() {
        let store = InMemoryNoteStore::new();
        let note = store.insert(new_note("Gone", "")).await.unwrap();
        store.delete(&note.id).await.unwrap();
        store.delete(&note.id).await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn injected_failures_reject_until_recovered() {
        let store = InMemoryNoteStore::new();
        store.fail_on(StoreOp::Insert).await;
        assert!(store.insert(new_note("x", "")).await.is_err());

        store.recover().await;
        assert!(store.insert(new_note("x", "")).await.is_ok());
        assert_eq!(store.calls().await, vec![StoreOp::Insert, StoreOp::Insert]);
    }
}
