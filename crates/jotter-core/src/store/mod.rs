//! Remote note store
//!
//! [`NoteStore`] is the CRUD + substring-filter contract the rest of the crate
//! relies on. [`SupabaseNoteStore`] talks to a hosted PostgREST table;
//! [`InMemoryNoteStore`] keeps records in process for tests and previews.

mod memory;
mod supabase;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreResult;
use crate::models::{Note, NoteId};

pub use memory::{InMemoryNoteStore, StoreOp};
pub use supabase::{search_filter, SupabaseNoteStore};

/// Record sent when inserting a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields overwritten by an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// Trait for remote note storage operations
pub trait NoteStore: Send + Sync + 'static {
    /// Notes ordered by `updated_at` descending.
    ///
    /// With a filter, only notes whose title or content contains it
    /// (case-insensitive) are returned.
    fn list(&self, filter: Option<&str>) -> impl Future<Output = StoreResult<Vec<Note>>> + Send;

    /// Insert one note and return the stored record
    fn insert(&self, note: NewNote) -> impl Future<Output = StoreResult<Note>> + Send;

    /// Overwrite title/content of an existing note and return the stored record
    fn update(
        &self,
        id: &NoteId,
        changes: NoteChanges,
    ) -> impl Future<Output = StoreResult<Note>> + Send;

    /// Remove a note permanently
    fn delete(&self, id: &NoteId) -> impl Future<Output = StoreResult<()>> + Send;
}
