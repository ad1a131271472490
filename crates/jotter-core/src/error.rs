//! Error types for jotter-core

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias for raw store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for note access layer calls
pub type NoteResult<T> = std::result::Result<T, NoteError>;

/// Faults raised by the remote note store.
///
/// These carry the real cause and are meant for logs, never for the UI.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No store URL/key was provided to this process
    #[error("Note store is not configured. Set SUPABASE_URL and SUPABASE_KEY.")]
    NotConfigured,

    /// Configuration was present but unusable
    #[error("Invalid store configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The store answered with a non-success status
    #[error("Store API error: {message} ({status})")]
    Api { status: u16, message: String },

    /// No record with this id
    #[error("Note not found: {0}")]
    NotFound(NoteId),

    /// The store accepted a write but returned no record
    #[error("Store returned no record")]
    EmptyResponse,

    /// Injected failure used by the in-memory store
    #[error("Simulated store fault: {0}")]
    Simulated(String),
}

/// User-facing failures of the note access layer.
///
/// The display text is fixed; the underlying [`StoreError`] is kept as the
/// source for diagnostics.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Failed to fetch notes. Please try again.")]
    Fetch(#[source] StoreError),

    #[error("Failed to create note.")]
    Create(#[source] StoreError),

    #[error("Failed to update note.")]
    Update(#[source] StoreError),

    #[error("Failed to delete note.")]
    Delete(#[source] StoreError),
}

impl NoteError {
    /// The store fault behind this error.
    pub const fn cause(&self) -> &StoreError {
        match self {
            Self::Fetch(cause) | Self::Create(cause) | Self::Update(cause) | Self::Delete(cause) => {
                cause
            }
        }
    }
}
