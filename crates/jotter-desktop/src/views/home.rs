//! Home view - main application screen

use dioxus::prelude::*;

use jotter_core::UiMode;

use crate::components::{
    ConfirmDeleteDialog, EmptyState, ErrorBanner, Header, NoteEditor, NoteViewer, Sidebar,
};
use crate::state::AppState;

/// Header on top, note list on the left, the active note on the right
#[component]
pub fn Home() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let (active, mode, show_empty, confirming) = {
        let notes = state.notes.read();
        (
            notes.active_note().cloned(),
            notes.mode(),
            notes.shows_empty_state(),
            notes.pending_delete().is_some(),
        )
    };
    let editor_key = active
        .as_ref()
        .map(|note| note.id.to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "home-container",
            style: "display: flex; flex-direction: column; height: 100vh;",

            Header {}

            div {
                class: "content-area",
                style: "flex: 1; display: flex; overflow: hidden;",

                Sidebar {}

                main {
                    class: "main-panel",
                    style: "
                        flex: 1;
                        display: flex;
                        flex-direction: column;
                        overflow-y: auto;
                        background: {colors.bg_primary};
                    ",

                    ErrorBanner {}

                    if let Some(note) = active {
                        if mode == UiMode::Editing {
                            NoteEditor { key: "{editor_key}", note }
                        } else {
                            NoteViewer { note }
                        }
                    } else if show_empty {
                        EmptyState {}
                    }
                }
            }

            if confirming {
                ConfirmDeleteDialog {}
            }
        }
    }
}
