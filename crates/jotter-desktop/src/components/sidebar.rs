//! Sidebar listing the loaded notes

use dioxus::prelude::*;

use jotter_core::models::PREVIEW_CHARS;

use super::NoteCard;
use crate::state::AppState;

#[component]
pub fn Sidebar() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let (notes, active_id, loading) = {
        let notes = state.notes.read();
        (
            notes.notes().to_vec(),
            notes.active_id().cloned(),
            notes.is_loading(),
        )
    };

    let placeholder = if loading {
        Some("Loading…")
    } else if notes.is_empty() {
        Some("No notes")
    } else {
        None
    };

    rsx! {
        aside {
            class: "sidebar",
            style: "
                width: 280px;
                border-right: 1px solid {colors.border};
                overflow-y: auto;
                background: {colors.bg_secondary};
            ",

            if let Some(text) = placeholder {
                div {
                    style: "
                        padding: 20px;
                        text-align: center;
                        color: {colors.text_muted};
                    ",
                    "{text}"
                }
            }

            for note in notes {
                {
                    let is_selected = active_id.as_ref() == Some(&note.id);
                    rsx! {
                        NoteCard {
                            key: "{note.id}",
                            id: note.id.clone(),
                            title: note.display_title().to_string(),
                            preview: note.preview(PREVIEW_CHARS),
                            is_selected,
                        }
                    }
                }
            }
        }
    }
}
