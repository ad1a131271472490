//! Note card component

use dioxus::prelude::*;

use jotter_core::NoteId;

use crate::state::AppState;

/// A single note row rendered in the sidebar.
///
/// Clicking the row opens the note; the trash button asks for a delete
/// confirmation without changing the selection.
#[component]
pub fn NoteCard(id: NoteId, title: String, preview: String, is_selected: bool) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let busy = state.is_busy();

    let bg = if is_selected {
        colors.bg_tertiary
    } else {
        "transparent"
    };
    let border_left = if is_selected {
        format!("3px solid {}", colors.accent)
    } else {
        "3px solid transparent".to_string()
    };

    let open_state = state.clone();
    let open_id = id.clone();
    let delete_state = state.clone();

    rsx! {
        div {
            class: if is_selected { "note-item selected" } else { "note-item" },
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border};
                border-left: {border_left};
                cursor: pointer;
                background: {bg};
            ",
            onclick: move |_| open_state.open_note(open_id.clone()),

            div {
                style: "flex: 1; min-width: 0;",

                div {
                    class: "note-title",
                    style: "
                        font-weight: 500;
                        margin-bottom: 4px;
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                    ",
                    "{title}"
                }

                div {
                    class: "note-preview",
                    style: "
                        font-size: 12px;
                        color: {colors.text_secondary};
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                    ",
                    "{preview}"
                }
            }

            button {
                title: "Delete note",
                disabled: busy,
                onclick: move |evt| {
                    evt.stop_propagation();
                    delete_state.request_delete(&id);
                },
                style: "
                    border: none;
                    background: transparent;
                    color: {colors.text_muted};
                    cursor: pointer;
                ",
                "🗑"
            }
        }
    }
}
