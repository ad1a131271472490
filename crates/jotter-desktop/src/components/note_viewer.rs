//! Read-only view of the active note

use chrono::Local;
use dioxus::prelude::*;

use jotter_core::Note;

use crate::state::AppState;

#[component]
pub fn NoteViewer(note: Note) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let updated = note
        .updated_at
        .with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string();
    let title = note.display_title().to_string();
    let has_content = !note.content.trim().is_empty();

    rsx! {
        article {
            class: "note-viewer",
            style: "padding: 24px; display: flex; flex-direction: column; gap: 12px;",

            div {
                style: "display: flex; align-items: center; gap: 12px;",

                h2 {
                    style: "flex: 1; margin: 0; font-size: 22px;",
                    "{title}"
                }

                button {
                    onclick: move |_| state.begin_edit(),
                    style: "
                        padding: 6px 14px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        background: {colors.bg_secondary};
                        color: {colors.text_primary};
                        cursor: pointer;
                    ",
                    "Edit"
                }
            }

            div {
                style: "font-size: 12px; color: {colors.text_muted};",
                "Updated {updated}"
            }

            if has_content {
                div {
                    style: "white-space: pre-wrap; line-height: 1.6;",
                    "{note.content}"
                }
            } else {
                div {
                    style: "font-style: italic; color: {colors.text_muted};",
                    "No content"
                }
            }
        }
    }
}
