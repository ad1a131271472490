//! Note editor component

use dioxus::prelude::*;

use jotter_core::{Note, NoteDraft};

use crate::state::AppState;

/// Title and content form for the active note.
///
/// The draft lives only here until Save; the parent keys this component by
/// note id so switching notes starts from a fresh draft.
#[component]
pub fn NoteEditor(note: Note) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let initial = NoteDraft::from_note(&note);
    let mut title = use_signal(|| initial.title.clone());
    let mut content = use_signal(|| initial.content.clone());

    let draft = NoteDraft::new(title(), content());
    let busy = state.is_busy();
    let save_disabled = save_disabled(&draft, busy);

    let save_state = state.clone();
    let cancel_state = state.clone();

    let field_style = format!(
        "padding: 8px 12px; border: 1px solid {}; border-radius: 6px; background: {}; color: {}; font-family: inherit; font-size: inherit; outline: none;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "note-editor",
            style: "
                flex: 1;
                display: flex;
                flex-direction: column;
                gap: 12px;
                padding: 24px;
            ",

            input {
                r#type: "text",
                placeholder: "Title",
                value: "{title}",
                oninput: move |evt| title.set(evt.value()),
                style: "{field_style} font-size: 18px;",
            }

            textarea {
                placeholder: "Start typing...",
                value: "{content}",
                oninput: move |evt| content.set(evt.value()),
                style: "{field_style} flex: 1; min-height: 240px; resize: none; line-height: 1.6;",
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 8px;",

                button {
                    disabled: busy,
                    onclick: move |_| cancel_state.cancel_edit(),
                    style: "
                        padding: 6px 14px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        background: transparent;
                        color: {colors.text_primary};
                        cursor: pointer;
                    ",
                    "Cancel"
                }

                button {
                    disabled: save_disabled,
                    onclick: move |_| save_state.save_note(NoteDraft::new(title(), content())),
                    style: "
                        padding: 6px 14px;
                        border: none;
                        border-radius: 6px;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        cursor: pointer;
                    ",
                    "Save"
                }
            }
        }
    }
}

/// Save needs a non-blank draft and no mutation in flight
fn save_disabled(draft: &NoteDraft, busy: bool) -> bool {
    busy || !draft.can_save()
}
