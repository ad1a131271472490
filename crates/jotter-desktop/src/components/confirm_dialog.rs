//! Modal confirmation gating note deletion

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn ConfirmDeleteDialog() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let busy = state.is_busy();
    let title = state
        .notes
        .read()
        .pending_delete()
        .map(|note| note.display_title().to_string())
        .unwrap_or_default();

    let cancel_state = state.clone();
    let confirm_state = state.clone();

    rsx! {
        div {
            class: "modal-backdrop",
            style: "
                position: fixed;
                inset: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                background: {colors.overlay};
            ",

            div {
                class: "modal",
                role: "dialog",
                style: "
                    width: 360px;
                    padding: 20px;
                    border-radius: 8px;
                    border: 1px solid {colors.border};
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                ",

                h3 { style: "margin: 0 0 8px;", "{title}" }
                p { style: "margin: 0 0 20px;", "Delete this note? This cannot be undone." }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",

                    button {
                        onclick: move |_| cancel_state.cancel_delete(),
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
                        disabled: busy,
                        onclick: move |_| confirm_state.confirm_delete(),
                        style: "
                            padding: 6px 14px;
                            border: none;
                            border-radius: 6px;
                            background: {colors.error};
                            color: {colors.bg_primary};
                            cursor: pointer;
                        ",
                        "Delete"
                    }
                }
            }
        }
    }
}
