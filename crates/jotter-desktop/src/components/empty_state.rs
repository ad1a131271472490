//! Shown when no note is selected

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn EmptyState() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let busy = state.is_busy();

    rsx! {
        div {
            class: "empty-state",
            style: "
                flex: 1;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 16px;
                color: {colors.text_secondary};
            ",

            p { style: "margin: 0;", "No notes yet." }

            button {
                disabled: busy,
                onclick: move |_| state.add_note(),
                style: "
                    padding: 8px 16px;
                    border: none;
                    border-radius: 6px;
                    background: {colors.accent};
                    color: {colors.accent_text};
                    cursor: pointer;
                ",
                "+ Create your first note"
            }
        }
    }
}
