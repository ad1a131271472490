//! Header bar: brand, search box, add button and theme toggle

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::toggle_icon;

#[component]
pub fn Header() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let busy = state.is_busy();
    let icon = toggle_icon(state.theme());
    let mut search_input = state.search_input;

    let add_state = state.clone();
    let theme_state = state.clone();

    rsx! {
        header {
            class: "header",
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 10px 16px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_secondary};
            ",

            h1 {
                style: "margin: 0; font-size: 18px; font-weight: 600;",
                "Notes"
            }

            input {
                r#type: "text",
                placeholder: "Search notes...",
                value: "{search_input}",
                oninput: move |evt| search_input.set(evt.value()),
                style: "
                    flex: 1;
                    padding: 8px 12px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }

            button {
                disabled: busy,
                onclick: move |_| add_state.add_note(),
                style: "
                    padding: 8px 14px;
                    border: none;
                    border-radius: 6px;
                    background: {colors.accent};
                    color: {colors.accent_text};
                    cursor: pointer;
                ",
                "+ Add"
            }

            button {
                title: "Toggle theme",
                onclick: move |_| theme_state.toggle_theme(),
                style: "
                    padding: 6px 10px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    background: transparent;
                    cursor: pointer;
                ",
                "{icon}"
            }
        }
    }
}
