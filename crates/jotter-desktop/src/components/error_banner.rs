//! Banner for the last failed operation

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn ErrorBanner() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let error = state.notes.read().error().map(str::to_string);

    rsx! {
        if let Some(message) = error {
            div {
                class: "error-banner",
                role: "alert",
                style: "
                    margin: 12px 16px 0;
                    padding: 10px 14px;
                    border-radius: 6px;
                    background: {colors.error_bg};
                    color: {colors.error};
                ",
                "{message}"
            }
        }
    }
}
