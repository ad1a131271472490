//! Main application component

use dioxus::prelude::*;

use jotter_core::NotesState;

use crate::state::{AppState, SharedService};
use crate::theme::initial_theme;
use crate::views::Home;

/// Root application component
#[component]
pub fn App() -> Element {
    let service = use_context::<SharedService>();
    let notes = use_signal(|| NotesState::new().with_theme(initial_theme()));
    let search_input = use_signal(String::new);

    let state = use_context_provider(|| AppState::new(service, notes, search_input));

    // Initial load, then one reload per search edit.
    let loader = state.clone();
    use_effect(move || {
        let search = (loader.search_input)();
        loader.load(search);
    });

    let theme_attr = state.theme().as_str();
    let colors = state.palette();

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            Home {}
        }
    }
}
