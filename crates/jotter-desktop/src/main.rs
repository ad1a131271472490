//! Jotter Desktop Application
//!
//! A small desktop window over a hosted notes table.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod state;
mod theme;
mod views;

use std::sync::Arc;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use jotter_core::config::StoreConfig;
use jotter_core::store::SupabaseNoteStore;
use jotter_core::{NoteService, StoreResult};

use crate::state::SharedService;

const LOG_DIRECTIVE: &str = "jotter=debug";

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match LOG_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Jotter...");

    let service: SharedService = match build_store() {
        Ok(store) => Arc::new(NoteService::new(store)),
        Err(e) => {
            tracing::error!("Failed to initialize note store: {}", e);
            std::process::exit(1);
        }
    };

    let window = WindowBuilder::new()
        .with_title("Notes")
        .with_inner_size(LogicalSize::new(1024.0, 720.0));
    let config = Config::new().with_window(window);

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .with_context(service)
        .launch(app::App);
}

/// Build the one store handle used for the whole session.
///
/// Bad or partial configuration is logged and the app starts with an
/// unconfigured store, so every note operation reports a readable error.
fn build_store() -> StoreResult<SupabaseNoteStore> {
    let config = StoreConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Ignoring note store configuration: {}", e);
        None
    });
    SupabaseNoteStore::new(config)
}
