//! Skiff Tauri - Borderless desktop host for the player shell
//!
//! Hosts the web frontend in an undecorated window and exposes the window
//! and dialog commands its shell bridge calls.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use commands::{AppState, CLOSE_REQUESTED_EVENT};
use tauri::{Emitter, Manager, WindowEvent};

mod commands;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,skiff=debug".to_string()),
        )
        .init();

    tracing::info!(version = skiff_core::VERSION, "Starting Skiff");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            // Window
            commands::window_position,
            commands::set_window_position,
            commands::minimize_window,
            commands::is_window_maximized,
            commands::maximize_window,
            commands::unmaximize_window,
            commands::close_window,
            commands::register_close_guard,
            // Files
            commands::open_video_dialog,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                let state = window.state::<AppState>();
                if !state.close_guard.should_intercept() {
                    return;
                }
                // Hold the window until the frontend has released its media
                match window.emit(CLOSE_REQUESTED_EVENT, ()) {
                    Ok(()) => {
                        api.prevent_close();
                        tracing::debug!("Close deferred to frontend cleanup");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not notify frontend, closing directly");
                    }
                }
            }
        })
        .setup(|app| {
            tracing::info!("Skiff initialized");

            // Open devtools in debug mode
            #[cfg(debug_assertions)]
            if let Some(window) = app.get_webview_window("main") {
                window.open_devtools();
            }

            Ok(())
        })
        .run(tauri::generate_context!())
        .context("error while running Skiff")
}
