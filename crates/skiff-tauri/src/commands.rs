//! Tauri IPC commands
//!
//! The window and file operations behind the frontend's shell bridge.
//! Positions cross IPC in logical pixels so they line up with DOM
//! `screenX`/`screenY`.

use skiff_core::{DialogFilter, Position};
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::{AppHandle, LogicalPosition, State, WebviewWindow};
use tauri_plugin_dialog::{DialogExt, FilePath};

/// Event emitted to the frontend when the window manager asks to close
pub const CLOSE_REQUESTED_EVENT: &str = "skiff://close-requested";

/// Decides whether a window-manager close waits for frontend cleanup.
///
/// Intercepts only after the frontend subscribed, and stops intercepting
/// once the frontend itself asks to close.
#[derive(Debug, Default)]
pub struct CloseGuard {
    registered: AtomicBool,
    released: AtomicBool,
}

impl CloseGuard {
    pub fn register(&self) {
        self.registered.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    pub fn should_intercept(&self) -> bool {
        self.registered.load(Ordering::SeqCst) && !self.released.load(Ordering::SeqCst)
    }
}

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    pub close_guard: CloseGuard,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ipc_error(op: &'static str) -> impl Fn(tauri::Error) -> String {
    move |e| {
        tracing::warn!(op, error = %e, "Window command failed");
        format!("{op}: {e}")
    }
}

// ============================================================================
// Window commands
// ============================================================================

/// Outer window position
#[tauri::command]
pub async fn window_position(window: WebviewWindow) -> Result<Position, String> {
    let scale = window.scale_factor().map_err(ipc_error("scale_factor"))?;
    let position = window
        .outer_position()
        .map_err(ipc_error("outer_position"))?
        .to_logical::<i32>(scale);
    Ok(Position::new(position.x, position.y))
}

/// Move the window; called for every drag frame
#[tauri::command]
pub async fn set_window_position(window: WebviewWindow, position: Position) -> Result<(), String> {
    window
        .set_position(LogicalPosition::new(position.x, position.y))
        .map_err(ipc_error("set_position"))
}

#[tauri::command]
pub async fn minimize_window(window: WebviewWindow) -> Result<(), String> {
    window.minimize().map_err(ipc_error("minimize"))
}

#[tauri::command]
pub async fn is_window_maximized(window: WebviewWindow) -> Result<bool, String> {
    window.is_maximized().map_err(ipc_error("is_maximized"))
}

#[tauri::command]
pub async fn maximize_window(window: WebviewWindow) -> Result<(), String> {
    window.maximize().map_err(ipc_error("maximize"))
}

#[tauri::command]
pub async fn unmaximize_window(window: WebviewWindow) -> Result<(), String> {
    window.unmaximize().map_err(ipc_error("unmaximize"))
}

/// Close after frontend cleanup; the close request is no longer intercepted
#[tauri::command]
pub async fn close_window(window: WebviewWindow, state: State<'_, AppState>) -> Result<(), String> {
    state.close_guard.release();
    tracing::info!("Closing window");
    window.close().map_err(ipc_error("close"))
}

/// The frontend subscribed to close requests and will clean up first
#[tauri::command]
pub async fn register_close_guard(state: State<'_, AppState>) -> Result<(), String> {
    state.close_guard.register();
    tracing::debug!("Frontend close guard registered");
    Ok(())
}

// ============================================================================
// File commands
// ============================================================================

/// Native single-file picker; `None` when cancelled
#[tauri::command]
pub async fn open_video_dialog(
    app: AppHandle,
    filter: DialogFilter,
) -> Result<Option<String>, String> {
    let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
    let picked = app
        .dialog()
        .file()
        .add_filter(&filter.name, &extensions)
        .blocking_pick_file();

    let path = picked.map(|path| match path {
        FilePath::Path(path) => path.to_string_lossy().into_owned(),
        FilePath::Url(url) => url.to_string(),
    });
    tracing::info!(path = ?path, "Open dialog finished");
    Ok(path)
}
