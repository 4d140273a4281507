//! Skiff WASM - Player shell frontend for the browser and the desktop webview
//!
//! Binds the player markup to the shell logic in `skiff-core`:
//! - Detects the Tauri bridge (`window.__TAURI__`) or falls back to the browser
//! - Title-bar controls, drag-to-move and drag-and-drop loading
//! - Injects the "Open File" button next to the close control
//!
//! ## Usage
//!
//! ```javascript
//! import init, { start } from './pkg/skiff_wasm.js';
//!
//! await init();
//! await start();
//! ```

use skiff_core::{PlayerShell, ShellConfig, ShellHost};
use std::rc::Rc;
use tracing::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlVideoElement};

mod bridge;
mod controls;
mod dom;
mod logging;

pub use bridge::{TauriBridge, TauriProbe, CLOSE_REQUESTED_EVENT};
pub use dom::{BrowserFiles, DomSurface, GlooTimer, VideoElement};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Start the player shell with the default configuration
#[wasm_bindgen]
pub async fn start() -> Result<(), JsValue> {
    run(ShellConfig::default()).await
}

/// Start the player shell with a JSON configuration overriding the defaults
#[wasm_bindgen(js_name = startWithConfig)]
pub async fn start_with_config(config_json: String) -> Result<(), JsValue> {
    let config =
        ShellConfig::from_json(&config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    run(config).await
}

async fn run(config: ShellConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    dom::ready(&document).await;

    let ids = &config.elements;
    let Some(video) = document
        .get_element_by_id(&ids.video)
        .and_then(|e| e.dyn_into::<HtmlVideoElement>().ok())
    else {
        error!(id = %ids.video, "Video player element not found");
        return Ok(());
    };
    let Some(handle) = document
        .query_selector(&ids.drag_handle_selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        error!(selector = %ids.drag_handle_selector, "Drag handle element not found");
        return Ok(());
    };
    let body = document.body().ok_or("document has no body")?;

    body.style().set_property("transform", "")?;
    body.style()
        .set_property("transition", &config.window.restore_transition)?;

    let host = ShellHost {
        probe: TauriProbe,
        timer: Rc::new(GlooTimer),
        surface: Rc::new(DomSurface::new(document.clone(), body.clone())),
        media: Rc::new(VideoElement::new(video)),
        files: BrowserFiles::new(document.clone()),
    };
    let shell = Rc::new(PlayerShell::start(config, host).await);

    controls::install(&shell, &document, &body, &handle)?;

    // Drop handlers must be live before the host round trip
    shell.watch_close_requests().await;
    Ok(())
}
