//! Tauri shell bridge
//!
//! Talks to the desktop host through the global `window.__TAURI__` object
//! (`app.withGlobalTauri`). Window and dialog operations are host commands
//! reached with `core.invoke`; asset URLs come from `core.convertFileSrc`.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use serde::{de::DeserializeOwned, Serialize};
use skiff_core::{BridgeProbe, CloseHandler, DialogFilter, Error, Position, Result, ShellBridge};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Event the host emits when the window manager asks to close
pub const CLOSE_REQUESTED_EVENT: &str = "skiff://close-requested";

fn tauri_global() -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str("__TAURI__")).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn function_at(root: &JsValue, path: &[&str]) -> Option<Function> {
    let mut current = root.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    current.dyn_into::<Function>().ok()
}

/// Best-effort text for a JS rejection value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Looks for the Tauri global and its invoke/event functions
pub struct TauriProbe;

impl BridgeProbe for TauriProbe {
    type Bridge = TauriBridge;

    fn bridge_present(&self) -> bool {
        tauri_global().is_some()
    }

    fn acquire(&self) -> Option<TauriBridge> {
        let tauri = tauri_global()?;
        Some(TauriBridge {
            invoke: function_at(&tauri, &["core", "invoke"])?,
            convert_file_src: function_at(&tauri, &["core", "convertFileSrc"])?,
            listen: function_at(&tauri, &["event", "listen"])?,
        })
    }
}

#[derive(Serialize)]
struct PositionArgs {
    position: Position,
}

#[derive(Serialize)]
struct DialogArgs<'a> {
    filter: &'a DialogFilter,
}

/// [`ShellBridge`] backed by the Tauri JS API
pub struct TauriBridge {
    invoke: Function,
    convert_file_src: Function,
    listen: Function,
}

impl TauriBridge {
    async fn invoke<A, R>(&self, command: &'static str, args: &A) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let args =
            serde_wasm_bindgen::to_value(args).map_err(|e| Error::shell(command, e.to_string()))?;
        let promise = self
            .invoke
            .call2(&JsValue::UNDEFINED, &JsValue::from_str(command), &args)
            .map_err(|e| Error::shell(command, describe(&e)))?
            .dyn_into::<Promise>()
            .map_err(|_| Error::shell(command, "invoke did not return a promise"))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| Error::shell(command, describe(&e)))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::shell(command, e.to_string()))
    }
}

#[async_trait(?Send)]
impl ShellBridge for TauriBridge {
    async fn outer_position(&self) -> Result<Position> {
        self.invoke("window_position", &()).await
    }

    async fn set_position(&self, position: Position) -> Result<()> {
        self.invoke("set_window_position", &PositionArgs { position })
            .await
    }

    async fn minimize(&self) -> Result<()> {
        self.invoke("minimize_window", &()).await
    }

    async fn is_maximized(&self) -> Result<bool> {
        self.invoke("is_window_maximized", &()).await
    }

    async fn maximize(&self) -> Result<()> {
        self.invoke("maximize_window", &()).await
    }

    async fn unmaximize(&self) -> Result<()> {
        self.invoke("unmaximize_window", &()).await
    }

    async fn close(&self) -> Result<()> {
        self.invoke("close_window", &()).await
    }

    async fn open_dialog(&self, filter: &DialogFilter) -> Result<Option<String>> {
        self.invoke("open_video_dialog", &DialogArgs { filter }).await
    }

    async fn convert_file_src(&self, path: &str) -> Result<String> {
        let url = self
            .convert_file_src
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(path))
            .map_err(|e| Error::Conversion(describe(&e)))?;
        url.as_string()
            .ok_or_else(|| Error::Conversion(format!("non-string URL for {path}")))
    }

    async fn subscribe_close_requested(&self, handler: CloseHandler) -> Result<()> {
        let callback =
            Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| spawn_local(handler()));
        let promise = self
            .listen
            .call2(
                &JsValue::UNDEFINED,
                &JsValue::from_str(CLOSE_REQUESTED_EVENT),
                callback.as_ref().unchecked_ref(),
            )
            .map_err(|e| Error::shell("listen", describe(&e)))?
            .dyn_into::<Promise>()
            .map_err(|_| Error::shell("listen", "listen did not return a promise"))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| Error::shell("listen", describe(&e)))?;

        // Lives for the rest of the page
        callback.forget();

        self.invoke("register_close_guard", &()).await
    }
}
