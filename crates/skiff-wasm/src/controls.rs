//! DOM event wiring for the title-bar controls, dragging and file drops

use crate::dom::BrowserFiles;
use skiff_core::{PlayerShell, PointerButton, PointerInput, Position};
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DragEvent, Event, EventTarget, HtmlElement, MouseEvent};

type Shell = Rc<PlayerShell<BrowserFiles>>;

const OPEN_BUTTON_STYLE: &[(&str, &str)] = &[
    ("margin", "0 5px"),
    ("padding", "5px 10px"),
    ("background", "#444"),
    ("color", "white"),
    ("border", "none"),
    ("border-radius", "3px"),
    ("cursor", "pointer"),
    ("-webkit-app-region", "no-drag"),
];

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn pointer_input(event: &MouseEvent) -> PointerInput {
    PointerInput::new(
        PointerButton::from_dom(event.button()),
        Position::new(event.client_x(), event.client_y()),
        Position::new(event.screen_x(), event.screen_y()),
    )
}

/// Wire every control of the player markup to `shell`
pub fn install(
    shell: &Shell,
    document: &Document,
    body: &HtmlElement,
    handle: &HtmlElement,
) -> Result<(), JsValue> {
    add_open_file_button(shell, document)?;
    bind_window_controls(shell, document)?;
    bind_drag(shell, document, handle)?;
    bind_drop(shell, body)?;
    Ok(())
}

/// Insert the "Open File" button right after the close button
fn add_open_file_button(shell: &Shell, document: &Document) -> Result<(), JsValue> {
    let ids = &shell.config().elements;

    let button = document.create_element("button")?.dyn_into::<HtmlElement>()?;
    button.set_id(&ids.open_file);
    button.set_text_content(Some(&ids.open_file_label));
    let style = button.style();
    for (property, value) in OPEN_BUTTON_STYLE {
        style.set_property(property, value)?;
    }

    let media = shell.media().clone();
    listen(&button, "click", move |_| {
        let media = media.clone();
        spawn_local(async move { media.open_dialog().await });
    })?;

    match document.get_element_by_id(&ids.close) {
        Some(close) => {
            close.insert_adjacent_element("afterend", &button)?;
        }
        None => debug!(id = %ids.close, "Close button missing, open button not inserted"),
    }
    Ok(())
}

fn bind_click(
    document: &Document,
    id: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    match document.get_element_by_id(id) {
        Some(element) => listen(&element, "click", handler),
        None => {
            debug!(id, "Control not found");
            Ok(())
        }
    }
}

fn bind_window_controls(shell: &Shell, document: &Document) -> Result<(), JsValue> {
    let ids = &shell.config().elements;

    let window = shell.window().clone();
    bind_click(document, &ids.minimize, move |_| {
        let window = window.clone();
        spawn_local(async move { window.minimize().await });
    })?;

    let window = shell.window().clone();
    bind_click(document, &ids.maximize, move |_| {
        let window = window.clone();
        spawn_local(async move { window.toggle_maximize().await });
    })?;

    let window = shell.window().clone();
    bind_click(document, &ids.close, move |_| {
        let window = window.clone();
        spawn_local(async move {
            window.close().await;
        });
    })?;

    let media = shell.media().clone();
    bind_click(document, &ids.play, move |_| {
        let media = media.clone();
        spawn_local(async move { media.play().await });
    })?;

    let media = shell.media().clone();
    bind_click(document, &ids.pause, move |_| media.pause())?;

    Ok(())
}

fn bind_drag(shell: &Shell, document: &Document, handle: &HtmlElement) -> Result<(), JsValue> {
    let style = handle.style();
    style.set_property("cursor", "move")?;
    style.set_property("user-select", "none")?;

    let window = shell.window().clone();
    listen(handle, "mousedown", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let input = pointer_input(mouse);
        let window = window.clone();
        spawn_local(async move { window.pointer_down(input).await });
    })?;

    let window = shell.window().clone();
    listen(document, "mousemove", move |event| {
        if !window.drag_state().is_active() {
            return;
        }
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let input = pointer_input(mouse);
        let window = window.clone();
        spawn_local(async move { window.pointer_move(input).await });
    })?;

    let window = shell.window().clone();
    listen(document, "mouseup", move |_| window.pointer_up())?;

    Ok(())
}

fn bind_drop(shell: &Shell, body: &HtmlElement) -> Result<(), JsValue> {
    for name in ["dragenter", "dragover", "dragleave", "drop"] {
        listen(body, name, |event| {
            event.prevent_default();
            event.stop_propagation();
        })?;
    }

    for name in ["dragenter", "dragover"] {
        let zone = shell.drop_zone().clone();
        listen(body, name, move |_| zone.drag_over())?;
    }

    let zone = shell.drop_zone().clone();
    listen(body, "dragleave", move |_| zone.drag_leave())?;

    let zone = shell.drop_zone().clone();
    listen(body, "drop", move |event| {
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files())
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        let zone = zone.clone();
        spawn_local(async move {
            zone.drop_files(files).await;
        });
    })?;

    Ok(())
}
