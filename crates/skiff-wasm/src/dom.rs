//! DOM implementations of the core host seams

use crate::bridge::describe;
use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::{Function, Promise, Reflect};
use skiff_core::{DropCue, Error, LocalFiles, MediaElement, Result, Surface, Timer};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, File, HtmlElement, HtmlInputElement, HtmlVideoElement, Url};

/// Resolve once the document has been parsed
pub async fn ready(document: &Document) {
    if document.ready_state() != "loading" {
        return;
    }

    let (tx, rx) = oneshot::channel::<()>();
    let mut tx = Some(tx);
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    });
    if document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .is_ok()
    {
        let _ = rx.await;
    }
}

/// Call a fullscreen method on `target` and wait for its promise.
///
/// web-sys drops the promise these methods return, which hides rejections.
async fn fullscreen_call(target: &JsValue, method: &str) -> Result<()> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| Error::Fullscreen(format!("{method} is not supported")))?;
    let returned = function
        .call0(target)
        .map_err(|e| Error::Fullscreen(describe(&e)))?;
    if let Ok(promise) = returned.dyn_into::<Promise>() {
        JsFuture::from(promise)
            .await
            .map_err(|e| Error::Fullscreen(describe(&e)))?;
    }
    Ok(())
}

/// The document body as the window surface
pub struct DomSurface {
    document: Document,
    body: HtmlElement,
}

impl DomSurface {
    pub fn new(document: Document, body: HtmlElement) -> Self {
        Self { document, body }
    }

    fn style(&self, property: &str, value: &str) {
        let _ = self.body.style().set_property(property, value);
    }
}

#[async_trait(?Send)]
impl Surface for DomSurface {
    fn set_transform(&self, transform: &str) {
        self.style("transform", transform);
    }

    fn set_transition(&self, transition: &str) {
        self.style("transition", transition);
    }

    fn set_grabbing(&self, grabbing: bool) {
        let (cursor, select) = if grabbing { ("grabbing", "none") } else { ("", "") };
        self.style("cursor", cursor);
        self.style("user-select", select);
    }

    fn hide(&self) {
        self.style("display", "none");
    }

    fn show_drop_cue(&self, cue: &DropCue) {
        self.style("outline", &cue.outline);
        self.style("outline-offset", &cue.outline_offset);
    }

    fn clear_drop_cue(&self) {
        self.style("outline", "none");
    }

    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    async fn request_fullscreen(&self) -> Result<()> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| Error::Fullscreen("document has no root element".into()))?;
        fullscreen_call(root.as_ref(), "requestFullscreen").await
    }

    async fn exit_fullscreen(&self) -> Result<()> {
        fullscreen_call(self.document.as_ref(), "exitFullscreen").await
    }

    fn close_window(&self) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| Error::WindowClose("no window".into()))?;
        window.close().map_err(|e| Error::WindowClose(describe(&e)))
    }
}

/// `<video>` element wrapper
pub struct VideoElement {
    video: HtmlVideoElement,
}

impl VideoElement {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

#[async_trait(?Send)]
impl MediaElement for VideoElement {
    fn set_src(&self, url: &str) {
        self.video.set_src(url);
    }

    fn remove_src(&self) {
        let _ = self.video.remove_attribute("src");
    }

    fn load(&self) {
        self.video.load();
    }

    async fn play(&self) -> Result<()> {
        let promise = self
            .video
            .play()
            .map_err(|e| Error::Playback(describe(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| Error::Playback(describe(&e)))?;
        Ok(())
    }

    fn pause(&self) {
        let _ = self.video.pause();
    }
}

/// Browser files, object URLs and the synthesized file input
pub struct BrowserFiles {
    document: Document,
}

impl BrowserFiles {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

#[async_trait(?Send)]
impl LocalFiles for BrowserFiles {
    type File = File;

    fn content_type(&self, file: &File) -> String {
        file.type_()
    }

    fn create_object_url(&self, file: &File) -> Result<String> {
        Url::create_object_url_with_blob(file).map_err(|e| Error::ObjectUrl(describe(&e)))
    }

    fn revoke_object_url(&self, url: &str) -> Result<()> {
        Url::revoke_object_url(url).map_err(|e| Error::ObjectUrl(describe(&e)))
    }

    async fn pick_file(&self, accept: &str) -> Option<File> {
        let input = self
            .document
            .create_element("input")
            .ok()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        input.set_type("file");
        input.set_accept(accept);

        let (tx, rx) = oneshot::channel::<Option<File>>();
        let mut tx = Some(tx);
        let chooser = input.clone();
        let on_change = Closure::<dyn FnMut()>::new(move || {
            let file = chooser.files().and_then(|files| files.get(0));
            if let Some(tx) = tx.take() {
                let _ = tx.send(file);
            }
        });
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        input.click();

        // Pending forever if the user cancels; the closure lives as long as we wait
        let picked = rx.await.ok().flatten();
        drop(on_change);
        picked
    }
}

/// Timer backed by `setTimeout`
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
