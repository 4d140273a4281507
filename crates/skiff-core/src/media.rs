//! Media Loader
//!
//! Turns a chosen file into a playable URL and drives the video element.
//! It owns the current [`MediaSource`] so object URLs are released exactly
//! once, either when superseded or during cleanup.

use crate::{
    config::MediaConfig,
    detect::Runtime,
    host::{LocalFiles, MediaElement},
    types::{MediaSource, Selection},
    window::Cleanup,
    Error, Result,
};
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

/// Resolves selections to sources and controls playback
pub struct MediaLoader<L: LocalFiles> {
    runtime: Runtime,
    media: Rc<dyn MediaElement>,
    files: L,
    config: MediaConfig,
    current: RefCell<Option<MediaSource>>,
}

impl<L: LocalFiles> MediaLoader<L> {
    pub fn new(runtime: Runtime, media: Rc<dyn MediaElement>, files: L, config: MediaConfig) -> Self {
        Self {
            runtime,
            media,
            files,
            config,
            current: RefCell::new(None),
        }
    }

    pub fn files(&self) -> &L {
        &self.files
    }

    /// Source currently assigned to the media element
    pub fn current_source(&self) -> Option<MediaSource> {
        self.current.borrow().clone()
    }

    /// Let the user pick a file and load it.
    ///
    /// Native mode uses the shell dialog; the browser gets a synthesized
    /// file input. Cancelling is a silent no-op.
    pub async fn open_dialog(&self) {
        let selection = match &self.runtime {
            Runtime::NativeReady(bridge) => {
                match bridge.open_dialog(&self.config.dialog_filter).await {
                    Ok(Some(path)) => Selection::Path(path),
                    Ok(None) => {
                        debug!("Open dialog cancelled");
                        return;
                    }
                    Err(e) => {
                        error!(error = %e, "Error opening file");
                        return;
                    }
                }
            }
            Runtime::Fallback => match self.files.pick_file(&self.config.accept).await {
                Some(file) => Selection::File(file),
                None => return,
            },
        };

        // Errors are already logged by `load`
        let _ = self.load(selection).await;
    }

    /// Resolve `selection` to a URL, assign it and start playback.
    ///
    /// A failure at any step is logged and returned; the element is left in
    /// whatever state that step produced.
    pub async fn load(&self, selection: Selection<L::File>) -> Result<MediaSource> {
        match self.try_load(selection).await {
            Ok(source) => {
                info!(url = source.url(), "Video loaded");
                Ok(source)
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "Error loading video");
                Err(e)
            }
        }
    }

    async fn try_load(&self, selection: Selection<L::File>) -> Result<MediaSource> {
        let source = self.resolve(selection).await?;

        self.media.set_src(source.url());
        let previous = self.current.replace(Some(source.clone()));
        if let Some(previous) = previous.filter(|p| *p != source) {
            self.release(&previous);
        }

        self.media.load();
        self.media.play().await?;
        Ok(source)
    }

    async fn resolve(&self, selection: Selection<L::File>) -> Result<MediaSource> {
        match selection {
            Selection::Path(path) => match &self.runtime {
                Runtime::NativeReady(bridge) => {
                    let url = bridge
                        .convert_file_src(&path)
                        .await
                        .map_err(|e| Error::Conversion(e.to_string()))?;
                    Ok(MediaSource::ShellAsset(url))
                }
                Runtime::Fallback => Err(Error::BridgeUnavailable(format!(
                    "cannot open path {path} without the desktop shell"
                ))),
            },
            Selection::File(file) => {
                let url = self.files.create_object_url(&file)?;
                Ok(MediaSource::ObjectUrl(url))
            }
        }
    }

    pub async fn play(&self) {
        if let Err(e) = self.media.play().await {
            warn!(error = %e, "Play rejected");
        }
    }

    pub fn pause(&self) {
        self.media.pause();
    }

    /// Pause, detach the source and release a revocable URL
    pub fn release_media(&self) {
        self.media.pause();
        self.media.remove_src();

        if let Some(source) = self.current.borrow_mut().take() {
            self.release(&source);
        }
    }

    fn release(&self, source: &MediaSource) {
        if !source.is_revocable() {
            return;
        }
        match self.files.revoke_object_url(source.url()) {
            Ok(()) => debug!(url = source.url(), "Object URL revoked"),
            Err(e) => warn!(error = %e, url = source.url(), "Failed to revoke object URL"),
        }
    }
}

#[async_trait(?Send)]
impl<L: LocalFiles> Cleanup for MediaLoader<L> {
    async fn cleanup(&self) {
        self.release_media();
    }
}
