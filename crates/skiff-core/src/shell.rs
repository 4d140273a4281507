//! Player Shell - composes detection, window lifecycle and media loading
//!
//! The window controller and the media loader never reference each other;
//! they share only the negotiated [`Runtime`] and the cleanup hook.

use crate::{
    bridge::{BridgeProbe, Timer},
    config::ShellConfig,
    detect::{detect, Runtime},
    dropzone::DropZone,
    host::{LocalFiles, MediaElement, Surface},
    media::MediaLoader,
    window::{Cleanup, WindowController},
};
use std::rc::Rc;
use tracing::info;

/// Host collaborators handed to [`PlayerShell::start`]
pub struct ShellHost<P, L> {
    pub probe: P,
    pub timer: Rc<dyn Timer>,
    pub surface: Rc<dyn Surface>,
    pub media: Rc<dyn MediaElement>,
    pub files: L,
}

/// The running player shell
pub struct PlayerShell<L: LocalFiles + 'static> {
    config: ShellConfig,
    runtime: Runtime,
    window: Rc<WindowController>,
    media: Rc<MediaLoader<L>>,
    drop_zone: Rc<DropZone<L>>,
}

impl<L: LocalFiles + 'static> PlayerShell<L> {
    /// Detect the runtime once and wire every component to it
    pub async fn start<P: BridgeProbe>(config: ShellConfig, host: ShellHost<P, L>) -> Self {
        let runtime = detect(&host.probe, host.timer.as_ref(), &config.detection).await;
        info!(mode = runtime.label(), "Player shell starting");
        Self::with_runtime(config, runtime, host.timer, host.surface, host.media, host.files)
    }

    /// Wire components to an already negotiated runtime
    pub fn with_runtime(
        config: ShellConfig,
        runtime: Runtime,
        timer: Rc<dyn Timer>,
        surface: Rc<dyn Surface>,
        media: Rc<dyn MediaElement>,
        files: L,
    ) -> Self {
        let loader = Rc::new(MediaLoader::new(
            runtime.clone(),
            media,
            files,
            config.media.clone(),
        ));
        let cleanup: Rc<dyn Cleanup> = loader.clone();
        let window = Rc::new(WindowController::new(
            runtime.clone(),
            surface.clone(),
            timer,
            cleanup,
            config.window.clone(),
        ));
        let drop_zone = Rc::new(DropZone::new(loader.clone(), surface, config.drop_cue.clone()));

        Self {
            config,
            runtime,
            window,
            media: loader,
            drop_zone,
        }
    }

    /// Subscribe the window controller to window-manager close requests
    pub async fn watch_close_requests(&self) {
        self.window.watch_close_requests().await;
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn window(&self) -> &Rc<WindowController> {
        &self.window
    }

    pub fn media(&self) -> &Rc<MediaLoader<L>> {
        &self.media
    }

    pub fn drop_zone(&self) -> &Rc<DropZone<L>> {
        &self.drop_zone
    }
}
