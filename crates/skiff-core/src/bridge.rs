//! Native shell bridge seam
//!
//! Everything the desktop shell offers the frontend goes through
//! [`ShellBridge`]. All calls are asynchronous and may fail; callers treat
//! them as best-effort and never retry.

use crate::{
    types::{DialogFilter, Position},
    Result,
};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Work started by a close-request notification, run on the host event loop
pub type CloseTask = Pin<Box<dyn Future<Output = ()>>>;

/// Called once per close request; the bridge drives the returned task
pub type CloseHandler = Box<dyn Fn() -> CloseTask>;

/// Window, dialog and asset operations offered by the desktop shell
#[async_trait(?Send)]
pub trait ShellBridge {
    /// Outer window position in screen pixels
    async fn outer_position(&self) -> Result<Position>;

    async fn set_position(&self, position: Position) -> Result<()>;

    async fn minimize(&self) -> Result<()>;

    async fn is_maximized(&self) -> Result<bool>;

    async fn maximize(&self) -> Result<()>;

    async fn unmaximize(&self) -> Result<()>;

    /// Ask the shell to close (and destroy) the window
    async fn close(&self) -> Result<()>;

    /// Native single-file open dialog. `Ok(None)` means the user cancelled.
    async fn open_dialog(&self, filter: &DialogFilter) -> Result<Option<String>>;

    /// Convert a filesystem path into a URL the media element can load
    async fn convert_file_src(&self, path: &str) -> Result<String>;

    /// Register `handler` for close requests coming from the window manager.
    ///
    /// Once subscribed, the shell no longer closes the window on its own; the
    /// handler is expected to run cleanup and then call [`ShellBridge::close`].
    async fn subscribe_close_requested(&self, handler: CloseHandler) -> Result<()>;
}

/// Startup probe for the shell bridge
pub trait BridgeProbe {
    type Bridge: ShellBridge + 'static;

    /// Whether the global bridge object exists at all
    fn bridge_present(&self) -> bool;

    /// Returns the bridge once the window-manipulation capability is ready
    fn acquire(&self) -> Option<Self::Bridge>;
}

/// Asynchronous delay provider
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
