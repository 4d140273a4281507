//! Document and media environment seams
//!
//! These are always available, in the desktop webview and in a plain
//! browser tab alike.

use crate::{config::DropCue, Result};
use async_trait::async_trait;

/// The whole-document surface: visual effects, fullscreen and tab close
#[async_trait(?Send)]
pub trait Surface {
    /// Set the CSS transform of the document body; empty string resets it
    fn set_transform(&self, transform: &str);

    fn set_transition(&self, transition: &str);

    /// Grabbing cursor and disabled text selection while dragging
    fn set_grabbing(&self, grabbing: bool);

    /// Hide the document entirely
    fn hide(&self);

    fn show_drop_cue(&self, cue: &DropCue);

    fn clear_drop_cue(&self);

    fn is_fullscreen(&self) -> bool;

    async fn request_fullscreen(&self) -> Result<()>;

    async fn exit_fullscreen(&self) -> Result<()>;

    /// Close the browser tab or window
    fn close_window(&self) -> Result<()>;
}

/// The media playback element
#[async_trait(?Send)]
pub trait MediaElement {
    fn set_src(&self, url: &str);

    /// Detach the source attribute
    fn remove_src(&self);

    fn load(&self);

    /// Start playback; rejects when autoplay is refused or the source fails
    async fn play(&self) -> Result<()>;

    fn pause(&self);
}

/// In-memory files and their object URLs
#[async_trait(?Send)]
pub trait LocalFiles {
    type File;

    /// MIME type reported for the file, possibly empty
    fn content_type(&self, file: &Self::File) -> String;

    fn create_object_url(&self, file: &Self::File) -> Result<String>;

    fn revoke_object_url(&self, url: &str) -> Result<()>;

    /// Show a file chooser restricted to `accept`.
    ///
    /// A browser gives no signal on cancel, so the future may never resolve.
    async fn pick_file(&self, accept: &str) -> Option<Self::File>;
}
