//! Skiff Core - Borderless video player shell logic
//!
//! This crate holds everything about the player shell that does not touch a
//! concrete DOM or desktop runtime:
//! - Environment detection (native shell bridge vs. browser fallback)
//! - Window lifecycle: minimize, maximize/restore, guarded close, drag-to-move
//! - Media loading: open dialog, path/object URL resolution, cleanup
//! - Drag-and-drop ingestion
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Player Shell                       │
//! ├──────────────────────────────────────────────────────────┤
//! │                    ┌──────────────┐                      │
//! │                    │   Detector   │──► Runtime           │
//! │                    └──────┬───────┘                      │
//! │              ┌────────────┴────────────┐                 │
//! │       ┌──────┴───────┐          ┌──────┴───────┐         │
//! │       │    Window    │ cleanup  │    Media     │         │
//! │       │  Controller  │─────────►│    Loader    │◄─ Drop  │
//! │       └──────┬───────┘          └──────┬───────┘   Zone  │
//! │              │                         │                 │
//! │   ShellBridge / Surface      MediaElement / LocalFiles   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The host seams ([`ShellBridge`], [`Surface`], [`MediaElement`],
//! [`LocalFiles`], [`Timer`]) are `?Send` async traits: the shell runs on a
//! single-threaded event loop.

pub mod bridge;
pub mod config;
pub mod detect;
pub mod dropzone;
pub mod error;
pub mod host;
pub mod media;
pub mod shell;
pub mod types;
pub mod window;

pub use bridge::{BridgeProbe, CloseHandler, CloseTask, ShellBridge, Timer};
pub use config::{DetectionPolicy, DropCue, ElementIds, MediaConfig, ShellConfig, WindowConfig};
pub use detect::{detect, Runtime};
pub use dropzone::DropZone;
pub use error::{Error, Result};
pub use host::{LocalFiles, MediaElement, Surface};
pub use media::MediaLoader;
pub use shell::{PlayerShell, ShellHost};
pub use types::*;
pub use window::{Cleanup, DragState, WindowController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
