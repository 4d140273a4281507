//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// A point in pixels, either client-relative or screen-absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// CSS transform moving an element by this offset
    pub fn to_translate(self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mouse button that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// Pointer event as seen by the window controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub button: PointerButton,
    /// Position relative to the viewport
    pub client: Position,
    /// Position relative to the screen
    pub screen: Position,
}

impl PointerInput {
    pub fn new(button: PointerButton, client: Position, screen: Position) -> Self {
        Self {
            button,
            client,
            screen,
        }
    }

    /// Primary-button input where client and screen coordinates coincide
    pub fn primary_at(x: i32, y: i32) -> Self {
        let at = Position::new(x, y);
        Self::new(PointerButton::Primary, at, at)
    }
}

/// Source currently assigned to the media element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// URL produced by the shell from a filesystem path; owned by the shell
    ShellAsset(String),
    /// In-memory object URL; must be revoked when no longer used
    ObjectUrl(String),
}

impl MediaSource {
    pub fn url(&self) -> &str {
        match self {
            MediaSource::ShellAsset(url) | MediaSource::ObjectUrl(url) => url,
        }
    }

    pub fn is_revocable(&self) -> bool {
        matches!(self, MediaSource::ObjectUrl(_))
    }
}

/// A file chosen by the user, before it is resolved to a playable URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<F> {
    /// Filesystem path returned by the native dialog
    Path(String),
    /// In-memory file handle from a file input or a drop
    File(F),
}

/// Name and extension list for the native open dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl Default for DialogFilter {
    fn default() -> Self {
        Self {
            name: "Video Files".to_string(),
            extensions: ["mp4", "mov", "avi", "mkv", "webm", "ogg"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Result of a close attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Cleanup ran and termination was requested
    Requested,
    /// Another close is already in flight
    AlreadyClosing,
    /// The termination request failed; the guard was reset
    Failed,
}

/// Result of a file drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Loaded(MediaSource),
    Rejected { mime: String },
    Empty,
    Failed,
}

/// Whether a content type names a video
pub fn is_video_mime(mime: &str) -> bool {
    mime.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_subtraction() {
        assert_eq!(
            Position::new(100, 100) - Position::new(50, 50),
            Position::new(50, 50)
        );
        assert_eq!(
            Position::new(10, 0) - Position::new(30, 5),
            Position::new(-20, -5)
        );
    }

    #[test]
    fn test_translate_format() {
        assert_eq!(Position::new(40, 15).to_translate(), "translate(40px, 15px)");
        assert_eq!(Position::new(-3, 0).to_translate(), "translate(-3px, 0px)");
    }

    #[test]
    fn test_pointer_button_mapping() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(4), PointerButton::Other(4));
    }

    #[test]
    fn test_video_mime() {
        assert!(is_video_mime("video/mp4"));
        assert!(is_video_mime("video/webm"));
        assert!(!is_video_mime("audio/ogg"));
        assert!(!is_video_mime(""));
    }

    #[test]
    fn test_media_source_revocable() {
        assert!(MediaSource::ObjectUrl("blob:abc".into()).is_revocable());
        assert!(!MediaSource::ShellAsset("asset://localhost/a.mp4".into()).is_revocable());
    }
}
