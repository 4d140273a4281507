//! Shell configuration
//!
//! Every field has a default matching the stock player markup, so a partial
//! JSON document only needs to name what it overrides.

use crate::{types::DialogFilter, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level shell configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub detection: DetectionPolicy,
    pub window: WindowConfig,
    pub media: MediaConfig,
    pub drop_cue: DropCue,
    pub elements: ElementIds,
}

impl ShellConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Bounded polling for the shell bridge capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionPolicy {
    /// Maximum number of capability checks
    pub max_attempts: u32,
    /// Delay between checks in milliseconds
    pub interval_ms: u64,
}

impl DetectionPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval_ms: 100,
        }
    }
}

/// Visual parameters for the browser fallback window effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Delay between the slide-out transform and hiding the document
    pub minimize_hide_delay_ms: u64,
    pub slide_out_transform: String,
    /// Transition applied when a fallback drag snaps back
    pub restore_transition: String,
}

impl WindowConfig {
    pub fn minimize_hide_delay(&self) -> Duration {
        Duration::from_millis(self.minimize_hide_delay_ms)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            minimize_hide_delay_ms: 300,
            slide_out_transform: "translateY(100%)".to_string(),
            restore_transition: "transform 0.2s ease".to_string(),
        }
    }
}

/// File selection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub dialog_filter: DialogFilter,
    /// `accept` attribute of the synthesized file input
    pub accept: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dialog_filter: DialogFilter::default(),
            accept: "video/*".to_string(),
        }
    }
}

/// Outline shown while a file is dragged over the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropCue {
    pub outline: String,
    pub outline_offset: String,
}

impl Default for DropCue {
    fn default() -> Self {
        Self {
            outline: "2px dashed #4CAF50".to_string(),
            outline_offset: "-10px".to_string(),
        }
    }
}

/// Element ids and selectors of the player markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub video: String,
    pub drag_handle_selector: String,
    pub minimize: String,
    pub maximize: String,
    pub close: String,
    pub play: String,
    pub pause: String,
    pub open_file: String,
    pub open_file_label: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video: "videoPlayer".to_string(),
            drag_handle_selector: ".controls".to_string(),
            minimize: "minimizeBtn".to_string(),
            maximize: "maximizeBtn".to_string(),
            close: "closeBtn".to_string(),
            play: "playBtn".to_string(),
            pause: "pauseBtn".to_string(),
            open_file: "openFileBtn".to_string(),
            open_file_label: "Open File".to_string(),
        }
    }
}
