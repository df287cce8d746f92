//! Dialog module - data-driven scripts and their playback.
//!
//! - **script**: JSON script format and the resources it references
//! - **sequence**: `DialogSequence`, a paged, scrolling playback of one script
//!
//! The encounter controller only sees the [`DialogPlayback`] trait, so any
//! playback engine with the same lifecycle can stand in.

mod script;
mod sequence;

pub use script::*;
pub use sequence::*;

use game_rules::{Camera, DialogAssets, TextboxStyle, Vec2};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading dialog scripts.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("failed to read dialog script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dialog script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dialog script has no lines")]
    EmptyScript,
}

/// Lifecycle every dialog playback engine exposes to the encounter logic.
pub trait DialogPlayback {
    /// Start playback from the first line. A no-op while already active.
    /// Returns true if playback actually (re)started.
    fn activate(&mut self) -> bool;

    fn is_active(&self) -> bool;

    /// Advance playback by one frame.
    fn update(&mut self);

    /// Player-requested page turn.
    fn advance(&mut self);

    /// End playback immediately.
    fn dismiss(&mut self);

    /// What to draw this frame, if anything.
    fn view(&self) -> Option<DialogView<'_>>;

    /// Drain audio cues produced since the last call.
    fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueKind {
    /// Text scroll beep.
    Scroll,
    /// Voice or sting attached to a line.
    Line,
}

/// A sound the host should play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCue {
    pub kind: CueKind,
    pub path: String,
}

/// Settings shared by every dialog in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogContext {
    /// Used to place the text box in world coordinates.
    pub camera: Camera,
    pub default_scroll_audio: String,
    pub textbox: TextboxStyle,
    pub next_arrow: String,
    pub chars_per_tick: u32,
    pub auto_advance_ticks: Option<u32>,
}

impl DialogContext {
    pub fn new(camera: Camera, assets: &DialogAssets) -> Self {
        Self {
            camera,
            default_scroll_audio: assets.default_scroll_audio.clone(),
            textbox: assets.textbox.clone(),
            next_arrow: assets.next_arrow.clone(),
            chars_per_tick: assets.chars_per_tick.max(1),
            auto_advance_ticks: assets.auto_advance_ticks,
        }
    }

    /// World-space center of the text box: horizontally centered on the
    /// camera, resting on the bottom edge of the view.
    pub fn textbox_center(&self) -> Vec2 {
        let origin = self.camera.origin();
        Vec2::new(
            self.camera.center.x,
            origin.y + self.textbox.size.y * 0.5,
        )
    }
}

/// Read-only snapshot of the page being shown.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogView<'a> {
    pub speaker: &'a str,
    pub portrait: &'a str,
    pub name_font: &'a str,
    pub content_font: &'a str,
    /// The part of the line revealed so far.
    pub text: &'a str,
    pub line_index: usize,
    pub line_count: usize,
    /// True once the whole line is visible; the next arrow is shown then.
    pub page_complete: bool,
    pub textbox: &'a TextboxStyle,
    pub textbox_center: Vec2,
    pub next_arrow: &'a str,
}
