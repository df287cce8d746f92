//! Paged, scrolling playback of a dialog script.

use std::rc::Rc;
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use super::{AudioCue, CueKind, DialogContext, DialogError, DialogLine, DialogPlayback, DialogScript, DialogView};

#[derive(Debug, Clone)]
struct Page {
    line: DialogLine,
    /// Byte offset just past each grapheme of `line.content`.
    grapheme_ends: Vec<usize>,
}

impl Page {
    fn new(line: DialogLine) -> Self {
        let grapheme_ends = line
            .content
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self { line, grapheme_ends }
    }

    fn len(&self) -> usize {
        self.grapheme_ends.len()
    }

    fn visible(&self, revealed: usize) -> &str {
        match revealed {
            0 => "",
            n => &self.line.content[..self.grapheme_ends[n.min(self.len()) - 1]],
        }
    }
}

/// One script being played back.
///
/// Each page scrolls in `chars_per_tick` graphemes per frame. A fully
/// revealed page turns when the player advances, or on its own after
/// `auto_advance_ticks` frames if that is set. Playback ends after the last
/// page turns or on dismissal.
#[derive(Debug, Clone)]
pub struct DialogSequence {
    label: String,
    pages: Vec<Page>,
    context: Rc<DialogContext>,
    cursor: usize,
    revealed: usize,
    held: u32,
    active: bool,
    cues: Vec<AudioCue>,
}

impl DialogSequence {
    pub fn new(label: impl Into<String>, script: DialogScript, context: Rc<DialogContext>) -> Result<Self, DialogError> {
        if script.lines.is_empty() {
            return Err(DialogError::EmptyScript);
        }
        Ok(Self {
            label: label.into(),
            pages: script.lines.into_iter().map(Page::new).collect(),
            context,
            cursor: 0,
            revealed: 0,
            held: 0,
            active: false,
            cues: Vec::new(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn line_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the page on screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visible_text(&self) -> &str {
        self.pages[self.cursor].visible(self.revealed)
    }

    pub fn page_complete(&self) -> bool {
        self.revealed >= self.pages[self.cursor].len()
    }

    fn enter_page(&mut self, index: usize) {
        self.cursor = index;
        self.revealed = 0;
        self.held = 0;
        if let Some(audio) = &self.pages[index].line.line_audio {
            self.cues.push(AudioCue {
                kind: CueKind::Line,
                path: audio.clone(),
            });
        }
    }

    fn turn_page(&mut self) {
        let next = self.cursor + 1;
        if next < self.pages.len() {
            trace!(dialog = %self.label, line = next, "dialog page turned");
            self.enter_page(next);
        } else {
            self.active = false;
            debug!(dialog = %self.label, "dialog finished");
        }
    }
}

impl DialogPlayback for DialogSequence {
    fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.enter_page(0);
        debug!(dialog = %self.label, lines = self.pages.len(), "dialog activated");
        true
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn update(&mut self) {
        if !self.active {
            return;
        }

        let total = self.pages[self.cursor].len();
        if self.revealed < total {
            self.revealed = (self.revealed + self.context.chars_per_tick as usize).min(total);
            let path = self.pages[self.cursor]
                .line
                .scroll_audio
                .clone()
                .unwrap_or_else(|| self.context.default_scroll_audio.clone());
            self.cues.push(AudioCue {
                kind: CueKind::Scroll,
                path,
            });
            return;
        }

        self.held += 1;
        if let Some(limit) = self.context.auto_advance_ticks {
            if self.held >= limit {
                self.turn_page();
            }
        }
    }

    fn advance(&mut self) {
        if !self.active {
            return;
        }
        if self.page_complete() {
            self.turn_page();
        } else {
            self.revealed = self.pages[self.cursor].len();
        }
    }

    fn dismiss(&mut self) {
        if self.active {
            self.active = false;
            debug!(dialog = %self.label, line = self.cursor, "dialog dismissed");
        }
    }

    fn view(&self) -> Option<DialogView<'_>> {
        if !self.active {
            return None;
        }
        let page = &self.pages[self.cursor];
        Some(DialogView {
            speaker: &page.line.name,
            portrait: &page.line.sprite_path,
            name_font: &page.line.name_font,
            content_font: &page.line.content_font,
            text: page.visible(self.revealed),
            line_index: self.cursor,
            line_count: self.pages.len(),
            page_complete: self.page_complete(),
            textbox: &self.context.textbox,
            textbox_center: self.context.textbox_center(),
            next_arrow: &self.context.next_arrow,
        })
    }

    fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}
