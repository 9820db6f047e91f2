use serde::{Deserialize, Serialize};

use crate::highlight::HighlightSnapshot;

/// Geometry of the lyrics viewport, in arbitrary display units
///
/// The content is padded by half a viewport above the first line and below
/// the last one, so every line (including the first and last) can be centered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportLayout {
    pub viewport_height: f64,
    pub line_height: f64,
    pub line_gap: f64,
}

impl Default for ViewportLayout {
    fn default() -> Self {
        Self {
            viewport_height: 24.0,
            line_height: 1.0,
            line_gap: 1.0,
        }
    }
}

impl ViewportLayout {
    /// Scroll offset that puts the middle of line `index` at the viewport center
    pub fn center_offset(&self, index: usize) -> f64 {
        index as f64 * (self.line_height + self.line_gap) + self.line_height / 2.0
    }
}

/// Scroll request for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollCommand {
    pub phrase_index: usize,
    pub offset: f64,
}

/// Keeps the active phrase centered
///
/// Emits a command only when the active phrase changes, so a steady playhead
/// produces no scroll traffic.
#[derive(Debug, Clone, Default)]
pub struct ScrollDriver {
    layout: ViewportLayout,
    last_phrase: Option<usize>,
}

impl ScrollDriver {
    pub fn new(layout: ViewportLayout) -> Self {
        Self {
            layout,
            last_phrase: None,
        }
    }

    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    pub fn on_snapshot(&mut self, snapshot: &HighlightSnapshot) -> Option<ScrollCommand> {
        let index = snapshot.active_phrase_index;
        if self.last_phrase == Some(index) {
            return None;
        }

        self.last_phrase = Some(index);
        Some(ScrollCommand {
            phrase_index: index,
            offset: self.layout.center_offset(index),
        })
    }

    /// Forget the last phrase (new song loaded)
    pub fn reset(&mut self) {
        self.last_phrase = None;
    }
}
