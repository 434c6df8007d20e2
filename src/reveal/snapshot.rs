use crate::foundation::core::{Size, TextFrame, WrapMode};
use crate::reveal::cursor::RevealCursor;

/// Work a draw step has to do, decided against the last rendered state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawKind {
    /// Nothing changed since the last frame.
    Unchanged,
    /// Only the boundary alpha moved: patch the alpha tags in place.
    AlphaOnly,
    /// Message or position changed: compose the visible markup from scratch.
    Full,
}

/// Last rendered reveal state and container geometry.
///
/// Unknown fields (cold start, after invalidation) compare unequal to anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    message: Option<String>,
    position: Option<usize>,
    alpha: Option<f32>,
    size: Option<Size>,
    wrap: Option<WrapMode>,
}

impl RenderSnapshot {
    /// Cold snapshot: the first draw step takes the full branch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the draw step for `message` at `cursor`.
    pub fn classify(&self, message: &str, cursor: RevealCursor) -> RedrawKind {
        if self.message.as_deref() != Some(message) || self.position != Some(cursor.position) {
            RedrawKind::Full
        } else if self.alpha != Some(cursor.alpha) {
            RedrawKind::AlphaOnly
        } else {
            RedrawKind::Unchanged
        }
    }

    /// Remember what was just rendered.
    pub fn record(&mut self, message: &str, cursor: RevealCursor) {
        if self.message.as_deref() != Some(message) {
            self.message = Some(message.to_string());
        }
        self.position = Some(cursor.position);
        self.alpha = Some(cursor.alpha);
    }

    /// Force the next draw step down the full branch.
    pub fn invalidate_message(&mut self) {
        self.message = None;
    }

    /// True when the container size or wrap mode differs from the recorded one.
    pub fn container_changed(&self, frame: &TextFrame, wrap: WrapMode) -> bool {
        self.size != Some(frame.size()) || self.wrap != Some(wrap)
    }

    /// Remember the container geometry a layout was computed for.
    pub fn record_container(&mut self, frame: &TextFrame, wrap: WrapMode) {
        self.size = Some(frame.size());
        self.wrap = Some(wrap);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/snapshot.rs"]
mod tests;
