use std::ops::RangeInclusive;

use crate::foundation::core::{Point, Rgba8, Size};

/// Horizontal distribution of annotation glyphs inside their box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotAlign {
    /// Single glyph centered over the base.
    #[default]
    Center,
    /// Glyphs spread edge to edge across the box.
    Flush,
}

/// Visual box of one annotation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationSlot {
    /// Annotation text.
    pub text: String,
    /// Shaped characters of the base this slot sits above.
    pub target: Option<RangeInclusive<usize>>,
    /// Bottom-center of the box, in container coordinates.
    pub anchor: Point,
    /// Box size.
    pub size: Size,
    /// Text color; the alpha channel is carried separately in `alpha`.
    pub color: Rgba8,
    /// Current opacity in `[0, 1]`.
    pub alpha: f32,
    /// Annotation font size in pixels.
    pub font_size: f32,
    /// Glyph distribution inside the box.
    pub align: SlotAlign,
    /// Whether the host should draw this slot.
    pub visible: bool,
}

impl AnnotationSlot {
    /// Follow a character-by-character cursor.
    ///
    /// The slot stays transparent until the cursor reaches the last character of its base,
    /// fades with the cursor on that character and is opaque once the cursor has passed it.
    pub fn update_alpha_at(&mut self, position: usize, alpha: f32) {
        let Some(bottom) = self.target.as_ref().map(|t| *t.end()) else {
            self.alpha = 0.0;
            return;
        };
        self.alpha = match bottom.cmp(&position) {
            std::cmp::Ordering::Greater => 0.0,
            std::cmp::Ordering::Less => 1.0,
            std::cmp::Ordering::Equal => alpha.clamp(0.0, 1.0),
        };
    }

    /// Set a uniform opacity.
    pub fn update_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}

/// Growable arena of slots addressed by span occurrence index.
///
/// Slots beyond the visible watermark are hidden and kept for reuse.
#[derive(Clone, Debug, Default)]
pub struct SlotPool {
    slots: Vec<AnnotationSlot>,
    visible: usize,
}

impl SlotPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make exactly `count` slots active, growing the arena when needed.
    ///
    /// Active slots start hidden and transparent until the layout pass places them.
    pub fn prepare(&mut self, count: usize) {
        if self.slots.len() < count {
            self.slots.resize_with(count, AnnotationSlot::default);
        }
        for slot in &mut self.slots[..count] {
            *slot = AnnotationSlot::default();
        }
        for slot in &mut self.slots[count..] {
            slot.visible = false;
            slot.alpha = 0.0;
        }
        self.visible = count;
    }

    /// Hide every slot.
    pub fn hide_all(&mut self) {
        for slot in &mut self.slots {
            slot.visible = false;
            slot.alpha = 0.0;
        }
        self.visible = 0;
    }

    /// Active slots, in span order.
    pub fn active(&self) -> &[AnnotationSlot] {
        &self.slots[..self.visible]
    }

    /// Mutable active slots.
    pub fn active_mut(&mut self) -> &mut [AnnotationSlot] {
        &mut self.slots[..self.visible]
    }

    /// Slot for span occurrence `index`.
    pub fn get(&self, index: usize) -> Option<&AnnotationSlot> {
        self.active().get(index)
    }

    /// Mutable slot for span occurrence `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut AnnotationSlot> {
        self.active_mut().get_mut(index)
    }

    /// Number of active slots.
    pub fn len(&self) -> usize {
        self.visible
    }

    /// True when no slot is active.
    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// Slots allocated so far, hidden ones included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Per-character fade for every active slot.
    pub fn follow_cursor(&mut self, position: usize, alpha: f32) {
        for slot in self.active_mut() {
            slot.update_alpha_at(position, alpha);
        }
    }

    /// Uniform fade for every active slot.
    pub fn set_alpha(&mut self, alpha: f32) {
        for slot in self.active_mut() {
            slot.update_alpha(alpha);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/slot.rs"]
mod tests;
