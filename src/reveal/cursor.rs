/// Logical reveal position: the character currently fading in and its opacity.
///
/// In draw-at-once mode `position` is pinned to the last character and `alpha` is the opacity of
/// the whole message.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RevealCursor {
    /// Index of the logical character fading in.
    pub position: usize,
    /// Opacity of the boundary character, in `[0, 1]`.
    pub alpha: f32,
}

impl RevealCursor {
    /// Nothing revealed.
    pub const START: Self = Self {
        position: 0,
        alpha: 0.0,
    };

    /// Cursor at `position` with `alpha` clamped to `[0, 1]`.
    pub fn new(position: usize, alpha: f32) -> Self {
        Self {
            position,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Every character of a `length`-character message fully shown.
    pub fn complete(length: usize) -> Self {
        Self {
            position: length.saturating_sub(1),
            alpha: 1.0,
        }
    }

    /// True once the last character is fully opaque.
    pub fn is_complete(&self, length: usize) -> bool {
        length > 0 && self.position + 1 >= length && self.alpha >= 1.0
    }

    /// Cursor after `time` characters' worth of reveal.
    pub fn from_time(time: f64, length: usize) -> Self {
        if time >= length as f64 {
            return Self::complete(length);
        }
        let time = time.max(0.0);
        let position = time.floor();
        Self {
            position: position as usize,
            alpha: (time - position) as f32,
        }
    }

    /// Clamp an arbitrary seek target: before the start is `(0, 0)`, at or past the end is
    /// complete, anything else splits into whole and fractional parts.
    pub fn seek(target: f64, length: usize) -> Self {
        if target.is_nan() || target < 0.0 {
            Self::START
        } else {
            Self::from_time(target, length)
        }
    }

    /// Draw-at-once seek: `target` is the global alpha.
    pub fn seek_all_at_once(target: f64, length: usize) -> Self {
        let alpha = if target.is_nan() { 0.0 } else { target.clamp(0.0, 1.0) };
        Self {
            position: length.saturating_sub(1),
            alpha: alpha as f32,
        }
    }
}

/// Auto-forward loop state: reveal time in characters.
///
/// Time starts accumulating on the tick after the loop was started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutoForward {
    time: f64,
    armed: bool,
}

impl AutoForward {
    /// Loop that starts counting on the next tick.
    pub fn start() -> Self {
        Self {
            time: 0.0,
            armed: false,
        }
    }

    /// Advance by `dt` seconds at `speed` seconds per character. Returns the new time.
    pub fn advance(&mut self, dt: f64, speed: f64) -> f64 {
        if !self.armed {
            self.armed = true;
            return self.time;
        }
        if speed > 0.0 && dt > 0.0 {
            self.time += dt / speed;
        }
        self.time
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/cursor.rs"]
mod tests;
