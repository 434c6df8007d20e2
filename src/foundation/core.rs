use crate::foundation::error::{RevealError, RevealResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Used for the base text color, `<color=...>` tag values, per-character colors reported by a
/// geometry provider and annotation slot colors. Doubles as the Parley brush type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` required).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self::new(out[0], out[1], out[2], 255))
            }
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Named colors understood by `<color=name>` tags.
    pub fn from_name(name: &str) -> Option<Self> {
        let c = match name.to_ascii_lowercase().as_str() {
            "red" => Self::new(255, 0, 0, 255),
            "green" => Self::new(0, 255, 0, 255),
            "blue" => Self::new(0, 0, 255, 255),
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "yellow" => Self::new(255, 255, 0, 255),
            "orange" => Self::new(255, 128, 0, 255),
            "purple" => Self::new(160, 32, 240, 255),
            _ => return None,
        };
        Some(c)
    }

    /// Parse either a hex literal or a named color.
    pub fn parse(s: &str) -> RevealResult<Self> {
        let s = s.trim().trim_matches('"');
        Self::from_hex(s)
            .or_else(|| Self::from_name(s))
            .ok_or_else(|| RevealError::validation(format!("unrecognized color '{s}'")))
    }
}

/// Convert a unit alpha to a byte the way alpha tags are written: `floor(255 * alpha)`,
/// clamped to the byte range.
pub fn alpha_to_u8(alpha: f32) -> u8 {
    if !alpha.is_finite() {
        return 0;
    }
    (255.0 * alpha.clamp(0.0, 1.0)).floor() as u8
}

/// Horizontal alignment of laid out lines inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Lines start at the left edge.
    #[default]
    Start,
    /// Lines are centered.
    Center,
    /// Lines end at the right edge.
    End,
    /// Lines are stretched to the container width (last line starts at the left edge).
    Justified,
}

/// Line wrapping behaviour of the base text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Break lines at the container width.
    #[default]
    Normal,
    /// Only explicit newlines break lines.
    NoWrap,
}

impl WrapMode {
    /// True when automatic wrapping is active.
    pub fn is_wrapping(self) -> bool {
        self != Self::NoWrap
    }
}

/// Inclusive font size range used by auto sizing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutoSize {
    /// Smallest size the engine may shrink to.
    pub min: f32,
    /// Largest (preferred) size.
    pub max: f32,
}

/// Text style handed to the geometry provider with every shaping request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font identity. Also keys the per-font annotation adjustment table.
    pub font: String,
    /// Base font size (the maximum when auto sizing).
    pub font_size: f32,
    /// Extra size added on top of `font_size` for the base text only.
    pub font_size_ex: f32,
    /// Shrink-to-fit range, when enabled.
    pub auto_size: Option<AutoSize>,
    /// Base text color.
    pub color: Rgba8,
    /// Horizontal alignment.
    pub alignment: TextAlign,
    /// Extra advance added after every character.
    pub character_spacing: f32,
    /// Extra distance added between consecutive lines.
    pub line_spacing: f32,
    /// Wrapping behaviour.
    pub wrap: WrapMode,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "default".to_string(),
            font_size: 36.0,
            font_size_ex: 0.0,
            auto_size: None,
            color: Rgba8::WHITE,
            alignment: TextAlign::Start,
            character_spacing: 0.0,
            line_spacing: 0.0,
            wrap: WrapMode::Normal,
        }
    }
}

impl TextStyle {
    /// Largest base size: the auto-size maximum when auto sizing, `font_size` otherwise.
    pub fn font_size_max(&self) -> f32 {
        self.auto_size.map_or(self.font_size, |a| a.max)
    }

    /// Size actually used for the base text.
    pub fn effective_font_size(&self) -> f32 {
        self.font_size_max() + self.font_size_ex
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> RevealResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(RevealError::validation("font_size must be finite and > 0"));
        }
        if !self.font_size_ex.is_finite() || self.effective_font_size() <= 0.0 {
            return Err(RevealError::validation(
                "font_size + font_size_ex must be finite and > 0",
            ));
        }
        if let Some(a) = self.auto_size {
            if !(a.min.is_finite() && a.max.is_finite()) || a.min <= 0.0 || a.min > a.max {
                return Err(RevealError::validation(
                    "auto_size must satisfy 0 < min <= max",
                ));
            }
        }
        if !self.character_spacing.is_finite() || !self.line_spacing.is_finite() {
            return Err(RevealError::validation("spacing values must be finite"));
        }
        Ok(())
    }
}

/// Container rectangle the base text is laid out in.
///
/// `x`/`y` locate the container for the host; layout itself only depends on the size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextFrame {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Width available to the text.
    pub width: f64,
    /// Height available to the text.
    pub height: f64,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 900.0,
            height: 300.0,
        }
    }
}

impl TextFrame {
    /// Container size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
