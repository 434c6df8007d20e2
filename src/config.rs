use std::collections::BTreeMap;

use crate::annotation::layout::FontAdjustments;
use crate::foundation::core::{TextFrame, TextStyle};
use crate::foundation::error::{RevealError, RevealResult};

fn default_auto_forward_speed() -> f64 {
    0.05
}

/// Reveal animation behaviour.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSettings {
    /// Seconds per character; in draw-at-once mode, seconds for the whole fade. `0` reveals
    /// immediately.
    #[serde(default = "default_auto_forward_speed")]
    pub auto_forward_speed: f64,
    /// Fade the whole message in at once instead of character by character.
    #[serde(default)]
    pub draw_at_once: bool,
    /// Keep unrevealed characters in place (transparent) so lines never reflow.
    #[serde(default)]
    pub fixed_position: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            auto_forward_speed: default_auto_forward_speed(),
            draw_at_once: false,
            fixed_position: false,
        }
    }
}

/// Complete settings for one annotated text box.
///
/// Every section is optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RubyConfig {
    /// Reveal animation behaviour.
    #[serde(default)]
    pub reveal: RevealSettings,
    /// Base text style.
    #[serde(default)]
    pub style: TextStyle,
    /// Container the text is laid out in.
    #[serde(default)]
    pub frame: TextFrame,
    /// Vertical annotation offset per font, in pixels.
    #[serde(default)]
    pub annotation_adjust: BTreeMap<String, f64>,
}

impl RubyConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> RevealResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> RevealResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevealError::serde(e.to_string()))
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> RevealResult<()> {
        let speed = self.reveal.auto_forward_speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(RevealError::validation(
                "auto_forward_speed must be finite and >= 0",
            ));
        }
        self.style.validate()?;
        let f = &self.frame;
        if ![f.x, f.y, f.width, f.height].iter().all(|v| v.is_finite()) {
            return Err(RevealError::validation("frame values must be finite"));
        }
        if f.width < 0.0 || f.height < 0.0 {
            return Err(RevealError::validation("frame size must be >= 0"));
        }
        if let Some((font, _)) = self.annotation_adjust.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RevealError::validation(format!(
                "annotation_adjust for font '{font}' must be finite"
            )));
        }
        Ok(())
    }

    /// Annotation offsets as a lookup table.
    pub fn font_adjustments(&self) -> FontAdjustments {
        self.annotation_adjust
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
