//! ruby-reveal lays out ruby-annotated text (small phonetic or gloss text above selected base
//! spans) and reveals it with a frame-driven typewriter animation.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `{base:annotation}` tokens are parsed out of the raw message, leaving markup tags
//!    in place ([`extract`]).
//! 2. **Measure**: a [`GeometryProvider`] shapes the fully revealed text once; annotation slots are
//!    matched and placed over their base characters ([`layout_annotations`]).
//! 3. **Reveal**: every [`RevealController::tick`] advances the reveal cursor, composes the visible
//!    markup and presents it when it changed.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No text engine of its own**: glyph geometry always comes from the provider.
//! - **Single-threaded, tick-driven**: no timers, threads or async runtime; the host owns the frame
//!   clock.
//!
//! # Getting started
//!
//! See [`crate::guide`] for a walkthrough of the API and the reveal model.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Annotation extraction, slot storage and slot layout.
pub mod annotation;
/// Serializable configuration.
pub mod config;
/// Shared value types and the error taxonomy.
pub mod foundation;
/// Geometry provider seam and the bundled text engines.
pub mod geometry;
/// Standalone documentation of the reveal model and public API.
pub mod guide;
/// Markup tokenizing, style resolution and visible markup composition.
pub mod markup;
/// Reveal cursor, redraw gating and the frame-driven controller.
pub mod reveal;

pub use annotation::extract::{AnnotationSpan, Extraction, PositionIndexTable, extract};
pub use annotation::layout::{ANNOTATION_FONT_SCALE, FontAdjustments, layout_annotations};
pub use annotation::slot::{AnnotationSlot, SlotAlign, SlotPool};
pub use config::{RevealSettings, RubyConfig};
pub use foundation::core::{
    AutoSize, Point, Rect, Rgba8, Size, TextAlign, TextFrame, TextStyle, Vec2, WrapMode,
};
pub use foundation::error::{RevealError, RevealResult};
pub use geometry::monospace::MonospaceGeometry;
pub use geometry::parley_engine::ParleyGeometry;
pub use geometry::provider::{GeometryProvider, ShapedChar, ShapedText};
pub use markup::compose::{ComposedMarkup, VisibleRange};
pub use markup::tokenizer::strip_tags;
pub use reveal::controller::{RevealController, RevealEvent, RevealPhase, TickReport};
pub use reveal::cursor::RevealCursor;
pub use reveal::snapshot::{RedrawKind, RenderSnapshot};
