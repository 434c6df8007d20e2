//! Frame-driven reveal of annotated text.
//!
//! The controller owns three cooperative loops, all advanced by [`RevealController::tick`]:
//!
//! - the draw loop: while a message is being revealed, composes the visible markup for the
//!   current cursor and hands it to the geometry provider;
//! - the auto-forward loop: advances the cursor over time;
//! - the container watch loop: re-lays the text out when the container size or wrap mode changes.
//!
//! Geometry is only known after the provider has shaped the full message, so a new message first
//! spends one tick in [`RevealPhase::Measuring`]: the provider shapes everything, annotation slots
//! are placed and the reveal starts from an empty presentation.

use crate::annotation::extract::{AnnotationSpan, PositionIndexTable, extract};
use crate::annotation::layout::{FontAdjustments, layout_annotations};
use crate::annotation::slot::{AnnotationSlot, SlotPool};
use crate::config::{RevealSettings, RubyConfig};
use crate::foundation::core::{AutoSize, Rgba8, TextAlign, TextFrame, TextStyle, WrapMode};
use crate::foundation::error::{RevealError, RevealResult};
use crate::geometry::provider::GeometryProvider;
use crate::markup::compose::{ComposedMarkup, VisibleRange};
use crate::reveal::cursor::{AutoForward, RevealCursor};
use crate::reveal::snapshot::{RedrawKind, RenderSnapshot};
use crate::reveal::speech;

/// Lifecycle of the current message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// No message.
    Idle,
    /// Waiting for the next tick to lay the full message out.
    Measuring,
    /// Draw loop running.
    Revealing,
    /// Every character is fully shown.
    Finished,
}

/// Notification produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    /// The revealed character changed.
    CharacterRevealed {
        /// Character now fading in.
        position: usize,
    },
    /// The message is completely shown. Emitted once per message.
    Finished,
}

/// What a tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events in emission order.
    pub events: Vec<RevealEvent>,
    /// True when new markup was handed to the provider.
    pub presented: bool,
}

impl TickReport {
    /// True when the tick finished the reveal.
    pub fn finished(&self) -> bool {
        self.events.contains(&RevealEvent::Finished)
    }
}

/// Annotated text box with a typewriter reveal.
pub struct RevealController<G: GeometryProvider> {
    provider: G,
    settings: RevealSettings,
    style: TextStyle,
    frame: TextFrame,
    adjust: FontAdjustments,

    display: String,
    spans: Vec<AnnotationSpan>,
    index: PositionIndexTable,
    logical: Vec<char>,
    newline_count: usize,
    parse_error: Option<RevealError>,

    cursor: RevealCursor,
    phase: RevealPhase,
    finish_emitted: bool,
    last_revealed: Option<usize>,
    pending_events: Vec<RevealEvent>,
    slots: SlotPool,
    snapshot: RenderSnapshot,
    composed: ComposedMarkup,
    presented: String,

    auto_forward: Option<AutoForward>,
    watching: bool,
    enabled: bool,
    shut_down: bool,
}

impl<G: GeometryProvider + std::fmt::Debug> std::fmt::Debug for RevealController<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("provider", &self.provider)
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl<G: GeometryProvider> RevealController<G> {
    /// Controller with default settings.
    pub fn new(provider: G) -> Self {
        let cfg = RubyConfig::default();
        Self {
            provider,
            adjust: cfg.font_adjustments(),
            settings: cfg.reveal,
            style: cfg.style,
            frame: cfg.frame,

            display: String::new(),
            spans: Vec::new(),
            index: PositionIndexTable::default(),
            logical: Vec::new(),
            newline_count: 0,
            parse_error: None,

            cursor: RevealCursor::START,
            phase: RevealPhase::Idle,
            finish_emitted: false,
            last_revealed: None,
            pending_events: Vec::new(),
            slots: SlotPool::new(),
            snapshot: RenderSnapshot::new(),
            composed: ComposedMarkup::empty(),
            presented: String::new(),

            auto_forward: None,
            watching: true,
            enabled: true,
            shut_down: false,
        }
    }

    /// Controller configured from a validated [`RubyConfig`].
    pub fn with_config(provider: G, config: RubyConfig) -> RevealResult<Self> {
        config.validate()?;
        let mut out = Self::new(provider);
        out.adjust = config.font_adjustments();
        out.settings = config.reveal;
        out.style = config.style;
        out.frame = config.frame;
        Ok(out)
    }

    // ---- message -------------------------------------------------------------------------

    /// Replace the message. `{base:annotation}` tokens become annotated spans.
    ///
    /// A malformed token is logged and kept in [`Self::last_parse_error`]; the text after it is
    /// shown as written. Ignored after [`Self::shutdown`].
    #[tracing::instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn set_text(&mut self, raw: &str) {
        if self.shut_down {
            tracing::debug!("set_text after shutdown ignored");
            return;
        }
        self.auto_forward = None;
        self.slots.hide_all();
        self.snapshot.invalidate_message();
        self.composed = ComposedMarkup::empty();
        self.finish_emitted = false;
        self.last_revealed = None;
        self.pending_events.clear();

        let ex = extract(raw);
        self.logical = ex
            .position_index
            .as_slice()
            .iter()
            .filter_map(|&at| ex.display_text[at..].chars().next())
            .collect();
        self.newline_count = ex.display_text.matches('\n').count();
        self.display = ex.display_text;
        self.spans = ex.spans;
        self.index = ex.position_index;
        self.parse_error = ex.error;

        if self.index.is_empty() {
            self.cursor = RevealCursor::START;
            self.set_phase(RevealPhase::Idle);
            return;
        }

        self.cursor = self.initial_cursor();
        self.set_phase(RevealPhase::Measuring);
        if self.settings.draw_at_once {
            self.start_auto_forward();
        }
    }

    /// Clear the message.
    pub fn reset_text(&mut self) {
        self.set_text("");
    }

    // ---- cursor --------------------------------------------------------------------------

    /// Start (or restart) revealing over time at the configured speed.
    ///
    /// With a speed of `0` the whole message is shown on the spot.
    pub fn start_auto_forward(&mut self) {
        if self.index.is_empty() || self.phase == RevealPhase::Finished {
            return;
        }
        if self.settings.auto_forward_speed <= 0.0 {
            self.auto_forward = None;
            self.cursor = RevealCursor::complete(self.text_length());
            return;
        }
        self.auto_forward = Some(AutoForward::start());
    }

    /// Stop the auto-forward loop, keeping the cursor where it is.
    pub fn stop_auto_forward(&mut self) {
        self.auto_forward = None;
    }

    /// True while the auto-forward loop is active.
    pub fn is_auto_forwarding(&self) -> bool {
        self.auto_forward.is_some()
    }

    /// Jump to `target`: the integer part is the character fading in, the fraction its alpha.
    /// In draw-at-once mode `target` is the global alpha.
    ///
    /// Cancels auto-forward. Out of range targets clamp; nothing happens without a message or
    /// once the reveal has finished.
    pub fn force_text_position(&mut self, target: f64) {
        self.auto_forward = None;
        if self.index.is_empty() || self.phase == RevealPhase::Finished {
            return;
        }
        self.cursor = self.seek(target);
    }

    /// Show the whole message.
    pub fn force_draw_all(&mut self) {
        self.force_text_position(self.text_length() as f64);
    }

    // ---- frame step ----------------------------------------------------------------------

    /// Advance every active loop by `dt` seconds.
    ///
    /// Provider errors abort the tick and are returned unchanged. A failed layout leaves the
    /// phase as it was so the next tick retries; events raised before a failed present are kept
    /// and lead the report of the next successful tick.
    pub fn tick(&mut self, dt: f64) -> RevealResult<TickReport> {
        let mut report = TickReport::default();
        if self.shut_down || !self.enabled {
            return Ok(report);
        }

        report.events = std::mem::take(&mut self.pending_events);
        match self.step(dt, &mut report) {
            Ok(()) => Ok(report),
            Err(err) => {
                self.pending_events = report.events;
                Err(err)
            }
        }
    }

    fn step(&mut self, dt: f64, report: &mut TickReport) -> RevealResult<()> {

        if self.watching
            && matches!(self.phase, RevealPhase::Revealing | RevealPhase::Finished)
            && self.snapshot.container_changed(&self.frame, self.style.wrap)
        {
            tracing::debug!(
                width = self.frame.width,
                height = self.frame.height,
                "container changed, re-measuring"
            );
            self.request_measure();
        }

        self.step_auto_forward(dt);

        if self.phase == RevealPhase::Measuring {
            self.measure()?;
        }
        if self.phase == RevealPhase::Revealing {
            self.draw_step(report);
        }

        if self.presented != self.composed.as_str() {
            self.provider.present(self.composed.as_str())?;
            self.presented.clear();
            self.presented.push_str(self.composed.as_str());
            report.presented = true;
        }
        Ok(())
    }

    fn step_auto_forward(&mut self, dt: f64) {
        let Some(af) = self.auto_forward.as_mut() else {
            return;
        };
        let time = af.advance(dt, self.settings.auto_forward_speed);
        let length = self.index.len();
        let (cursor, done) = if self.settings.draw_at_once {
            (RevealCursor::seek_all_at_once(time, length), time >= 1.0)
        } else {
            (RevealCursor::from_time(time, length), time >= length as f64)
        };
        self.cursor = cursor;
        if done {
            self.auto_forward = None;
        }
    }

    fn measure(&mut self) -> RevealResult<()> {
        let shaped = self
            .provider
            .shape(&self.display, &self.style, &self.frame)?;
        layout_annotations(
            &shaped,
            &mut self.spans,
            &mut self.slots,
            &mut self.provider,
            &self.style,
            &self.adjust,
        )?;
        self.slots.set_alpha(0.0);
        self.snapshot.record_container(&self.frame, self.style.wrap);
        self.snapshot.invalidate_message();
        self.composed = ComposedMarkup::empty();
        self.set_phase(RevealPhase::Revealing);
        Ok(())
    }

    fn draw_step(&mut self, report: &mut TickReport) {
        let cursor = self.cursor;
        match self.snapshot.classify(&self.display, cursor) {
            RedrawKind::Full => {
                self.composed = self.compose(cursor);
                self.update_slot_alphas(cursor);
                if self.last_revealed != Some(cursor.position) {
                    self.last_revealed = Some(cursor.position);
                    report.events.push(RevealEvent::CharacterRevealed {
                        position: cursor.position,
                    });
                }
            }
            RedrawKind::AlphaOnly => {
                self.composed.set_alpha(cursor.alpha);
                self.update_slot_alphas(cursor);
            }
            RedrawKind::Unchanged => {}
        }
        self.snapshot.record(&self.display, cursor);

        if cursor.is_complete(self.index.len()) {
            self.composed.strip_boundary_tags();
            self.slots.set_alpha(1.0);
            self.set_phase(RevealPhase::Finished);
            if !self.finish_emitted {
                self.finish_emitted = true;
                report.events.push(RevealEvent::Finished);
            }
        }
    }

    fn compose(&self, cursor: RevealCursor) -> ComposedMarkup {
        if self.settings.draw_at_once {
            return ComposedMarkup::all_at_once(&self.display, cursor.alpha);
        }
        let Some(boundary) = self.index.get(cursor.position) else {
            return ComposedMarkup::empty();
        };
        ComposedMarkup::partial(
            &self.display,
            boundary,
            cursor.alpha,
            self.visible_range(),
            self.newline_count,
        )
    }

    fn update_slot_alphas(&mut self, cursor: RevealCursor) {
        if self.settings.draw_at_once {
            self.slots.set_alpha(cursor.alpha);
        } else {
            self.slots.follow_cursor(cursor.position, cursor.alpha);
        }
    }

    fn visible_range(&self) -> VisibleRange {
        if self.settings.fixed_position {
            VisibleRange::FixedPosition
        } else {
            VisibleRange::Growing
        }
    }

    fn initial_cursor(&self) -> RevealCursor {
        if self.settings.draw_at_once {
            RevealCursor::seek_all_at_once(0.0, self.index.len())
        } else {
            RevealCursor::START
        }
    }

    fn seek(&self, target: f64) -> RevealCursor {
        if self.settings.draw_at_once {
            RevealCursor::seek_all_at_once(target, self.index.len())
        } else {
            RevealCursor::seek(target, self.index.len())
        }
    }

    fn request_measure(&mut self) {
        if matches!(self.phase, RevealPhase::Revealing | RevealPhase::Finished) {
            self.snapshot.invalidate_message();
            self.set_phase(RevealPhase::Measuring);
        }
    }

    fn set_phase(&mut self, phase: RevealPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "reveal phase");
            self.phase = phase;
        }
    }

    // ---- lifecycle -----------------------------------------------------------------------

    /// Suspend or resume every loop.
    ///
    /// While disabled, ticks do nothing and time does not accumulate. Re-enabling re-arms the
    /// container watch and re-lays out an active message, since the container may have changed
    /// while no one was watching.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.shut_down || self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.watching = true;
            self.request_measure();
        } else {
            self.watching = false;
        }
    }

    /// False while disabled or after shutdown.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.shut_down
    }

    /// Stop every loop for good.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.watching = false;
        self.auto_forward = None;
        if matches!(self.phase, RevealPhase::Measuring | RevealPhase::Revealing) {
            self.set_phase(RevealPhase::Idle);
        }
    }

    // ---- queries -------------------------------------------------------------------------

    /// Logical characters in the message (tags excluded, annotations collapsed to their base).
    pub fn text_length(&self) -> usize {
        self.index.len()
    }

    /// True while the message is being laid out or revealed.
    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, RevealPhase::Measuring | RevealPhase::Revealing)
    }

    /// True while drawing a spoken character (not punctuation or a bracket).
    pub fn is_speaking(&self) -> bool {
        self.is_drawing() && speech::is_speaking(&self.logical, self.cursor.position)
    }

    /// True while the reveal is inside a bracketed aside.
    pub fn is_bracket_open(&self) -> bool {
        speech::is_bracket_open(&self.logical, self.cursor.position)
    }

    /// True when the message opens with a bracket.
    pub fn starts_with_bracket(&self) -> bool {
        speech::starts_with_bracket(&self.logical)
    }

    /// Current reveal position.
    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Message with annotation syntax removed and markup tags intact.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// Annotated spans of the current message, placed by the last layout.
    pub fn spans(&self) -> &[AnnotationSpan] {
        &self.spans
    }

    /// Active annotation slots, in span order.
    pub fn slots(&self) -> &[AnnotationSlot] {
        self.slots.active()
    }

    /// Markup of the current frame.
    pub fn rendered_markup(&self) -> &str {
        self.composed.as_str()
    }

    /// Annotation parse failure of the current message, if any.
    pub fn last_parse_error(&self) -> Option<&RevealError> {
        self.parse_error.as_ref()
    }

    /// The geometry provider.
    pub fn provider(&self) -> &G {
        &self.provider
    }

    /// Mutable access to the geometry provider, e.g. to register fonts.
    pub fn provider_mut(&mut self) -> &mut G {
        &mut self.provider
    }

    /// Reveal behaviour settings.
    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Base text style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Container rectangle.
    pub fn frame(&self) -> &TextFrame {
        &self.frame
    }

    /// Per-font annotation offsets.
    pub fn font_adjustments(&self) -> &FontAdjustments {
        &self.adjust
    }

    // ---- container -----------------------------------------------------------------------

    /// Move the container. Position alone never re-lays the text out.
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.set_x(x);
        self.set_y(y);
    }

    /// Set the container's left edge.
    pub fn set_x(&mut self, x: f64) {
        self.frame.x = x;
    }

    /// Container left edge.
    pub fn x(&self) -> f64 {
        self.frame.x
    }

    /// Set the container's top edge.
    pub fn set_y(&mut self, y: f64) {
        self.frame.y = y;
    }

    /// Container top edge.
    pub fn y(&self) -> f64 {
        self.frame.y
    }

    /// Resize the container. The watch loop re-lays the text out on the next tick.
    pub fn set_wh(&mut self, width: f64, height: f64) {
        self.set_width(width);
        self.set_height(height);
    }

    /// Set the container width.
    pub fn set_width(&mut self, width: f64) {
        self.frame.width = width;
    }

    /// Container width.
    pub fn width(&self) -> f64 {
        self.frame.width
    }

    /// Set the container height.
    pub fn set_height(&mut self, height: f64) {
        self.frame.height = height;
    }

    /// Container height.
    pub fn height(&self) -> f64 {
        self.frame.height
    }

    // ---- style ---------------------------------------------------------------------------
    //
    // Style changes that move glyphs re-lay an active message out on the next tick.

    /// Select the base font by name.
    pub fn set_font(&mut self, font: impl Into<String>) {
        self.style.font = font.into();
        self.request_measure();
    }

    /// Set the base size. With auto sizing enabled this is the maximum size.
    pub fn set_font_size(&mut self, size: f32) {
        self.style.font_size = size;
        if let Some(auto) = self.style.auto_size.as_mut() {
            auto.max = size;
            auto.min = auto.min.min(size);
        }
        self.request_measure();
    }

    /// Extra size for the base text only; annotations ignore it.
    pub fn set_font_size_ex(&mut self, size: f32) {
        self.style.font_size_ex = size;
        self.request_measure();
    }

    /// Largest base size, the auto-size maximum when auto sizing is on.
    pub fn font_size_max(&self) -> f32 {
        self.style.font_size_max()
    }

    /// Extra base size.
    pub fn font_size_ex(&self) -> f32 {
        self.style.font_size_ex
    }

    /// Shrink the base text between `min` and `max` to fit the container height.
    pub fn set_font_auto_size(&mut self, min: f32, max: f32) {
        self.style.auto_size = Some(AutoSize { min, max });
        self.style.font_size = max;
        self.request_measure();
    }

    /// Turn auto sizing off.
    pub fn reset_font_auto_size(&mut self) {
        self.style.auto_size = None;
        self.request_measure();
    }

    /// Base text color. Annotation colors follow on the next layout.
    pub fn set_color(&mut self, color: Rgba8) {
        self.style.color = color;
        self.request_measure();
    }

    /// Horizontal alignment of every line.
    pub fn set_alignment(&mut self, alignment: TextAlign) {
        self.style.alignment = alignment;
        self.request_measure();
    }

    /// Extra space between characters, in pixels.
    pub fn set_character_spacing(&mut self, spacing: f32) {
        self.style.character_spacing = spacing;
        self.request_measure();
    }

    /// Extra distance between lines, in pixels.
    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.style.line_spacing = spacing;
        self.request_measure();
    }

    /// Change wrapping. The watch loop re-lays the text out on the next tick.
    pub fn set_wrap_mode(&mut self, wrap: WrapMode) {
        self.style.wrap = wrap;
    }

    /// Keep unrevealed characters laid out but transparent instead of growing the text.
    pub fn set_fixed_position(&mut self, fixed: bool) {
        self.settings.fixed_position = fixed;
        self.snapshot.invalidate_message();
    }

    /// Fade the whole message in together instead of character by character.
    pub fn set_draw_at_once(&mut self, at_once: bool) {
        self.settings.draw_at_once = at_once;
        self.snapshot.invalidate_message();
    }

    /// Seconds per character (or for the whole fade in draw-at-once mode).
    pub fn set_auto_forward_speed(&mut self, seconds: f64) -> RevealResult<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(RevealError::validation(
                "auto_forward_speed must be finite and >= 0",
            ));
        }
        self.settings.auto_forward_speed = seconds;
        Ok(())
    }

    /// Vertical annotation offset for `font`; applied on the next layout.
    pub fn set_annotation_adjust(&mut self, font: impl Into<String>, offset: f64) {
        self.adjust.set(font, offset);
        self.request_measure();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/controller.rs"]
mod tests;
