//! # ruby-reveal guide
//!
//! A walkthrough of the reveal model and the public API. For the data types themselves, follow the
//! links into the crate root.
//!
//! ---
//!
//! ## Message syntax
//!
//! A message is plain text with two kinds of inline syntax:
//!
//! - `{base:annotation}` marks `base` as annotated with `annotation`. Both parts must be non-empty
//!   and the token must not nest. `{漢字:かんじ}を読む` shows `漢字を読む` with `かんじ` above the
//!   first two characters.
//! - `<...>` markup tags pass through untouched. The bundled providers understand
//!   `<color=...>`/`</color>` and `<alpha=#HH>`; other tags are ignored by them and left for the
//!   host renderer.
//!
//! A malformed token stops annotation parsing: earlier spans are kept, the rest of the message is
//! shown as written and the error is logged once and kept in
//! [`RevealController::last_parse_error`](crate::RevealController::last_parse_error).
//!
//! ---
//!
//! ## Logical characters
//!
//! Every position in the reveal API counts *logical characters*: characters of the display text
//! outside tags, with each annotation collapsed to its base.
//! [`RevealController::text_length`](crate::RevealController::text_length) is that count, and
//! [`PositionIndexTable`](crate::PositionIndexTable) maps each of them back to a byte offset of the
//! display text.
//!
//! ---
//!
//! ## Driving a reveal
//!
//! ```
//! use ruby_reveal::{MonospaceGeometry, RevealController, RevealEvent};
//!
//! let mut text = RevealController::new(MonospaceGeometry::new());
//! text.set_text("{数:かず}です");
//! text.start_auto_forward();
//!
//! let mut finished = false;
//! for _ in 0..100 {
//!     let report = text.tick(1.0 / 60.0).unwrap();
//!     finished |= report.events.contains(&RevealEvent::Finished);
//! }
//! assert!(finished);
//! assert_eq!(text.rendered_markup(), "数です");
//! ```
//!
//! The cursor is a pair `(position, alpha)`: characters before `position` are fully shown, the
//! character at `position` fades in with `alpha`, and everything after is hidden.
//! [`force_text_position`](crate::RevealController::force_text_position) jumps anywhere (the
//! fraction becomes the alpha) and
//! [`force_draw_all`](crate::RevealController::force_draw_all) completes the reveal.
//!
//! Two reveal modes exist:
//!
//! - character by character (default), either keeping unrevealed characters in place but
//!   transparent (`fixed_position`) or cutting the text after the cursor and padding it with blank
//!   lines so its height never changes;
//! - all at once (`draw_at_once`): the whole message fades as one and the cursor alpha is the
//!   global alpha.
//!
//! ---
//!
//! ## Frames and redraws
//!
//! A new message spends its first tick in [`RevealPhase::Measuring`](crate::RevealPhase): the
//! provider shapes the fully revealed text and annotation slots are placed. Later ticks compare the
//! cursor with a [`RenderSnapshot`](crate::RenderSnapshot) of the last frame:
//!
//! - a different message or position recomposes the visible markup;
//! - a different alpha only rewrites the two hex digits of each cursor alpha tag;
//! - nothing changed, nothing is presented.
//!
//! Resizing the container or switching wrap mode re-measures on the next tick without moving the
//! cursor.
//!
//! ---
//!
//! ## Annotation slots
//!
//! Each span gets an [`AnnotationSlot`](crate::AnnotationSlot): anchored at the bottom center above
//! its base, sized from the provider's natural annotation size and the base width, colored like the
//! last base character. Slots stay transparent until the cursor reaches the last base character,
//! fade with it, and stay opaque afterwards. Per-font vertical offsets live in
//! [`FontAdjustments`](crate::FontAdjustments).
//!
//! ---
//!
//! ## Providers
//!
//! [`GeometryProvider`](crate::GeometryProvider) is the only seam to the host text engine.
//! Two implementations ship with the crate:
//!
//! - [`MonospaceGeometry`](crate::MonospaceGeometry): fixed advance, deterministic, records
//!   everything presented. Good for terminals and tests.
//! - [`ParleyGeometry`](crate::ParleyGeometry): real shaping and line breaking through Parley from
//!   registered font bytes.
