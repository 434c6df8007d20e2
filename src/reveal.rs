/// The reveal controller.
pub mod controller;
/// Reveal position and the auto-forward timer.
pub mod cursor;
/// Redraw classification.
pub mod snapshot;
/// Speaking and bracket queries.
pub mod speech;
