/// `{base:annotation}` parsing.
pub mod extract;
/// Slot placement over shaped text.
pub mod layout;
/// Annotation boxes and their pool.
pub mod slot;
