/// Colors, text style and container value types.
pub mod core;
/// Error type and result alias.
pub mod error;
