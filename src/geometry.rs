/// Fixed-advance provider for headless hosts and tests.
pub mod monospace;
/// Provider backed by Parley shaping.
pub mod parley_engine;
/// The provider trait and shaping results.
pub mod provider;
