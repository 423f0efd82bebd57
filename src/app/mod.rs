// Presentation layer: turns store state and breakdowns into terminal output.

#[cfg(feature = "cli")]
pub mod commands;
pub mod render;
