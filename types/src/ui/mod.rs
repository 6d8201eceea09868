//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod options;

pub use animation::{EffectTimer, normalized_progress};
pub use options::{ThemeMode, UiOptions};
