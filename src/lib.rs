//! TUI Platformer (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_platformer::{core,input,term,types}` and
//! holds the runtime configuration shared by the binaries.

pub mod config;

pub use tui_platformer_core as core;
pub use tui_platformer_input as input;
pub use tui_platformer_term as term;
pub use tui_platformer_types as types;

pub use config::{GameConfig, BUNDLED_LEVEL};
