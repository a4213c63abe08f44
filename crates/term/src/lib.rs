//! Terminal renderer for the platformer.
//!
//! A small, game-oriented rendering layer: no widgets or layout engine, just a
//! framebuffer of styled cells that is diffed and flushed through crossterm.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: camera, tiles, entities and HUD (pure, unit-tested)
//! - [`renderer`]: terminal setup/teardown and diff flushing
//! - [`sink`]: the game loop's `FrameSink` for the terminal

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sink;

pub use tui_platformer_core as core;
pub use tui_platformer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{camera_origin, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::TerminalSink;
