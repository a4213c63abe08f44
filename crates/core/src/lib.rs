//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds the platformer rules: map geometry, the player and collectible
//! controllers, the session state and the game loop. It has **no dependencies** on
//! terminal I/O, making it:
//!
//! - **Deterministic**: the same map, inputs and step sizes give identical sessions
//! - **Testable**: scripted input and a fixed clock drive the real loop
//! - **Portable**: the same core runs in the terminal and in the headless replay tool
//!
//! # Module Structure
//!
//! - [`tilemap`]: text map parsing, coalesced blocker/exit rectangles, collision queries
//! - [`entity`]: the player body and collectible items
//! - [`player`]: input, gravity and axis-sensitive collision resolution
//! - [`collectible`]: pickup detection
//! - [`game_state`]: session state and the per-tick update
//! - [`game_loop`]: clock/input/render seams and the loop itself
//! - [`snapshot`]: render-facing copy of the state
//!
//! # Example
//!
//! ```
//! use tui_platformer_core::{GameState, TileMap};
//! use tui_platformer_core::types::HeldKeys;
//!
//! let map = TileMap::parse("P.D\n###").unwrap();
//! let mut game = GameState::new(map);
//!
//! let right = HeldKeys { right: true, ..HeldKeys::NONE };
//! for _ in 0..30 {
//!     game.tick(1.0 / 30.0, right);
//! }
//! assert_eq!(game.score(), 100);
//! ```
//!
//! # Timing
//!
//! Every tick adds one gravity step (40 px/s) regardless of its length; positions
//! integrate with the tick's `dt` in seconds. The loop targets 30 ticks per second.

pub mod collectible;
pub mod entity;
pub mod game_loop;
pub mod game_state;
pub mod player;
pub mod snapshot;
pub mod tilemap;

pub use tui_platformer_types as types;

pub use collectible::{update_collectible, Pickup};
pub use entity::{Collectible, Player};
pub use game_loop::{Clock, FixedClock, FrameClock, FrameSink, GameLoop, NullSink, ScriptedInput};
pub use game_state::{GameState, TerminationReason};
pub use player::{resolve_cell, update_player, Contact, PlayerStep};
pub use snapshot::{CollectibleSnapshot, GameSnapshot, PlayerSnapshot};
pub use tilemap::{CollisionQuery, Hits, ItemTrigger, MapError, Tile, TileMap};
