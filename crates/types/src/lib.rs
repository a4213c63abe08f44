//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, headless replay).
//!
//! # World Units
//!
//! The world is measured in whole pixels. A map tile is `TILE_SIZE` pixels square
//! and `y` grows downwards, so "falling" means `y` increases.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 30 | Frame rate the loop aims for |
//! | `FRAME_MS` | 33 | Frame budget in milliseconds |
//!
//! # Physics Defaults
//!
//! | Field | Value | Unit |
//! |-------|-------|------|
//! | `walk_speed` | 100 | px/s |
//! | `jump_velocity` | -500 | px/s (negative is up) |
//! | `gravity_step` | 40 | px/s added every tick |
//! | `terminal_velocity` | 400 | px/s |
//! | `fall_threshold` | 1 | px per tick before a drop counts as falling |
//!
//! # Examples
//!
//! ```
//! use tui_platformer_types::{CollectibleKind, Rect};
//!
//! let kind = CollectibleKind::from_tag("trophy").unwrap();
//! assert_eq!(kind.score(), 1000);
//! assert!(kind.unlocks_exit());
//!
//! let a = Rect::new(0, 0, 32, 32);
//! let b = Rect::new(32, 0, 32, 32);
//! assert!(!a.intersects(&b)); // touching edges do not overlap
//! ```

/// Side length of a map tile in pixels
pub const TILE_SIZE: i32 = 32;

/// Frame rate the game loop aims for
pub const TARGET_FPS: u32 = 30;

/// Frame budget in milliseconds at `TARGET_FPS`
pub const FRAME_MS: u32 = 1000 / TARGET_FPS;

/// Player body size in pixels
pub const PLAYER_WIDTH: i32 = 24;
pub const PLAYER_HEIGHT: i32 = 32;

/// Collectibles occupy a whole tile
pub const ITEM_SIZE: i32 = TILE_SIZE;

/// Axis-aligned rectangle in whole world pixels.
///
/// Edge setters move the rectangle and keep its size, so `set_right(10)`
/// places the right edge at 10 by changing `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// True when the intersection has positive area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Move horizontally by a fractional amount, truncating the result toward zero.
    pub fn shift_x(&mut self, delta: f32) {
        self.x = (self.x as f32 + delta) as i32;
    }

    /// Move vertically by a fractional amount, truncating the result toward zero.
    pub fn shift_y(&mut self, delta: f32) {
        self.y = (self.y as f32 + delta) as i32;
    }
}

/// Direction the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Which image the renderer should show for the player.
///
/// - **Front**: standing still, facing the camera
/// - **Walk**: walk cycle in the facing direction
/// - **Jump**: airborne sprite in the facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerPose {
    #[default]
    Front,
    Walk,
    Jump,
}

/// The collectible item variants
///
/// Each variant differs only in its score and whether picking it up unlocks the exit:
/// - **Diamond**: 100
/// - **Ruby**: 150
/// - **Pearl**: 50
/// - **Trophy**: 1000, unlocks the exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    Diamond,
    Ruby,
    Pearl,
    Trophy,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 4] = [
        CollectibleKind::Diamond,
        CollectibleKind::Ruby,
        CollectibleKind::Pearl,
        CollectibleKind::Trophy,
    ];

    /// Resolve an item trigger tag.
    ///
    /// The tag matches a kind when it contains the kind's name, checked in the
    /// order diamond, ruby, pearl, trophy. Matching is case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_platformer_types::CollectibleKind;
    ///
    /// assert_eq!(CollectibleKind::from_tag("ruby"), Some(CollectibleKind::Ruby));
    /// assert_eq!(CollectibleKind::from_tag("big_pearl"), Some(CollectibleKind::Pearl));
    /// assert_eq!(CollectibleKind::from_tag("coin"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| tag.contains(kind.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Diamond => "diamond",
            CollectibleKind::Ruby => "ruby",
            CollectibleKind::Pearl => "pearl",
            CollectibleKind::Trophy => "trophy",
        }
    }

    /// Points awarded on pickup
    pub fn score(&self) -> u32 {
        match self {
            CollectibleKind::Diamond => 100,
            CollectibleKind::Ruby => 150,
            CollectibleKind::Pearl => 50,
            CollectibleKind::Trophy => 1000,
        }
    }

    pub fn unlocks_exit(&self) -> bool {
        matches!(self, CollectibleKind::Trophy)
    }
}

/// Obstacle classes a collision query can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleClass {
    /// Solid cells the player cannot pass through
    Blockers,
    /// Cells that end the session once the exit is unlocked
    Exit,
}

/// Keys currently held down.
///
/// Left and right are independent: both can be held in the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys {
        left: false,
        right: false,
        jump: false,
    };
}

/// Everything the game loop needs from one input poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub held: HeldKeys,
    /// The window/terminal asked to close
    pub quit: bool,
    /// The escape/cancel key was pressed
    pub escape: bool,
}

impl InputFrame {
    pub fn held(held: HeldKeys) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }
}

/// Source of per-frame input for the game loop.
pub trait InputSource {
    /// Drain pending events and report the current key state.
    fn poll(&mut self) -> InputFrame;
}

/// Tunable player physics.
///
/// Velocities are in pixels per second; `gravity_step` is added once per tick
/// regardless of the tick's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub walk_speed: f32,
    pub jump_velocity: f32,
    pub gravity_step: f32,
    pub terminal_velocity: f32,
    /// Vertical drop per tick (px) above which the player counts as falling
    pub fall_threshold: i32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            walk_speed: 100.0,
            jump_velocity: -500.0,
            gravity_step: 40.0,
            terminal_velocity: 400.0,
            fall_threshold: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_defaults() {
        let p = Physics::default();
        assert_eq!(p.walk_speed, 100.0);
        assert_eq!(p.jump_velocity, -500.0);
        assert_eq!(p.gravity_step, 40.0);
        assert_eq!(p.terminal_velocity, 400.0);
        assert_eq!(p.fall_threshold, 1);
        assert_eq!(FRAME_MS, 33);
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::new(10, 20, 24, 32);
        r.set_right(64);
        assert_eq!((r.x, r.right(), r.w), (40, 64, 24));
        r.set_bottom(96);
        assert_eq!((r.y, r.bottom(), r.h), (64, 96, 32));
        r.set_left(5);
        r.set_top(6);
        assert_eq!(r, Rect::new(5, 6, 24, 32));
    }

    #[test]
    fn intersects_requires_positive_area() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(!a.intersects(&Rect::new(-10, 0, 10, 10)));
    }

    #[test]
    fn shift_truncates_toward_zero() {
        let mut r = Rect::new(100, 100, 1, 1);
        r.shift_x(-3.3);
        assert_eq!(r.x, 96);
        r.shift_x(3.3);
        assert_eq!(r.x, 99);
        r.shift_y(1.33);
        assert_eq!(r.y, 101);
    }

    #[test]
    fn collectible_table() {
        let scores: Vec<u32> = CollectibleKind::ALL.iter().map(|k| k.score()).collect();
        assert_eq!(scores, vec![100, 150, 50, 1000]);
        assert_eq!(
            CollectibleKind::ALL
                .iter()
                .filter(|k| k.unlocks_exit())
                .count(),
            1
        );
        assert_eq!(CollectibleKind::from_tag("gold_trophy"), Some(CollectibleKind::Trophy));
    }

    #[test]
    fn tag_lookup_is_case_sensitive() {
        assert_eq!(CollectibleKind::from_tag("TROPHY"), None);
        assert_eq!(CollectibleKind::from_tag("Diamond"), None);
        // First match in table order wins.
        assert_eq!(
            CollectibleKind::from_tag("ruby_diamond"),
            Some(CollectibleKind::Diamond)
        );
    }
}
