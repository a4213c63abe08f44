//! Entities: the player body and collectible items.

use crate::tilemap::ItemTrigger;
use crate::types::{
    CollectibleKind, Facing, PlayerPose, Rect, ITEM_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH,
};

/// The player character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub bounds: Rect,
    /// Pixels per second, positive is downwards
    pub vertical_velocity: f32,
    /// Supported by a blocker top this tick
    pub resting: bool,
    pub walking: bool,
    /// Walk cycle is playing
    pub animating: bool,
    pub facing: Facing,
    pub pose: PlayerPose,
}

impl Player {
    /// Create a player with its top-left corner at `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            bounds: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vertical_velocity: 0.0,
            resting: false,
            walking: false,
            animating: false,
            facing: Facing::Left,
            pose: PlayerPose::Front,
        }
    }

    /// Camera focus point for the current position
    pub fn focus(&self) -> (i32, i32) {
        (self.bounds.x, self.bounds.y)
    }
}

/// A pickup-able item. All variants share this type; behaviour differs only by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub bounds: Rect,
    pub alive: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            bounds: Rect::new(x, y, ITEM_SIZE, ITEM_SIZE),
            alive: true,
        }
    }

    /// Instantiate the variant named by a map trigger tag.
    pub fn from_trigger(trigger: &ItemTrigger) -> Option<Self> {
        CollectibleKind::from_tag(trigger.tag).map(|kind| Self::new(kind, trigger.x, trigger.y))
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }
}
