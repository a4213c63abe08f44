//! Player controller - input, gravity and tile collision for the player body.
//!
//! One call to [`update_player`] advances the player by one tick:
//!
//! 1. Apply held left/right keys (both may apply in the same tick)
//! 2. Start a jump if resting and the jump key is held
//! 3. Add one gravity step, capped at terminal velocity
//! 4. Integrate vertical position
//! 5. Resolve blocker overlaps cell by cell (see [`Contact`])
//! 6. Check the exit trigger and report the camera focus point
//!
//! Resolution runs once per overlapping cell, with no re-settling pass. A body moving
//! further than a cell in one tick can pass through thin geometry.

use arrayvec::ArrayVec;

use crate::entity::Player;
use crate::tilemap::CollisionQuery;
use crate::types::{Facing, HeldKeys, ObstacleClass, Physics, PlayerPose, Rect};

/// Which side of a cell the body crossed between the previous and the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Moved right into the cell's left face
    Right,
    /// Moved left into the cell's right face
    Left,
    /// Came down onto the cell's top
    Floor,
    /// Went up into the cell's bottom
    Ceiling,
}

impl Contact {
    /// Evaluation order; later checks see the rectangle already clamped by earlier ones.
    pub const ORDER: [Contact; 4] = [Contact::Right, Contact::Left, Contact::Floor, Contact::Ceiling];

    /// True when the edge facing this side went from outside the cell to inside it.
    pub fn crossed(self, last: &Rect, new: &Rect, cell: &Rect) -> bool {
        match self {
            Contact::Right => last.right() <= cell.left() && new.right() > cell.left(),
            Contact::Left => last.left() >= cell.right() && new.left() < cell.right(),
            Contact::Floor => last.bottom() <= cell.top() && new.bottom() > cell.top(),
            Contact::Ceiling => last.top() >= cell.bottom() && new.top() < cell.bottom(),
        }
    }

    /// Push `new` back out to the crossed face.
    pub fn clamp(self, new: &mut Rect, cell: &Rect) {
        match self {
            Contact::Right => new.set_right(cell.left()),
            Contact::Left => new.set_left(cell.right()),
            Contact::Floor => new.set_bottom(cell.top()),
            Contact::Ceiling => new.set_top(cell.bottom()),
        }
    }
}

/// Resolve one cell against the moved rectangle, returning the contacts applied.
pub fn resolve_cell(last: &Rect, new: &mut Rect, cell: &Rect) -> ArrayVec<Contact, 4> {
    let mut contacts = ArrayVec::new();
    for contact in Contact::ORDER {
        if contact.crossed(last, new, cell) {
            contact.clamp(new, cell);
            contacts.push(contact);
        }
    }
    contacts
}

/// Result of one player tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStep {
    /// Camera focus point (top-left of the new bounds)
    pub focus: (i32, i32),
    /// Overlapping an exit while the exit is unlocked
    pub reached_exit: bool,
}

/// Advance the player by one tick of `dt` seconds.
pub fn update_player<Q: CollisionQuery + ?Sized>(
    player: &mut Player,
    physics: &Physics,
    dt: f32,
    keys: HeldKeys,
    exit_unlocked: bool,
    query: &Q,
) -> PlayerStep {
    let last = player.bounds;

    if keys.left {
        walk(player, Facing::Left);
        player.bounds.shift_x(-physics.walk_speed * dt);
    }
    if keys.right {
        walk(player, Facing::Right);
        player.bounds.shift_x(physics.walk_speed * dt);
    }

    if player.resting && keys.jump {
        player.walking = false;
        player.animating = false;
        player.pose = PlayerPose::Jump;
        player.vertical_velocity = physics.jump_velocity;
    }
    player.vertical_velocity =
        (player.vertical_velocity + physics.gravity_step).min(physics.terminal_velocity);

    player.bounds.shift_y(player.vertical_velocity * dt);

    // Dropping more than the threshold means we left the ground (e.g. walked off a ledge).
    if player.bounds.y > last.y + physics.fall_threshold {
        player.animating = false;
        player.walking = false;
    }

    player.resting = false;
    let hits = query.collide(&player.bounds, ObstacleClass::Blockers);
    for cell in &hits {
        for contact in resolve_cell(&last, &mut player.bounds, cell) {
            match contact {
                Contact::Right | Contact::Left => player.animating = false,
                Contact::Floor => {
                    player.resting = true;
                    if !player.walking {
                        player.pose = PlayerPose::Front;
                    }
                    player.vertical_velocity = 0.0;
                }
                Contact::Ceiling => player.vertical_velocity = 0.0,
            }
        }
    }

    let reached_exit =
        exit_unlocked && !query.collide(&player.bounds, ObstacleClass::Exit).is_empty();

    PlayerStep {
        focus: player.focus(),
        reached_exit,
    }
}

fn walk(player: &mut Player, facing: Facing) {
    if player.resting {
        player.walking = true;
    }
    player.facing = facing;
    if player.walking {
        player.animating = true;
        player.pose = PlayerPose::Walk;
    } else {
        player.pose = PlayerPose::Jump;
    }
}
