//! Game state module - owns the session and advances it one tick at a time
//!
//! This ties together the map, the player controller and the collectible
//! controller. Everything the session mutates lives here and is passed around
//! explicitly; there is no shared global state.

use crate::collectible::{update_collectible, Pickup};
use crate::entity::{Collectible, Player};
use crate::player::update_player;
use crate::tilemap::TileMap;
use crate::types::{HeldKeys, Physics};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The input source asked to close
    Quit,
    /// Escape/cancel key
    Escape,
    /// Player reached the exit after collecting the trophy
    ReachedExit,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Quit => "quit",
            TerminationReason::Escape => "escape",
            TerminationReason::ReachedExit => "reached_exit",
        }
    }
}

pub const TROPHY_MESSAGE: &str = "Go thru the door!";
pub const EXIT_MESSAGE: &str = "Good work!";

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    map: TileMap,
    physics: Physics,
    player: Player,
    /// Live collectibles only, in map order
    collectibles: Vec<Collectible>,
    score: u32,
    /// One-way latch, set by the trophy pickup
    exit_unlocked: bool,
    running: bool,
    termination: Option<TerminationReason>,
    focus: (i32, i32),
    tick_count: u64,
    last_pickup: Option<Pickup>,
    message: Option<&'static str>,
}

impl GameState {
    /// Start a session on `map` with default physics
    pub fn new(map: TileMap) -> Self {
        Self::with_physics(map, Physics::default())
    }

    pub fn with_physics(map: TileMap, physics: Physics) -> Self {
        let (x, y) = map.player_spawn();
        let player = Player::new(x, y);

        let mut collectibles = Vec::with_capacity(map.items().len());
        for trigger in map.items() {
            match Collectible::from_trigger(trigger) {
                Some(c) => collectibles.push(c),
                None => log::warn!("ignoring item trigger with unknown tag {:?}", trigger.tag),
            }
        }

        Self {
            map,
            physics,
            focus: player.focus(),
            player,
            collectibles,
            score: 0,
            exit_unlocked: false,
            running: true,
            termination: None,
            tick_count: 0,
            last_pickup: None,
            message: None,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct access to the player body, for scripted setups
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn focus(&self) -> (i32, i32) {
        self.focus
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Most recent pickup, if any
    pub fn last_pickup(&self) -> Option<Pickup> {
        self.last_pickup
    }

    /// Status line for the HUD
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Advance one tick of `dt` seconds: player first, then every collectible.
    ///
    /// Does nothing once the session has terminated.
    pub fn tick(&mut self, dt: f32, keys: HeldKeys) {
        if !self.running {
            return;
        }
        self.tick_count += 1;

        let step = update_player(
            &mut self.player,
            &self.physics,
            dt,
            keys,
            self.exit_unlocked,
            &self.map,
        );
        self.focus = step.focus;

        let player_bounds = self.player.bounds;
        let mut picked_any = false;
        for i in 0..self.collectibles.len() {
            if let Some(pickup) = update_collectible(&mut self.collectibles[i], &player_bounds) {
                picked_any = true;
                self.apply_pickup(pickup);
            }
        }
        if picked_any {
            self.collectibles.retain(|c| c.alive);
        }

        if step.reached_exit {
            self.message = Some(EXIT_MESSAGE);
            self.terminate(TerminationReason::ReachedExit);
        }
    }

    fn apply_pickup(&mut self, pickup: Pickup) {
        self.score += pickup.score;
        self.last_pickup = Some(pickup);
        log::info!(
            "picked up {} (+{}), score {}",
            pickup.kind.as_str(),
            pickup.score,
            self.score
        );
        if pickup.unlocks_exit && !self.exit_unlocked {
            self.exit_unlocked = true;
            self.message = Some(TROPHY_MESSAGE);
            log::info!("exit unlocked");
        }
    }

    /// End the session. Only the first call has any effect.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if !self.running {
            return;
        }
        self.running = false;
        self.termination = Some(reason);
        log::info!(
            "session ended ({}) after {} ticks, score {}",
            reason.as_str(),
            self.tick_count,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CollectibleKind;

    const DT: f32 = 1.0 / 30.0;

    fn state(src: &str) -> GameState {
        GameState::new(TileMap::parse(src).unwrap())
    }

    #[test]
    fn new_session_spawns_player_and_items() {
        let gs = state("PD.\nROT\n###");
        assert_eq!(gs.player().bounds.x, 0);
        let kinds: Vec<CollectibleKind> = gs.collectibles().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CollectibleKind::Diamond,
                CollectibleKind::Ruby,
                CollectibleKind::Pearl,
                CollectibleKind::Trophy
            ]
        );
        assert!(gs.running());
        assert_eq!(gs.score(), 0);
        assert!(!gs.exit_unlocked());
        assert_eq!(gs.focus(), (0, 0));
    }

    #[test]
    fn terminate_is_latched_to_first_reason() {
        let mut gs = state("P\n#");
        gs.terminate(TerminationReason::Escape);
        gs.terminate(TerminationReason::Quit);
        assert!(!gs.running());
        assert_eq!(gs.termination(), Some(TerminationReason::Escape));
    }

    #[test]
    fn tick_after_termination_is_a_no_op() {
        let mut gs = state("P\n.\n#");
        gs.terminate(TerminationReason::Quit);
        let before = gs.player().bounds;
        gs.tick(DT, HeldKeys::NONE);
        assert_eq!(gs.player().bounds, before);
        assert_eq!(gs.tick_count(), 0);
    }

    #[test]
    fn trophy_sets_message() {
        let mut gs = state("PT\n##");
        gs.player_mut().bounds.x = 20;
        gs.tick(DT, HeldKeys::NONE);
        assert!(gs.exit_unlocked());
        assert_eq!(gs.message(), Some(TROPHY_MESSAGE));
        assert_eq!(gs.last_pickup().map(|p| p.kind), Some(CollectibleKind::Trophy));
        assert!(gs.collectibles().is_empty());
    }
}
