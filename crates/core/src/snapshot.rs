use crate::game_state::GameState;
use crate::types::{CollectibleKind, Facing, PlayerPose, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub bounds: Rect,
    pub pose: PlayerPose,
    pub facing: Facing,
    pub resting: bool,
    pub walking: bool,
    pub vertical_velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectibleSnapshot {
    pub kind: CollectibleKind,
    pub bounds: Rect,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub player: PlayerSnapshot,
    pub collectibles: Vec<CollectibleSnapshot>,
    pub score: u32,
    pub exit_unlocked: bool,
    pub running: bool,
    pub focus: (i32, i32),
    pub tick: u64,
    pub message: Option<&'static str>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            player: PlayerSnapshot {
                bounds: Rect::default(),
                pose: PlayerPose::Front,
                facing: Facing::Left,
                resting: false,
                walking: false,
                vertical_velocity: 0.0,
            },
            collectibles: Vec::new(),
            score: 0,
            exit_unlocked: false,
            running: true,
            focus: (0, 0),
            tick: 0,
            message: None,
        }
    }
}

impl GameState {
    /// Fill `snap` from the current state, reusing its collectible buffer.
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        let p = self.player();
        snap.player = PlayerSnapshot {
            bounds: p.bounds,
            pose: p.pose,
            facing: p.facing,
            resting: p.resting,
            walking: p.walking,
            vertical_velocity: p.vertical_velocity,
        };
        snap.collectibles.clear();
        snap.collectibles.extend(
            self.collectibles()
                .iter()
                .filter(|c| c.alive)
                .map(|c| CollectibleSnapshot {
                    kind: c.kind,
                    bounds: c.bounds,
                }),
        );
        snap.score = self.score();
        snap.exit_unlocked = self.exit_unlocked();
        snap.running = self.running();
        snap.focus = self.focus();
        snap.tick = self.tick_count();
        snap.message = self.message();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
