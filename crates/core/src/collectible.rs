//! Collectible controller - pickup detection for items.

use crate::entity::Collectible;
use crate::types::{CollectibleKind, Rect};

/// A collectible the player just picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: CollectibleKind,
    pub score: u32,
    pub unlocks_exit: bool,
}

/// Test a live collectible against the player's bounds.
///
/// On any overlap the collectible dies and the pickup is returned. A dead
/// collectible never yields a second pickup.
pub fn update_collectible(collectible: &mut Collectible, player: &Rect) -> Option<Pickup> {
    if !collectible.alive || !collectible.bounds.intersects(player) {
        return None;
    }
    collectible.alive = false;
    Some(Pickup {
        kind: collectible.kind,
        score: collectible.score(),
        unlocks_exit: collectible.kind.unlocks_exit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_picks_up_once() {
        let mut d = Collectible::new(CollectibleKind::Diamond, 32, 0);
        let player = Rect::new(40, 8, 24, 32);

        let pickup = update_collectible(&mut d, &player).unwrap();
        assert_eq!(pickup.kind, CollectibleKind::Diamond);
        assert_eq!(pickup.score, 100);
        assert!(!pickup.unlocks_exit);
        assert!(!d.alive);

        assert_eq!(update_collectible(&mut d, &player), None);
    }

    #[test]
    fn touching_edges_is_not_a_pickup() {
        let mut p = Collectible::new(CollectibleKind::Pearl, 32, 0);
        let player = Rect::new(8, 0, 24, 32);
        assert_eq!(update_collectible(&mut p, &player), None);
        assert!(p.alive);
    }

    #[test]
    fn trophy_unlocks_exit() {
        let mut t = Collectible::new(CollectibleKind::Trophy, 0, 0);
        let pickup = update_collectible(&mut t, &Rect::new(31, 31, 24, 32)).unwrap();
        assert_eq!(pickup.score, 1000);
        assert!(pickup.unlocks_exit);
    }
}
