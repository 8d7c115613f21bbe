//! Swap the ball a party member was caught in for one from the bag. The
//! picked-from menu flow lives host-side; this is the swap itself, with the
//! old ball returned to the bag.

use field_traits::{FieldTraits, ItemId, PARTY_SIZE, Pocket};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    #[error("no mon in that party slot")]
    EmptySlot,
    #[error("that ball is not in the bag")]
    BallUnavailable,
}

/// Whether the swap menu should be offered at all
pub fn player_has_balls(game: &impl FieldTraits) -> bool {
    game.bag_pocket_nonempty(Pocket::Balls)
}

/// Put the mon in `slot` into `new_ball`, returning the old ball to the bag
/// and to the caller. The party and bag are untouched unless the whole swap
/// can go through.
pub fn swap_mon_ball(
    game: &mut impl FieldTraits,
    slot: usize,
    new_ball: ItemId,
) -> Result<ItemId, SwapError> {
    if slot >= PARTY_SIZE || game.party_species(slot).is_none() {
        return Err(SwapError::EmptySlot);
    }
    let old_ball = game.mon_ball(slot).ok_or(SwapError::EmptySlot)?;

    if !game.remove_bag_item(new_ball, 1) {
        return Err(SwapError::BallUnavailable);
    }
    game.set_mon_ball(slot, new_ball);
    game.add_bag_item(old_ball, 1);

    debug!("BallSwap: slot {slot} {old_ball} -> {new_ball}");
    Ok(old_ball)
}

#[cfg(test)]
mod tests {
    use crate::{SwapError, player_has_balls, swap_mon_ball};
    use field_traits::{
        DpadDir, FieldTraits, ItemId, OverlayHandle, OverlayLayout, OverlayPayload, Pocket,
        SfxName, SpeciesId, SpriteHandle,
    };
    use std::collections::HashMap;

    const POKE_BALL: ItemId = 4;
    const GREAT_BALL: ItemId = 3;
    const NET_BALL: ItemId = 6;

    struct TestHost {
        party: Vec<(SpeciesId, ItemId)>,
        bag: HashMap<ItemId, u32>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                party: vec![(25, POKE_BALL), (252, GREAT_BALL)],
                bag: HashMap::from([(NET_BALL, 2)]),
            }
        }

        fn count(&self, item: ItemId) -> u32 {
            self.bag.get(&item).copied().unwrap_or(0)
        }
    }

    impl FieldTraits for TestHost {
        fn overlay_idle(&self) -> bool {
            true
        }

        fn allocate_overlay(&mut self, _layout: &OverlayLayout) -> OverlayHandle {
            OverlayHandle(0)
        }

        fn release_overlay(&mut self, _handle: OverlayHandle) {}

        fn render_payload(&mut self, _handle: OverlayHandle, _payload: &OverlayPayload) {}

        fn set_overlay_offset(&mut self, _handle: OverlayHandle, _offset: i32) {}

        fn allocate_dpad_icon(&mut self, _dir: DpadDir, _stack: u8) -> SpriteHandle {
            SpriteHandle(0)
        }

        fn release_dpad_icon(&mut self, _handle: SpriteHandle) {}

        fn start_sound(&mut self, _sfx: SfxName) {}

        fn random(&mut self) -> u16 {
            0
        }

        fn party_species(&self, slot: usize) -> Option<SpeciesId> {
            self.party.get(slot).map(|m| m.0)
        }

        fn mon_ball(&self, slot: usize) -> Option<ItemId> {
            self.party.get(slot).map(|m| m.1)
        }

        fn set_mon_ball(&mut self, slot: usize, ball: ItemId) {
            self.party[slot].1 = ball;
        }

        fn bag_pocket_nonempty(&self, pocket: Pocket) -> bool {
            pocket == Pocket::Balls && !self.bag.is_empty()
        }

        fn remove_bag_item(&mut self, item: ItemId, count: u32) -> bool {
            match self.bag.get_mut(&item) {
                Some(held) if *held >= count => {
                    *held -= count;
                    if *held == 0 {
                        self.bag.remove(&item);
                    }
                    true
                }
                _ => false,
            }
        }

        fn add_bag_item(&mut self, item: ItemId, count: u32) {
            *self.bag.entry(item).or_insert(0) += count;
        }
    }

    #[test]
    fn swap_returns_old_ball_to_bag() {
        let mut host = TestHost::new();

        let old = swap_mon_ball(&mut host, 0, NET_BALL).unwrap();

        assert_eq!(old, POKE_BALL);
        assert_eq!(host.party[0].1, NET_BALL);
        assert_eq!(host.count(NET_BALL), 1);
        assert_eq!(host.count(POKE_BALL), 1);
    }

    #[test]
    fn empty_slot_is_rejected() {
        let mut host = TestHost::new();
        assert_eq!(
            swap_mon_ball(&mut host, 2, NET_BALL),
            Err(SwapError::EmptySlot)
        );
        assert_eq!(
            swap_mon_ball(&mut host, 9, NET_BALL),
            Err(SwapError::EmptySlot)
        );
    }

    #[test]
    fn missing_ball_leaves_everything_untouched() {
        let mut host = TestHost::new();

        let res = swap_mon_ball(&mut host, 1, POKE_BALL);

        assert_eq!(res, Err(SwapError::BallUnavailable));
        assert_eq!(host.party[1].1, GREAT_BALL);
        assert_eq!(host.count(NET_BALL), 2);
    }

    #[test]
    fn swapping_the_same_ball_kind_round_trips() {
        let mut host = TestHost::new();
        host.bag.insert(POKE_BALL, 1);

        let old = swap_mon_ball(&mut host, 0, POKE_BALL).unwrap();

        assert_eq!(old, POKE_BALL);
        assert_eq!(host.party[0].1, POKE_BALL);
        assert_eq!(host.count(POKE_BALL), 1);
    }

    #[test]
    fn has_balls_checks_the_balls_pocket() {
        let mut host = TestHost::new();
        assert!(player_has_balls(&host));
        host.bag.clear();
        assert!(!player_has_balls(&host));
    }
}
