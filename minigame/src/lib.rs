//! A reflex minigame run during a catch attempt: a short sequence of D-pad
//! directions is shown below the opponent's HP bar and the player has a
//! moment to repeat it. Each correct press stacks the next icon on top,
//! completing the sequence raises the catch bonus, any wrong press or
//! running out of time forfeits it.

use field_traits::{DpadDir, FieldTraits, SfxName, SpriteHandle, SubsystemTrait};
use log::debug;

/// Directions the player has to repeat per attempt
pub const MAX_SEQUENCE: usize = 3;

/// Ticks allowed for the whole sequence before the catch animation proceeds
pub const MINIGAME_FRAMES: i32 = 90;

pub struct CatchMinigame {
    sequence: [DpadDir; MAX_SEQUENCE],
    sprites: [Option<SpriteHandle>; MAX_SEQUENCE],
    /// Next direction the player has to press
    index: usize,
    /// Correct presses this attempt, survives the icons being hidden
    correct: usize,
    frames_left: i32,
    icons_visible: bool,
    /// One attempt per catch, cleared by `reset`
    started: bool,
    won: bool,
    failed: bool,
}

impl CatchMinigame {
    pub fn new() -> Self {
        Self {
            sequence: [DpadDir::Up; MAX_SEQUENCE],
            sprites: [None; MAX_SEQUENCE],
            index: 0,
            correct: 0,
            frames_left: 0,
            icons_visible: false,
            started: false,
            won: false,
            failed: false,
        }
    }

    /// Roll the sequence and show the first icon. Does nothing if the icons
    /// are up already or an attempt was made this catch.
    pub fn start(&mut self, game: &mut impl FieldTraits) {
        if self.icons_visible || self.started {
            return;
        }

        self.won = false;
        self.failed = false;
        self.started = true;
        self.frames_left = MINIGAME_FRAMES;
        self.index = 0;
        self.correct = 0;

        // No two consecutive directions the same
        self.sequence[0] = random_dir(game);
        for i in 1..MAX_SEQUENCE {
            loop {
                self.sequence[i] = random_dir(game);
                if self.sequence[i] != self.sequence[i - 1] {
                    break;
                }
            }
        }
        debug!("Minigame: sequence {:?}", self.sequence);

        self.sprites = [None; MAX_SEQUENCE];
        self.sprites[0] = Some(game.allocate_dpad_icon(self.sequence[0], 0));
        self.icons_visible = true;
    }

    /// Catch-rate bonus in tenths for how far the player got: the presses
    /// are worth 1, 2 and 2
    pub fn bonus(&self) -> u8 {
        match self.correct {
            0 => 0,
            1 => 1,
            2 => 3,
            _ => 5,
        }
    }

    pub fn icons_visible(&self) -> bool {
        self.icons_visible
    }

    pub fn is_time_up(&self) -> bool {
        self.frames_left == 0
    }

    pub fn was_won(&self) -> bool {
        self.won
    }

    pub fn was_failed(&self) -> bool {
        self.failed
    }

    /// Clear the attempt for the next catch
    pub fn reset(&mut self) {
        self.won = false;
        self.failed = false;
        self.started = false;
        self.correct = 0;
    }

    pub fn hide_icons(&mut self, game: &mut impl FieldTraits) {
        if !self.icons_visible {
            return;
        }
        for sprite in self.sprites.iter_mut() {
            if let Some(handle) = sprite.take() {
                game.release_dpad_icon(handle);
            }
        }
        self.icons_visible = false;
        self.index = 0;
    }
}

fn random_dir(game: &mut impl FieldTraits) -> DpadDir {
    match game.random() % 4 {
        0 => DpadDir::Up,
        1 => DpadDir::Down,
        2 => DpadDir::Left,
        _ => DpadDir::Right,
    }
}

impl Default for CatchMinigame {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsystemTrait for CatchMinigame {
    fn init(&mut self, _game: &impl FieldTraits) {}

    fn responder(&mut self, press: DpadDir, game: &mut impl FieldTraits) -> bool {
        if !self.icons_visible || self.index >= MAX_SEQUENCE {
            return false;
        }

        if press == self.sequence[self.index] {
            self.index += 1;
            self.correct += 1;
            game.start_sound(SfxName::Good);

            if self.index >= MAX_SEQUENCE {
                self.won = true;
                self.hide_icons(game);
            } else {
                // Next icon on top of the stack
                self.sprites[self.index] =
                    Some(game.allocate_dpad_icon(self.sequence[self.index], self.index as u8));
            }
        } else {
            self.failed = true;
            game.start_sound(SfxName::Fail);
            self.hide_icons(game);
        }
        true
    }

    /// Counts the window down; at zero the attempt fails without a bonus
    fn ticker(&mut self, game: &mut impl FieldTraits) -> bool {
        if !self.icons_visible || self.index >= MAX_SEQUENCE {
            return false;
        }

        if self.frames_left > 0 {
            self.frames_left -= 1;
        }
        if self.frames_left == 0 {
            self.failed = true;
            game.start_sound(SfxName::Fail);
            self.hide_icons(game);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::{CatchMinigame, MAX_SEQUENCE, MINIGAME_FRAMES};
    use field_traits::{
        DpadDir, FieldTraits, ItemId, OverlayHandle, OverlayLayout, OverlayPayload, Pocket,
        SfxName, SpeciesId, SpriteHandle, SubsystemTrait,
    };

    struct TestHost {
        rng: Vec<u16>,
        rng_at: usize,
        next_handle: u32,
        live: Vec<u32>,
        stacks: Vec<u8>,
    }

    impl TestHost {
        fn new(rng: Vec<u16>) -> Self {
            Self {
                rng,
                rng_at: 0,
                next_handle: 0,
                live: Vec::new(),
                stacks: Vec::new(),
            }
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

        fn allocate_dpad_icon(&mut self, _dir: DpadDir, stack: u8) -> SpriteHandle {
            self.next_handle += 1;
            self.live.push(self.next_handle);
            self.stacks.push(stack);
            SpriteHandle(self.next_handle)
        }

        fn release_dpad_icon(&mut self, handle: SpriteHandle) {
            let pos = self
                .live
                .iter()
                .position(|h| *h == handle.0)
                .expect("released a sprite that was not live");
            self.live.remove(pos);
        }

        fn start_sound(&mut self, _sfx: SfxName) {}

        fn random(&mut self) -> u16 {
            let v = self.rng[self.rng_at];
            self.rng_at += 1;
            v
        }

        fn party_species(&self, _slot: usize) -> Option<SpeciesId> {
            None
        }

        fn mon_ball(&self, _slot: usize) -> Option<ItemId> {
            None
        }

        fn set_mon_ball(&mut self, _slot: usize, _ball: ItemId) {}

        fn bag_pocket_nonempty(&self, _pocket: Pocket) -> bool {
            false
        }

        fn remove_bag_item(&mut self, _item: ItemId, _count: u32) -> bool {
            false
        }

        fn add_bag_item(&mut self, _item: ItemId, _count: u32) {}
    }

    #[test]
    fn sequence_rerolls_consecutive_repeats() {
        // draws: 0, then 0 (rejected) 1, then 1 (rejected) 0
        let mut host = TestHost::new(vec![0, 0, 1, 1, 0]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        assert_eq!(mg.sequence, [DpadDir::Up, DpadDir::Down, DpadDir::Up]);
        assert_eq!(host.rng_at, 5);
    }

    #[test]
    fn correct_sequence_wins_with_full_bonus() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        let seq = mg.sequence;
        for dir in seq {
            assert!(mg.responder(dir, &mut host));
        }

        assert!(mg.was_won());
        assert!(!mg.was_failed());
        assert_eq!(mg.bonus(), 5);
        assert!(!mg.icons_visible());
        assert!(host.live.is_empty(), "icons must be freed on a win");
    }

    #[test]
    fn icons_stack_one_per_correct_press() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);
        assert_eq!(host.live.len(), 1);

        let seq = mg.sequence;
        mg.responder(seq[0], &mut host);
        assert_eq!(host.live.len(), 2);
        mg.responder(seq[1], &mut host);
        assert_eq!(host.live.len(), 3);
        assert_eq!(host.stacks, vec![0, 1, 2]);
    }

    #[test]
    fn wrong_press_fails_without_bonus() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        // first expected press is Up
        assert!(mg.responder(DpadDir::Left, &mut host));
        assert!(mg.was_failed());
        assert!(!mg.was_won());
        assert_eq!(mg.bonus(), 0);
        assert!(host.live.is_empty());
    }

    #[test]
    fn partial_progress_keeps_partial_bonus() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        let seq = mg.sequence;
        mg.responder(seq[0], &mut host);
        mg.responder(seq[1], &mut host);
        // fumble the last press
        let wrong = seq.iter().find(|d| **d != seq[2]).copied().unwrap();
        mg.responder(wrong, &mut host);

        assert!(mg.was_failed());
        assert_eq!(mg.bonus(), 3);
    }

    #[test]
    fn time_up_fails_the_attempt() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        for _ in 0..MINIGAME_FRAMES - 1 {
            assert!(!mg.ticker(&mut host));
        }
        assert!(mg.ticker(&mut host));

        assert!(mg.is_time_up());
        assert!(mg.was_failed());
        assert!(!mg.icons_visible());
        assert!(host.live.is_empty());
    }

    #[test]
    fn presses_after_resolution_are_ignored() {
        let mut host = TestHost::new(vec![0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);

        mg.responder(DpadDir::Right, &mut host); // Up expected, fails
        assert!(!mg.responder(DpadDir::Up, &mut host));
        assert_eq!(mg.bonus(), 0);
    }

    #[test]
    fn one_attempt_per_catch_until_reset() {
        let mut host = TestHost::new(vec![0, 1, 2, 0, 1, 2]);
        let mut mg = CatchMinigame::new();
        mg.start(&mut host);
        let seq = mg.sequence;
        for dir in seq {
            mg.responder(dir, &mut host);
        }
        assert!(mg.was_won());

        // a second start this catch is a no-op
        mg.start(&mut host);
        assert!(!mg.icons_visible());

        mg.reset();
        assert_eq!(mg.bonus(), 0);
        mg.start(&mut host);
        assert!(mg.icons_visible());
        assert_eq!(mg.sequence, [DpadDir::Up, DpadDir::Down, DpadDir::Left]);
    }

    #[test]
    fn sequence_length_is_three() {
        // guards the bonus table against MAX_SEQUENCE drifting
        assert_eq!(MAX_SEQUENCE, 3);
    }
}
