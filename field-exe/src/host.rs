//! A scripted host standing in for the real engine: an in-memory party and
//! bag, LCG randomness, a busy window driven off the tick counter, and
//! display primitives that log what they would draw.

use field_traits::{
    DpadDir, FieldTraits, ItemId, OverlayHandle, OverlayLayout, OverlayPayload, Pocket, SfxName,
    SpeciesId, SpriteHandle,
};
use log::{debug, info};
use std::collections::HashMap;

pub const ULTRA_BALL: ItemId = 2;
pub const GREAT_BALL: ItemId = 3;
pub const POKE_BALL: ItemId = 4;
pub const NET_BALL: ItemId = 6;

pub fn item_name(item: ItemId) -> &'static str {
    match item {
        ULTRA_BALL => "Ultra Ball",
        GREAT_BALL => "Great Ball",
        POKE_BALL => "Poke Ball",
        NET_BALL => "Net Ball",
        _ => "???",
    }
}

struct Mon {
    species: SpeciesId,
    nickname: &'static str,
    ball: ItemId,
}

pub struct DemoHost {
    tick: i32,
    busy_from: Option<i32>,
    busy_until: Option<i32>,
    rng_state: u32,
    next_handle: u32,
    party: Vec<Mon>,
    bag: HashMap<ItemId, u32>,
    /// Icon directions the minigame asked for, newest last. Lets the demo
    /// "player" read the screen.
    pub shown_dirs: Vec<DpadDir>,
}

impl DemoHost {
    pub fn new(seed: u16) -> Self {
        let party = vec![
            Mon {
                species: 25,
                nickname: "SPARKY",
                ball: POKE_BALL,
            },
            Mon {
                species: 258,
                nickname: "MUDKIP",
                ball: POKE_BALL,
            },
            Mon {
                species: 263,
                nickname: "ZIGZAG",
                ball: GREAT_BALL,
            },
            Mon {
                species: 276,
                nickname: "TAILOW",
                ball: POKE_BALL,
            },
            Mon {
                species: 285,
                nickname: "SHROOM",
                ball: NET_BALL,
            },
            Mon {
                species: 304,
                nickname: "ARON",
                ball: GREAT_BALL,
            },
        ];

        Self {
            tick: 0,
            busy_from: None,
            busy_until: None,
            rng_state: seed as u32,
            next_handle: 0,
            party,
            bag: HashMap::from([(NET_BALL, 2), (GREAT_BALL, 1)]),
            shown_dirs: Vec::new(),
        }
    }

    pub fn set_busy_window(&mut self, from: Option<i32>, until: Option<i32>) {
        self.busy_from = from;
        self.busy_until = until;
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn payload_for(&self, slot: usize) -> OverlayPayload {
        let mon = &self.party[slot];
        OverlayPayload {
            icon: mon.species,
            title: mon.nickname.to_string(),
            subtitle: "New Moves!".to_string(),
        }
    }

    pub fn ball_of(&self, slot: usize) -> ItemId {
        self.party[slot].ball
    }
}

impl FieldTraits for DemoHost {
    fn overlay_idle(&self) -> bool {
        match (self.busy_from, self.busy_until) {
            (Some(from), Some(until)) => !(self.tick >= from && self.tick < until),
            (Some(from), None) => self.tick < from,
            _ => true,
        }
    }

    fn allocate_overlay(&mut self, layout: &OverlayLayout) -> OverlayHandle {
        self.next_handle += 1;
        info!(
            "Host: overlay {} up, {}x{} tiles at ({}, {})",
            self.next_handle, layout.width, layout.height, layout.left, layout.top
        );
        OverlayHandle(self.next_handle)
    }

    fn release_overlay(&mut self, handle: OverlayHandle) {
        info!("Host: overlay {} down", handle.0);
    }

    fn render_payload(&mut self, _handle: OverlayHandle, payload: &OverlayPayload) {
        info!(
            "Host: [{}] {} (icon #{})",
            payload.title, payload.subtitle, payload.icon
        );
    }

    fn set_overlay_offset(&mut self, handle: OverlayHandle, offset: i32) {
        debug!("Host: overlay {} offset {}", handle.0, offset);
    }

    fn allocate_dpad_icon(&mut self, dir: DpadDir, stack: u8) -> SpriteHandle {
        self.next_handle += 1;
        self.shown_dirs.push(dir);
        info!("Host: d-pad icon {:?} shown at stack {}", dir, stack);
        SpriteHandle(self.next_handle)
    }

    fn release_dpad_icon(&mut self, handle: SpriteHandle) {
        debug!("Host: sprite {} freed", handle.0);
    }

    fn start_sound(&mut self, sfx: SfxName) {
        debug!("Host: sfx {:?}", sfx);
    }

    fn random(&mut self) -> u16 {
        self.rng_state = self.rng_state.wrapping_mul(1103515245).wrapping_add(24691);
        (self.rng_state >> 16) as u16
    }

    fn party_species(&self, slot: usize) -> Option<SpeciesId> {
        self.party.get(slot).map(|m| m.species)
    }

    fn mon_ball(&self, slot: usize) -> Option<ItemId> {
        self.party.get(slot).map(|m| m.ball)
    }

    fn set_mon_ball(&mut self, slot: usize, ball: ItemId) {
        self.party[slot].ball = ball;
    }

    fn bag_pocket_nonempty(&self, pocket: Pocket) -> bool {
        // The demo bag only holds balls
        pocket == Pocket::Balls && self.bag.values().any(|n| *n > 0)
    }

    fn remove_bag_item(&mut self, item: ItemId, count: u32) -> bool {
        match self.bag.get_mut(&item) {
            Some(held) if *held >= count => {
                *held -= count;
                true
            }
            _ => false,
        }
    }

    fn add_bag_item(&mut self, item: ItemId, count: u32) {
        *self.bag.entry(item).or_insert(0) += count;
    }
}
