//! Exposes an API of sorts that allows the feature crates (popup overlays,
//! catch minigame, ball swap) to get what they need from the host engine or
//! cause changes in it, without depending on how the host implements sprite
//! memory, windows, text, input, or randomness.

/// Ticks per second the host scheduler runs feature subsystems at
pub const TICRATE: i32 = 60;

/// Party slots available to scan for qualifying entries
pub const PARTY_SIZE: usize = 6;

pub type SpeciesId = u16;
pub type ItemId = u16;

/// Bag pockets the features care about. The host bag may have more.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pocket {
    Items,
    Balls,
}

/// D-pad direction, decoupled from whatever button masks the host input
/// layer uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DpadDir {
    Up,
    Down,
    Left,
    Right,
}

/// Sound effects a feature can ask the host to play
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SfxName {
    /// Jingle played when a notification overlay appears
    Notify,
    /// Correct press in the catch minigame
    Good,
    /// Wrong press or time-up in the catch minigame
    Fail,
}

/// Handle to a host-allocated overlay (window + text). Owned by the feature
/// that allocated it until released.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayHandle(pub u32);

/// Handle to a host-allocated icon sprite
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpriteHandle(pub u32);

/// Position and size of an overlay window plus where its icon sits. These
/// constants are what distinguish the popup variants from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    /// Tilemap position, in tiles
    pub left: i32,
    pub top: i32,
    /// Window size, in tiles
    pub width: i32,
    pub height: i32,
    /// Icon sprite position, in pixels
    pub icon_x: i32,
    pub icon_y: i32,
}

/// Display data for one overlay: an icon plus two text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPayload {
    pub icon: SpeciesId,
    /// Nickname or similar headline text
    pub title: String,
    pub subtitle: String,
}

/// Universal host traits. To be implemented by the host engine.
pub trait FieldTraits {
    /// The idle predicate gating overlays. What exactly counts as idle
    /// (control locks, scripts, message boxes) is decided by the host.
    fn overlay_idle(&self) -> bool;

    /// Allocate a window for an overlay. The handle stays valid until
    /// [`FieldTraits::release_overlay`].
    fn allocate_overlay(&mut self, layout: &OverlayLayout) -> OverlayHandle;

    fn release_overlay(&mut self, handle: OverlayHandle);

    /// Render the payload text and icon into the overlay
    fn render_payload(&mut self, handle: OverlayHandle, payload: &OverlayPayload);

    /// Scroll the overlay vertically. 0 is fully hidden; the slide distance
    /// in the overlay config is fully visible.
    fn set_overlay_offset(&mut self, handle: OverlayHandle, offset: i32);

    /// Show a D-pad direction icon. `stack` orders icons so the newest sits
    /// on top of the previous ones.
    fn allocate_dpad_icon(&mut self, dir: DpadDir, stack: u8) -> SpriteHandle;

    fn release_dpad_icon(&mut self, handle: SpriteHandle);

    /// A basic sound starter
    fn start_sound(&mut self, sfx: SfxName);

    /// Host RNG
    fn random(&mut self) -> u16;

    /// Species in this party slot, `None` if the slot is empty
    fn party_species(&self, slot: usize) -> Option<SpeciesId>;

    /// The ball the mon in this slot was caught in
    fn mon_ball(&self, slot: usize) -> Option<ItemId>;

    fn set_mon_ball(&mut self, slot: usize, ball: ItemId);

    fn bag_pocket_nonempty(&self, pocket: Pocket) -> bool;

    /// Remove `count` of an item, false if the bag holds fewer
    fn remove_bag_item(&mut self, item: ItemId, count: u32) -> bool;

    fn add_bag_item(&mut self, item: ItemId, count: u32);
}

/// To be implemented by ticked feature things (popup, minigame)
pub trait SubsystemTrait {
    /// Possibly initialise the subsystem
    fn init(&mut self, game: &impl FieldTraits);

    /// Return true if the responder took the press
    fn responder(&mut self, press: DpadDir, game: &mut impl FieldTraits) -> bool;

    /// Responds to changes in the host or affects the host. Called exactly
    /// once per frame while scheduled.
    fn ticker(&mut self, game: &mut impl FieldTraits) -> bool;
}
