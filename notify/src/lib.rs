//! A timed notification overlay sequencer. Given a list of party slots with
//! a qualifying flag, it shows one overlay per flagged slot (icon + two text
//! lines), each for a fixed number of ticks, optionally sliding in and out
//! from the screen edge.
//!
//! The host owns all display primitives; this crate only drives them. It
//! also yields to the host: nothing is shown until the host reports idle,
//! and an overlay already on screen is torn down the moment the host stops
//! being idle (a menu opened, a script started).

use field_traits::{
    DpadDir, FieldTraits, OverlayHandle, OverlayLayout, OverlayPayload, PARTY_SIZE, SfxName,
    SubsystemTrait,
};
use log::debug;
use thiserror::Error;

const DISPLAY_TIME: i32 = 120;
const SLIDE_SPEED: i32 = 4;
const SLIDE_DISTANCE: i32 = 44;

/// Banner across the top of the screen, icon left of the text
const TOP_BANNER: OverlayLayout = OverlayLayout {
    left: 17,
    top: 0,
    width: 13,
    height: 4,
    icon_x: 96,
    icon_y: 16,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    #[error("a popup sequence is already running")]
    AlreadyActive,
}

/// The knobs that used to be five copy-pasted popup implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupConfig {
    /// How many ticks an overlay stays fully visible
    pub display_duration: i32,
    /// Offset units moved per tick. 0 means no slide animation, the overlay
    /// appears and disappears in one step.
    pub slide_speed: i32,
    /// Offset at which the overlay is fully visible
    pub slide_distance: i32,
    pub layout: OverlayLayout,
}

impl PopupConfig {
    /// The sliding top-of-screen banner
    pub const fn top_banner() -> Self {
        Self {
            display_duration: DISPLAY_TIME,
            slide_speed: SLIDE_SPEED,
            slide_distance: SLIDE_DISTANCE,
            layout: TOP_BANNER,
        }
    }

    const fn animated(&self) -> bool {
        self.slide_speed > 0
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self::top_banner()
    }
}

#[derive(Debug, Clone)]
pub struct PopupItem {
    pub slot: usize,
    /// Only flagged items are shown; the rest are skipped in order
    pub qualifies: bool,
    pub payload: OverlayPayload,
}

/// An ordered set of party slots to show overlays for. Immutable once a
/// sequence begins.
#[derive(Debug, Clone, Default)]
pub struct PopupRequest {
    items: Vec<PopupItem>,
}

impl PopupRequest {
    pub fn new(items: Vec<PopupItem>) -> Self {
        Self { items }
    }

    /// Build a request from a per-slot flag bitmask, the way battle results
    /// report which party members qualified
    pub fn from_flags(flags: u32, mut payload_for: impl FnMut(usize) -> OverlayPayload) -> Self {
        let items = (0..PARTY_SIZE)
            .map(|slot| PopupItem {
                slot,
                qualifies: flags & (1 << slot) != 0,
                payload: payload_for(slot),
            })
            .collect();
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PopupState {
    WaitIdle,
    SelectNext,
    Create,
    SlideIn,
    Wait,
    SlideOut,
    Cleanup,
    End,
}

/// Drives one popup sequence at a time. `WaitIdle`, `SelectNext` and
/// `Cleanup` are pass-through states resolved within the tick they are
/// reached in; `Create`, the slides and `Wait` each consume a tick.
pub struct NotifyPopup {
    config: PopupConfig,
    request: PopupRequest,
    state: PopupState,
    /// Index into the request of the item being considered or shown
    cursor: usize,
    display_timer: i32,
    slide_offset: i32,
    overlay: Option<OverlayHandle>,
    active: bool,
}

impl NotifyPopup {
    pub fn new() -> Self {
        Self {
            config: PopupConfig::default(),
            request: PopupRequest::default(),
            state: PopupState::End,
            cursor: 0,
            display_timer: 0,
            slide_offset: 0,
            overlay: None,
            active: false,
        }
    }

    /// Start a new sequence. Rejected without touching the current run if
    /// one is still in progress; wait for [`NotifyPopup::is_active`] to go
    /// false first.
    pub fn begin(&mut self, request: PopupRequest, config: PopupConfig) -> Result<(), BeginError> {
        if self.active {
            return Err(BeginError::AlreadyActive);
        }
        self.config = config;
        self.request = request;
        self.state = PopupState::WaitIdle;
        self.cursor = 0;
        self.display_timer = 0;
        self.slide_offset = 0;
        self.active = true;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tear down whatever is on screen right now, never animated, and move
    /// on to the next item. For when the host needs the screen back faster
    /// than the idle check in `ticker` would notice.
    pub fn cancel_current(&mut self, game: &mut impl FieldTraits) {
        if !self.active {
            return;
        }
        if self.overlay.is_some() {
            self.hide(game);
            // Skip only the item that was actually displayed
            self.cursor += 1;
        }
        self.state = PopupState::SelectNext;
    }

    fn show(&mut self, game: &mut impl FieldTraits) {
        let item = &self.request.items[self.cursor];
        let handle = game.allocate_overlay(&self.config.layout);
        game.render_payload(handle, &item.payload);
        let initial = if self.config.animated() {
            0
        } else {
            self.config.slide_distance
        };
        game.set_overlay_offset(handle, initial);
        game.start_sound(SfxName::Notify);
        self.overlay = Some(handle);
        debug!("Popup: showing slot {}", item.slot);
    }

    fn hide(&mut self, game: &mut impl FieldTraits) {
        if let Some(handle) = self.overlay.take() {
            // Always park the scroll so host message boxes display right
            game.set_overlay_offset(handle, 0);
            game.release_overlay(handle);
            debug!("Popup: hid slot {}", self.request.items[self.cursor].slot);
        }
    }

    /// Idle re-check for every tick an overlay is on screen. Busy host
    /// means immediate teardown and on to the next item.
    fn preempted(&mut self, game: &mut impl FieldTraits) -> bool {
        if game.overlay_idle() {
            return false;
        }
        self.hide(game);
        self.cursor += 1;
        self.state = PopupState::SelectNext;
        true
    }

    fn tick(&mut self, game: &mut impl FieldTraits) {
        loop {
            match self.state {
                PopupState::WaitIdle => {
                    if !game.overlay_idle() {
                        return;
                    }
                    self.state = PopupState::SelectNext;
                }
                PopupState::SelectNext => {
                    match self.request.items[self.cursor..]
                        .iter()
                        .position(|i| i.qualifies)
                    {
                        Some(found) => {
                            self.cursor += found;
                            self.state = PopupState::Create;
                        }
                        None => self.state = PopupState::End,
                    }
                }
                PopupState::Create => {
                    // The host may have gone busy since the item was picked
                    if !game.overlay_idle() {
                        self.state = PopupState::WaitIdle;
                        return;
                    }
                    self.show(game);
                    self.slide_offset = 0;
                    if self.config.animated() {
                        self.state = PopupState::SlideIn;
                    } else {
                        self.display_timer = 0;
                        self.state = PopupState::Wait;
                    }
                    return;
                }
                PopupState::SlideIn => {
                    if self.preempted(game) {
                        return;
                    }
                    self.slide_offset += self.config.slide_speed;
                    if self.slide_offset >= self.config.slide_distance {
                        self.slide_offset = self.config.slide_distance;
                        self.display_timer = 0;
                        self.state = PopupState::Wait;
                    }
                    if let Some(handle) = self.overlay {
                        game.set_overlay_offset(handle, self.slide_offset);
                    }
                    return;
                }
                PopupState::Wait => {
                    if self.preempted(game) {
                        return;
                    }
                    self.display_timer += 1;
                    if self.display_timer > self.config.display_duration {
                        self.state = if self.config.animated() {
                            PopupState::SlideOut
                        } else {
                            PopupState::Cleanup
                        };
                    }
                    return;
                }
                PopupState::SlideOut => {
                    if self.preempted(game) {
                        return;
                    }
                    self.slide_offset -= self.config.slide_speed;
                    if self.slide_offset <= 0 {
                        self.slide_offset = 0;
                        self.state = PopupState::Cleanup;
                    }
                    if let Some(handle) = self.overlay {
                        game.set_overlay_offset(handle, self.slide_offset);
                    }
                    return;
                }
                PopupState::Cleanup => {
                    self.hide(game);
                    self.cursor += 1;
                    self.state = PopupState::SelectNext;
                }
                PopupState::End => {
                    self.active = false;
                    debug!("Popup: sequence done");
                    return;
                }
            }
        }
    }
}

impl Default for NotifyPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsystemTrait for NotifyPopup {
    fn init(&mut self, _game: &impl FieldTraits) {}

    fn responder(&mut self, _press: DpadDir, _game: &mut impl FieldTraits) -> bool {
        false
    }

    /// Returns true on the tick the sequence finishes
    fn ticker(&mut self, game: &mut impl FieldTraits) -> bool {
        if !self.active {
            return false;
        }
        self.tick(game);
        !self.active
    }
}
