use argh::FromArgs;

/// CLI options for the pocketfield demo
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// bitmask of party slots with new moves, bit 0 = slot 0
    #[argh(option)]
    pub flags: Option<u32>,
    /// ticks an overlay stays fully visible
    #[argh(option)]
    pub duration: Option<i32>,
    /// slide offset units per tick, 0 disables the animation
    #[argh(option)]
    pub slide_speed: Option<i32>,
    /// offset at which the overlay is fully visible
    #[argh(option)]
    pub slide_distance: Option<i32>,
    /// host goes busy (menu/script simulation) at this tick
    #[argh(option)]
    pub busy_from: Option<i32>,
    /// host is idle again from this tick
    #[argh(option)]
    pub busy_until: Option<i32>,
    /// cancel the overlay on screen at this tick
    #[argh(option)]
    pub cancel_at: Option<i32>,
    /// pace the run at 60 ticks per second instead of flat out
    #[argh(option)]
    pub realtime: Option<bool>,
    /// seed for the host RNG
    #[argh(option)]
    pub seed: Option<u16>,
    /// skip the catch minigame leg of the demo
    #[argh(option, default = "false")]
    pub no_minigame: bool,
    /// skip the ball swap leg of the demo
    #[argh(option, default = "false")]
    pub no_ballswap: bool,
}
