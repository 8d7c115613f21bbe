//! Headless demo for the field feature crates: runs a new-moves popup
//! sequence, a catch minigame attempt and a ball swap against a scripted
//! host, then reads the simulated clock back.

mod cli;
mod config;
mod host;
mod timestep;

use crate::config::UserConfig;
use crate::host::{DemoHost, NET_BALL, item_name};
use crate::timestep::TimeStep;
use ball_swap::{player_has_balls, swap_mon_ball};
use catch_minigame::CatchMinigame;
use cli::*;
use field_traits::{SubsystemTrait, TICRATE};
use log::{info, warn};
use notify_popup::{NotifyPopup, PopupConfig, PopupRequest};
use rtc::{FakeRtc, Time};
use simplelog::TermLogger;
use std::error::Error;

const BASE_DIR: &str = "pocketfield/";

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let mut host = DemoHost::new(user_config.seed);
    host.set_busy_window(options.busy_from, options.busy_until);
    let mut timestep = TimeStep::new();

    run_popups(&options, &user_config, &mut host, &mut timestep)?;
    if !options.no_minigame {
        run_minigame(&mut host);
    }
    if !options.no_ballswap {
        run_ballswap(&mut host);
    }
    report_clock(&host);

    Ok(())
}

fn run_popups(
    options: &CLIOptions,
    user_config: &UserConfig,
    host: &mut DemoHost,
    timestep: &mut TimeStep,
) -> Result<(), Box<dyn Error>> {
    let config = PopupConfig {
        display_duration: user_config.duration,
        slide_speed: user_config.slide_speed,
        slide_distance: user_config.slide_distance,
        ..PopupConfig::top_banner()
    };
    let flags = user_config.flags;
    let request = PopupRequest::from_flags(flags, |slot| host.payload_for(slot));

    info!("Popup: starting sequence for flags {:#08b}", flags);
    let mut popup = NotifyPopup::new();
    popup.begin(request, config)?;

    // A busy window with no end would park the sequence in WaitIdle forever
    let deadline = host.tick() + 60 * TICRATE;
    let realtime = user_config.realtime;
    while popup.is_active() && host.tick() < deadline {
        if options.cancel_at == Some(host.tick()) {
            info!("Popup: cancelled at tick {}", host.tick());
            popup.cancel_current(host);
        }
        popup.ticker(host);
        host.advance_tick();
        if realtime {
            timestep.sync();
        }
    }
    if popup.is_active() {
        warn!("Popup: still waiting on the host after {} ticks, giving up", deadline);
    } else {
        info!("Popup: sequence finished after {} ticks", host.tick());
    }
    Ok(())
}

/// Play the minigame by reading the icons back off the host, with a little
/// think time between presses
fn run_minigame(host: &mut DemoHost) {
    let mut minigame = CatchMinigame::new();
    minigame.start(host);

    while minigame.icons_visible() {
        for _ in 0..10 {
            minigame.ticker(host);
            host.advance_tick();
        }
        if !minigame.icons_visible() {
            break;
        }
        let press = *host.shown_dirs.last().expect("an icon is on screen");
        minigame.responder(press, host);
    }

    info!(
        "Minigame: won={} bonus=+0.{}x",
        minigame.was_won(),
        minigame.bonus()
    );
}

fn run_ballswap(host: &mut DemoHost) {
    if !player_has_balls(host) {
        warn!("BallSwap: no balls in the bag");
        return;
    }
    let before = host.ball_of(0);
    match swap_mon_ball(host, 0, NET_BALL) {
        Ok(old) => info!(
            "BallSwap: slot 0 now in a {} (was a {})",
            item_name(NET_BALL),
            item_name(old)
        ),
        Err(err) => warn!("BallSwap: {err} (still in a {})", item_name(before)),
    }
}

fn report_clock(host: &DemoHost) {
    let mut clock = FakeRtc::new();
    clock.init_offset(10, 30);
    clock.advance(&Time::new(0, 0, 0, host.tick() / TICRATE));
    clock.calc_local_time();

    let t = clock.local_time();
    info!(
        "Clock: day {} {:02}:{:02}:{:02} after {} ticks, {} minutes on the clock",
        t.days,
        t.hours,
        t.minutes,
        t.seconds,
        host.tick(),
        clock.minute_count()
    );
}
