//! A simulated real-time clock. The cartridge hardware RTC is replaced by a
//! counter the game advances itself (sleeping at an inn, scripted events),
//! which makes day/night scripting deterministic and save-friendly. The
//! host save block embeds [`Time`] directly.

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: i32 = 60;
pub const MINUTES_PER_HOUR: i32 = 60;
pub const HOURS_PER_DAY: i32 = 24;

const MINUTES_PER_DAY: i32 = HOURS_PER_DAY * MINUTES_PER_HOUR;

/// A duration or point in game time. Fields are free-running until
/// normalised by the operations below.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

impl Time {
    pub const fn new(days: i32, hours: i32, minutes: i32, seconds: i32) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// `t2 - t1` with borrow across seconds, minutes and hours. Days may go
    /// negative when `t2` is earlier.
    pub fn difference(t1: &Time, t2: &Time) -> Time {
        let mut result = Time {
            days: t2.days - t1.days,
            hours: t2.hours - t1.hours,
            minutes: t2.minutes - t1.minutes,
            seconds: t2.seconds - t1.seconds,
        };

        if result.seconds < 0 {
            result.seconds += SECONDS_PER_MINUTE;
            result.minutes -= 1;
        }
        if result.minutes < 0 {
            result.minutes += MINUTES_PER_HOUR;
            result.hours -= 1;
        }
        if result.hours < 0 {
            result.hours += HOURS_PER_DAY;
            result.days -= 1;
        }
        result
    }
}

/// The simulated clock. Owns the authoritative time plus the snapshot the
/// rest of the game reads during a frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeRtc {
    time: Time,
    local: Time,
}

impl FakeRtc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(time: Time) -> Self {
        Self { time, local: time }
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Add a duration and carry seconds through to days
    pub fn advance(&mut self, delta: &Time) {
        self.time.seconds += delta.seconds;
        self.time.minutes += delta.minutes;
        self.time.hours += delta.hours;
        self.time.days += delta.days;

        while self.time.seconds >= SECONDS_PER_MINUTE {
            self.time.seconds -= SECONDS_PER_MINUTE;
            self.time.minutes += 1;
        }
        while self.time.minutes >= MINUTES_PER_HOUR {
            self.time.minutes -= MINUTES_PER_HOUR;
            self.time.hours += 1;
        }
        while self.time.hours >= HOURS_PER_DAY {
            self.time.hours -= HOURS_PER_DAY;
            self.time.days += 1;
        }
    }

    /// Jump straight to a point in time
    pub fn advance_to(&mut self, time: Time) {
        self.time = time;
    }

    /// Take the per-frame snapshot
    pub fn calc_local_time(&mut self) {
        self.local = self.time;
    }

    pub fn local_time(&self) -> &Time {
        &self.local
    }

    pub fn init_offset(&mut self, hour: i32, minute: i32) {
        self.set_offset(0, hour, minute, 0);
    }

    pub fn set_offset(&mut self, days: i32, hours: i32, minutes: i32, seconds: i32) {
        self.time = Time::new(days, hours, minutes, seconds);
    }

    pub fn minute_count(&self) -> i32 {
        MINUTES_PER_DAY * self.time.days + MINUTES_PER_HOUR * self.time.hours + self.time.minutes
    }

    pub fn day_count(&self) -> i32 {
        self.time.days
    }

    /// Hardware compatibility shim, the simulated clock can't fail
    pub fn error_status(&self) -> u16 {
        0
    }

    /// Hardware compatibility shim
    pub fn reset(&mut self) {}
}
