// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Accelerated day cycle.
//!
//! A [`DayCycle`] maps real elapsed time onto simulated time of day: one full
//! day passes every `seconds_per_cycle` real seconds.  The caller feeds the
//! elapsed time explicitly each tick (there is no hidden wall clock) and
//! hands the resulting moment to every consumer of that tick.
//!
//! ```
//! use qtty::Seconds;
//! use skydome::DayCycle;
//!
//! let mut clock = DayCycle::new(2024, 6, 21, 0.5, 60.0).unwrap();
//! clock.start();
//! clock.advance(Seconds::new(15.0));
//! assert!((clock.fraction() - 0.75).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days as CalendarDays, NaiveDate};
use log::{debug, warn};
use qtty::Seconds;

use crate::calendar::CalendarMoment;
use crate::error::SkyError;
use crate::instant::Time;
use crate::scales::UT;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Time-of-day clock with a configurable speed-up and date rollover.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCycle {
    date: NaiveDate,
    fraction: f64,
    initial_date: NaiveDate,
    initial_fraction: f64,
    seconds_per_cycle: f64,
    utc_offset_hours: f64,
    running: bool,
}

impl DayCycle {
    /// Stopped clock at `fraction` of the given civil day (UTC), advancing
    /// one day per `seconds_per_cycle` once started.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        fraction: f64,
        seconds_per_cycle: f64,
    ) -> Result<Self, SkyError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(SkyError::InvalidDate { year, month, day })?;
        validate_cycle(seconds_per_cycle)?;
        let mut clock = Self {
            date,
            fraction: 0.0,
            initial_date: date,
            initial_fraction: 0.0,
            seconds_per_cycle,
            utc_offset_hours: 0.0,
            running: false,
        };
        clock.roll(fraction);
        clock.initial_date = clock.date;
        clock.initial_fraction = clock.fraction;
        Ok(clock)
    }

    /// Interpret the clock as local civil time at `hours` east of UTC.
    pub fn with_utc_offset(mut self, hours: f64) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    // ── Transport ─────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Pause and return to the initial moment.
    pub fn stop(&mut self) {
        self.pause();
        self.reset();
    }

    /// Return to the initial moment; the running state is kept.
    pub fn reset(&mut self) {
        self.date = self.initial_date;
        self.fraction = self.initial_fraction;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `elapsed` real time.  Returns `true` when the simulated
    /// moment changed (the clock is running and `elapsed` is non-zero).
    pub fn advance(&mut self, elapsed: Seconds) -> bool {
        if !self.running || elapsed.value() == 0.0 {
            return false;
        }
        if !elapsed.value().is_finite() {
            warn!("ignoring non-finite clock step {}", elapsed.value());
            return false;
        }
        self.roll(self.fraction + elapsed.value() / self.seconds_per_cycle);
        true
    }

    // ── Settings ──────────────────────────────────────────────────────────

    #[inline]
    pub fn seconds_per_cycle(&self) -> f64 {
        self.seconds_per_cycle
    }

    /// Change the speed; must be positive and finite.
    pub fn set_seconds_per_cycle(&mut self, seconds: f64) -> Result<(), SkyError> {
        validate_cycle(seconds)?;
        self.seconds_per_cycle = seconds;
        Ok(())
    }

    /// Time of day in `[0, 1)`.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Jump to a time of day; values outside `[0, 1)` roll the date.
    pub fn set_fraction(&mut self, fraction: f64) {
        self.roll(fraction);
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// The simulated civil moment.
    pub fn moment(&self) -> CalendarMoment {
        let total = self.fraction * SECONDS_PER_DAY;
        let hour = (total / 3_600.0).floor();
        let minute = ((total - hour * 3_600.0) / 60.0).floor();
        let second = total - hour * 3_600.0 - minute * 60.0;
        CalendarMoment::utc(
            self.date.year(),
            self.date.month(),
            self.date.day(),
            hour as u32,
            minute as u32,
            second,
        )
        .with_utc_offset(self.utc_offset_hours)
    }

    /// The simulated moment on the astronomical time axis.
    pub fn time(&self) -> Time<UT> {
        self.moment().to_astronomical_time()
    }

    /// Normalise `fraction` into `[0, 1)`, moving whole days into the date.
    fn roll(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            warn!("ignoring non-finite day fraction {fraction}");
            return;
        }
        let whole = fraction.floor();
        let mut rest = fraction - whole;
        if rest >= 1.0 {
            rest = 0.0;
        }
        let rolled = if whole >= 0.0 {
            self.date.checked_add_days(CalendarDays::new(whole as u64))
        } else {
            self.date.checked_sub_days(CalendarDays::new((-whole) as u64))
        };
        match rolled {
            Some(date) => {
                if date != self.date {
                    debug!("day cycle rolled from {} to {date}", self.date);
                }
                self.date = date;
                self.fraction = rest;
            }
            None => warn!("day cycle left the representable calendar range at {}", self.date),
        }
    }
}

fn validate_cycle(seconds: f64) -> Result<(), SkyError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        Err(SkyError::InvalidCycleLength(seconds))
    }
}
