// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar moments and their Julian Day.
//!
//! A [`CalendarMoment`] is what a clock driver hands to the sky every tick:
//! a proleptic Gregorian date, a wall-clock time and the UTC offset of that
//! wall clock.  [`CalendarMoment::to_astronomical_time`] turns it into a
//! continuous [`Time<UT>`] using the algorithm of Meeus, *Astronomical
//! Algorithms* (2nd ed.), ch. 7.
//!
//! No component is range checked.  Months outside `1..=12` carry into the
//! year; surplus days, hours, minutes and seconds simply add up, so
//! "January 32nd" is February 1st and "25:00" is 01:00 of the next day.

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc};
use qtty::{Day, Days, Second, Seconds};

use crate::error::SkyError;
use crate::instant::{Time, UNIX_EPOCH_JD};
use crate::scales::UT;

/// A wall-clock moment: Gregorian date, time of day and UTC offset.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
    /// Offset of the wall clock from UTC in hours (CEST = +2).
    pub utc_offset_hours: f64,
}

impl CalendarMoment {
    /// Moment at the given UTC date and time.
    pub const fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_hours: 0.0,
        }
    }

    /// Midnight UTC of the given date.
    pub const fn date(year: i32, month: u32, day: u32) -> Self {
        Self::utc(year, month, day, 0, 0, 0.0)
    }

    /// Same wall-clock reading, interpreted with another UTC offset.
    pub const fn with_utc_offset(mut self, hours: f64) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Read a chrono timestamp in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let offset_seconds = datetime.offset().fix().local_minus_utc();
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second() as f64 + datetime.nanosecond() as f64 / 1e9,
            utc_offset_hours: offset_seconds as f64 / 3_600.0,
        }
    }

    /// Wall-clock time of day as a fraction of a day, before the UTC offset
    /// is removed.  May exceed 1 when components overflow.
    pub fn day_fraction(&self) -> f64 {
        (self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3_600.0) / 24.0
    }

    /// Julian Day (UT axis) of this moment.
    ///
    /// Proleptic Gregorian calendar for every year, including those before
    /// the 1582 reform.  The integer day count is built first and the time of
    /// day added last, so the result agrees with almanac values to well under
    /// a microsecond for modern dates.
    pub fn to_astronomical_time(&self) -> Time<UT> {
        // Carry out-of-range months into the year.
        let months = self.year as i64 * 12 + (self.month as i64 - 1);
        let mut y = months.div_euclid(12);
        let mut m = months.rem_euclid(12) + 1;

        // January and February count as months 13 and 14 of the previous year.
        if m <= 2 {
            y -= 1;
            m += 12;
        }

        let a = y.div_euclid(100);
        let b = 2 - a + a.div_euclid(4);

        let whole = (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor()
            + self.day as f64
            + b as f64
            - 1524.5;
        let fraction = self.day_fraction() - self.utc_offset_hours / 24.0;

        Time::<UT>::new(whole + fraction)
    }

    /// Convert to a UTC timestamp.
    ///
    /// Fails when the moment is not finite or outside chrono's range.
    pub fn to_utc_datetime(&self) -> Result<DateTime<Utc>, SkyError> {
        let jd = self.to_astronomical_time();
        let seconds = (jd.quantity() - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds.is_finite() {
            return Err(SkyError::DateOutOfRange(jd.value()));
        }
        let secs = seconds.floor();
        let nanos = ((seconds - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos)
            .ok_or(SkyError::DateOutOfRange(jd.value()))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CalendarMoment {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::from_datetime(&datetime)
    }
}

impl From<CalendarMoment> for Time<UT> {
    fn from(moment: CalendarMoment) -> Self {
        moment.to_astronomical_time()
    }
}

impl Time<UT> {
    /// Astronomical time of a calendar moment.
    #[inline]
    pub fn from_calendar(moment: &CalendarMoment) -> Self {
        moment.to_astronomical_time()
    }

    /// Add a wall-clock duration expressed in seconds.
    #[inline]
    pub fn add_seconds(self, seconds: Seconds) -> Self {
        self + seconds.to::<Day>()
    }

    /// Fraction of the UT day elapsed since midnight, in `[0, 1)`.
    #[inline]
    pub fn ut_day_fraction(&self) -> f64 {
        (self.quantity() - Days::new(0.5)).value().rem_euclid(1.0)
    }
}
