//! The canonical time value
//!
//! An [`EpochValue`] is `(seconds, microseconds, zone)` plus a calendar
//! projection derived from them. Microseconds are always normalized into
//! `0..1_000_000` and the calendar is recomputed before any change to the
//! seconds or zone becomes visible.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::calendar::{timegm, Calendar, WallClock, Zone};
use super::clock;
use super::context::TimeContext;
use super::numeric;
use crate::config::Profile;
use crate::error::{Result, TimeError};
use crate::value::Value;

pub const MICROS_PER_SEC: i64 = 1_000_000;

/// Calendar fields for constructing a time. Omitted trailing fields default
/// to January 1st, 00:00:00.000000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub usec: i64,
}

impl TimeFields {
    pub fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, usec: i64) -> Self {
        TimeFields { year, month, day, hour, minute, second, usec }
    }

    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        TimeFields::new(year, month, day, 0, 0, 0, 0)
    }

    /// Build from a year followed by up to six more fields in order.
    pub fn from_slice(parts: &[i64]) -> Option<Self> {
        let (&year, rest) = parts.split_first()?;
        if rest.len() > 6 {
            return None;
        }
        let at = |i: usize, default: i64| rest.get(i).copied().unwrap_or(default);
        Some(TimeFields::new(year, at(0, 1), at(1, 1), at(2, 0), at(3, 0), at(4, 0), at(5, 0)))
    }

    fn validate(&self, profile: &Profile) -> Result<()> {
        let year_floor = if profile.seconds.is_unsigned() { 0 } else { i32::MIN as i64 };
        let tm_year = self.year.checked_sub(1900);
        let in_range = matches!(tm_year, Some(y) if (year_floor..=i32::MAX as i64).contains(&y))
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && (0..=24).contains(&self.hour)
            && !(self.hour == 24 && (self.minute > 0 || self.second > 0))
            && (0..=59).contains(&self.minute)
            && (0..=60).contains(&self.second);
        if in_range {
            Ok(())
        } else {
            Err(TimeError::Range("argument out of range".to_string()))
        }
    }

    fn wall(&self, second: i64) -> WallClock {
        WallClock {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second,
        }
    }
}

/// A point in time with microsecond precision and a display zone
#[derive(Clone)]
pub struct EpochValue {
    pub(super) seconds: i64,
    pub(super) micros: i64,
    pub(super) zone: Zone,
    pub(super) calendar: Calendar,
    pub(super) ctx: Arc<TimeContext>,
}

/// Carry whole seconds out of `usec` so the remainder lies in `0..1_000_000`.
pub fn normalize(seconds: i64, usec: i64) -> Option<(i64, i64)> {
    let carry = usec.div_euclid(MICROS_PER_SEC);
    Some((seconds.checked_add(carry)?, usec.rem_euclid(MICROS_PER_SEC)))
}

impl EpochValue {
    /// Construct from seconds and a possibly unnormalized microsecond count.
    pub fn from_seconds(ctx: &Arc<TimeContext>, seconds: i64, usec: i64, zone: Zone) -> Result<EpochValue> {
        let (seconds, micros) =
            normalize(seconds, usec).ok_or_else(|| TimeError::out_of_range(seconds))?;
        let calendar = project(ctx, seconds, zone)?;
        Ok(EpochValue { seconds, micros, zone, calendar, ctx: Arc::clone(ctx) })
    }

    /// `Time.at`: host numeric seconds, optional extra microseconds, LOCAL zone.
    pub fn at(ctx: &Arc<TimeContext>, sec: &Value, usec: Option<&Value>) -> Result<EpochValue> {
        let (seconds, micros) = numeric::to_epoch_pair(ctx.profile(), sec, usec)?;
        EpochValue::from_seconds(ctx, seconds, micros, Zone::Local)
    }

    /// The current time in the LOCAL zone.
    pub fn now(ctx: &Arc<TimeContext>) -> Result<EpochValue> {
        let (seconds, micros) = clock::read(ctx.profile().clock);
        EpochValue::from_seconds(ctx, seconds, micros, Zone::Local)
    }

    /// Construct from calendar fields read in `zone`.
    pub fn from_fields(ctx: &Arc<TimeContext>, fields: &TimeFields, zone: Zone) -> Result<EpochValue> {
        fields.validate(ctx.profile())?;
        let seconds = match resolve_wall(ctx, fields, fields.second, zone) {
            Some(secs) => secs,
            // A converter reporting failure through the -1 sentinel can't be
            // told apart from one second before the epoch; step a second
            // forward and accept the original if that lands on the epoch.
            None => match resolve_wall(ctx, fields, fields.second + 1, zone) {
                Some(0) => -1,
                _ => return Err(TimeError::Range("Not a valid time".to_string())),
            },
        };
        EpochValue::from_seconds(ctx, seconds, fields.usec, zone)
    }

    /// `Time.gm` / `Time.utc`
    pub fn gm(ctx: &Arc<TimeContext>, fields: &TimeFields) -> Result<EpochValue> {
        EpochValue::from_fields(ctx, fields, Zone::Utc)
    }

    /// `Time.local` / `Time.mktime`
    pub fn local(ctx: &Arc<TimeContext>, fields: &TimeFields) -> Result<EpochValue> {
        EpochValue::from_fields(ctx, fields, Zone::Local)
    }

    pub fn context(&self) -> &Arc<TimeContext> {
        &self.ctx
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn microseconds(&self) -> i64 {
        self.micros
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn is_utc(&self) -> bool {
        self.zone == Zone::Utc
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn year(&self) -> i64 {
        self.calendar.year
    }

    pub fn month(&self) -> u32 {
        self.calendar.month
    }

    pub fn day(&self) -> u32 {
        self.calendar.day
    }

    pub fn hour(&self) -> u32 {
        self.calendar.hour
    }

    pub fn minute(&self) -> u32 {
        self.calendar.minute
    }

    pub fn second(&self) -> u32 {
        self.calendar.second
    }

    /// 0 = Sunday
    pub fn weekday(&self) -> u32 {
        self.calendar.weekday
    }

    /// 1-based
    pub fn yearday(&self) -> u32 {
        self.calendar.yearday
    }

    pub fn is_dst(&self) -> bool {
        self.calendar.is_dst
    }

    /// Seconds east of UTC under the current zone.
    pub fn utc_offset(&self) -> i32 {
        self.calendar.utc_offset
    }

    /// Seconds since the epoch as a host value.
    pub fn to_i(&self) -> Result<Value> {
        numeric::to_value(self.ctx.profile(), self.seconds)
    }

    /// Seconds since the epoch, including the fraction, as a host float.
    pub fn to_f(&self) -> Result<Value> {
        numeric::to_fractional_value(self.ctx.profile(), self.seconds, self.micros)
    }

    /// Switch to UTC in place.
    pub fn to_utc(&mut self) -> Result<()> {
        self.set_zone(Zone::Utc)
    }

    /// Switch to the local zone in place.
    pub fn to_local(&mut self) -> Result<()> {
        self.set_zone(Zone::Local)
    }

    /// Copy of this instant in UTC.
    pub fn getutc(&self) -> Result<EpochValue> {
        let mut copy = self.clone();
        copy.to_utc()?;
        Ok(copy)
    }

    /// Copy of this instant in the local zone.
    pub fn getlocal(&self) -> Result<EpochValue> {
        let mut copy = self.clone();
        copy.to_local()?;
        Ok(copy)
    }

    fn set_zone(&mut self, zone: Zone) -> Result<()> {
        let calendar = project(&self.ctx, self.seconds, zone)?;
        debug!(seconds = self.seconds, ?zone, "zone switched");
        self.zone = zone;
        self.calendar = calendar;
        Ok(())
    }

    /// The wall-clock offset the calendar implies: local reading minus UTC.
    pub(super) fn wall_offset(&self) -> i64 {
        self.calendar
            .wall_seconds()
            .map(|wall| wall - self.seconds)
            .unwrap_or(self.calendar.utc_offset as i64)
    }
}

macro_rules! weekday_predicates {
    ($($name:ident => $wday:expr),* $(,)?) => {
        impl EpochValue {
            $(
                pub fn $name(&self) -> bool {
                    self.calendar.weekday == $wday
                }
            )*
        }
    };
}

weekday_predicates! {
    is_sunday => 0,
    is_monday => 1,
    is_tuesday => 2,
    is_wednesday => 3,
    is_thursday => 4,
    is_friday => 5,
    is_saturday => 6,
}

impl fmt::Debug for EpochValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpochValue")
            .field("seconds", &self.seconds)
            .field("micros", &self.micros)
            .field("zone", &self.zone)
            .field("calendar", &self.calendar)
            .finish()
    }
}

/// Range-check `seconds` and project it, failing rather than producing a
/// value whose calendar is missing.
fn project(ctx: &TimeContext, seconds: i64, zone: Zone) -> Result<Calendar> {
    if !ctx.profile().seconds.contains(seconds) {
        debug!(seconds, "seconds outside platform range");
        return Err(TimeError::out_of_range(seconds));
    }
    ctx.converter()
        .to_calendar(seconds, zone)
        .ok_or_else(|| TimeError::out_of_range(seconds))
}

fn resolve_wall(ctx: &TimeContext, fields: &TimeFields, second: i64, zone: Zone) -> Option<i64> {
    let wall = timegm(&fields.wall(second))?;
    ctx.converter().to_seconds(wall, zone)
}
