//! Calendar projection
//!
//! Turns canonical seconds into broken-down calendar fields and back, for
//! either UTC or the local zone. The projection itself is delegated to a
//! [`CalendarConverter`]; every result is copied out into an owned
//! [`Calendar`] before the caller sees it.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset,
    TimeZone, Timelike,
};
use serde::Serialize;
use std::fmt;
use tracing::trace;

use crate::config::{LocalZone, Profile};
use crate::error::{Result, TimeError};

/// Timezone interpretation of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Utc,
    Local,
}

/// Broken-down calendar fields of an instant under a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Calendar {
    pub year: i64,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    /// 0-23
    pub hour: u32,
    /// 0-59
    pub minute: u32,
    /// 0-60
    pub second: u32,
    /// 0 = Sunday
    pub weekday: u32,
    /// 1-based day of the year
    pub yearday: u32,
    pub is_dst: bool,
    /// Seconds east of UTC
    pub utc_offset: i32,
}

impl Calendar {
    /// The wall-clock reading of these fields, counted as if it were UTC.
    pub fn wall_seconds(&self) -> Option<i64> {
        timegm(&WallClock {
            year: self.year,
            month: self.month as i64,
            day: self.day as i64,
            hour: self.hour as i64,
            minute: self.minute as i64,
            second: self.second as i64,
        })
    }
}

/// Calendar fields as supplied by a caller, before normalization.
///
/// Out-of-range days, hours and seconds roll over into the next unit the
/// way C `timegm` does (February 31 is March 2 or 3, hour 24 is midnight of
/// the next day, second 60 is the next minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

/// Days since 1970-01-01 of the first of `month` in `year` (proleptic Gregorian).
fn days_from_civil(year: i64, month: i64) -> Option<i64> {
    let y = if month <= 2 { year.checked_sub(1)? } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era.checked_mul(146_097)?.checked_add(doe - 719_468)
}

/// Seconds since the epoch of a UTC wall-clock reading. `month` must be 1-12.
pub fn timegm(wall: &WallClock) -> Option<i64> {
    if !(1..=12).contains(&wall.month) {
        return None;
    }
    let days = days_from_civil(wall.year, wall.month)?.checked_add(wall.day.checked_sub(1)?)?;
    days.checked_mul(86_400)?
        .checked_add(wall.hour.checked_mul(3_600)?)?
        .checked_add(wall.minute.checked_mul(60)?)?
        .checked_add(wall.second)
}

/// Platform calendar conversion: the gmtime/localtime and timegm/mktime pair.
pub trait CalendarConverter: fmt::Debug + Send + Sync {
    /// Project `seconds` into calendar fields. `None` when the instant lies
    /// outside what the platform can represent.
    fn to_calendar(&self, seconds: i64, zone: Zone) -> Option<Calendar>;

    /// Resolve a normalized wall-clock reading (see [`timegm`]) in `zone`
    /// back to canonical seconds.
    fn to_seconds(&self, wall: i64, zone: Zone) -> Option<i64>;

    /// Fixed abbreviation for the local zone, if it has one. Zones whose
    /// designator varies with the instant return `None` and are named from
    /// the projected offset.
    fn zone_name(&self) -> Option<&str> {
        None
    }
}

/// Build the converter a profile asks for.
pub fn converter_for(profile: &Profile) -> Result<Box<dyn CalendarConverter>> {
    match profile.zone {
        LocalZone::System => Ok(Box::new(SystemCalendar)),
        LocalZone::Fixed(offset) => FixedOffsetCalendar::new(offset, profile.zone_name.clone())
            .map(|cal| Box::new(cal) as Box<dyn CalendarConverter>)
            .ok_or_else(|| TimeError::Config(format!("zone offset {}s out of range", offset))),
    }
}

fn project<Tz: TimeZone>(dt: &DateTime<Tz>, is_dst: bool) -> Calendar {
    Calendar {
        year: dt.year() as i64,
        month: dt.month(),
        day: dt.day(),
        hour: dt.hour(),
        minute: dt.minute(),
        second: dt.second(),
        weekday: dt.weekday().num_days_from_sunday(),
        yearday: dt.ordinal(),
        is_dst,
        utc_offset: dt.offset().fix().local_minus_utc(),
    }
}

fn utc_datetime(seconds: i64) -> Option<DateTime<chrono::Utc>> {
    let dt = DateTime::from_timestamp(seconds, 0);
    if dt.is_none() {
        trace!(seconds, "instant outside calendar range");
    }
    dt
}

fn naive_wall(wall: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(wall, 0).map(|dt| dt.naive_utc())
}

/// The zone's standard offset for `year`: the smaller of its January and
/// July offsets, so whichever half of the year observes DST is excluded.
fn standard_offset<Tz: TimeZone>(tz: &Tz, year: i32) -> Option<i32> {
    let at = |month| -> Option<i32> {
        let naive = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
        Some(tz.offset_from_utc_datetime(&naive).fix().local_minus_utc())
    };
    Some(at(1)?.min(at(7)?))
}

/// Operating-system calendar: chrono's `Utc` and `Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl CalendarConverter for SystemCalendar {
    fn to_calendar(&self, seconds: i64, zone: Zone) -> Option<Calendar> {
        let utc = utc_datetime(seconds)?;
        match zone {
            Zone::Utc => Some(project(&utc, false)),
            Zone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().local_minus_utc();
                let is_dst = standard_offset(&Local, local.year())
                    .map(|std| std != offset)
                    .unwrap_or(false);
                Some(project(&local, is_dst))
            }
        }
    }

    fn to_seconds(&self, wall: i64, zone: Zone) -> Option<i64> {
        match zone {
            Zone::Utc => Some(wall),
            Zone::Local => {
                let naive = naive_wall(wall)?;
                match Local.from_local_datetime(&naive) {
                    LocalResult::Single(dt) => Some(dt.timestamp()),
                    LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
                    // Skipped by a forward transition: shift by the offset at the same reading taken as UTC.
                    LocalResult::None => {
                        let offset = Local.offset_from_utc_datetime(&naive).local_minus_utc();
                        wall.checked_sub(offset as i64)
                    }
                }
            }
        }
    }
}

/// A local zone pinned to a fixed offset, optionally with an abbreviation.
#[derive(Debug, Clone)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
    name: Option<String>,
}

impl FixedOffsetCalendar {
    /// `None` if the offset is a day or more.
    pub fn new(offset_secs: i32, name: Option<String>) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_secs)?;
        Some(FixedOffsetCalendar { offset, name })
    }
}

impl CalendarConverter for FixedOffsetCalendar {
    fn to_calendar(&self, seconds: i64, zone: Zone) -> Option<Calendar> {
        let utc = utc_datetime(seconds)?;
        match zone {
            Zone::Utc => Some(project(&utc, false)),
            Zone::Local => Some(project(&utc.with_timezone(&self.offset), false)),
        }
    }

    fn to_seconds(&self, wall: i64, zone: Zone) -> Option<i64> {
        match zone {
            Zone::Utc => Some(wall),
            Zone::Local => wall.checked_sub(self.offset.local_minus_utc() as i64),
        }
    }

    fn zone_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wall(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> WallClock {
        WallClock { year, month, day, hour, minute, second }
    }

    #[test]
    fn test_timegm_epoch() {
        assert_eq!(timegm(&wall(1970, 1, 1, 0, 0, 0)), Some(0));
        assert_eq!(timegm(&wall(1969, 12, 31, 23, 59, 59)), Some(-1));
        assert_eq!(timegm(&wall(2001, 9, 9, 1, 46, 40)), Some(1_000_000_000));
        assert_eq!(timegm(&wall(2038, 1, 19, 3, 14, 7)), Some(i32::MAX as i64));
    }

    #[test]
    fn test_timegm_normalizes_like_c() {
        // February 31st of a non-leap year is March 3rd
        assert_eq!(timegm(&wall(2023, 2, 31, 0, 0, 0)), timegm(&wall(2023, 3, 3, 0, 0, 0)));
        assert_eq!(timegm(&wall(2024, 2, 31, 0, 0, 0)), timegm(&wall(2024, 3, 2, 0, 0, 0)));
        assert_eq!(timegm(&wall(2000, 1, 1, 24, 0, 0)), timegm(&wall(2000, 1, 2, 0, 0, 0)));
        assert_eq!(timegm(&wall(2016, 12, 31, 23, 59, 60)), timegm(&wall(2017, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_timegm_rejects_bad_month() {
        assert_eq!(timegm(&wall(2000, 13, 1, 0, 0, 0)), None);
        assert_eq!(timegm(&wall(2000, 0, 1, 0, 0, 0)), None);
    }

    #[test]
    fn test_timegm_extreme_fields_fail_without_panicking() {
        assert_eq!(timegm(&wall(2000, 1, i64::MIN, 0, 0, 0)), None);
        assert_eq!(timegm(&wall(2000, 1, i64::MAX, 0, 0, 0)), None);
        assert_eq!(timegm(&wall(i64::MIN, 1, 1, 0, 0, 0)), None);
        assert_eq!(timegm(&wall(2000, 1, 1, i64::MAX, 0, 0)), None);
        assert_eq!(timegm(&wall(2000, 1, 1, 0, 0, i64::MIN)), None);
    }

    #[test]
    fn test_utc_projection() {
        let cal = SystemCalendar.to_calendar(1_000_000_000, Zone::Utc).unwrap();
        assert_eq!(
            cal,
            Calendar {
                year: 2001,
                month: 9,
                day: 9,
                hour: 1,
                minute: 46,
                second: 40,
                weekday: 0,
                yearday: 252,
                is_dst: false,
                utc_offset: 0,
            }
        );
        assert_eq!(cal.wall_seconds(), Some(1_000_000_000));
    }

    #[test]
    fn test_projection_out_of_range() {
        assert_eq!(SystemCalendar.to_calendar(i64::MAX, Zone::Utc), None);
        assert_eq!(SystemCalendar.to_calendar(i64::MIN, Zone::Local), None);
    }

    #[test]
    fn test_fixed_offset_projection() {
        let cal = FixedOffsetCalendar::new(9 * 3600, Some("JST".to_string())).unwrap();
        let local = cal.to_calendar(0, Zone::Local).unwrap();
        assert_eq!((local.year, local.month, local.day, local.hour), (1970, 1, 1, 9));
        assert_eq!(local.utc_offset, 32400);
        assert_eq!(local.weekday, 4);
        assert_eq!(cal.to_seconds(local.wall_seconds().unwrap(), Zone::Local), Some(0));
        assert_eq!(cal.zone_name(), Some("JST"));
        assert_eq!(SystemCalendar.zone_name(), None);
    }

    #[test]
    fn test_fixed_offset_rejects_full_day() {
        assert!(FixedOffsetCalendar::new(86_400, None).is_none());
    }

    #[test]
    fn test_system_local_round_trip() {
        let secs = 1_234_567_890;
        let cal = SystemCalendar.to_calendar(secs, Zone::Local).unwrap();
        let wall = cal.wall_seconds().unwrap();
        assert_eq!(wall - secs, cal.utc_offset as i64);
    }
}
