//! String forms of a time value
//!
//! Everything here reads the cached calendar; nothing re-projects.

use std::fmt;

use super::calendar::Zone;
use super::epoch::EpochValue;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// At least four digits, sign in front.
fn pad_year(year: i64) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    }
}

/// `+HHMM` / `-HHMM` for an offset in seconds east of UTC.
pub fn offset_designator(offset: i64) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.unsigned_abs() / 60;
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}

impl EpochValue {
    /// `"UTC"`, or the local zone's designator: its fixed abbreviation when
    /// it has one, otherwise `±HHMM` from the cached calendar.
    pub fn zone_name(&self) -> String {
        match self.zone {
            Zone::Utc => "UTC".to_string(),
            Zone::Local => match self.ctx.converter().zone_name() {
                Some(name) => name.to_string(),
                None => offset_designator(self.wall_offset()),
            },
        }
    }

    /// `Www Mmm DD HH:MM:SS YYYY`, day of month space-padded.
    pub fn asctime(&self) -> String {
        let cal = &self.calendar;
        format!(
            "{} {} {:2} {:02}:{:02}:{:02} {}",
            WEEKDAY_NAMES[cal.weekday as usize % 7],
            MONTH_NAMES[(cal.month as usize + 11) % 12],
            cal.day,
            cal.hour,
            cal.minute,
            cal.second,
            pad_year(cal.year)
        )
    }
}

/// `YYYY-MM-DD HH:MM:SS ZONE`
impl fmt::Display for EpochValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cal = &self.calendar;
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02} {}",
            pad_year(cal.year),
            cal.month,
            cal.day,
            cal.hour,
            cal.minute,
            cal.second,
            self.zone_name()
        )
    }
}
