//! Platform profile
//!
//! Describes the platform facts the time core depends on: the width of the
//! seconds counter, the host's default integer width, which host numeric
//! kinds exist, the clock resolution and what "local" means.
//!
//! ```toml
//! seconds = "i32"
//! integer = "i64"
//! bigint = false
//! float = true
//! clock = "nanos"
//! zone = "+09:00"
//! zone_name = "JST"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, TimeError};

/// Width of the canonical seconds counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondsWidth {
    I32,
    U32,
    I64,
}

impl SecondsWidth {
    pub fn min(self) -> i64 {
        match self {
            SecondsWidth::I32 => i32::MIN as i64,
            SecondsWidth::U32 => 0,
            SecondsWidth::I64 => i64::MIN,
        }
    }

    pub fn max(self) -> i64 {
        match self {
            SecondsWidth::I32 => i32::MAX as i64,
            SecondsWidth::U32 => u32::MAX as i64,
            SecondsWidth::I64 => i64::MAX,
        }
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, SecondsWidth::U32)
    }

    pub fn contains(self, secs: i64) -> bool {
        (self.min()..=self.max()).contains(&secs)
    }
}

/// Width of the host's default integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerWidth {
    I32,
    I64,
}

impl IntegerWidth {
    pub fn min(self) -> i64 {
        match self {
            IntegerWidth::I32 => i32::MIN as i64,
            IntegerWidth::I64 => i64::MIN,
        }
    }

    pub fn max(self) -> i64 {
        match self {
            IntegerWidth::I32 => i32::MAX as i64,
            IntegerWidth::I64 => i64::MAX,
        }
    }

    pub fn contains(self, i: i64) -> bool {
        (self.min()..=self.max()).contains(&i)
    }
}

/// Resolution of the system clock used by `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockResolution {
    Nanos,
    Seconds,
}

/// What the LOCAL zone resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalZone {
    /// The operating system's local zone
    System,
    /// A fixed offset east of UTC, in seconds
    Fixed(i32),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawProfile {
    seconds: SecondsWidth,
    integer: IntegerWidth,
    bigint: bool,
    float: bool,
    clock: ClockResolution,
    zone: String,
    zone_name: Option<String>,
}

impl Default for RawProfile {
    fn default() -> Self {
        RawProfile {
            seconds: SecondsWidth::I64,
            integer: IntegerWidth::I64,
            bigint: true,
            float: true,
            clock: ClockResolution::Nanos,
            zone: "system".to_string(),
            zone_name: None,
        }
    }
}

/// Platform profile the time core runs under
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub seconds: SecondsWidth,
    pub integer: IntegerWidth,
    pub bigint: bool,
    pub float: bool,
    pub clock: ClockResolution,
    pub zone: LocalZone,
    pub zone_name: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            seconds: SecondsWidth::I64,
            integer: IntegerWidth::I64,
            bigint: true,
            float: true,
            clock: ClockResolution::Nanos,
            zone: LocalZone::System,
            zone_name: None,
        }
    }
}

impl Profile {
    /// Parse a profile from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Profile> {
        let raw: RawProfile =
            toml::from_str(source).map_err(|e| TimeError::Config(e.to_string()))?;
        let zone = match raw.zone.as_str() {
            "system" | "local" => LocalZone::System,
            other => LocalZone::Fixed(parse_offset(other)?),
        };
        Ok(Profile {
            seconds: raw.seconds,
            integer: raw.integer,
            bigint: raw.bigint,
            float: raw.float,
            clock: raw.clock,
            zone,
            zone_name: raw.zone_name,
        })
    }

    /// Load a profile file.
    pub fn load(path: &Path) -> Result<Profile> {
        let source = fs::read_to_string(path).map_err(|e| {
            TimeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Profile::from_toml_str(&source)
    }

    /// Same profile with the LOCAL zone pinned to a fixed offset.
    pub fn with_fixed_zone(mut self, offset_secs: i32, name: Option<&str>) -> Profile {
        self.zone = LocalZone::Fixed(offset_secs);
        self.zone_name = name.map(str::to_string);
        self
    }

    pub fn with_seconds(mut self, seconds: SecondsWidth) -> Profile {
        self.seconds = seconds;
        self
    }

    pub fn with_integer(mut self, integer: IntegerWidth) -> Profile {
        self.integer = integer;
        self
    }

    pub fn with_bigint(mut self, bigint: bool) -> Profile {
        self.bigint = bigint;
        self
    }

    pub fn with_float(mut self, float: bool) -> Profile {
        self.float = float;
        self
    }

    pub fn with_clock(mut self, clock: ClockResolution) -> Profile {
        self.clock = clock;
        self
    }
}

/// Parse `+09:00`, `-0530`, `+9` or `UTC` into seconds east of UTC.
pub fn parse_offset(s: &str) -> Result<i32> {
    let bad = || TimeError::Config(format!("invalid zone offset '{}'", s));
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return Ok(0);
    }
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(bad()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().map_err(|_| bad())?, 0),
        3 | 4 => {
            let split = digits.len() - 2;
            (
                digits[..split].parse::<i32>().map_err(|_| bad())?,
                digits[split..].parse::<i32>().map_err(|_| bad())?,
            )
        }
        _ => return Err(bad()),
    };
    if hours > 23 || minutes > 59 {
        return Err(bad());
    }
    Ok(sign * (hours * 3600 + minutes * 60))
}
