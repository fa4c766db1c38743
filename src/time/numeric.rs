//! Host numeric <-> canonical seconds conversion
//!
//! Each numeric kind has its own range check and rounding rule:
//!
//! - `Int` must lie inside the profile's seconds range.
//! - `Float` must be finite and stay one unit clear of the range ends, so
//!   rounding can never land on an unrepresentable value. With microsecond
//!   precision it is split into `floor` seconds plus truncated microseconds,
//!   otherwise it is rounded to the nearest second.
//! - `BigInt` is narrowed to the native seconds width and then checked like
//!   an `Int`.

use num_bigint::BigInt;
use tracing::debug;

use crate::config::Profile;
use crate::error::{Result, TimeError};
use crate::value::Value;

/// How much of a float's fraction to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Round to the nearest whole second
    Seconds,
    /// Keep the fraction as microseconds
    Micros,
}

/// Convert a host value into `(seconds, microseconds)`.
pub fn to_epoch(profile: &Profile, value: &Value, precision: Precision) -> Result<(i64, i64)> {
    match value {
        Value::Int(i) => int_to_epoch(profile, *i, value),
        Value::Float(f) if profile.float => float_to_epoch(profile, *f, precision, value),
        Value::BigInt(b) if profile.bigint => {
            let narrowed = bigint_to_i64(profile, b).ok_or_else(|| reject(value))?;
            int_to_epoch(profile, narrowed, value)
        }
        other => Err(TimeError::TypeMismatch(other.to_string())),
    }
}

/// Convert a seconds value plus an optional microseconds value, as in
/// `at(sec, usec)`. The microsecond argument is rounded to whole units and
/// added to whatever fraction `sec` carried.
pub fn to_epoch_pair(profile: &Profile, sec: &Value, usec: Option<&Value>) -> Result<(i64, i64)> {
    let (secs, frac) = to_epoch(profile, sec, Precision::Micros)?;
    let Some(usec) = usec else {
        return Ok((secs, frac));
    };
    let (extra, _) = to_epoch(profile, usec, Precision::Seconds)?;
    let micros = frac.checked_add(extra).ok_or_else(|| reject(usec))?;
    Ok((secs, micros))
}

/// Express canonical seconds as a host value: an `Int` when it fits the
/// host integer, else a `BigInt`, else a `Float`.
pub fn to_value(profile: &Profile, secs: i64) -> Result<Value> {
    if profile.integer.contains(secs) {
        Ok(Value::Int(secs))
    } else if profile.bigint {
        Ok(Value::BigInt(BigInt::from(secs)))
    } else if profile.float {
        Ok(Value::Float(secs as f64))
    } else {
        Err(TimeError::Unrepresentable("Time too big".to_string()))
    }
}

/// Seconds plus the microsecond fraction as a host float.
pub fn to_fractional_value(profile: &Profile, secs: i64, usec: i64) -> Result<Value> {
    if !profile.float {
        return Err(TimeError::Unrepresentable(
            "no floating point support for fractional seconds".to_string(),
        ));
    }
    Ok(Value::Float(secs as f64 + usec as f64 / 1.0e6))
}

fn reject(value: &Value) -> TimeError {
    debug!(%value, "numeric value outside time range");
    TimeError::out_of_range(value)
}

fn int_to_epoch(profile: &Profile, i: i64, original: &Value) -> Result<(i64, i64)> {
    if !profile.seconds.contains(i) {
        return Err(reject(original));
    }
    Ok((i, 0))
}

fn float_to_epoch(profile: &Profile, f: f64, precision: Precision, original: &Value) -> Result<(i64, i64)> {
    if !f.is_finite() {
        return Err(reject(original));
    }
    let max = profile.seconds.max() as f64 - 1.0;
    let min = profile.seconds.min() as f64 + 1.0;
    if f >= max || f < min {
        return Err(reject(original));
    }
    match precision {
        Precision::Micros => {
            let whole = f.floor();
            let usec = ((f - whole) * 1.0e6).trunc() as i64;
            Ok((whole as i64, usec))
        }
        Precision::Seconds => Ok((f.round() as i64, 0)),
    }
}

/// Narrow a big integer. When the native seconds counter is no wider than
/// the host integer, the value must first fit the host integer.
fn bigint_to_i64(profile: &Profile, b: &BigInt) -> Option<i64> {
    let narrowed = i64::try_from(b).ok()?;
    let native_is_wider = profile.seconds.max() > profile.integer.max()
        || profile.seconds.min() < profile.integer.min();
    if native_is_wider || profile.integer.contains(narrowed) {
        Some(narrowed)
    } else {
        None
    }
}
