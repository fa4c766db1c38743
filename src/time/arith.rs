//! Checked arithmetic on time values
//!
//! Adding or subtracting a duration always yields a new value in the left
//! operand's zone; nothing is mutated. Seconds that would leave the
//! platform's range fail with an overflow error naming the operation.

use super::epoch::{EpochValue, MICROS_PER_SEC};
use super::numeric::{self, Precision};
use crate::error::{ArithOp, Result, TimeError};
use crate::value::Value;
use num_bigint::BigInt;

impl EpochValue {
    /// `self + duration`, where the duration is a host numeric of seconds.
    pub fn checked_add(&self, duration: &Value) -> Result<EpochValue> {
        let (secs, usec) = numeric::to_epoch(self.ctx.profile(), duration, Precision::Micros)?;
        self.add_duration(secs, usec)
    }

    /// `self - duration`, where the duration is a host numeric of seconds.
    pub fn checked_sub(&self, duration: &Value) -> Result<EpochValue> {
        let (secs, usec) = numeric::to_epoch(self.ctx.profile(), duration, Precision::Micros)?;
        self.sub_duration(secs, usec)
    }

    pub fn add_duration(&self, secs: i64, usec: i64) -> Result<EpochValue> {
        self.offset_by(secs, usec, ArithOp::Addition)
    }

    pub fn sub_duration(&self, secs: i64, usec: i64) -> Result<EpochValue> {
        self.offset_by(secs, usec, ArithOp::Subtraction)
    }

    fn offset_by(&self, secs: i64, usec: i64, op: ArithOp) -> Result<EpochValue> {
        let apply = |a: i64, b: i64| match op {
            ArithOp::Addition => a.checked_add(b),
            ArithOp::Subtraction => a.checked_sub(b),
        };
        let range = self.ctx.profile().seconds;
        let seconds = apply(self.seconds, secs)
            .filter(|s| range.contains(*s))
            .ok_or(TimeError::Overflow { op })?;
        let micros = apply(self.micros, usec).ok_or(TimeError::Overflow { op })?;
        EpochValue::from_seconds(&self.ctx, seconds, micros, self.zone)
    }

    /// Elapsed seconds from `other` to `self`.
    ///
    /// A float with the microsecond difference as its fraction when the host
    /// has floats; otherwise whole seconds, rounded toward negative infinity.
    pub fn difference(&self, other: &EpochValue) -> Result<Value> {
        // Micros are normalized, so only the seconds can leave i64.
        let secs = self.seconds as i128 - other.seconds as i128;
        let usec = self.micros - other.micros;
        let profile = self.ctx.profile();
        if profile.float {
            return Ok(Value::Float(secs as f64 + usec as f64 / MICROS_PER_SEC as f64));
        }
        let whole = if usec < 0 { secs - 1 } else { secs };
        match i64::try_from(whole) {
            Ok(whole) => numeric::to_value(profile, whole),
            Err(_) if profile.bigint => Ok(Value::BigInt(BigInt::from(whole))),
            Err(_) => Err(TimeError::Unrepresentable("Time too big".to_string())),
        }
    }
}
