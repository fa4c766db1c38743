//! Host object wrapper
//!
//! A host that allocates an object before running its initializer can
//! observe a time slot with no value in it. [`TimeObject`] models that slot
//! together with the class it was allocated as, so that:
//!
//! - reading an empty slot is an `Uninitialized` error instead of garbage,
//! - copy-initialization checks both sides are the same class,
//! - arithmetic results keep the receiver's class.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{Result, TimeError};
use crate::time::{EpochValue, TimeContext, TimeFields};
use crate::value::Value;

pub const TIME_CLASS: &str = "Time";

/// Right-hand side of `-`
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Time(&'a TimeObject),
    Number(&'a Value),
}

/// Result of `-`: another time, or the elapsed seconds between two times
#[derive(Debug, Clone)]
pub enum Difference {
    Time(TimeObject),
    Elapsed(Value),
}

#[derive(Debug, Clone)]
pub struct TimeObject {
    class: Arc<str>,
    value: Option<EpochValue>,
}

impl TimeObject {
    /// An allocated but not yet initialized slot.
    pub fn allocate(class: &str) -> TimeObject {
        TimeObject { class: Arc::from(class), value: None }
    }

    pub fn new(value: EpochValue) -> TimeObject {
        TimeObject::with_class(TIME_CLASS, value)
    }

    pub fn with_class(class: &str, value: EpochValue) -> TimeObject {
        TimeObject { class: Arc::from(class), value: Some(value) }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Result<&EpochValue> {
        self.value.as_ref().ok_or(TimeError::Uninitialized)
    }

    pub fn get_mut(&mut self) -> Result<&mut EpochValue> {
        self.value.as_mut().ok_or(TimeError::Uninitialized)
    }

    /// `initialize`: with no fields the current time, otherwise local fields.
    /// Replaces whatever the slot held.
    pub fn initialize(&mut self, ctx: &Arc<TimeContext>, fields: Option<&TimeFields>) -> Result<()> {
        self.value = None;
        let value = match fields {
            None => EpochValue::now(ctx)?,
            Some(fields) => EpochValue::local(ctx, fields)?,
        };
        self.value = Some(value);
        Ok(())
    }

    /// `initialize_copy`: take over `src`'s value. Both must be the same class
    /// and `src` must be initialized.
    pub fn initialize_copy(&mut self, src: &TimeObject) -> Result<()> {
        if self.class != src.class {
            return Err(TimeError::IdentityMismatch {
                expected: self.class.to_string(),
                found: src.class.to_string(),
            });
        }
        let value = src.get()?;
        match self.value.as_mut() {
            Some(existing) => existing.clone_from(value),
            None => self.value = Some(value.clone()),
        }
        Ok(())
    }

    fn rewrap(&self, value: EpochValue) -> TimeObject {
        TimeObject { class: Arc::clone(&self.class), value: Some(value) }
    }

    /// `+`
    pub fn add(&self, duration: &Value) -> Result<TimeObject> {
        let sum = self.get()?.checked_add(duration)?;
        Ok(self.rewrap(sum))
    }

    /// `-`
    pub fn sub(&self, rhs: Operand<'_>) -> Result<Difference> {
        let lhs = self.get()?;
        match rhs {
            Operand::Time(other) => Ok(Difference::Elapsed(lhs.difference(other.get()?)?)),
            Operand::Number(duration) => Ok(Difference::Time(self.rewrap(lhs.checked_sub(duration)?))),
        }
    }

    /// `==`: false unless both sides are initialized and hold the same instant.
    pub fn equals(&self, other: &TimeObject) -> bool {
        matches!((&self.value, &other.value), (Some(a), Some(b)) if a == b)
    }

    /// `<=>`: `None` when either side is uninitialized.
    pub fn compare(&self, other: &TimeObject) -> Option<Ordering> {
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// `utc` / `gmtime`
    pub fn utc(&mut self) -> Result<&mut TimeObject> {
        self.get_mut()?.to_utc()?;
        Ok(self)
    }

    /// `localtime`
    pub fn localtime(&mut self) -> Result<&mut TimeObject> {
        self.get_mut()?.to_local()?;
        Ok(self)
    }

    /// `getutc` / `getgm`
    pub fn getutc(&self) -> Result<TimeObject> {
        Ok(self.rewrap(self.get()?.getutc()?))
    }

    /// `getlocal`
    pub fn getlocal(&self) -> Result<TimeObject> {
        Ok(self.rewrap(self.get()?.getlocal()?))
    }
}
