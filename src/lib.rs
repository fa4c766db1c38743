//! Epochtime
//!
//! Point-in-time values with microsecond precision, a UTC or local display
//! zone, overflow-checked arithmetic, calendar projection and formatting.

pub mod config;
pub mod error;
pub mod object;
pub mod time;
pub mod value;

pub use config::Profile;
pub use error::{ArithOp, Result, TimeError};
pub use object::TimeObject;
pub use time::{Calendar, EpochValue, TimeContext, TimeFields, Zone};
pub use value::Value;
