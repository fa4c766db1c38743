//! Point-in-time values
//!
//! - `numeric`: host numbers to canonical seconds and back
//! - `epoch`: the canonical value and its constructors
//! - `calendar`: seconds to calendar fields, UTC or local
//! - `arith`: checked addition, subtraction and differences
//! - `compare`: ordering, equality and hash codes
//! - `format`: canonical, asctime and zone strings

pub mod arith;
pub mod calendar;
pub mod clock;
pub mod compare;
pub mod context;
pub mod epoch;
pub mod format;
pub mod numeric;

pub use calendar::{Calendar, CalendarConverter, FixedOffsetCalendar, SystemCalendar, Zone};
pub use context::TimeContext;
pub use epoch::{EpochValue, TimeFields};
