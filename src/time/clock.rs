//! System clock reading for `now`

use chrono::Utc;
use std::sync::Mutex;

use crate::config::ClockResolution;

lazy_static::lazy_static! {
    // Last (seconds, tie-breaker) handed out by the second-resolution clock
    static ref LAST_TICK: Mutex<(i64, i64)> = Mutex::new((0, 0));
}

/// Read the wall clock as `(seconds, microseconds)` since the epoch.
///
/// With `Seconds` resolution there is no fractional part to read, so
/// successive readings within the same second get increasing microsecond
/// values to keep them distinct and ordered.
pub fn read(resolution: ClockResolution) -> (i64, i64) {
    let now = Utc::now();
    match resolution {
        ClockResolution::Nanos => (now.timestamp(), now.timestamp_subsec_micros() as i64),
        ClockResolution::Seconds => {
            let mut last = LAST_TICK.lock().unwrap_or_else(|e| e.into_inner());
            tick(&mut last, now.timestamp())
        }
    }
}

fn tick(last: &mut (i64, i64), secs: i64) -> (i64, i64) {
    if last.0 == secs {
        last.1 += 1;
    } else {
        *last = (secs, 0);
    }
    *last
}
