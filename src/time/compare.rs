//! Ordering, equality and hashing
//!
//! Identity is `(seconds, microseconds)`. The zone and calendar are a view
//! of the instant and take no part in comparisons.

use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::calendar::Zone;
use super::epoch::EpochValue;

impl PartialEq for EpochValue {
    fn eq(&self, other: &Self) -> bool {
        self.seconds == other.seconds && self.micros == other.micros
    }
}

impl Eq for EpochValue {}

impl PartialOrd for EpochValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EpochValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.seconds, self.micros).cmp(&(other.seconds, other.micros))
    }
}

impl Hash for EpochValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seconds.hash(state);
        self.micros.hash(state);
    }
}

impl EpochValue {
    /// `<=>`: -1, 0 or 1.
    pub fn compare(&self, other: &EpochValue) -> i64 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Host-visible hash code over the seconds, microseconds and zone bytes.
    ///
    /// Unlike the `Hash` impl this includes the zone, so the same instant
    /// viewed in UTC and in local time hashes differently.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(&self.seconds.to_ne_bytes());
        hasher.write(&self.micros.to_ne_bytes());
        hasher.write_u8(match self.zone {
            Zone::Utc => 1,
            Zone::Local => 2,
        });
        hasher.finish()
    }
}
