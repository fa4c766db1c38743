//! Shared configuration every time value is bound to

use std::sync::Arc;
use tracing::debug;

use super::calendar::{converter_for, CalendarConverter, SystemCalendar};
use crate::config::Profile;
use crate::error::Result;

/// Platform profile plus the calendar converter that implements it.
///
/// Contexts are immutable once built and shared through an `Arc`; each
/// [`EpochValue`](super::EpochValue) keeps a handle so in-place zone
/// switches and arithmetic re-derive calendars the same way the value was
/// constructed.
#[derive(Debug)]
pub struct TimeContext {
    profile: Profile,
    converter: Box<dyn CalendarConverter>,
}

impl TimeContext {
    /// Build a context for `profile`, choosing the converter its zone asks for.
    pub fn new(profile: Profile) -> Result<Arc<TimeContext>> {
        let converter = converter_for(&profile)?;
        debug!(?profile, "time context created");
        Ok(Arc::new(TimeContext { profile, converter }))
    }

    pub fn with_converter(profile: Profile, converter: Box<dyn CalendarConverter>) -> Arc<TimeContext> {
        Arc::new(TimeContext { profile, converter })
    }

    /// Default profile against the operating-system calendar.
    pub fn system() -> Arc<TimeContext> {
        TimeContext::with_converter(Profile::default(), Box::new(SystemCalendar))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn converter(&self) -> &dyn CalendarConverter {
        self.converter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalZone;
    use crate::time::calendar::Zone;

    #[test]
    fn test_fixed_zone_profile_selects_fixed_converter() {
        let ctx = TimeContext::new(Profile::default().with_fixed_zone(3600, Some("CET"))).unwrap();
        assert_eq!(ctx.profile().zone, LocalZone::Fixed(3600));
        assert_eq!(ctx.converter().zone_name(), Some("CET"));
        assert_eq!(ctx.converter().to_calendar(0, Zone::Local).unwrap().hour, 1);
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let profile = Profile::default().with_fixed_zone(90_000, None);
        assert!(TimeContext::new(profile).is_err());
    }
}
