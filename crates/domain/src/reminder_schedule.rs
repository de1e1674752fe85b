use crate::{
    recurrence::{RecurrenceRule, TimeOfDay},
    shared::entity::{Entity, ID},
};
use chrono_tz::Tz;

/// A user-authored rule for when a tracked variable should be logged:
/// a recurrence, the wall-clock time it fires at and the timezone that
/// time is interpreted in.
///
/// Expanding a schedule into concrete `ReminderNotification`s happens in
/// a store-side job; this crate only authors schedules and consumes the
/// notifications that job materializes.
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    pub id: ID,
    pub user_id: ID,
    pub variable_id: ID,
    pub recurrence: RecurrenceRule,
    pub time_of_day: TimeOfDay,
    pub timezone: Tz,
    /// Pre-filled value for the log form of notifications materialized
    /// from this schedule
    pub default_value: Option<f64>,
    pub active: bool,
    pub created: i64,
    pub updated: i64,
}

impl ReminderSchedule {
    pub fn new(
        user_id: ID,
        variable_id: ID,
        recurrence: RecurrenceRule,
        time_of_day: TimeOfDay,
        timezone: Tz,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            variable_id,
            recurrence,
            time_of_day,
            timezone,
            default_value: None,
            active: true,
            created: now,
            updated: now,
        }
    }
}

impl Entity for ReminderSchedule {
    fn id(&self) -> &ID {
        &self.id
    }
}
