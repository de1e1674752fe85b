mod measurement;
mod recurrence;
mod reminder_notification;
mod reminder_schedule;
mod shared;
mod timespan;

pub use measurement::Measurement;
pub use recurrence::{
    InvalidRecurrenceRuleError, InvalidTimeOfDayError, RecurrenceRule, TimeOfDay,
};
pub use reminder_notification::{
    InvalidStatusError, NotificationStatus, ReminderNotification, StateTransitionError,
};
pub use reminder_schedule::ReminderSchedule;
pub use shared::entity::{Entity, ID};
pub use timespan::{InvalidTimeSpanError, TimeSpan};
