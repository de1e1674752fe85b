use crate::{
    reminder_schedule::ReminderSchedule,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Completed,
    Skipped,
}

impl Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", status)
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Notification status: `{0}` is not recognized")]
    Malformed(String),
}

impl FromStr for NotificationStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(InvalidStatusError::Malformed(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum StateTransitionError {
    #[error("Notification is {current} and cannot transition to {requested}")]
    Illegal {
        current: NotificationStatus,
        requested: NotificationStatus,
    },
}

/// A single due occurrence of a `ReminderSchedule`.
///
/// Rows are materialized by a store-side job and only ever change status
/// here: pending -> completed (with a logged value) or pending -> skipped,
/// and either of those back to pending through `undo`. The variable
/// display fields are denormalized onto the row so an inbox can be
/// rendered from a single fetch.
#[derive(Debug, Clone)]
pub struct ReminderNotification {
    pub id: ID,
    pub schedule_id: ID,
    pub user_id: ID,
    pub variable_id: ID,
    /// The absolute instant this notification became due, unix millis
    pub due_ts: i64,
    pub status: NotificationStatus,
    pub variable_name: String,
    pub unit: String,
    pub category: String,
    pub emoji: Option<String>,
    pub default_value: Option<f64>,
    pub logged_value: Option<f64>,
    /// Set while completed; the measurement to retract if the completion
    /// is undone
    pub measurement_id: Option<ID>,
}

impl ReminderNotification {
    pub fn new(
        schedule: &ReminderSchedule,
        due_ts: i64,
        variable_name: String,
        unit: String,
        category: String,
        emoji: Option<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            schedule_id: schedule.id.clone(),
            user_id: schedule.user_id.clone(),
            variable_id: schedule.variable_id.clone(),
            due_ts,
            status: NotificationStatus::Pending,
            variable_name,
            unit,
            category,
            emoji,
            default_value: schedule.default_value,
            logged_value: None,
            measurement_id: None,
        }
    }

    pub fn complete(
        &mut self,
        value: f64,
        measurement_id: ID,
    ) -> Result<(), StateTransitionError> {
        match self.status {
            NotificationStatus::Pending => {
                self.status = NotificationStatus::Completed;
                self.logged_value = Some(value);
                self.measurement_id = Some(measurement_id);
                Ok(())
            }
            current => Err(StateTransitionError::Illegal {
                current,
                requested: NotificationStatus::Completed,
            }),
        }
    }

    pub fn skip(&mut self) -> Result<(), StateTransitionError> {
        match self.status {
            NotificationStatus::Pending => {
                self.status = NotificationStatus::Skipped;
                Ok(())
            }
            current => Err(StateTransitionError::Illegal {
                current,
                requested: NotificationStatus::Skipped,
            }),
        }
    }

    /// Revert a completion or a skip back to pending. Retracting the
    /// side effect of a completion (deleting the measurement) is the
    /// caller's responsibility; this only resets the row itself.
    pub fn undo(&mut self) -> Result<(), StateTransitionError> {
        match self.status {
            NotificationStatus::Completed | NotificationStatus::Skipped => {
                self.status = NotificationStatus::Pending;
                self.logged_value = None;
                self.measurement_id = None;
                Ok(())
            }
            current => Err(StateTransitionError::Illegal {
                current,
                requested: NotificationStatus::Pending,
            }),
        }
    }
}

impl Entity for ReminderNotification {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::recurrence::{RecurrenceRule, TimeOfDay};
    use chrono_tz::UTC;

    fn pending_notification() -> ReminderNotification {
        let schedule = ReminderSchedule::new(
            ID::new(),
            ID::new(),
            "FREQ=DAILY".parse::<RecurrenceRule>().unwrap(),
            TimeOfDay::new(9, 0).unwrap(),
            UTC,
            0,
        );
        ReminderNotification::new(
            &schedule,
            1000,
            "Daily Mood Log".into(),
            "out of 10".into(),
            "Mood".into(),
            None,
        )
    }

    #[test]
    fn completes_pending_notification() {
        let mut notification = pending_notification();
        let measurement_id = ID::new();

        assert!(notification.complete(5.0, measurement_id.clone()).is_ok());
        assert_eq!(notification.status, NotificationStatus::Completed);
        assert_eq!(notification.logged_value, Some(5.0));
        assert_eq!(notification.measurement_id, Some(measurement_id));
    }

    #[test]
    fn skips_pending_notification() {
        let mut notification = pending_notification();

        assert!(notification.skip().is_ok());
        assert_eq!(notification.status, NotificationStatus::Skipped);
        assert_eq!(notification.logged_value, None);
    }

    #[test]
    fn rejects_transitions_from_terminal_states() {
        let mut completed = pending_notification();
        completed.complete(5.0, ID::new()).unwrap();
        assert!(completed.complete(5.0, ID::new()).is_err());
        assert!(completed.skip().is_err());

        let mut skipped = pending_notification();
        skipped.skip().unwrap();
        assert!(skipped.skip().is_err());
        assert!(skipped.complete(5.0, ID::new()).is_err());
    }

    #[test]
    fn undo_restores_pending_state() {
        let mut notification = pending_notification();
        notification.complete(5.0, ID::new()).unwrap();

        assert!(notification.undo().is_ok());
        assert_eq!(notification.status, NotificationStatus::Pending);
        assert_eq!(notification.logged_value, None);
        assert_eq!(notification.measurement_id, None);

        // Undo of a pending notification has nothing to revert
        assert!(notification.undo().is_err());
    }

    #[test]
    fn materialized_notification_carries_schedule_defaults() {
        let mut schedule = ReminderSchedule::new(
            ID::new(),
            ID::new(),
            "FREQ=DAILY".parse::<RecurrenceRule>().unwrap(),
            TimeOfDay::new(9, 0).unwrap(),
            UTC,
            0,
        );
        schedule.default_value = Some(3.0);

        let notification = ReminderNotification::new(
            &schedule,
            1000,
            "Daily Mood Log".into(),
            "out of 10".into(),
            "Mood".into(),
            Some("🙂".into()),
        );
        assert_eq!(notification.schedule_id, schedule.id);
        assert_eq!(notification.user_id, schedule.user_id);
        assert_eq!(notification.status, NotificationStatus::Pending);
        assert_eq!(notification.default_value, Some(3.0));
    }
}
