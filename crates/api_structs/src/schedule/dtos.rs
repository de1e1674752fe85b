use lifetrack_domain::{ReminderSchedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDTO {
    pub id: ID,
    pub user_id: ID,
    pub variable_id: ID,
    pub recurrence: String,
    /// Short display phrase for the recurrence, e.g. "every day"
    pub human_text: String,
    pub time_of_day: String,
    pub timezone: String,
    pub default_value: Option<f64>,
    pub active: bool,
    pub created: i64,
    pub updated: i64,
}

impl ScheduleDTO {
    pub fn new(schedule: ReminderSchedule) -> Self {
        Self {
            id: schedule.id.clone(),
            user_id: schedule.user_id.clone(),
            variable_id: schedule.variable_id.clone(),
            human_text: schedule.recurrence.humanize(),
            recurrence: schedule.recurrence.to_string(),
            time_of_day: schedule.time_of_day.to_string(),
            timezone: schedule.timezone.to_string(),
            default_value: schedule.default_value,
            active: schedule.active,
            created: schedule.created,
            updated: schedule.updated,
        }
    }
}
