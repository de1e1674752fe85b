use lifetrack_domain::{NotificationStatus, ReminderNotification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub schedule_id: ID,
    pub user_id: ID,
    pub variable_id: ID,
    pub due_ts: i64,
    pub status: NotificationStatus,
    pub variable_name: String,
    pub unit: String,
    pub category: String,
    pub emoji: Option<String>,
    pub default_value: Option<f64>,
    pub logged_value: Option<f64>,
    pub measurement_id: Option<ID>,
}

impl NotificationDTO {
    pub fn new(notification: ReminderNotification) -> Self {
        Self {
            id: notification.id.clone(),
            schedule_id: notification.schedule_id.clone(),
            user_id: notification.user_id.clone(),
            variable_id: notification.variable_id.clone(),
            due_ts: notification.due_ts,
            status: notification.status,
            variable_name: notification.variable_name,
            unit: notification.unit,
            category: notification.category,
            emoji: notification.emoji,
            default_value: notification.default_value,
            logged_value: notification.logged_value,
            measurement_id: notification.measurement_id,
        }
    }
}
