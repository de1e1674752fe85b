use crate::dtos::NotificationDTO;
use lifetrack_domain::{NotificationStatus, ReminderNotification, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: ReminderNotification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

pub mod get_pending_notifications {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Inclusive due-window bounds in unix millis; both or neither
        #[serde(default)]
        pub start_ts: Option<i64>,
        #[serde(default)]
        pub end_ts: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<ReminderNotification>) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
            }
        }
    }
}

pub mod complete_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub notification_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub value: f64,
        pub unit_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub measurement_id: ID,
    }
}

pub mod skip_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod undo_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub notification_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The status the client believes the notification is in
        pub prior_status: NotificationStatus,
        /// Required when undoing a completion
        pub measurement_id: Option<ID>,
    }

    pub type APIResponse = NotificationResponse;
}
