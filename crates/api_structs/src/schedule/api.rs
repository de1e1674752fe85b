use crate::dtos::ScheduleDTO;
use lifetrack_domain::{ReminderSchedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule: ScheduleDTO,
}

impl ScheduleResponse {
    pub fn new(schedule: ReminderSchedule) -> Self {
        Self {
            schedule: ScheduleDTO::new(schedule),
        }
    }
}

pub mod get_schedules {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub variable_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub schedules: Vec<ScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(schedules: Vec<ReminderSchedule>) -> Self {
            Self {
                schedules: schedules.into_iter().map(ScheduleDTO::new).collect(),
            }
        }
    }
}

pub mod upsert_schedule {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub variable_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recurrence: String,
        pub time_of_day: String,
        pub timezone: String,
        pub default_value: Option<f64>,
        pub active: Option<bool>,
        /// When set, updates that schedule in place instead of inserting
        pub schedule_id: Option<ID>,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod delete_schedule {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub schedule_id: ID,
    }

    pub type APIResponse = ScheduleResponse;
}
