mod measurement;
mod reminder_notification;
mod reminder_schedule;
mod shared;

use measurement::{IMeasurementRepo, InMemoryMeasurementRepo, PostgresMeasurementRepo};
use reminder_notification::{
    IReminderNotificationRepo, InMemoryReminderNotificationRepo, PostgresReminderNotificationRepo,
};
use reminder_schedule::{
    IReminderScheduleRepo, InMemoryReminderScheduleRepo, PostgresReminderScheduleRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub schedules: Arc<dyn IReminderScheduleRepo>,
    pub notifications: Arc<dyn IReminderNotificationRepo>,
    pub measurements: Arc<dyn IMeasurementRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;

        Ok(Self {
            schedules: Arc::new(PostgresReminderScheduleRepo::new(pool.clone())),
            notifications: Arc::new(PostgresReminderNotificationRepo::new(pool.clone())),
            measurements: Arc::new(PostgresMeasurementRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            schedules: Arc::new(InMemoryReminderScheduleRepo::new()),
            notifications: Arc::new(InMemoryReminderNotificationRepo::new()),
            measurements: Arc::new(InMemoryMeasurementRepo::new()),
        }
    }
}
