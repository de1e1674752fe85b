use super::IReminderScheduleRepo;
use chrono_tz::UTC;
use lifetrack_domain::{ReminderSchedule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderScheduleRepo {
    pool: PgPool,
}

impl PostgresReminderScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleRaw {
    schedule_uid: Uuid,
    user_uid: Uuid,
    variable_uid: Uuid,
    recurrence: String,
    time_of_day: String,
    timezone: String,
    default_value: Option<f64>,
    active: bool,
    created: i64,
    updated: i64,
}

impl Into<ReminderSchedule> for ScheduleRaw {
    fn into(self) -> ReminderSchedule {
        ReminderSchedule {
            id: self.schedule_uid.into(),
            user_id: self.user_uid.into(),
            variable_id: self.variable_uid.into(),
            recurrence: self.recurrence.parse().unwrap_or_default(),
            time_of_day: self.time_of_day.parse().unwrap_or_default(),
            timezone: self.timezone.parse().unwrap_or(UTC),
            default_value: self.default_value,
            active: self.active,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for PostgresReminderScheduleRepo {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_schedules
            (schedule_uid, user_uid, variable_uid, recurrence, time_of_day, timezone, default_value, active, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.user_id.inner_ref())
        .bind(schedule.variable_id.inner_ref())
        .bind(schedule.recurrence.as_str())
        .bind(schedule.time_of_day.to_string())
        .bind(schedule.timezone.to_string())
        .bind(schedule.default_value)
        .bind(schedule.active)
        .bind(schedule.created)
        .bind(schedule.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_schedules
            SET recurrence = $2,
            time_of_day = $3,
            timezone = $4,
            default_value = $5,
            active = $6,
            updated = $7
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.recurrence.as_str())
        .bind(schedule.time_of_day.to_string())
        .bind(schedule.timezone.to_string())
        .bind(schedule.default_value)
        .bind(schedule.active)
        .bind(schedule.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>> {
        let schedule: Option<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule.map(|s| s.into()))
    }

    async fn find_by_user_and_variable(
        &self,
        user_id: &ID,
        variable_id: &ID,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let schedules: Vec<ScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE user_uid = $1 AND variable_uid = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(variable_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules.into_iter().map(|s| s.into()).collect())
    }

    async fn delete(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>> {
        let schedule: Option<ScheduleRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminder_schedules
            WHERE schedule_uid = $1
            RETURNING *
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule.map(|s| s.into()))
    }
}
