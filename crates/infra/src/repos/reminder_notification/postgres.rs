use super::IReminderNotificationRepo;
use lifetrack_domain::{NotificationStatus, ReminderNotification, TimeSpan, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderNotificationRepo {
    pool: PgPool,
}

impl PostgresReminderNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    schedule_uid: Uuid,
    user_uid: Uuid,
    variable_uid: Uuid,
    due_ts: i64,
    status: String,
    variable_name: String,
    unit: String,
    category: String,
    emoji: Option<String>,
    default_value: Option<f64>,
    logged_value: Option<f64>,
    measurement_uid: Option<Uuid>,
}

impl Into<ReminderNotification> for NotificationRaw {
    fn into(self) -> ReminderNotification {
        ReminderNotification {
            id: self.notification_uid.into(),
            schedule_id: self.schedule_uid.into(),
            user_id: self.user_uid.into(),
            variable_id: self.variable_uid.into(),
            due_ts: self.due_ts,
            status: self
                .status
                .parse()
                .unwrap_or(NotificationStatus::Pending),
            variable_name: self.variable_name,
            unit: self.unit,
            category: self.category,
            emoji: self.emoji,
            default_value: self.default_value,
            logged_value: self.logged_value,
            measurement_id: self.measurement_uid.map(|uid| uid.into()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderNotificationRepo for PostgresReminderNotificationRepo {
    async fn insert(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_notifications
            (notification_uid, schedule_uid, user_uid, variable_uid, due_ts, status, variable_name, unit, category, emoji, default_value, logged_value, measurement_uid)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.schedule_id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.variable_id.inner_ref())
        .bind(notification.due_ts)
        .bind(notification.status.to_string())
        .bind(&notification.variable_name)
        .bind(&notification.unit)
        .bind(&notification.category)
        .bind(&notification.emoji)
        .bind(notification.default_value)
        .bind(notification.logged_value)
        .bind(notification.measurement_id.as_ref().map(|id| *id.inner_ref()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_notifications
            SET status = $2,
            logged_value = $3,
            measurement_uid = $4
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.status.to_string())
        .bind(notification.logged_value)
        .bind(notification.measurement_id.as_ref().map(|id| *id.inner_ref()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> anyhow::Result<Option<ReminderNotification>> {
        let notification: Option<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_notifications
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification.map(|n| n.into()))
    }

    async fn find_pending_by_user(
        &self,
        user_id: &ID,
        window: Option<&TimeSpan>,
    ) -> anyhow::Result<Vec<ReminderNotification>> {
        let notifications: Vec<NotificationRaw> = match window {
            Some(window) => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM reminder_notifications
                    WHERE user_uid = $1 AND status = 'pending'
                        AND due_ts >= $2 AND due_ts <= $3
                    ORDER BY due_ts
                    "#,
                )
                .bind(user_id.inner_ref())
                .bind(window.start())
                .bind(window.end())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM reminder_notifications
                    WHERE user_uid = $1 AND status = 'pending'
                    ORDER BY due_ts
                    "#,
                )
                .bind(user_id.inner_ref())
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }
}
