mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderNotificationRepo;
use lifetrack_domain::{ReminderNotification, TimeSpan, ID};
pub use postgres::PostgresReminderNotificationRepo;

#[async_trait::async_trait]
pub trait IReminderNotificationRepo: Send + Sync {
    async fn insert(&self, notification: &ReminderNotification) -> anyhow::Result<()>;
    async fn save(&self, notification: &ReminderNotification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> anyhow::Result<Option<ReminderNotification>>;
    /// Pending notifications for a user, oldest due first. A window
    /// restricts on the due timestamp; without one every outstanding
    /// notification is returned.
    async fn find_pending_by_user(
        &self,
        user_id: &ID,
        window: Option<&TimeSpan>,
    ) -> anyhow::Result<Vec<ReminderNotification>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use chrono_tz::UTC;
    use lifetrack_domain::{
        RecurrenceRule, ReminderNotification, ReminderSchedule, TimeOfDay, TimeSpan, ID,
    };

    fn notification(user_id: ID, due_ts: i64) -> ReminderNotification {
        let schedule = ReminderSchedule::new(
            user_id,
            ID::new(),
            "FREQ=DAILY".parse::<RecurrenceRule>().unwrap(),
            TimeOfDay::new(9, 0).unwrap(),
            UTC,
            0,
        );
        ReminderNotification::new(
            &schedule,
            due_ts,
            "Daily Mood Log".into(),
            "out of 10".into(),
            "Mood".into(),
            None,
        )
    }

    #[tokio::test]
    async fn pending_query_filters_on_status_owner_and_window() {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();

        let due_early = notification(user_id.clone(), 1000);
        let due_late = notification(user_id.clone(), 5000);
        let mut skipped = notification(user_id.clone(), 2000);
        skipped.skip().unwrap();
        let foreign = notification(ID::new(), 1000);

        for n in [&due_early, &due_late, &skipped, &foreign] {
            ctx.repos.notifications.insert(n).await.unwrap();
        }

        // All outstanding, oldest first
        let res = ctx
            .repos
            .notifications
            .find_pending_by_user(&user_id, None)
            .await
            .unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].id, due_early.id);
        assert_eq!(res[1].id, due_late.id);

        // Windowed on due timestamp
        let window = TimeSpan::new(0, 2000).unwrap();
        let res = ctx
            .repos
            .notifications
            .find_pending_by_user(&user_id, Some(&window))
            .await
            .unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, due_early.id);
    }

    #[tokio::test]
    async fn save_persists_status_change() {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();
        let mut n = notification(user_id.clone(), 1000);
        ctx.repos.notifications.insert(&n).await.unwrap();

        n.skip().unwrap();
        ctx.repos.notifications.save(&n).await.unwrap();

        let res = ctx
            .repos
            .notifications
            .find(&n.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(res.status, n.status);
        assert!(ctx
            .repos
            .notifications
            .find_pending_by_user(&user_id, None)
            .await
            .unwrap()
            .is_empty());
    }
}
