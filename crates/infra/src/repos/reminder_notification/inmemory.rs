use super::IReminderNotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use lifetrack_domain::{NotificationStatus, ReminderNotification, TimeSpan, ID};

pub struct InMemoryReminderNotificationRepo {
    notifications: std::sync::Mutex<Vec<ReminderNotification>>,
}

impl InMemoryReminderNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderNotificationRepo for InMemoryReminderNotificationRepo {
    async fn insert(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn save(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        save(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> anyhow::Result<Option<ReminderNotification>> {
        Ok(find(notification_id, &self.notifications))
    }

    async fn find_pending_by_user(
        &self,
        user_id: &ID,
        window: Option<&TimeSpan>,
    ) -> anyhow::Result<Vec<ReminderNotification>> {
        let mut notifications = find_by(&self.notifications, |notification| {
            notification.user_id == *user_id
                && notification.status == NotificationStatus::Pending
                && window.map(|w| w.contains(notification.due_ts)).unwrap_or(true)
        });
        notifications.sort_by_key(|notification| notification.due_ts);
        Ok(notifications)
    }
}
