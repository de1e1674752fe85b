mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderScheduleRepo;
use lifetrack_domain::{ReminderSchedule, ID};
pub use postgres::PostgresReminderScheduleRepo;

#[async_trait::async_trait]
pub trait IReminderScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()>;
    async fn save(&self, schedule: &ReminderSchedule) -> anyhow::Result<()>;
    async fn find(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>>;
    async fn find_by_user_and_variable(
        &self,
        user_id: &ID,
        variable_id: &ID,
    ) -> anyhow::Result<Vec<ReminderSchedule>>;
    async fn delete(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>>;
}
