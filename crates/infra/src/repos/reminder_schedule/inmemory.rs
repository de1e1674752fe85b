use super::IReminderScheduleRepo;
use crate::repos::shared::inmemory_repo::*;
use lifetrack_domain::{ReminderSchedule, ID};

pub struct InMemoryReminderScheduleRepo {
    schedules: std::sync::Mutex<Vec<ReminderSchedule>>,
}

impl InMemoryReminderScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for InMemoryReminderScheduleRepo {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn save(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        save(schedule, &self.schedules);
        Ok(())
    }

    async fn find(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>> {
        Ok(find(schedule_id, &self.schedules))
    }

    async fn find_by_user_and_variable(
        &self,
        user_id: &ID,
        variable_id: &ID,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(find_by(&self.schedules, |schedule| {
            schedule.user_id == *user_id && schedule.variable_id == *variable_id
        }))
    }

    async fn delete(&self, schedule_id: &ID) -> anyhow::Result<Option<ReminderSchedule>> {
        Ok(delete(schedule_id, &self.schedules))
    }
}
