use super::IReminderLogRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use parkvakt_domain::{ExpiryType, ReminderLog, ID};

pub struct InMemoryReminderLogRepo {
    reminder_logs: std::sync::Mutex<Vec<ReminderLog>>,
}

impl InMemoryReminderLogRepo {
    pub fn new() -> Self {
        Self {
            reminder_logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for InMemoryReminderLogRepo {
    async fn insert(&self, reminder_log: &ReminderLog) -> anyhow::Result<()> {
        // Mirrors the unique constraint of the postgres table: a key that
        // is already recorded stays recorded once.
        if self
            .exists(
                &reminder_log.vehicle_id,
                reminder_log.expiry_type,
                reminder_log.threshold,
            )
            .await
        {
            return Ok(());
        }
        insert(reminder_log, &self.reminder_logs);
        Ok(())
    }

    async fn exists(&self, vehicle_id: &ID, expiry_type: ExpiryType, threshold: i64) -> bool {
        !find_by(&self.reminder_logs, |log| {
            log.vehicle_id == *vehicle_id
                && log.expiry_type == expiry_type
                && log.threshold == threshold
        })
        .is_empty()
    }

    async fn find_by_vehicle(&self, vehicle_id: &ID) -> Vec<ReminderLog> {
        find_by(&self.reminder_logs, |log| log.vehicle_id == *vehicle_id)
    }

    async fn delete_by_vehicle(&self, vehicle_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminder_logs, |log| {
            log.vehicle_id == *vehicle_id
        }))
    }
}
