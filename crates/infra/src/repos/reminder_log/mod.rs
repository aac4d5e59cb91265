mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryReminderLogRepo;
use parkvakt_domain::{ExpiryType, ReminderLog, ID};
pub use postgres::PostgresReminderLogRepo;

/// The reminder ledger. Entries are unique on
/// `(vehicle_id, expiry_type, threshold)` and append-only: an existing
/// entry means that exact reminder must never be sent again.
#[async_trait::async_trait]
pub trait IReminderLogRepo: Send + Sync {
    /// Records a dispatched reminder. Inserting a key that is already
    /// recorded is a harmless no-op, which keeps check-then-record safe
    /// when two sweeps overlap.
    async fn insert(&self, reminder_log: &ReminderLog) -> anyhow::Result<()>;
    async fn exists(&self, vehicle_id: &ID, expiry_type: ExpiryType, threshold: i64) -> bool;
    async fn find_by_vehicle(&self, vehicle_id: &ID) -> Vec<ReminderLog>;
    /// Cascade hook for vehicle deletion, the only way ledger entries go away
    async fn delete_by_vehicle(&self, vehicle_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::ParkvaktContext;
    use parkvakt_domain::{ExpiryType, ReminderLog, ID};

    fn reminder_log_factory(vehicle_id: &ID, expiry_type: ExpiryType, threshold: i64) -> ReminderLog {
        ReminderLog {
            id: Default::default(),
            user_id: Default::default(),
            vehicle_id: vehicle_id.clone(),
            expiry_type,
            threshold,
            sent_at: 1613862000000,
        }
    }

    #[tokio::test]
    async fn records_and_finds_sent_reminders() {
        let ctx = ParkvaktContext::create_inmemory();
        let vehicle_id = ID::default();

        assert!(
            !ctx.repos
                .reminder_logs
                .exists(&vehicle_id, ExpiryType::Registration, 7)
                .await
        );

        let log = reminder_log_factory(&vehicle_id, ExpiryType::Registration, 7);
        ctx.repos.reminder_logs.insert(&log).await.unwrap();

        assert!(
            ctx.repos
                .reminder_logs
                .exists(&vehicle_id, ExpiryType::Registration, 7)
                .await
        );
        // Other keys of the same vehicle are unaffected
        assert!(
            !ctx.repos
                .reminder_logs
                .exists(&vehicle_id, ExpiryType::Registration, 1)
                .await
        );
        assert!(
            !ctx.repos
                .reminder_logs
                .exists(&vehicle_id, ExpiryType::Insurance, 7)
                .await
        );
    }

    #[tokio::test]
    async fn duplicate_keys_are_not_recorded_twice() {
        let ctx = ParkvaktContext::create_inmemory();
        let vehicle_id = ID::default();

        let log = reminder_log_factory(&vehicle_id, ExpiryType::Insurance, 30);
        ctx.repos.reminder_logs.insert(&log).await.unwrap();

        let duplicate = reminder_log_factory(&vehicle_id, ExpiryType::Insurance, 30);
        assert!(ctx.repos.reminder_logs.insert(&duplicate).await.is_ok());

        let logs = ctx.repos.reminder_logs.find_by_vehicle(&vehicle_id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0], log);
    }

    #[tokio::test]
    async fn deletes_only_the_vehicles_entries() {
        let ctx = ParkvaktContext::create_inmemory();
        let vehicle_id = ID::default();
        let other_vehicle_id = ID::default();

        for threshold in [30, 7, 1].iter() {
            let log = reminder_log_factory(&vehicle_id, ExpiryType::Inspection, *threshold);
            ctx.repos.reminder_logs.insert(&log).await.unwrap();
        }
        let other = reminder_log_factory(&other_vehicle_id, ExpiryType::Inspection, 30);
        ctx.repos.reminder_logs.insert(&other).await.unwrap();

        let res = ctx
            .repos
            .reminder_logs
            .delete_by_vehicle(&vehicle_id)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 3);

        assert!(ctx.repos.reminder_logs.find_by_vehicle(&vehicle_id).await.is_empty());
        assert_eq!(
            ctx.repos
                .reminder_logs
                .find_by_vehicle(&other_vehicle_id)
                .await
                .len(),
            1
        );
    }
}
