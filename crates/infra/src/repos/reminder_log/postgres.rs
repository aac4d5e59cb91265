use super::IReminderLogRepo;
use crate::repos::shared::repo::DeleteResult;
use parkvakt_domain::{ExpiryType, ReminderLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresReminderLogRepo {
    pool: PgPool,
}

impl PostgresReminderLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderLogRaw {
    reminder_log_uid: Uuid,
    user_uid: Uuid,
    vehicle_uid: Uuid,
    expiry_type: String,
    threshold: i64,
    sent_at: i64,
}

impl From<ReminderLogRaw> for ReminderLog {
    fn from(raw: ReminderLogRaw) -> Self {
        Self {
            id: raw.reminder_log_uid.into(),
            user_id: raw.user_uid.into(),
            vehicle_id: raw.vehicle_uid.into(),
            // The column only ever holds values written from `ExpiryType`
            expiry_type: ExpiryType::from_str(&raw.expiry_type)
                .unwrap_or(ExpiryType::Registration),
            threshold: raw.threshold,
            sent_at: raw.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for PostgresReminderLogRepo {
    async fn insert(&self, reminder_log: &ReminderLog) -> anyhow::Result<()> {
        // The unique constraint on (vehicle_uid, expiry_type, threshold)
        // absorbs a concurrent duplicate, so check-then-record cannot
        // double-insert a key.
        sqlx::query(
            r#"
            INSERT INTO reminder_logs
            (reminder_log_uid, user_uid, vehicle_uid, expiry_type, threshold, sent_at)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (vehicle_uid, expiry_type, threshold) DO NOTHING
            "#,
        )
        .bind(reminder_log.id.inner_ref())
        .bind(reminder_log.user_id.inner_ref())
        .bind(reminder_log.vehicle_id.inner_ref())
        .bind(reminder_log.expiry_type.as_str())
        .bind(reminder_log.threshold)
        .bind(reminder_log.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn exists(&self, vehicle_id: &ID, expiry_type: ExpiryType, threshold: i64) -> bool {
        sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs AS r
            WHERE r.vehicle_uid = $1 AND r.expiry_type = $2 AND r.threshold = $3
            "#,
        )
        .bind(vehicle_id.inner_ref())
        .bind(expiry_type.as_str())
        .bind(threshold)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .is_some()
    }

    async fn find_by_vehicle(&self, vehicle_id: &ID) -> Vec<ReminderLog> {
        sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs AS r
            WHERE r.vehicle_uid = $1
            "#,
        )
        .bind(vehicle_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|log| log.into())
        .collect()
    }

    async fn delete_by_vehicle(&self, vehicle_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminder_logs AS r
            WHERE r.vehicle_uid = $1
            "#,
        )
        .bind(vehicle_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
