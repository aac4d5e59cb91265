use crate::expiry::ExpiryType;
use crate::shared::entity::{Entity, ID};

/// A `ReminderLog` records that a reminder for one
/// `(vehicle, expiry type, threshold)` combination has been dispatched.
/// Rows are append-only and unique on that combination: the existence of
/// a row means "never send this exact reminder again". Rows are only
/// removed when the owning `Vehicle` is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderLog {
    pub id: ID,
    /// The `User` the reminder was addressed to
    pub user_id: ID,
    /// The `Vehicle` this reminder is associated with
    pub vehicle_id: ID,
    pub expiry_type: ExpiryType,
    /// The day-count at which the reminder fired, e.g. 30, 7, 1 or 0
    pub threshold: i64,
    /// When the notification was dispatched, unix millis. Informational only
    pub sent_at: i64,
}

impl Entity<ID> for ReminderLog {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Outcome of one reminder sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Number of reminders dispatched and recorded
    pub sent: usize,
    /// One entry per vehicle or notification that failed; the sweep itself
    /// carries on past individual failures
    pub errors: Vec<String>,
}
