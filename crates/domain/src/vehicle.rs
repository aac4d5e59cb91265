use crate::expiry::ExpiryType;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A `Vehicle` tracks the three documents that expire independently of
/// each other: registration, insurance and the periodic inspection.
/// All three dates are always present; time-of-day carries no meaning,
/// comparisons are by whole calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: ID,
    /// The `User` that owns this vehicle and receives its reminders
    pub user_id: ID,
    /// License plate, stored uppercase
    pub plate: String,
    pub registration_expiry: NaiveDate,
    pub insurance_expiry: NaiveDate,
    pub inspection_expiry: NaiveDate,
    pub created: i64,
    pub updated: i64,
}

impl Vehicle {
    pub fn expiry_date(&self, expiry_type: ExpiryType) -> NaiveDate {
        match expiry_type {
            ExpiryType::Registration => self.registration_expiry,
            ExpiryType::Insurance => self.insurance_expiry,
            ExpiryType::Inspection => self.inspection_expiry,
        }
    }
}

impl Entity<ID> for Vehicle {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
