use chrono::{DateTime, NaiveDate, Utc};
use parkvakt_domain::{
    classify, days_until, min_expiry, ExpiryStatus, ExpiryType, MinExpiry, Vehicle, ID,
};
use serde::{Deserialize, Serialize};

/// One expiry date with its derived urgency
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryDTO {
    pub date: NaiveDate,
    pub days_remaining: i64,
    pub status: ExpiryStatus,
}

impl ExpiryDTO {
    fn new(date: NaiveDate, now: DateTime<Utc>) -> Self {
        let days_remaining = days_until(date, now);
        Self {
            date,
            days_remaining,
            status: classify(days_remaining),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinExpiryDTO {
    pub expiry_type: ExpiryType,
    pub date: NaiveDate,
    pub days_remaining: i64,
    pub status: ExpiryStatus,
}

impl MinExpiryDTO {
    fn new(min: MinExpiry) -> Self {
        Self {
            expiry_type: min.expiry_type,
            date: min.date,
            days_remaining: min.days_remaining,
            status: min.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDTO {
    pub id: ID,
    pub user_id: ID,
    pub plate: String,
    pub registration: ExpiryDTO,
    pub insurance: ExpiryDTO,
    pub inspection: ExpiryDTO,
    /// The most urgent of the three dates, what list views sort and badge by
    pub min_expiry: MinExpiryDTO,
}

impl VehicleDTO {
    pub fn new(vehicle: Vehicle, now: DateTime<Utc>) -> Self {
        let min = min_expiry(&vehicle, now);
        Self {
            registration: ExpiryDTO::new(vehicle.registration_expiry, now),
            insurance: ExpiryDTO::new(vehicle.insurance_expiry, now),
            inspection: ExpiryDTO::new(vehicle.inspection_expiry, now),
            min_expiry: MinExpiryDTO::new(min),
            id: vehicle.id,
            user_id: vehicle.user_id,
            plate: vehicle.plate,
        }
    }
}
