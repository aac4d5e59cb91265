use crate::vehicle::Vehicle;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The three tracked document categories of a `Vehicle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryType {
    Registration,
    Insurance,
    Inspection,
}

impl ExpiryType {
    /// Fixed enumeration order. This is also the tie-break order used by
    /// `min_expiry` when two dates have the same number of days remaining.
    pub const ALL: [ExpiryType; 3] = [Self::Registration, Self::Insurance, Self::Inspection];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Insurance => "insurance",
            Self::Inspection => "inspection",
        }
    }
}

impl Display for ExpiryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidExpiryTypeError {
    #[error("Expiry type: {0} is not known")]
    Unknown(String),
}

impl FromStr for ExpiryType {
    type Err = InvalidExpiryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "insurance" => Ok(Self::Insurance),
            "inspection" => Ok(Self::Inspection),
            _ => Err(InvalidExpiryTypeError::Unknown(s.to_string())),
        }
    }
}

/// Urgency of a single expiry date, derived from its days remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Urgent,
    Soon,
    Ok,
}

/// Whole-day difference between `target` and the calendar date of `now`.
/// `now` is truncated to its UTC date before subtracting, so every query
/// made during the same day gets the same answer. Negative means overdue.
///
/// All other day math in this crate goes through this function.
pub fn days_until(target: NaiveDate, now: DateTime<Utc>) -> i64 {
    target.signed_duration_since(now.date_naive()).num_days()
}

/// Maps days remaining to an `ExpiryStatus`. Boundaries are inclusive on
/// the lower side: day 7 is still `Urgent`, day 30 is still `Soon`.
pub fn classify(days_remaining: i64) -> ExpiryStatus {
    if days_remaining <= 0 {
        ExpiryStatus::Expired
    } else if days_remaining <= 7 {
        ExpiryStatus::Urgent
    } else if days_remaining <= 30 {
        ExpiryStatus::Soon
    } else {
        ExpiryStatus::Ok
    }
}

/// The most urgent of a vehicle's three expiry dates
#[derive(Debug, Clone, PartialEq)]
pub struct MinExpiry {
    pub expiry_type: ExpiryType,
    pub date: NaiveDate,
    pub days_remaining: i64,
    pub status: ExpiryStatus,
}

/// Selects the expiry date with the fewest days remaining. Ties are broken
/// by the `ExpiryType::ALL` enumeration order, so a registration date that
/// ties with the insurance date always wins.
pub fn min_expiry(vehicle: &Vehicle, now: DateTime<Utc>) -> MinExpiry {
    let entry = |expiry_type: ExpiryType| {
        let date = vehicle.expiry_date(expiry_type);
        let days_remaining = days_until(date, now);
        MinExpiry {
            expiry_type,
            date,
            days_remaining,
            status: classify(days_remaining),
        }
    };

    let [registration, insurance, inspection] = ExpiryType::ALL.map(entry);
    let mut min = registration;
    for candidate in [insurance, inspection] {
        // strict comparison, so the earlier enumeration entry wins ties
        if candidate.days_remaining < min.days_remaining {
            min = candidate;
        }
    }
    min
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 12, 30, 0).unwrap()
    }

    fn vehicle_with_offsets(registration: i64, insurance: i64, inspection: i64) -> Vehicle {
        let today = reference_now().date_naive();
        Vehicle {
            id: Default::default(),
            user_id: Default::default(),
            plate: "SK 1234 AB".into(),
            registration_expiry: today + Duration::days(registration),
            insurance_expiry: today + Duration::days(insurance),
            inspection_expiry: today + Duration::days(inspection),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn it_classifies_boundary_days() {
        assert_eq!(classify(-5), ExpiryStatus::Expired);
        assert_eq!(classify(0), ExpiryStatus::Expired);
        assert_eq!(classify(1), ExpiryStatus::Urgent);
        assert_eq!(classify(7), ExpiryStatus::Urgent);
        assert_eq!(classify(8), ExpiryStatus::Soon);
        assert_eq!(classify(30), ExpiryStatus::Soon);
        assert_eq!(classify(31), ExpiryStatus::Ok);
        assert_eq!(classify(365), ExpiryStatus::Ok);
    }

    #[test]
    fn days_until_ignores_time_of_day() {
        let target = Utc.with_ymd_and_hms(2021, 2, 24, 0, 0, 0).unwrap().date_naive();
        let morning = Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2021, 2, 21, 23, 59, 59).unwrap();

        assert_eq!(days_until(target, morning), 3);
        assert_eq!(days_until(target, evening), 3);
    }

    #[test]
    fn days_until_is_negative_for_overdue_dates() {
        let now = reference_now();
        let last_week = now.date_naive() - Duration::days(7);
        assert_eq!(days_until(last_week, now), -7);
        assert_eq!(days_until(now.date_naive(), now), 0);
    }

    #[test]
    fn days_until_is_pure() {
        let now = reference_now();
        let target = now.date_naive() + Duration::days(45);
        assert_eq!(days_until(target, now), days_until(target, now));
    }

    #[test]
    fn min_expiry_picks_the_soonest_date() {
        let vehicle = vehicle_with_offsets(90, 14, 200);
        let min = min_expiry(&vehicle, reference_now());
        assert_eq!(min.expiry_type, ExpiryType::Insurance);
        assert_eq!(min.days_remaining, 14);
        assert_eq!(min.status, ExpiryStatus::Soon);
    }

    #[test]
    fn min_expiry_breaks_ties_by_enumeration_order() {
        let vehicle = vehicle_with_offsets(14, 14, 200);
        let min = min_expiry(&vehicle, reference_now());
        assert_eq!(min.expiry_type, ExpiryType::Registration);

        let vehicle = vehicle_with_offsets(200, 14, 14);
        let min = min_expiry(&vehicle, reference_now());
        assert_eq!(min.expiry_type, ExpiryType::Insurance);

        let vehicle = vehicle_with_offsets(3, 3, 3);
        let min = min_expiry(&vehicle, reference_now());
        assert_eq!(min.expiry_type, ExpiryType::Registration);
    }

    #[test]
    fn min_expiry_classifies_overdue_vehicles() {
        let vehicle = vehicle_with_offsets(45, -2, 120);
        let min = min_expiry(&vehicle, reference_now());
        assert_eq!(min.expiry_type, ExpiryType::Insurance);
        assert_eq!(min.days_remaining, -2);
        assert_eq!(min.status, ExpiryStatus::Expired);
    }
}
