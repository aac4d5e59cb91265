use crate::dtos::VehicleDTO;
use chrono::{DateTime, NaiveDate, Utc};
use parkvakt_domain::{Vehicle, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub vehicle: VehicleDTO,
}

impl VehicleResponse {
    pub fn new(vehicle: Vehicle, now: DateTime<Utc>) -> Self {
        Self {
            vehicle: VehicleDTO::new(vehicle, now),
        }
    }
}

pub mod create_vehicle {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub plate: String,
        pub registration_expiry: NaiveDate,
        pub insurance_expiry: NaiveDate,
        pub inspection_expiry: NaiveDate,
    }

    pub type APIResponse = VehicleResponse;
}

pub mod get_vehicle {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub vehicle_id: ID,
    }

    pub type APIResponse = VehicleResponse;
}

pub mod get_user_vehicles {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub vehicles: Vec<VehicleDTO>,
    }

    impl APIResponse {
        pub fn new(vehicles: Vec<Vehicle>, now: DateTime<Utc>) -> Self {
            Self {
                vehicles: vehicles
                    .into_iter()
                    .map(|vehicle| VehicleDTO::new(vehicle, now))
                    .collect(),
            }
        }
    }
}

pub mod update_vehicle {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub vehicle_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub plate: Option<String>,
        pub registration_expiry: Option<NaiveDate>,
        pub insurance_expiry: Option<NaiveDate>,
        pub inspection_expiry: Option<NaiveDate>,
    }

    pub type APIResponse = VehicleResponse;
}

pub mod delete_vehicle {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub vehicle_id: ID,
    }

    pub type APIResponse = VehicleResponse;
}
