use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use parkvakt_api_structs::update_vehicle::*;
use parkvakt_domain::{Vehicle, ID};
use parkvakt_infra::ParkvaktContext;

pub async fn update_vehicle_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let body = body.0;
    let usecase = UpdateVehicleUseCase {
        vehicle_id: path_params.vehicle_id.clone(),
        plate: body.plate,
        registration_expiry: body.registration_expiry,
        insurance_expiry: body.insurance_expiry,
        inspection_expiry: body.inspection_expiry,
    };

    execute(usecase, &ctx)
        .await
        .map(|vehicle| {
            let now = ctx.sys.get_utc_now();
            HttpResponse::Ok().json(APIResponse::new(vehicle, now))
        })
        .map_err(ParkvaktError::from)
}

#[derive(Debug)]
pub struct UpdateVehicleUseCase {
    pub vehicle_id: ID,
    pub plate: Option<String>,
    pub registration_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub inspection_expiry: Option<NaiveDate>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidPlate,
    PlateTaken(String),
    StorageError,
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(vehicle_id) => Self::NotFound(format!(
                "The vehicle with id: {}, was not found.",
                vehicle_id
            )),
            UseCaseError::InvalidPlate => {
                Self::BadClientData("A license plate must not be empty".into())
            }
            UseCaseError::PlateTaken(plate) => Self::Conflict(format!(
                "A vehicle with the plate: {} is already registered",
                plate
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateVehicle";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        let mut vehicle = match ctx.repos.vehicles.find(&self.vehicle_id).await {
            Some(vehicle) => vehicle,
            None => return Err(UseCaseError::NotFound(self.vehicle_id.clone())),
        };

        if let Some(plate) = &self.plate {
            let plate = plate.trim().to_uppercase();
            if plate.is_empty() {
                return Err(UseCaseError::InvalidPlate);
            }
            if plate != vehicle.plate {
                if ctx
                    .repos
                    .vehicles
                    .find_by_user_and_plate(&vehicle.user_id, &plate)
                    .await
                    .is_some()
                {
                    return Err(UseCaseError::PlateTaken(plate));
                }
                vehicle.plate = plate;
            }
        }
        if let Some(registration_expiry) = self.registration_expiry {
            vehicle.registration_expiry = registration_expiry;
        }
        if let Some(insurance_expiry) = self.insurance_expiry {
            vehicle.insurance_expiry = insurance_expiry;
        }
        if let Some(inspection_expiry) = self.inspection_expiry {
            vehicle.inspection_expiry = inspection_expiry;
        }
        vehicle.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .vehicles
            .save(&vehicle)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(vehicle)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use parkvakt_domain::User;

    async fn setup() -> (ParkvaktContext, Vehicle) {
        let ctx = ParkvaktContext::create_inmemory();
        let user = User::new("ana@example.com");
        ctx.repos.users.insert(&user).await.unwrap();
        let vehicle = Vehicle {
            id: Default::default(),
            user_id: user.id.clone(),
            plate: "SK 1234 AB".into(),
            registration_expiry: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            insurance_expiry: NaiveDate::from_ymd_opt(2021, 7, 15).unwrap(),
            inspection_expiry: NaiveDate::from_ymd_opt(2021, 9, 30).unwrap(),
            created: 0,
            updated: 0,
        };
        ctx.repos.vehicles.insert(&vehicle).await.unwrap();
        (ctx, vehicle)
    }

    #[tokio::test]
    async fn updates_only_the_given_fields() {
        let (ctx, vehicle) = setup().await;

        let usecase = UpdateVehicleUseCase {
            vehicle_id: vehicle.id.clone(),
            plate: None,
            registration_expiry: NaiveDate::from_ymd_opt(2022, 6, 1),
            insurance_expiry: None,
            inspection_expiry: None,
        };

        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            updated.registration_expiry,
            NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()
        );
        assert_eq!(updated.plate, vehicle.plate);
        assert_eq!(updated.insurance_expiry, vehicle.insurance_expiry);
    }

    #[tokio::test]
    async fn rejects_plate_already_taken_by_another_vehicle() {
        let (ctx, vehicle) = setup().await;
        let other = Vehicle {
            id: Default::default(),
            plate: "KU 5678 CD".into(),
            ..vehicle.clone()
        };
        ctx.repos.vehicles.insert(&other).await.unwrap();

        let usecase = UpdateVehicleUseCase {
            vehicle_id: vehicle.id.clone(),
            plate: Some("ku 5678 cd".into()),
            registration_expiry: None,
            insurance_expiry: None,
            inspection_expiry: None,
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
