use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use parkvakt_api_structs::create_vehicle::*;
use parkvakt_domain::{Vehicle, ID};
use parkvakt_infra::ParkvaktContext;

pub async fn create_vehicle_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let body = body.0;
    let usecase = CreateVehicleUseCase {
        user_id: path_params.user_id.clone(),
        plate: body.plate,
        registration_expiry: body.registration_expiry,
        insurance_expiry: body.insurance_expiry,
        inspection_expiry: body.inspection_expiry,
    };

    execute(usecase, &ctx)
        .await
        .map(|vehicle| {
            let now = ctx.sys.get_utc_now();
            HttpResponse::Created().json(APIResponse::new(vehicle, now))
        })
        .map_err(ParkvaktError::from)
}

#[derive(Debug)]
pub struct CreateVehicleUseCase {
    pub user_id: ID,
    pub plate: String,
    pub registration_expiry: NaiveDate,
    pub insurance_expiry: NaiveDate,
    pub inspection_expiry: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    InvalidPlate,
    PlateTaken(String),
    StorageError,
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
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
impl UseCase for CreateVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateVehicle";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let plate = self.plate.trim().to_uppercase();
        if plate.is_empty() {
            return Err(UseCaseError::InvalidPlate);
        }

        if ctx
            .repos
            .vehicles
            .find_by_user_and_plate(&self.user_id, &plate)
            .await
            .is_some()
        {
            return Err(UseCaseError::PlateTaken(plate));
        }

        let vehicle = Vehicle {
            id: Default::default(),
            user_id: self.user_id.clone(),
            plate,
            registration_expiry: self.registration_expiry,
            insurance_expiry: self.insurance_expiry,
            inspection_expiry: self.inspection_expiry,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .vehicles
            .insert(&vehicle)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(vehicle)
    }
}
