use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use parkvakt_api_structs::get_vehicle::*;
use parkvakt_domain::{Vehicle, ID};
use parkvakt_infra::ParkvaktContext;

pub async fn get_vehicle_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let usecase = GetVehicleUseCase {
        vehicle_id: path_params.vehicle_id.clone(),
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
pub struct GetVehicleUseCase {
    pub vehicle_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(vehicle_id) => Self::NotFound(format!(
                "The vehicle with id: {}, was not found.",
                vehicle_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "GetVehicle";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .vehicles
            .find(&self.vehicle_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.vehicle_id.clone()))
    }
}
