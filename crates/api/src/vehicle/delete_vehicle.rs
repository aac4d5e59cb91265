use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use parkvakt_api_structs::delete_vehicle::*;
use parkvakt_domain::{Vehicle, ID};
use parkvakt_infra::ParkvaktContext;
use tracing::warn;

pub async fn delete_vehicle_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let usecase = DeleteVehicleUseCase {
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
pub struct DeleteVehicleUseCase {
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
impl UseCase for DeleteVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteVehicle";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.vehicles.delete(&self.vehicle_id).await {
            Some(vehicle) => {
                // The reminder history of a vehicle goes away with it
                if let Err(e) = ctx
                    .repos
                    .reminder_logs
                    .delete_by_vehicle(&vehicle.id)
                    .await
                {
                    warn!(
                        "Unable to delete reminder logs for deleted vehicle: {}. Error: {:?}",
                        vehicle.id, e
                    );
                }
                Ok(vehicle)
            }
            None => Err(UseCaseError::NotFound(self.vehicle_id.clone())),
        }
    }
}
