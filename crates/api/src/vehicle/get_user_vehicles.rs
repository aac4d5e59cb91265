use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use parkvakt_api_structs::get_user_vehicles::*;
use parkvakt_domain::{Vehicle, ID};
use parkvakt_infra::ParkvaktContext;

pub async fn get_user_vehicles_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let usecase = GetUserVehiclesUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|vehicles| {
            let now = ctx.sys.get_utc_now();
            HttpResponse::Ok().json(APIResponse::new(vehicles, now))
        })
        .map_err(ParkvaktError::from)
}

#[derive(Debug)]
pub struct GetUserVehiclesUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserVehiclesUseCase {
    type Response = Vec<Vehicle>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserVehicles";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let mut vehicles = ctx.repos.vehicles.find_by_user(&self.user_id).await;
        // Newest first, like the dashboard lists them
        vehicles.sort_by_key(|vehicle| std::cmp::Reverse(vehicle.created));
        Ok(vehicles)
    }
}
