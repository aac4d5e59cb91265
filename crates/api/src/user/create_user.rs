use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use parkvakt_api_structs::create_user::*;
use parkvakt_domain::{Language, User};
use parkvakt_infra::ParkvaktContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        email: body.email,
        language: body.language,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(ParkvaktError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub language: Option<Language>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    StorageError,
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The given email: {} is not valid", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }

        let mut user = User::new(email);
        if let Some(language) = self.language {
            user.language = language;
        }

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
