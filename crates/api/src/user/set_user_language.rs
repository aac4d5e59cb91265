use crate::error::ParkvaktError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use parkvakt_api_structs::set_user_language::*;
use parkvakt_domain::{Language, User, ID};
use parkvakt_infra::ParkvaktContext;

pub async fn set_user_language_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ParkvaktContext>,
) -> Result<HttpResponse, ParkvaktError> {
    let usecase = SetUserLanguageUseCase {
        user_id: path_params.user_id.clone(),
        language: body.0.language,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(ParkvaktError::from)
}

#[derive(Debug)]
pub struct SetUserLanguageUseCase {
    pub user_id: ID,
    pub language: Language,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ParkvaktError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetUserLanguageUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "SetUserLanguage";

    async fn execute(&mut self, ctx: &ParkvaktContext) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::NotFound(self.user_id.clone())),
        };

        user.language = self.language;
        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn updates_the_language() {
        let ctx = ParkvaktContext::create_inmemory();
        let user = User::new("ana@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = SetUserLanguageUseCase {
            user_id: user.id.clone(),
            language: Language::En,
        };
        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(updated.language, Language::En);

        let stored = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(stored.language, Language::En);
    }

    #[tokio::test]
    async fn rejects_unknown_user() {
        let ctx = ParkvaktContext::create_inmemory();
        let usecase = SetUserLanguageUseCase {
            user_id: Default::default(),
            language: Language::En,
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
