mod reminder_log;
mod shared;
mod user;
mod vehicle;

pub use reminder_log::IReminderLogRepo;
use reminder_log::{InMemoryReminderLogRepo, PostgresReminderLogRepo};
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};
pub use vehicle::IVehicleRepo;
use vehicle::{InMemoryVehicleRepo, PostgresVehicleRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub vehicles: Arc<dyn IVehicleRepo>,
    pub reminder_logs: Arc<dyn IReminderLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            vehicles: Arc::new(PostgresVehicleRepo::new(pool.clone())),
            reminder_logs: Arc::new(PostgresReminderLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            vehicles: Arc::new(InMemoryVehicleRepo::new()),
            reminder_logs: Arc::new(InMemoryReminderLogRepo::new()),
        }
    }
}
