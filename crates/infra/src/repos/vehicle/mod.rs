mod inmemory;
mod postgres;

pub use inmemory::InMemoryVehicleRepo;
use parkvakt_domain::{Vehicle, ID};
pub use postgres::PostgresVehicleRepo;

#[async_trait::async_trait]
pub trait IVehicleRepo: Send + Sync {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()>;
    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()>;
    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Vehicle>;
    async fn find_by_user_and_plate(&self, user_id: &ID, plate: &str) -> Option<Vehicle>;
    /// Read-only snapshot of every vehicle across all users, used by the
    /// reminder sweep
    async fn find_all(&self) -> anyhow::Result<Vec<Vehicle>>;
    async fn delete(&self, vehicle_id: &ID) -> Option<Vehicle>;
}
