use super::IVehicleRepo;
use crate::repos::shared::inmemory_repo::*;
use parkvakt_domain::{Vehicle, ID};

pub struct InMemoryVehicleRepo {
    vehicles: std::sync::Mutex<Vec<Vehicle>>,
}

impl InMemoryVehicleRepo {
    pub fn new() -> Self {
        Self {
            vehicles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVehicleRepo for InMemoryVehicleRepo {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        insert(vehicle, &self.vehicles);
        Ok(())
    }

    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        save(vehicle, &self.vehicles);
        Ok(())
    }

    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle> {
        find(vehicle_id, &self.vehicles)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Vehicle> {
        find_by(&self.vehicles, |v| v.user_id == *user_id)
    }

    async fn find_by_user_and_plate(&self, user_id: &ID, plate: &str) -> Option<Vehicle> {
        let mut vehicles = find_by(&self.vehicles, |v| {
            v.user_id == *user_id && v.plate == plate
        });
        if vehicles.is_empty() {
            return None;
        }
        Some(vehicles.remove(0))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Vehicle>> {
        Ok(find_all(&self.vehicles))
    }

    async fn delete(&self, vehicle_id: &ID) -> Option<Vehicle> {
        delete(vehicle_id, &self.vehicles)
    }
}
