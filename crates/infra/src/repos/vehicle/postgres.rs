use super::IVehicleRepo;
use chrono::NaiveDate;
use parkvakt_domain::{Vehicle, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresVehicleRepo {
    pool: PgPool,
}

impl PostgresVehicleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VehicleRaw {
    vehicle_uid: Uuid,
    user_uid: Uuid,
    plate: String,
    registration_expiry: NaiveDate,
    insurance_expiry: NaiveDate,
    inspection_expiry: NaiveDate,
    created: i64,
    updated: i64,
}

impl From<VehicleRaw> for Vehicle {
    fn from(raw: VehicleRaw) -> Self {
        Self {
            id: raw.vehicle_uid.into(),
            user_id: raw.user_uid.into(),
            plate: raw.plate,
            registration_expiry: raw.registration_expiry,
            insurance_expiry: raw.insurance_expiry,
            inspection_expiry: raw.inspection_expiry,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IVehicleRepo for PostgresVehicleRepo {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles
            (vehicle_uid, user_uid, plate, registration_expiry, insurance_expiry, inspection_expiry, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(vehicle.id.inner_ref())
        .bind(vehicle.user_id.inner_ref())
        .bind(&vehicle.plate)
        .bind(vehicle.registration_expiry)
        .bind(vehicle.insurance_expiry)
        .bind(vehicle.inspection_expiry)
        .bind(vehicle.created)
        .bind(vehicle.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET plate = $2,
            registration_expiry = $3,
            insurance_expiry = $4,
            inspection_expiry = $5,
            updated = $6
            WHERE vehicle_uid = $1
            "#,
        )
        .bind(vehicle.id.inner_ref())
        .bind(&vehicle.plate)
        .bind(vehicle.registration_expiry)
        .bind(vehicle.insurance_expiry)
        .bind(vehicle.inspection_expiry)
        .bind(vehicle.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle> {
        sqlx::query_as::<_, VehicleRaw>(
            r#"
            SELECT * FROM vehicles AS v
            WHERE v.vehicle_uid = $1
            "#,
        )
        .bind(vehicle_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|vehicle| vehicle.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Vehicle> {
        sqlx::query_as::<_, VehicleRaw>(
            r#"
            SELECT * FROM vehicles AS v
            WHERE v.user_uid = $1
            ORDER BY v.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|vehicle| vehicle.into())
        .collect()
    }

    async fn find_by_user_and_plate(&self, user_id: &ID, plate: &str) -> Option<Vehicle> {
        sqlx::query_as::<_, VehicleRaw>(
            r#"
            SELECT * FROM vehicles AS v
            WHERE v.user_uid = $1 AND v.plate = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(plate)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|vehicle| vehicle.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, VehicleRaw>(
            r#"
            SELECT * FROM vehicles
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles.into_iter().map(|vehicle| vehicle.into()).collect())
    }

    async fn delete(&self, vehicle_id: &ID) -> Option<Vehicle> {
        sqlx::query_as::<_, VehicleRaw>(
            r#"
            DELETE FROM vehicles AS v
            WHERE v.vehicle_uid = $1
            RETURNING *
            "#,
        )
        .bind(vehicle_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|vehicle| vehicle.into())
    }
}
