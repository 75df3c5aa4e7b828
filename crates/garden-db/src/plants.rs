//! PostgreSQL plant repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use garden_core::{Error, NewPlant, PlantRecord, PlantRepository, Result, UpdatePlantRequest};

const COLUMNS: &str = "id, name, floor, slot_index, start_date, cycle_adjustment_days,
        cycle_days, target_humidity_pct, created_at, updated_at";

/// PostgreSQL plant repository. The `(floor, slot_index)` unique index
/// enforces one plant per slot.
pub struct PgPlantRepository {
    pool: Pool<Postgres>,
}

impl PgPlantRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn parse_row(row: &PgRow) -> PlantRecord {
        PlantRecord {
            id: row.get("id"),
            name: row.get("name"),
            floor: row.get("floor"),
            slot_index: row.get("slot_index"),
            start_date: row.get("start_date"),
            cycle_adjustment_days: row.get("cycle_adjustment_days"),
            cycle_days: row.get("cycle_days"),
            target_humidity_pct: row.get("target_humidity_pct"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

/// Map a write failure, turning slot collisions into `Conflict`.
fn write_error(e: sqlx::Error, floor: i32, slot_index: i32) -> Error {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::Conflict(occupied_message(floor, slot_index))
        }
        _ => Error::Database(e),
    }
}

pub(crate) fn occupied_message(floor: i32, slot_index: i32) -> String {
    format!(
        "slot {} on floor {} is already occupied",
        slot_index, floor
    )
}

#[async_trait]
impl PlantRepository for PgPlantRepository {
    async fn list(&self) -> Result<Vec<PlantRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM plant ORDER BY floor, slot_index",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::parse_row).collect())
    }

    async fn get(&self, id: &str) -> Result<PlantRecord> {
        let row = sqlx::query(&format!("SELECT {} FROM plant WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref()
            .map(Self::parse_row)
            .ok_or_else(|| Error::NotFound(format!("plant {}", id)))
    }

    async fn insert(&self, plant: NewPlant) -> Result<PlantRecord> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();

        let row = sqlx::query(&format!(
            "INSERT INTO plant (id, name, floor, slot_index, start_date, cycle_adjustment_days,
                                cycle_days, target_humidity_pct, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            COLUMNS
        ))
        .bind(&id)
        .bind(&plant.name)
        .bind(plant.floor)
        .bind(plant.slot_index)
        .bind(plant.start_date)
        .bind(plant.cycle_adjustment_days)
        .bind(plant.cycle_days)
        .bind(plant.target_humidity_pct)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, plant.floor, plant.slot_index))?;

        debug!(subsystem = "db", op = "insert", plant_id = %id, "Plant stored");
        Ok(Self::parse_row(&row))
    }

    async fn update(&self, id: &str, changes: UpdatePlantRequest) -> Result<PlantRecord> {
        changes.validate()?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM plant WHERE id = $1 FOR UPDATE",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let mut plant = row
            .as_ref()
            .map(Self::parse_row)
            .ok_or_else(|| Error::NotFound(format!("plant {}", id)))?;

        changes.apply_to(&mut plant);
        plant.updated_at = Some(Utc::now());

        sqlx::query(
            "UPDATE plant SET
                name = $2,
                floor = $3,
                slot_index = $4,
                start_date = $5,
                cycle_adjustment_days = $6,
                cycle_days = $7,
                target_humidity_pct = $8,
                updated_at = $9
             WHERE id = $1",
        )
        .bind(&plant.id)
        .bind(&plant.name)
        .bind(plant.floor)
        .bind(plant.slot_index)
        .bind(plant.start_date)
        .bind(plant.cycle_adjustment_days)
        .bind(plant.cycle_days)
        .bind(plant.target_humidity_pct)
        .bind(plant.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, plant.floor, plant.slot_index))?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(subsystem = "db", op = "update", plant_id = %id, "Plant updated");
        Ok(plant)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM plant WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("plant {}", id)));
        }
        debug!(subsystem = "db", op = "delete", plant_id = %id, "Plant removed");
        Ok(())
    }
}
