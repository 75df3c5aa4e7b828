//! # garden-db
//!
//! Plant record storage for GardenGes.
//!
//! This crate provides:
//! - PostgreSQL connection pool management
//! - [`PgPlantRepository`], the persistent store
//! - [`InMemoryPlantRepository`], used when no database is configured
//!
//! ## Example
//!
//! ```rust,ignore
//! use garden_db::{CreatePlantRequest, Database, PlantRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/garden").await?;
//!     db.migrate().await?;
//!
//!     let plant = db.plants.insert(CreatePlantRequest {
//!         name: Some("Tomate".to_string()),
//!         floor: Some(1),
//!         slot_index: Some(0),
//!         start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1),
//!         cycle_days: Some(90),
//!         target_humidity_pct: Some(70),
//!         ..Default::default()
//!     }.validate()?).await?;
//!
//!     println!("Created plant: {}", plant.id);
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod plants;
pub mod pool;

// Test fixtures for repository tests
// Note: Always compiled so integration tests (in tests/) can use them
pub mod test_fixtures;

// Re-export core types
pub use garden_core::*;

pub use memory::InMemoryPlantRepository;
pub use plants::PgPlantRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// PostgreSQL-backed plant storage.
pub struct Database {
    pub pool: sqlx::PgPool,
    pub plants: PgPlantRepository,
}

impl Database {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            plants: PgPlantRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with the default pool sizing.
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(create_pool(url).await?))
    }

    pub async fn connect_with_config(url: &str, config: &PoolConfig) -> Result<Self> {
        Ok(Self::new(create_pool_with_config(url, config).await?))
    }

    /// Apply the SQL files under `migrations/` that have not run yet.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))
    }
}
