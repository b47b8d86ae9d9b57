//! PostgreSQL storage adapter.
//!
//! This module implements the repository traits defined in `radar-core`
//! against read-oriented views of an externally owned schema.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool management
//! - [`PgRepositories`] - Composite repository implementing `Repositories`
//! - Individual repos: `PgLocationRepository`, `PgClobRepository`, etc.
//!
//! # Usage
//!
//! ```ignore
//! let config = DatabaseConfig::for_api(&database_url);
//! let db = Database::connect(&config).await?;
//!
//! let repositories = PgRepositories::new(Arc::new(db));
//! ```

mod clob_repo;
mod database;
mod helpers;
mod level_repo;
mod location_repo;
mod office_repo;
mod rating_repo;
mod timeseries_repo;

pub use clob_repo::PgClobRepository;
pub use database::{Database, DatabaseConfig};
pub use level_repo::PgLevelRepository;
pub use location_repo::PgLocationRepository;
pub use office_repo::PgOfficeRepository;
pub use rating_repo::PgRatingSpecRepository;
pub use timeseries_repo::PgTimeSeriesRepository;

use std::sync::Arc;

use radar_core::ports::{
    ClobRepository, LevelRepository, LocationRepository, OfficeRepository, RatingSpecRepository,
    Repositories, TimeSeriesRepository,
};

// =============================================================================
// Composite Repository
// =============================================================================

/// Aggregated PostgreSQL repositories implementing the `Repositories` trait.
///
/// This provides a single entry point for all storage operations. Each
/// request borrows a pooled connection for exactly one statement at a
/// time; no session state survives between calls.
pub struct PgRepositories {
    offices: PgOfficeRepository,
    locations: PgLocationRepository,
    timeseries: PgTimeSeriesRepository,
    rating_specs: PgRatingSpecRepository,
    levels: PgLevelRepository,
    clobs: PgClobRepository,
}

impl PgRepositories {
    /// Create a new repository aggregate from a database connection.
    pub fn new(db: Arc<Database>) -> Self {
        let pool = db.pool().clone();
        Self {
            offices: PgOfficeRepository::new(pool.clone()),
            locations: PgLocationRepository::new(pool.clone()),
            timeseries: PgTimeSeriesRepository::new(pool.clone()),
            rating_specs: PgRatingSpecRepository::new(pool.clone()),
            levels: PgLevelRepository::new(pool.clone()),
            clobs: PgClobRepository::new(pool),
        }
    }
}

impl Repositories for PgRepositories {
    fn offices(&self) -> &dyn OfficeRepository {
        &self.offices
    }

    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn timeseries(&self) -> &dyn TimeSeriesRepository {
        &self.timeseries
    }

    fn rating_specs(&self) -> &dyn RatingSpecRepository {
        &self.rating_specs
    }

    fn levels(&self) -> &dyn LevelRepository {
        &self.levels
    }

    fn clobs(&self) -> &dyn ClobRepository {
        &self.clobs
    }
}
