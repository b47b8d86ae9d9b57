//! Storage layer for the RADAR data-access API.
//!
//! This crate provides PostgreSQL implementations of the repository
//! traits defined in `radar-core`. It queries read-oriented views of an
//! externally owned schema: there are no migrations here and no writes
//! outside the narrow `store`/`delete` gateways.
//!
//! # Architecture
//!
//! The storage layer follows the repository pattern:
//!
//! - [`postgres::Database`] - Connection pool management
//! - [`postgres::PgRepositories`] - Composite repository for all entity families
//! - Individual repos for offices, locations, time series, ratings, levels, clobs
//!
//! # Pagination caveat
//!
//! `total` and page rows come from separate statements, so concurrent
//! writes between the count and the fetch (or between pages) can make
//! the reported total drift from the rows actually traversed. This is
//! inherent to cursor-over-live-table pagination; no transaction spans
//! multiple HTTP requests.

pub mod postgres;

pub use postgres::{Database, DatabaseConfig, PgRepositories};
