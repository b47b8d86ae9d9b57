//! Core domain layer for the RADAR data-access API.
//!
//! This crate contains the domain models, port traits (interfaces), and
//! the cursor pagination machinery shared by every catalog endpoint. It
//! follows hexagonal architecture principles - this is the innermost
//! layer with no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      radar (binary)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       radar-api                             │
//! │              (axum REST, params, DTOs)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     radar-storage                           │
//! │                     (PostgreSQL)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     radar-core  ← YOU ARE HERE              │
//! │          (models, ports, pagination, masks)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (Office, Location, TimeSeries, ...)
//! - [`pagination`] - Cursor codec, page requests, page assembly
//! - [`mask`] - Case-insensitive regex filters
//! - [`ports`] - Repository traits for adapters to implement
//! - [`error`] - Domain error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Key Concepts
//!
//! ## Keyset pagination
//!
//! Every catalog is served through the same contract: a totally ordered
//! query, an opaque cursor encoding the last seen key plus the total
//! count and page size, a `LIMIT page_size + 1` look-ahead fetch, and a
//! next-page cursor built from the last included row. See [`pagination`].
//!
//! ## Office scoping
//!
//! Almost every entity id is owned by an office. The office scope is an
//! explicit [`ports::RequestScope`] argument on every repository call -
//! never database session state, which could leak across pooled
//! connections.

pub mod error;
pub mod mask;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod ports;
