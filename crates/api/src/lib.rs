//! REST API for the RADAR data access service.
//!
//! Thin HTTP layer over the repository ports: route handlers parse query
//! parameters (including deprecated aliases), build a [`PageRequest`]
//! from the opaque cursor, call the port, and serialize the page
//! envelope. All pagination mechanics live in `radar-core`.
//!
//! ```ignore
//! use std::sync::Arc;
//! use radar_api::{serve, AppState, ServerConfig};
//!
//! let state = AppState::new(Arc::new(repositories));
//! serve(state, ServerConfig::default()).await?;
//! ```
//!
//! [`PageRequest`]: radar_core::pagination::PageRequest

mod dto;
mod error;
mod routes;
mod server;

pub use dto::{
    ClobDto, LevelDto, LocationDto, OfficeDto, PageDto, RatingSpecDto, TimeSeriesDto,
    TsDescriptorDto, TsValueDto,
};
pub use error::{ApiError, ErrorBody};
pub use server::{build_router, serve, serve_with_shutdown, AppState, ServerConfig};
