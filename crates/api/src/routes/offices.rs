//! Office endpoints.

use axum::Json;
use axum::extract::{Path, State};

use radar_core::error::DomainError;

use crate::dto::OfficeDto;
use crate::error::ApiError;
use crate::server::AppState;

/// `GET /offices` - the full office list, unpaginated.
pub async fn list_offices(State(state): State<AppState>) -> Result<Json<Vec<OfficeDto>>, ApiError> {
    let offices = state.repos.offices().fetch_all().await?;
    Ok(Json(offices.into_iter().map(OfficeDto::from).collect()))
}

/// `GET /offices/{office}`.
pub async fn get_office(
    State(state): State<AppState>,
    Path(office): Path<String>,
) -> Result<Json<OfficeDto>, ApiError> {
    let found = state
        .repos
        .offices()
        .fetch_one(&office)
        .await?
        .ok_or(DomainError::NotFound {
            kind: "office",
            id: office,
        })?;

    Ok(Json(OfficeDto::from(found)))
}
