//! Location catalog endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use radar_core::error::DomainError;
use radar_core::mask::Mask;
use radar_core::metrics::{record_page_query_duration, record_page_served};
use radar_core::pagination::PageRequest;
use radar_core::ports::{LocationFilter, RequestScope};

use crate::dto::{LocationDto, PageDto};
use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_PAGE_SIZE: i32 = 100;

/// Query parameters for `GET /locations`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub office: Option<String>,
    #[serde(rename = "name-mask")]
    pub name_mask: Option<String>,
    #[serde(rename = "kind-mask")]
    pub kind_mask: Option<String>,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /locations` - paginated catalog ordered by `(name, office)`.
pub async fn list_locations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageDto<LocationDto>>, ApiError> {
    let scope = RequestScope {
        office: params.office,
    };
    let filter = LocationFilter {
        name: Mask::from_param(params.name_mask.as_deref())?,
        kind: Mask::from_param(params.kind_mask.as_deref())?,
    };
    let request = PageRequest::from_params(params.page.as_deref(), params.page_size, DEFAULT_PAGE_SIZE)?;

    let start = Instant::now();
    let page = state
        .repos
        .locations()
        .fetch_page(&scope, &filter, &request)
        .await?;
    record_page_query_duration("locations", start.elapsed().as_secs_f64());
    record_page_served("locations");

    Ok(Json(PageDto::from_page(page, LocationDto::from)))
}

/// Query parameters for single-location endpoints. `office` is required.
#[derive(Debug, Deserialize)]
pub struct OneParams {
    pub office: String,
}

/// `GET /locations/{name}`.
pub async fn get_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<OneParams>,
) -> Result<Json<LocationDto>, ApiError> {
    let found = state
        .repos
        .locations()
        .fetch_one(&params.office, &name)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: "location",
            id: format!("{}/{}", params.office, name),
        })?;

    Ok(Json(LocationDto::from(found)))
}

/// `POST /locations` - create or update a location.
pub async fn create_location(
    State(state): State<AppState>,
    Json(body): Json<LocationDto>,
) -> Result<StatusCode, ApiError> {
    state.repos.locations().store(&body.into_model()).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /locations/{name}`.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<OneParams>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repos
        .locations()
        .delete(&params.office, &name)
        .await?;

    if deleted == 0 {
        return Err(DomainError::NotFound {
            kind: "location",
            id: format!("{}/{}", params.office, name),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_parameter_names_parse() {
        let params: ListParams =
            serde_urlencoded::from_str("office=SPK&name-mask=SAC.*&page=abc&page-size=25").unwrap();
        assert_eq!(params.office.as_deref(), Some("SPK"));
        assert_eq!(params.name_mask.as_deref(), Some("SAC.*"));
        assert_eq!(params.page.as_deref(), Some("abc"));
        assert_eq!(params.page_size, Some(25));
    }

    #[test]
    fn deprecated_aliases_still_parse() {
        // Backward-compatible names accepted at the boundary only
        let params: ListParams = serde_urlencoded::from_str("cursor=abc&pageSize=10").unwrap();
        assert_eq!(params.page.as_deref(), Some("abc"));
        assert_eq!(params.page_size, Some(10));

        let params: ListParams = serde_urlencoded::from_str("pagesize=7").unwrap();
        assert_eq!(params.page_size, Some(7));
    }

    #[test]
    fn missing_parameters_default_to_none() {
        let params: ListParams = serde_urlencoded::from_str("").unwrap();
        assert!(params.office.is_none());
        assert!(params.page.is_none());
        assert!(params.page_size.is_none());
    }
}
