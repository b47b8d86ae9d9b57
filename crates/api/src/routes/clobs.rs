//! Clob endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use radar_core::error::DomainError;
use radar_core::mask::Mask;
use radar_core::metrics::{record_page_query_duration, record_page_served};
use radar_core::pagination::PageRequest;
use radar_core::ports::{ClobFilter, RequestScope};

use crate::dto::{ClobDto, PageDto};
use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_PAGE_SIZE: i32 = 100;

/// Query parameters for `GET /clobs`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub office: Option<String>,
    #[serde(rename = "id-mask")]
    pub id_mask: Option<String>,
    /// Include clob bodies in catalog pages. Defaults to false.
    #[serde(rename = "include-values", default)]
    pub include_values: bool,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /clobs` - paginated catalog ordered by `(id, office)`.
pub async fn list_clobs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageDto<ClobDto>>, ApiError> {
    let scope = RequestScope {
        office: params.office,
    };
    let filter = ClobFilter {
        id: Mask::from_param(params.id_mask.as_deref())?,
        include_values: params.include_values,
    };
    let request = PageRequest::from_params(params.page.as_deref(), params.page_size, DEFAULT_PAGE_SIZE)?;

    let start = Instant::now();
    let page = state
        .repos
        .clobs()
        .fetch_page(&scope, &filter, &request)
        .await?;
    record_page_query_duration("clobs", start.elapsed().as_secs_f64());
    record_page_served("clobs");

    Ok(Json(PageDto::from_page(page, ClobDto::from)))
}

/// Query parameters for single-clob endpoints. `office` is required.
#[derive(Debug, Deserialize)]
pub struct OneParams {
    pub office: String,
}

/// `GET /clobs/{id}` - one clob, value included.
pub async fn get_clob(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OneParams>,
) -> Result<Json<ClobDto>, ApiError> {
    let found = state
        .repos
        .clobs()
        .fetch_one(&params.office, &id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: "clob",
            id: format!("{}/{}", params.office, id),
        })?;

    Ok(Json(ClobDto::from(found)))
}

/// `POST /clobs` - create or update a clob.
pub async fn create_clob(
    State(state): State<AppState>,
    Json(body): Json<ClobDto>,
) -> Result<StatusCode, ApiError> {
    state.repos.clobs().store(&body.into_model()).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /clobs/{id}`.
pub async fn delete_clob(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OneParams>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.repos.clobs().delete(&params.office, &id).await?;

    if deleted == 0 {
        return Err(DomainError::NotFound {
            kind: "clob",
            id: format!("{}/{}", params.office, id),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_values_defaults_off() {
        let params: ListParams = serde_urlencoded::from_str("office=SPK").unwrap();
        assert!(!params.include_values);

        let params: ListParams = serde_urlencoded::from_str("include-values=true").unwrap();
        assert!(params.include_values);
    }
}
