//! Location level endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use radar_core::mask::Mask;
use radar_core::metrics::{record_page_query_duration, record_page_served};
use radar_core::pagination::PageRequest;
use radar_core::ports::{LevelFilter, RequestScope};

use crate::dto::{LevelDto, PageDto};
use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_PAGE_SIZE: i32 = 100;

/// Query parameters for `GET /levels`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub office: Option<String>,
    #[serde(rename = "level-id-mask")]
    pub level_id_mask: Option<String>,
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /levels` - paginated levels ordered by `(level-id, effective-date)`.
///
/// An empty result is a valid page; levels have no "not found" contract.
pub async fn list_levels(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageDto<LevelDto>>, ApiError> {
    let scope = RequestScope {
        office: params.office,
    };
    let filter = LevelFilter {
        level_id: Mask::from_param(params.level_id_mask.as_deref())?,
        begin: params.begin,
        end: params.end,
    };
    let request = PageRequest::from_params(params.page.as_deref(), params.page_size, DEFAULT_PAGE_SIZE)?;

    let start = Instant::now();
    let page = state
        .repos
        .levels()
        .fetch_page(&scope, &filter, &request)
        .await?;
    record_page_query_duration("levels", start.elapsed().as_secs_f64());
    record_page_served("levels");

    Ok(Json(PageDto::from_page(page, LevelDto::from)))
}
