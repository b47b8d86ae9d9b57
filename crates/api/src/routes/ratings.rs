//! Rating spec endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use radar_core::error::DomainError;
use radar_core::mask::Mask;
use radar_core::metrics::{record_page_query_duration, record_page_served};
use radar_core::pagination::PageRequest;
use radar_core::ports::{RatingSpecFilter, RequestScope};

use crate::dto::{PageDto, RatingSpecDto};
use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_PAGE_SIZE: i32 = 100;

/// Query parameters for `GET /ratings/specs`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub office: Option<String>,
    #[serde(rename = "rating-id-mask")]
    pub rating_id_mask: Option<String>,
    #[serde(rename = "template-mask")]
    pub template_mask: Option<String>,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /ratings/specs` - paginated catalog ordered by `(rating-id, office)`.
pub async fn list_rating_specs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageDto<RatingSpecDto>>, ApiError> {
    let scope = RequestScope {
        office: params.office,
    };
    let filter = RatingSpecFilter {
        rating_id: Mask::from_param(params.rating_id_mask.as_deref())?,
        template_id: Mask::from_param(params.template_mask.as_deref())?,
    };
    let request = PageRequest::from_params(params.page.as_deref(), params.page_size, DEFAULT_PAGE_SIZE)?;

    let start = Instant::now();
    let page = state
        .repos
        .rating_specs()
        .fetch_page(&scope, &filter, &request)
        .await?;
    record_page_query_duration("rating-specs", start.elapsed().as_secs_f64());
    record_page_served("rating-specs");

    Ok(Json(PageDto::from_page(page, RatingSpecDto::from)))
}

/// Query parameters for `GET /ratings/specs/{rating_id}`.
#[derive(Debug, Deserialize)]
pub struct OneParams {
    pub office: String,
}

/// `GET /ratings/specs/{rating_id}`.
pub async fn get_rating_spec(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
    Query(params): Query<OneParams>,
) -> Result<Json<RatingSpecDto>, ApiError> {
    let found = state
        .repos
        .rating_specs()
        .fetch_one(&params.office, &rating_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: "rating-spec",
            id: format!("{}/{}", params.office, rating_id),
        })?;

    Ok(Json(RatingSpecDto::from(found)))
}
