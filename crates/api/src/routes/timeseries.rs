//! Time series endpoints: the catalog and the values retrieval.

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use radar_core::error::DomainError;
use radar_core::mask::Mask;
use radar_core::metrics::{record_page_query_duration, record_page_served};
use radar_core::pagination::PageRequest;
use radar_core::ports::{RequestScope, TsDescriptorFilter, TsWindow};

use crate::dto::{PageDto, TimeSeriesDto, TsDescriptorDto};
use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_CATALOG_PAGE_SIZE: i32 = 100;
/// Values are dense; the legacy API pages them 500 at a time.
const DEFAULT_VALUES_PAGE_SIZE: i32 = 500;

/// Query parameters for `GET /catalog/timeseries`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub office: Option<String>,
    #[serde(rename = "ts-id-mask")]
    pub ts_id_mask: Option<String>,
    #[serde(rename = "parameter-mask")]
    pub parameter_mask: Option<String>,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /catalog/timeseries` - descriptor catalog ordered by `(ts-id, office)`.
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PageDto<TsDescriptorDto>>, ApiError> {
    let scope = RequestScope {
        office: params.office,
    };
    let filter = TsDescriptorFilter {
        ts_id: Mask::from_param(params.ts_id_mask.as_deref())?,
        parameter: Mask::from_param(params.parameter_mask.as_deref())?,
    };
    let request = PageRequest::from_params(
        params.page.as_deref(),
        params.page_size,
        DEFAULT_CATALOG_PAGE_SIZE,
    )?;

    let start = Instant::now();
    let page = state
        .repos
        .timeseries()
        .fetch_catalog(&scope, &filter, &request)
        .await?;
    record_page_query_duration("timeseries-catalog", start.elapsed().as_secs_f64());
    record_page_served("timeseries-catalog");

    Ok(Json(PageDto::from_page(page, TsDescriptorDto::from)))
}

/// Query parameters for `GET /timeseries`. Series name and office are
/// required; the time window is optional and inclusive.
#[derive(Debug, Deserialize)]
pub struct ValuesParams {
    pub name: String,
    pub office: String,
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(alias = "cursor")]
    pub page: Option<String>,
    #[serde(rename = "page-size", alias = "pageSize", alias = "pagesize")]
    pub page_size: Option<i32>,
}

/// `GET /timeseries` - one page of values for a single series.
///
/// A series that does not exist is a 404; a series with no values in
/// the window is a valid empty page. The existence check runs against
/// the catalog before any value query.
pub async fn get_timeseries(
    State(state): State<AppState>,
    Query(params): Query<ValuesParams>,
) -> Result<Json<TimeSeriesDto>, ApiError> {
    let descriptor = state
        .repos
        .timeseries()
        .fetch_descriptor(&params.office, &params.name)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: "timeseries",
            id: format!("{}/{}", params.office, params.name),
        })?;

    let window = TsWindow {
        begin: params.begin,
        end: params.end,
    };
    let request = PageRequest::from_params(
        params.page.as_deref(),
        params.page_size,
        DEFAULT_VALUES_PAGE_SIZE,
    )?;

    let start = Instant::now();
    let page = state
        .repos
        .timeseries()
        .fetch_values(&params.office, &params.name, &window, &request)
        .await?;
    record_page_query_duration("timeseries-values", start.elapsed().as_secs_f64());
    record_page_served("timeseries-values");

    Ok(Json(TimeSeriesDto::from_page(descriptor, page)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_params_require_name_and_office() {
        let err = serde_urlencoded::from_str::<ValuesParams>("office=SPK");
        assert!(err.is_err());

        let params: ValuesParams =
            serde_urlencoded::from_str("name=SACR.Flow.Inst.1Hour.0.Raw&office=SPK").unwrap();
        assert_eq!(params.name, "SACR.Flow.Inst.1Hour.0.Raw");
        assert!(params.begin.is_none());
    }

    #[test]
    fn window_parses_rfc3339() {
        let params: ValuesParams = serde_urlencoded::from_str(
            "name=X.Flow.Inst.0.0.Raw&office=SPK&begin=2024-01-01T00:00:00Z&end=2024-02-01T00:00:00Z",
        )
        .unwrap();
        assert!(params.begin.unwrap() < params.end.unwrap());
    }
}
