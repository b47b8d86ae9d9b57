//! Time series repository implementation for PostgreSQL.
//!
//! Two views back this repository: `av_cwms_ts_id` for the catalog of
//! series descriptors and `av_tsv` for the values themselves. Value
//! retrieval paginates over the timestamp alone, which is unique within
//! one series.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::{TimeSeriesDescriptor, TsDescriptorKey, TsValue, TsValueKey};
use radar_core::pagination::{Page, PageRequest, assemble_page};
use radar_core::ports::{RequestScope, TimeSeriesRepository, TsDescriptorFilter, TsWindow};

use super::helpers::{limit_clause, where_clause};

const CATALOG_COLUMNS: &str =
    r#"office_id, ts_id, location_id, parameter_id, "interval", unit, active"#;

/// PostgreSQL implementation of TimeSeriesRepository.
pub struct PgTimeSeriesRepository {
    pool: PgPool,
}

impl PgTimeSeriesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeSeriesRepository for PgTimeSeriesRepository {
    async fn fetch_catalog(
        &self,
        scope: &RequestScope,
        filter: &TsDescriptorFilter,
        request: &PageRequest<TsDescriptorKey>,
    ) -> DomainResult<Page<TimeSeriesDescriptor>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1;

        if scope.office.is_some() {
            conditions.push(format!("office_id = UPPER(${})", param_idx));
            param_idx += 1;
        }
        if filter.ts_id.pattern().is_some() {
            conditions.push(format!("ts_id ~* ${}", param_idx));
            param_idx += 1;
        }
        if filter.parameter.pattern().is_some() {
            conditions.push(format!("parameter_id ~* ${}", param_idx));
            param_idx += 1;
        }

        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!(
                    "SELECT COUNT(*) FROM av_cwms_ts_id {}",
                    where_clause(&conditions)
                );
                let mut q = sqlx::query_scalar::<_, i64>(&sql);
                if let Some(ref office) = scope.office {
                    q = q.bind(office);
                }
                if let Some(pattern) = filter.ts_id.pattern() {
                    q = q.bind(pattern);
                }
                if let Some(pattern) = filter.parameter.pattern() {
                    q = q.bind(pattern);
                }
                q.fetch_one(&self.pool)
                    .await
                    .map_err(|e| StorageError::QueryError(e.to_string()))?
            }
        };

        let mut page_conditions = conditions.clone();
        if request.seek().is_some() {
            page_conditions.push(format!(
                "(ts_id, office_id) > (${}, ${})",
                param_idx,
                param_idx + 1
            ));
        }

        let sql = format!(
            "SELECT {} FROM av_cwms_ts_id {} ORDER BY ts_id ASC, office_id ASC {}",
            CATALOG_COLUMNS,
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, DescriptorRow>(&sql);
        if let Some(ref office) = scope.office {
            q = q.bind(office);
        }
        if let Some(pattern) = filter.ts_id.pattern() {
            q = q.bind(pattern);
        }
        if let Some(pattern) = filter.parameter.pattern() {
            q = q.bind(pattern);
        }
        if let Some(key) = request.seek() {
            q = q.bind(&key.ts_id).bind(&key.office_id);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let descriptors: Vec<TimeSeriesDescriptor> = rows
            .into_iter()
            .map(DescriptorRow::into_descriptor)
            .collect();

        assemble_page(descriptors, request, total, |d| TsDescriptorKey {
            ts_id: d.ts_id.clone(),
            office_id: d.office_id.clone(),
        })
        .map_err(Into::into)
    }

    async fn fetch_descriptor(
        &self,
        office_id: &str,
        ts_id: &str,
    ) -> DomainResult<Option<TimeSeriesDescriptor>> {
        let sql = format!(
            "SELECT {} FROM av_cwms_ts_id WHERE office_id = UPPER($1) AND UPPER(ts_id) = UPPER($2)",
            CATALOG_COLUMNS
        );
        let row = sqlx::query_as::<_, DescriptorRow>(&sql)
            .bind(office_id)
            .bind(ts_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(row.map(DescriptorRow::into_descriptor))
    }

    async fn fetch_values(
        &self,
        office_id: &str,
        ts_id: &str,
        window: &TsWindow,
        request: &PageRequest<TsValueKey>,
    ) -> DomainResult<Page<TsValue>> {
        let mut conditions = vec![
            "office_id = UPPER($1)".to_string(),
            "UPPER(ts_id) = UPPER($2)".to_string(),
        ];
        let mut param_idx = 3;

        if window.begin.is_some() {
            conditions.push(format!("date_time >= ${}", param_idx));
            param_idx += 1;
        }
        if window.end.is_some() {
            conditions.push(format!("date_time <= ${}", param_idx));
            param_idx += 1;
        }

        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!("SELECT COUNT(*) FROM av_tsv {}", where_clause(&conditions));
                let mut q = sqlx::query_scalar::<_, i64>(&sql).bind(office_id).bind(ts_id);
                if let Some(begin) = window.begin {
                    q = q.bind(begin);
                }
                if let Some(end) = window.end {
                    q = q.bind(end);
                }
                q.fetch_one(&self.pool)
                    .await
                    .map_err(|e| StorageError::QueryError(e.to_string()))?
            }
        };

        let mut page_conditions = conditions.clone();
        if request.seek().is_some() {
            page_conditions.push(format!("date_time > ${}", param_idx));
        }

        let sql = format!(
            "SELECT date_time, value, quality_code FROM av_tsv {} ORDER BY date_time ASC {}",
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, TsValueRow>(&sql).bind(office_id).bind(ts_id);
        if let Some(begin) = window.begin {
            q = q.bind(begin);
        }
        if let Some(end) = window.end {
            q = q.bind(end);
        }
        if let Some(key) = request.seek() {
            q = q.bind(key.date_time);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let values: Vec<TsValue> = rows.into_iter().map(TsValueRow::into_value).collect();

        assemble_page(values, request, total, |v| TsValueKey {
            date_time: v.date_time,
        })
        .map_err(Into::into)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct DescriptorRow {
    office_id: String,
    ts_id: String,
    location_id: String,
    parameter_id: String,
    interval: Option<String>,
    unit: Option<String>,
    active: bool,
}

impl DescriptorRow {
    fn into_descriptor(self) -> TimeSeriesDescriptor {
        TimeSeriesDescriptor {
            office_id: self.office_id,
            ts_id: self.ts_id,
            location_id: self.location_id,
            parameter_id: self.parameter_id,
            interval: self.interval,
            unit: self.unit,
            active: self.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TsValueRow {
    date_time: chrono::DateTime<chrono::Utc>,
    value: Option<f64>,
    quality_code: i32,
}

impl TsValueRow {
    fn into_value(self) -> TsValue {
        TsValue {
            date_time: self.date_time,
            value: self.value,
            quality_code: self.quality_code,
        }
    }
}
