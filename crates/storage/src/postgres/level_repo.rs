//! Location level repository implementation for PostgreSQL.
//!
//! Levels are ordered by `(level_id, effective_date)` - the mixed
//! string/timestamp composite key. The timestamp rides through cursors
//! as epoch milliseconds and binds back as `TIMESTAMPTZ`.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::{LevelKey, LocationLevel};
use radar_core::pagination::{Page, PageRequest, assemble_page};
use radar_core::ports::{LevelFilter, LevelRepository, RequestScope};

use super::helpers::{limit_clause, where_clause};

const COLUMNS: &str = "office_id, level_id, effective_date, constant_value, level_unit";

/// PostgreSQL implementation of LevelRepository.
pub struct PgLevelRepository {
    pool: PgPool,
}

impl PgLevelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LevelRepository for PgLevelRepository {
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &LevelFilter,
        request: &PageRequest<LevelKey>,
    ) -> DomainResult<Page<LocationLevel>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1;

        if scope.office.is_some() {
            conditions.push(format!("office_id = UPPER(${})", param_idx));
            param_idx += 1;
        }
        if filter.level_id.pattern().is_some() {
            conditions.push(format!("level_id ~* ${}", param_idx));
            param_idx += 1;
        }
        if filter.begin.is_some() {
            conditions.push(format!("effective_date >= ${}", param_idx));
            param_idx += 1;
        }
        if filter.end.is_some() {
            conditions.push(format!("effective_date <= ${}", param_idx));
            param_idx += 1;
        }

        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!(
                    "SELECT COUNT(*) FROM av_location_level {}",
                    where_clause(&conditions)
                );
                let mut q = sqlx::query_scalar::<_, i64>(&sql);
                if let Some(ref office) = scope.office {
                    q = q.bind(office);
                }
                if let Some(pattern) = filter.level_id.pattern() {
                    q = q.bind(pattern);
                }
                if let Some(begin) = filter.begin {
                    q = q.bind(begin);
                }
                if let Some(end) = filter.end {
                    q = q.bind(end);
                }
                q.fetch_one(&self.pool)
                    .await
                    .map_err(|e| StorageError::QueryError(e.to_string()))?
            }
        };

        let mut page_conditions = conditions.clone();
        if request.seek().is_some() {
            page_conditions.push(format!(
                "(level_id, effective_date) > (${}, ${})",
                param_idx,
                param_idx + 1
            ));
        }

        let sql = format!(
            "SELECT {} FROM av_location_level {} ORDER BY level_id ASC, effective_date ASC {}",
            COLUMNS,
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, LevelRow>(&sql);
        if let Some(ref office) = scope.office {
            q = q.bind(office);
        }
        if let Some(pattern) = filter.level_id.pattern() {
            q = q.bind(pattern);
        }
        if let Some(begin) = filter.begin {
            q = q.bind(begin);
        }
        if let Some(end) = filter.end {
            q = q.bind(end);
        }
        if let Some(key) = request.seek() {
            q = q.bind(&key.level_id).bind(key.effective_date);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let levels: Vec<LocationLevel> = rows.into_iter().map(LevelRow::into_level).collect();

        assemble_page(levels, request, total, |l| LevelKey {
            level_id: l.level_id.clone(),
            effective_date: l.effective_date,
        })
        .map_err(Into::into)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct LevelRow {
    office_id: String,
    level_id: String,
    effective_date: chrono::DateTime<chrono::Utc>,
    constant_value: Option<f64>,
    level_unit: Option<String>,
}

impl LevelRow {
    fn into_level(self) -> LocationLevel {
        LocationLevel {
            office_id: self.office_id,
            level_id: self.level_id,
            effective_date: self.effective_date,
            constant_value: self.constant_value,
            level_unit: self.level_unit,
        }
    }
}
