//! Rating spec repository implementation for PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::{RatingSpec, RatingSpecKey};
use radar_core::pagination::{Page, PageRequest, assemble_page};
use radar_core::ports::{RatingSpecFilter, RatingSpecRepository, RequestScope};

use super::helpers::{limit_clause, where_clause};

const COLUMNS: &str =
    "office_id, rating_id, template_id, location_id, version, description, active";

/// PostgreSQL implementation of RatingSpecRepository.
pub struct PgRatingSpecRepository {
    pool: PgPool,
}

impl PgRatingSpecRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingSpecRepository for PgRatingSpecRepository {
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &RatingSpecFilter,
        request: &PageRequest<RatingSpecKey>,
    ) -> DomainResult<Page<RatingSpec>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1;

        if scope.office.is_some() {
            conditions.push(format!("office_id = UPPER(${})", param_idx));
            param_idx += 1;
        }
        if filter.rating_id.pattern().is_some() {
            conditions.push(format!("rating_id ~* ${}", param_idx));
            param_idx += 1;
        }
        if filter.template_id.pattern().is_some() {
            conditions.push(format!("template_id ~* ${}", param_idx));
            param_idx += 1;
        }

        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!(
                    "SELECT COUNT(*) FROM av_rating_spec {}",
                    where_clause(&conditions)
                );
                let mut q = sqlx::query_scalar::<_, i64>(&sql);
                if let Some(ref office) = scope.office {
                    q = q.bind(office);
                }
                if let Some(pattern) = filter.rating_id.pattern() {
                    q = q.bind(pattern);
                }
                if let Some(pattern) = filter.template_id.pattern() {
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
                "(rating_id, office_id) > (${}, ${})",
                param_idx,
                param_idx + 1
            ));
        }

        let sql = format!(
            "SELECT {} FROM av_rating_spec {} ORDER BY rating_id ASC, office_id ASC {}",
            COLUMNS,
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, RatingSpecRow>(&sql);
        if let Some(ref office) = scope.office {
            q = q.bind(office);
        }
        if let Some(pattern) = filter.rating_id.pattern() {
            q = q.bind(pattern);
        }
        if let Some(pattern) = filter.template_id.pattern() {
            q = q.bind(pattern);
        }
        if let Some(key) = request.seek() {
            q = q.bind(&key.rating_id).bind(&key.office_id);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let specs: Vec<RatingSpec> = rows.into_iter().map(RatingSpecRow::into_spec).collect();

        assemble_page(specs, request, total, |s| RatingSpecKey {
            rating_id: s.rating_id.clone(),
            office_id: s.office_id.clone(),
        })
        .map_err(Into::into)
    }

    async fn fetch_one(
        &self,
        office_id: &str,
        rating_id: &str,
    ) -> DomainResult<Option<RatingSpec>> {
        let sql = format!(
            "SELECT {} FROM av_rating_spec \
             WHERE office_id = UPPER($1) AND UPPER(rating_id) = UPPER($2)",
            COLUMNS
        );
        let row = sqlx::query_as::<_, RatingSpecRow>(&sql)
            .bind(office_id)
            .bind(rating_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(row.map(RatingSpecRow::into_spec))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct RatingSpecRow {
    office_id: String,
    rating_id: String,
    template_id: String,
    location_id: String,
    version: String,
    description: Option<String>,
    active: bool,
}

impl RatingSpecRow {
    fn into_spec(self) -> RatingSpec {
        RatingSpec {
            office_id: self.office_id,
            rating_id: self.rating_id,
            template_id: self.template_id,
            location_id: self.location_id,
            version: self.version,
            description: self.description,
            active: self.active,
        }
    }
}
