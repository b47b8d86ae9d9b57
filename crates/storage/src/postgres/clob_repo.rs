//! Clob repository implementation for PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::{Clob, ClobKey};
use radar_core::pagination::{Page, PageRequest, assemble_page};
use radar_core::ports::{ClobFilter, ClobRepository, RequestScope};

use super::helpers::{limit_clause, where_clause};

/// PostgreSQL implementation of ClobRepository.
pub struct PgClobRepository {
    pool: PgPool,
}

impl PgClobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClobRepository for PgClobRepository {
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &ClobFilter,
        request: &PageRequest<ClobKey>,
    ) -> DomainResult<Page<Clob>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1;

        if scope.office.is_some() {
            conditions.push(format!("office_id = UPPER(${})", param_idx));
            param_idx += 1;
        }
        if filter.id.pattern().is_some() {
            conditions.push(format!("id ~* ${}", param_idx));
            param_idx += 1;
        }

        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!("SELECT COUNT(*) FROM av_clob {}", where_clause(&conditions));
                let mut q = sqlx::query_scalar::<_, i64>(&sql);
                if let Some(ref office) = scope.office {
                    q = q.bind(office);
                }
                if let Some(pattern) = filter.id.pattern() {
                    q = q.bind(pattern);
                }
                q.fetch_one(&self.pool)
                    .await
                    .map_err(|e| StorageError::QueryError(e.to_string()))?
            }
        };

        let mut page_conditions = conditions.clone();
        if request.seek().is_some() {
            page_conditions.push(format!("(id, office_id) > (${}, ${})", param_idx, param_idx + 1));
        }

        // Clob bodies can be megabytes each, so catalog pages skip them
        // unless values were explicitly requested.
        let value_column = if filter.include_values {
            "value"
        } else {
            "NULL::TEXT AS value"
        };

        let sql = format!(
            "SELECT office_id, id, description, {} FROM av_clob {} ORDER BY id ASC, office_id ASC {}",
            value_column,
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, ClobRow>(&sql);
        if let Some(ref office) = scope.office {
            q = q.bind(office);
        }
        if let Some(pattern) = filter.id.pattern() {
            q = q.bind(pattern);
        }
        if let Some(key) = request.seek() {
            q = q.bind(&key.id).bind(&key.office_id);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let clobs: Vec<Clob> = rows.into_iter().map(ClobRow::into_clob).collect();

        assemble_page(clobs, request, total, |c| ClobKey {
            id: c.id.clone(),
            office_id: c.office_id.clone(),
        })
        .map_err(Into::into)
    }

    async fn fetch_one(&self, office_id: &str, id: &str) -> DomainResult<Option<Clob>> {
        let row = sqlx::query_as::<_, ClobRow>(
            r#"
            SELECT office_id, id, description, value
            FROM av_clob
            WHERE office_id = UPPER($1) AND id = $2
            "#,
        )
        .bind(office_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(row.map(ClobRow::into_clob))
    }

    async fn store(&self, clob: &Clob) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO av_clob (office_id, id, description, value)
            VALUES (UPPER($1), $2, $3, $4)
            ON CONFLICT (office_id, id) DO UPDATE SET
                description = EXCLUDED.description,
                value = EXCLUDED.value
            "#,
        )
        .bind(&clob.office_id)
        .bind(&clob.id)
        .bind(&clob.description)
        .bind(&clob.value)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, office_id: &str, id: &str) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM av_clob WHERE office_id = UPPER($1) AND id = $2")
            .bind(office_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct ClobRow {
    office_id: String,
    id: String,
    description: Option<String>,
    value: Option<String>,
}

impl ClobRow {
    fn into_clob(self) -> Clob {
        Clob {
            office_id: self.office_id,
            id: self.id,
            description: self.description,
            value: self.value,
        }
    }
}
