//! Office repository implementation for PostgreSQL.
//!
//! The office list is a few dozen rows; it is served whole, unpaginated.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::Office;
use radar_core::ports::OfficeRepository;

const COLUMNS: &str = "office_id, long_name, office_type, report_url";

/// PostgreSQL implementation of OfficeRepository.
pub struct PgOfficeRepository {
    pool: PgPool,
}

impl PgOfficeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficeRepository for PgOfficeRepository {
    async fn fetch_all(&self) -> DomainResult<Vec<Office>> {
        let sql = format!("SELECT {} FROM av_office ORDER BY office_id ASC", COLUMNS);
        let rows = sqlx::query_as::<_, OfficeRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(rows.into_iter().map(OfficeRow::into_office).collect())
    }

    async fn fetch_one(&self, office_id: &str) -> DomainResult<Option<Office>> {
        let sql = format!("SELECT {} FROM av_office WHERE office_id = UPPER($1)", COLUMNS);
        let row = sqlx::query_as::<_, OfficeRow>(&sql)
            .bind(office_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(row.map(OfficeRow::into_office))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct OfficeRow {
    office_id: String,
    long_name: String,
    office_type: String,
    report_url: Option<String>,
}

impl OfficeRow {
    fn into_office(self) -> Office {
        Office {
            office_id: self.office_id,
            long_name: self.long_name,
            office_type: self.office_type,
            report_url: self.report_url,
        }
    }
}
