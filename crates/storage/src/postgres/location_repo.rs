//! Location repository implementation for PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use radar_core::error::{DomainResult, StorageError};
use radar_core::models::{Location, LocationKey};
use radar_core::pagination::{Page, PageRequest, assemble_page};
use radar_core::ports::{LocationFilter, LocationRepository, RequestScope};

use super::helpers::{limit_clause, where_clause};

const COLUMNS: &str = "office_id, name, public_name, kind, latitude, longitude, \
                       elevation, horizontal_datum, timezone, active";

/// PostgreSQL implementation of LocationRepository.
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &LocationFilter,
        request: &PageRequest<LocationKey>,
    ) -> DomainResult<Page<Location>> {
        // Filter conditions shared by the COUNT and page queries.
        // Bind order must mirror push order.
        let mut conditions = Vec::new();
        let mut param_idx = 1;

        if scope.office.is_some() {
            conditions.push(format!("office_id = UPPER(${})", param_idx));
            param_idx += 1;
        }
        if filter.name.pattern().is_some() {
            conditions.push(format!("name ~* ${}", param_idx));
            param_idx += 1;
        }
        if filter.kind.pattern().is_some() {
            conditions.push(format!("kind ~* ${}", param_idx));
            param_idx += 1;
        }

        // Total is counted on the first page only and then rides inside
        // the cursor for the rest of the traversal.
        let total = match request.known_total() {
            Some(t) => t,
            None => {
                let sql = format!(
                    "SELECT COUNT(*) FROM av_location {}",
                    where_clause(&conditions)
                );
                let mut q = sqlx::query_scalar::<_, i64>(&sql);
                if let Some(ref office) = scope.office {
                    q = q.bind(office);
                }
                if let Some(pattern) = filter.name.pattern() {
                    q = q.bind(pattern);
                }
                if let Some(pattern) = filter.kind.pattern() {
                    q = q.bind(pattern);
                }
                q.fetch_one(&self.pool)
                    .await
                    .map_err(|e| StorageError::QueryError(e.to_string()))?
            }
        };

        // Seek predicate: strictly after the last row of the previous
        // page under the (name, office_id) total order.
        let mut page_conditions = conditions.clone();
        if request.seek().is_some() {
            page_conditions.push(format!("(name, office_id) > (${}, ${})", param_idx, param_idx + 1));
        }

        let sql = format!(
            "SELECT {} FROM av_location {} ORDER BY name ASC, office_id ASC {}",
            COLUMNS,
            where_clause(&page_conditions),
            limit_clause(request.fetch_limit())
        );

        let mut q = sqlx::query_as::<_, LocationRow>(&sql);
        if let Some(ref office) = scope.office {
            q = q.bind(office);
        }
        if let Some(pattern) = filter.name.pattern() {
            q = q.bind(pattern);
        }
        if let Some(pattern) = filter.kind.pattern() {
            q = q.bind(pattern);
        }
        if let Some(key) = request.seek() {
            q = q.bind(&key.name).bind(&key.office_id);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        let locations: Vec<Location> = rows.into_iter().map(LocationRow::into_location).collect();

        assemble_page(locations, request, total, |loc| LocationKey {
            name: loc.name.clone(),
            office_id: loc.office_id.clone(),
        })
        .map_err(Into::into)
    }

    async fn fetch_one(&self, office_id: &str, name: &str) -> DomainResult<Option<Location>> {
        let sql = format!(
            "SELECT {} FROM av_location WHERE office_id = UPPER($1) AND name = $2",
            COLUMNS
        );
        let row = sqlx::query_as::<_, LocationRow>(&sql)
            .bind(office_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(row.map(LocationRow::into_location))
    }

    async fn store(&self, location: &Location) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO av_location (
                office_id, name, public_name, kind, latitude, longitude,
                elevation, horizontal_datum, timezone, active
            )
            VALUES (UPPER($1), $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (office_id, name) DO UPDATE SET
                public_name = EXCLUDED.public_name,
                kind = EXCLUDED.kind,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                elevation = EXCLUDED.elevation,
                horizontal_datum = EXCLUDED.horizontal_datum,
                timezone = EXCLUDED.timezone,
                active = EXCLUDED.active
            "#,
        )
        .bind(&location.office_id)
        .bind(&location.name)
        .bind(&location.public_name)
        .bind(&location.kind)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.elevation)
        .bind(&location.horizontal_datum)
        .bind(&location.timezone)
        .bind(location.active)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, office_id: &str, name: &str) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM av_location WHERE office_id = UPPER($1) AND name = $2")
            .bind(office_id)
            .bind(name)
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
struct LocationRow {
    office_id: String,
    name: String,
    public_name: Option<String>,
    kind: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    elevation: Option<f64>,
    horizontal_datum: Option<String>,
    timezone: Option<String>,
    active: bool,
}

impl LocationRow {
    fn into_location(self) -> Location {
        Location {
            office_id: self.office_id,
            name: self.name,
            public_name: self.public_name,
            kind: self.kind,
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            horizontal_datum: self.horizontal_datum,
            timezone: self.timezone,
            active: self.active,
        }
    }
}
