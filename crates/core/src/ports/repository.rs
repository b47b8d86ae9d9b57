//! Repository port traits and their filter types.
//!
//! These traits define the storage interface used by the HTTP layer.
//! Implementations live in the infrastructure layer (`radar-storage`).
//! Every method takes at most one trip to the database; there are no
//! retries and no cross-call state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DomainResult;
use crate::mask::Mask;
use crate::models::{
    Clob, ClobKey, LevelKey, Location, LocationKey, LocationLevel, Office, RatingSpec,
    RatingSpecKey, TimeSeriesDescriptor, TsDescriptorKey, TsValue, TsValueKey,
};
use crate::pagination::{Page, PageRequest};

// =============================================================================
// Request Scope
// =============================================================================

/// Request-scoped context carried explicitly into every repository call.
///
/// The office scope is passed as a value, never stored as connection
/// session state, so pooled connections cannot leak one request's office
/// into another's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestScope {
    /// Restrict results to this office; `None` spans all offices.
    pub office: Option<String>,
}

impl RequestScope {
    /// Scope spanning every office.
    pub fn any() -> Self {
        Self::default()
    }

    /// Scope restricted to a single office.
    pub fn for_office(office: impl Into<String>) -> Self {
        Self {
            office: Some(office.into()),
        }
    }
}

// =============================================================================
// Filter Types
// =============================================================================

/// Filter options for location catalog queries.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    pub name: Mask,
    pub kind: Mask,
}

/// Filter options for time series catalog queries.
#[derive(Debug, Clone, Default)]
pub struct TsDescriptorFilter {
    pub ts_id: Mask,
    pub parameter: Mask,
}

/// Time window for value retrieval, inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct TsWindow {
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Filter options for rating spec catalog queries.
#[derive(Debug, Clone, Default)]
pub struct RatingSpecFilter {
    pub rating_id: Mask,
    pub template_id: Mask,
}

/// Filter options for location level queries.
#[derive(Debug, Clone, Default)]
pub struct LevelFilter {
    pub level_id: Mask,
    /// Earliest effective date, inclusive.
    pub begin: Option<DateTime<Utc>>,
    /// Latest effective date, inclusive.
    pub end: Option<DateTime<Utc>>,
}

/// Filter options for clob catalog queries.
#[derive(Debug, Clone, Default)]
pub struct ClobFilter {
    pub id: Mask,
    /// Include the text body in catalog pages. Off by default: clob
    /// values can be megabytes each.
    pub include_values: bool,
}

// =============================================================================
// Repository Traits
// =============================================================================

/// Repository for offices. The office list is small and unpaginated.
#[async_trait]
pub trait OfficeRepository: Send + Sync {
    /// List every office.
    async fn fetch_all(&self) -> DomainResult<Vec<Office>>;

    /// Get one office by id.
    async fn fetch_one(&self, office_id: &str) -> DomainResult<Option<Office>>;
}

/// Repository for the location catalog.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Fetch one page of the filtered catalog, ordered by `(name, office_id)`.
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &LocationFilter,
        request: &PageRequest<LocationKey>,
    ) -> DomainResult<Page<Location>>;

    /// Get one location by office and name.
    async fn fetch_one(&self, office_id: &str, name: &str) -> DomainResult<Option<Location>>;

    /// Create or update a location.
    async fn store(&self, location: &Location) -> DomainResult<()>;

    /// Delete a location; returns the number of rows removed.
    async fn delete(&self, office_id: &str, name: &str) -> DomainResult<u64>;
}

/// Repository for time series descriptors and values.
#[async_trait]
pub trait TimeSeriesRepository: Send + Sync {
    /// Fetch one page of the catalog, ordered by `(ts_id, office_id)`.
    async fn fetch_catalog(
        &self,
        scope: &RequestScope,
        filter: &TsDescriptorFilter,
        request: &PageRequest<TsDescriptorKey>,
    ) -> DomainResult<Page<TimeSeriesDescriptor>>;

    /// Get one descriptor by office and time series id.
    async fn fetch_descriptor(
        &self,
        office_id: &str,
        ts_id: &str,
    ) -> DomainResult<Option<TimeSeriesDescriptor>>;

    /// Fetch one page of values for a series, ordered by timestamp.
    ///
    /// Existence of the series is the caller's concern; an unknown id
    /// simply yields an empty page here.
    async fn fetch_values(
        &self,
        office_id: &str,
        ts_id: &str,
        window: &TsWindow,
        request: &PageRequest<TsValueKey>,
    ) -> DomainResult<Page<TsValue>>;
}

/// Repository for the rating spec catalog.
#[async_trait]
pub trait RatingSpecRepository: Send + Sync {
    /// Fetch one page of the catalog, ordered by `(rating_id, office_id)`.
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &RatingSpecFilter,
        request: &PageRequest<RatingSpecKey>,
    ) -> DomainResult<Page<RatingSpec>>;

    /// Get one rating spec by office and rating id.
    async fn fetch_one(&self, office_id: &str, rating_id: &str)
        -> DomainResult<Option<RatingSpec>>;
}

/// Repository for location levels.
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Fetch one page of levels, ordered by `(level_id, effective_date)`.
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &LevelFilter,
        request: &PageRequest<LevelKey>,
    ) -> DomainResult<Page<LocationLevel>>;
}

/// Repository for clobs.
#[async_trait]
pub trait ClobRepository: Send + Sync {
    /// Fetch one page of the catalog, ordered by `(id, office_id)`.
    async fn fetch_page(
        &self,
        scope: &RequestScope,
        filter: &ClobFilter,
        request: &PageRequest<ClobKey>,
    ) -> DomainResult<Page<Clob>>;

    /// Get one clob (including its value) by office and id.
    async fn fetch_one(&self, office_id: &str, id: &str) -> DomainResult<Option<Clob>>;

    /// Create or update a clob.
    async fn store(&self, clob: &Clob) -> DomainResult<()>;

    /// Delete a clob; returns the number of rows removed.
    async fn delete(&self, office_id: &str, id: &str) -> DomainResult<u64>;
}

// =============================================================================
// Composite Repository
// =============================================================================

/// Combined repository access for the HTTP layer.
pub trait Repositories: Send + Sync {
    fn offices(&self) -> &dyn OfficeRepository;
    fn locations(&self) -> &dyn LocationRepository;
    fn timeseries(&self) -> &dyn TimeSeriesRepository;
    fn rating_specs(&self) -> &dyn RatingSpecRepository;
    fn levels(&self) -> &dyn LevelRepository;
    fn clobs(&self) -> &dyn ClobRepository;
}
