//! Port traits for the storage adapters.
//!
//! Following the gateway strategy for the external database boundary,
//! each entity family gets a narrow repository interface (`fetch_page`,
//! `fetch_one`, `store`, `delete` as applicable). Implementations live in
//! `radar-storage`; the domain layer never sees SQL.

mod repository;

pub use repository::{
    ClobFilter, ClobRepository, LevelFilter, LevelRepository, LocationFilter, LocationRepository,
    OfficeRepository, RatingSpecFilter, RatingSpecRepository, Repositories, RequestScope,
    TimeSeriesRepository, TsDescriptorFilter, TsWindow,
};
