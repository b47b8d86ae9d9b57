//! Domain models for CWMS water-management data.
//!
//! These models are storage-agnostic and represent the canonical form of
//! the entities served by the API. Every identifier is scoped by the
//! owning office. Each paginated family also defines its seek key here,
//! next to the entity it orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CursorError;
use crate::pagination::{SeekKey, millis_field, millis_of};

// =============================================================================
// Offices
// =============================================================================

/// A CWMS office: the organizational scope owning almost every entity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    /// Short office identifier (e.g., "SPK").
    pub office_id: String,
    /// Full office name.
    pub long_name: String,
    /// Office category (e.g., "district", "division").
    pub office_type: String,
    /// Public reporting URL, if published.
    pub report_url: Option<String>,
}

// =============================================================================
// Locations
// =============================================================================

/// A physical or logical site (gage, dam, basin outlet, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Owning office.
    pub office_id: String,
    /// Location identifier, unique within the office.
    pub name: String,
    /// Human-readable name.
    pub public_name: Option<String>,
    /// Location kind (e.g., "STREAM_GAGE", "PROJECT").
    pub kind: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Elevation in meters above the vertical datum.
    pub elevation: Option<f64>,
    pub horizontal_datum: Option<String>,
    /// IANA time zone of the site.
    pub timezone: Option<String>,
    pub active: bool,
}

/// Seek key for the location catalog, ordered by `(name, office_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationKey {
    pub name: String,
    pub office_id: String,
}

impl SeekKey for LocationKey {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.office_id.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            name: fields[0].to_string(),
            office_id: fields[1].to_string(),
        })
    }
}

// =============================================================================
// Time Series
// =============================================================================

/// Catalog entry describing one time series.
///
/// The time series identifier follows the CWMS six-part convention
/// `Location.Parameter.Type.Interval.Duration.Version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesDescriptor {
    /// Owning office.
    pub office_id: String,
    /// Full six-part time series identifier.
    pub ts_id: String,
    /// Location part of the identifier.
    pub location_id: String,
    /// Parameter part of the identifier (e.g., "Flow", "Elev").
    pub parameter_id: String,
    /// Recurrence interval (e.g., "1Hour", "0" for irregular).
    pub interval: Option<String>,
    /// Database storage unit for the values.
    pub unit: Option<String>,
    pub active: bool,
}

/// Seek key for the time series catalog, ordered by `(ts_id, office_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsDescriptorKey {
    pub ts_id: String,
    pub office_id: String,
}

impl SeekKey for TsDescriptorKey {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.ts_id.clone(), self.office_id.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            ts_id: fields[0].to_string(),
            office_id: fields[1].to_string(),
        })
    }
}

/// A single time series value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsValue {
    pub date_time: DateTime<Utc>,
    /// Measured value in the series' unit; `None` for missing readings.
    pub value: Option<f64>,
    /// CWMS quality code bitmask.
    pub quality_code: i32,
}

/// Seek key for value retrieval within one series, ordered by timestamp.
///
/// `date_time` is unique per series, so no tiebreak column is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsValueKey {
    pub date_time: DateTime<Utc>,
}

impl SeekKey for TsValueKey {
    const FIELD_COUNT: usize = 1;

    fn to_fields(&self) -> Vec<String> {
        vec![millis_of(&self.date_time)]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            date_time: millis_field("date_time", fields[0])?,
        })
    }
}

// =============================================================================
// Rating Specs
// =============================================================================

/// A rating specification tying a location to a rating template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSpec {
    /// Owning office.
    pub office_id: String,
    /// Full rating identifier `Location.Template.Version`.
    pub rating_id: String,
    /// Rating template identifier.
    pub template_id: String,
    /// Location part of the identifier.
    pub location_id: String,
    /// Version label.
    pub version: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Seek key for the rating spec catalog, ordered by `(rating_id, office_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSpecKey {
    pub rating_id: String,
    pub office_id: String,
}

impl SeekKey for RatingSpecKey {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.rating_id.clone(), self.office_id.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            rating_id: fields[0].to_string(),
            office_id: fields[1].to_string(),
        })
    }
}

// =============================================================================
// Location Levels
// =============================================================================

/// A dated location level value (e.g., top of flood pool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationLevel {
    /// Owning office.
    pub office_id: String,
    /// Five-part level identifier `Location.Parameter.Type.Duration.Name`.
    pub level_id: String,
    /// Date this level value takes effect.
    pub effective_date: DateTime<Utc>,
    /// Constant level value, when the level is not seasonal.
    pub constant_value: Option<f64>,
    /// Unit of the level value.
    pub level_unit: Option<String>,
}

/// Seek key for levels, ordered by `(level_id, effective_date)`.
///
/// A string column plus a timestamp tiebreak: the mixed-type composite
/// case the cursor codec has to round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelKey {
    pub level_id: String,
    pub effective_date: DateTime<Utc>,
}

impl SeekKey for LevelKey {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.level_id.clone(), millis_of(&self.effective_date)]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            level_id: fields[0].to_string(),
            effective_date: millis_field("effective_date", fields[1])?,
        })
    }
}

// =============================================================================
// Clobs
// =============================================================================

/// A character large object: free-form text stored against an office id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clob {
    /// Owning office.
    pub office_id: String,
    /// Clob identifier, unique within the office.
    pub id: String,
    pub description: Option<String>,
    /// Text body; omitted from catalog pages unless values are requested.
    pub value: Option<String>,
}

/// Seek key for the clob catalog, ordered by `(id, office_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClobKey {
    pub id: String,
    pub office_id: String,
}

impl SeekKey for ClobKey {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.clone(), self.office_id.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
        Ok(Self {
            id: fields[0].to_string(),
            office_id: fields[1].to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Cursor;
    use chrono::TimeZone;

    #[test]
    fn level_key_roundtrips_mixed_fields() {
        let cursor = Cursor {
            seek: LevelKey {
                level_id: "SACR.Elev.Inst.0.Top of Flood".to_string(),
                effective_date: Utc.timestamp_millis_opt(1_577_836_800_000).unwrap(),
            },
            total: 321,
            page_size: 25,
        };
        let decoded = Cursor::<LevelKey>::decode(&cursor.encode().unwrap()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn ts_value_key_keeps_millisecond_precision() {
        let cursor = Cursor {
            seek: TsValueKey {
                date_time: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            },
            total: 9999,
            page_size: 500,
        };
        let decoded = Cursor::<TsValueKey>::decode(&cursor.encode().unwrap()).unwrap();
        assert_eq!(decoded.seek.date_time.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn ts_id_with_dots_survives_the_cursor() {
        // Six-part ids are full of dots; only the delimiter is reserved
        let cursor = Cursor {
            seek: TsDescriptorKey {
                ts_id: "SACR.Flow.Inst.1Hour.0.Raw".to_string(),
                office_id: "SPK".to_string(),
            },
            total: 12,
            page_size: 10,
        };
        let decoded = Cursor::<TsDescriptorKey>::decode(&cursor.encode().unwrap()).unwrap();
        assert_eq!(decoded.seek.ts_id, "SACR.Flow.Inst.1Hour.0.Raw");
    }
}
