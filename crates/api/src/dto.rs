//! Wire DTOs and the page envelope.
//!
//! JSON field names are kebab-case throughout, and pagination fields are
//! canonical everywhere: `page` (echoed cursor), `next-page`,
//! `page-size`, `total`, `entries`. Legacy parameter-name aliases exist
//! only on the way in (see the route param structs), never on the way
//! out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use radar_core::models::{
    Clob, Location, LocationLevel, Office, RatingSpec, TimeSeriesDescriptor, TsValue,
};
use radar_core::pagination::Page;

// =============================================================================
// Page Envelope
// =============================================================================

/// One page of catalog entries, the serialized form of [`Page`].
#[derive(Debug, Serialize)]
pub struct PageDto<T> {
    /// Cursor this page was requested with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Cursor for the next page; absent on the final page.
    #[serde(rename = "next-page", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(rename = "page-size")]
    pub page_size: i32,
    pub total: i64,
    pub entries: Vec<T>,
}

impl<T> PageDto<T> {
    /// Convert a domain page, mapping each entry through `convert`.
    pub fn from_page<M>(page: Page<M>, convert: impl Fn(M) -> T) -> Self {
        Self {
            page: page.page,
            next_page: page.next_page,
            page_size: page.page_size,
            total: page.total,
            entries: page.entries.into_iter().map(convert).collect(),
        }
    }
}

// =============================================================================
// Entity DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OfficeDto {
    pub office_id: String,
    pub long_name: String,
    pub office_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

impl From<Office> for OfficeDto {
    fn from(o: Office) -> Self {
        Self {
            office_id: o.office_id,
            long_name: o.long_name,
            office_type: o.office_type,
            report_url: o.report_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LocationDto {
    pub office_id: String,
    pub name: String,
    pub public_name: Option<String>,
    pub kind: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub horizontal_datum: Option<String>,
    pub timezone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            office_id: l.office_id,
            name: l.name,
            public_name: l.public_name,
            kind: l.kind,
            latitude: l.latitude,
            longitude: l.longitude,
            elevation: l.elevation,
            horizontal_datum: l.horizontal_datum,
            timezone: l.timezone,
            active: l.active,
        }
    }
}

impl LocationDto {
    pub fn into_model(self) -> Location {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TsDescriptorDto {
    pub office_id: String,
    pub ts_id: String,
    pub location_id: String,
    pub parameter_id: String,
    pub interval: Option<String>,
    pub unit: Option<String>,
    pub active: bool,
}

impl From<TimeSeriesDescriptor> for TsDescriptorDto {
    fn from(d: TimeSeriesDescriptor) -> Self {
        Self {
            office_id: d.office_id,
            ts_id: d.ts_id,
            location_id: d.location_id,
            parameter_id: d.parameter_id,
            interval: d.interval,
            unit: d.unit,
            active: d.active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TsValueDto {
    pub date_time: DateTime<Utc>,
    pub value: Option<f64>,
    pub quality_code: i32,
}

impl From<TsValue> for TsValueDto {
    fn from(v: TsValue) -> Self {
        Self {
            date_time: v.date_time,
            value: v.value,
            quality_code: v.quality_code,
        }
    }
}

/// A paginated slice of one time series: the values endpoint's envelope.
///
/// Unlike the catalog endpoints this embeds the series identity next to
/// the standard pagination fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSeriesDto {
    pub name: String,
    pub office_id: String,
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    pub page_size: i32,
    pub total: i64,
    pub values: Vec<TsValueDto>,
}

impl TimeSeriesDto {
    pub fn from_page(descriptor: TimeSeriesDescriptor, page: Page<TsValue>) -> Self {
        Self {
            name: descriptor.ts_id,
            office_id: descriptor.office_id,
            units: descriptor.unit,
            page: page.page,
            next_page: page.next_page,
            page_size: page.page_size,
            total: page.total,
            values: page.entries.into_iter().map(TsValueDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RatingSpecDto {
    pub office_id: String,
    pub rating_id: String,
    pub template_id: String,
    pub location_id: String,
    pub version: String,
    pub description: Option<String>,
    pub active: bool,
}

impl From<RatingSpec> for RatingSpecDto {
    fn from(s: RatingSpec) -> Self {
        Self {
            office_id: s.office_id,
            rating_id: s.rating_id,
            template_id: s.template_id,
            location_id: s.location_id,
            version: s.version,
            description: s.description,
            active: s.active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LevelDto {
    pub office_id: String,
    pub level_id: String,
    pub effective_date: DateTime<Utc>,
    pub constant_value: Option<f64>,
    pub level_unit: Option<String>,
}

impl From<LocationLevel> for LevelDto {
    fn from(l: LocationLevel) -> Self {
        Self {
            office_id: l.office_id,
            level_id: l.level_id,
            effective_date: l.effective_date,
            constant_value: l.constant_value,
            level_unit: l.level_unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClobDto {
    pub office_id: String,
    pub id: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<Clob> for ClobDto {
    fn from(c: Clob) -> Self {
        Self {
            office_id: c.office_id,
            id: c.id,
            description: c.description,
            value: c.value,
        }
    }
}

impl ClobDto {
    pub fn into_model(self) -> Clob {
        Clob {
            office_id: self.office_id,
            id: self.id,
            description: self.description,
            value: self.value,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope_uses_canonical_kebab_names() {
        let page = Page {
            entries: vec!["x"],
            page: Some("abc".into()),
            next_page: Some("def".into()),
            page_size: 1,
            total: 2,
        };
        let dto = PageDto::from_page(page, |s: &str| s.to_string());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["page"], "abc");
        assert_eq!(json["next-page"], "def");
        assert_eq!(json["page-size"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["entries"][0], "x");
    }

    #[test]
    fn final_page_omits_next_page() {
        let page: Page<Office> = Page {
            entries: vec![],
            page: None,
            next_page: None,
            page_size: 20,
            total: 0,
        };
        let dto = PageDto::from_page(page, OfficeDto::from);
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("next-page").is_none());
        assert!(json.get("page").is_none());
        assert_eq!(json["total"], 0);
    }

    #[test]
    fn location_dto_is_kebab_cased() {
        let dto = LocationDto::from(Location {
            office_id: "SPK".into(),
            name: "SACR".into(),
            public_name: Some("Sacramento River".into()),
            kind: Some("STREAM_GAGE".into()),
            latitude: Some(38.58),
            longitude: Some(-121.5),
            elevation: None,
            horizontal_datum: Some("NAD83".into()),
            timezone: Some("America/Los_Angeles".into()),
            active: true,
        });
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["office-id"], "SPK");
        assert_eq!(json["public-name"], "Sacramento River");
        assert_eq!(json["horizontal-datum"], "NAD83");
    }
}
