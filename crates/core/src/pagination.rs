//! Cursor-based keyset pagination.
//!
//! Every paginated catalog in RADAR uses the same opaque-cursor scheme:
//!
//! - A cursor encodes `[seek field 1, ..., seek field N, total, page size]`
//!   joined with [`CURSOR_DELIMITER`] and wrapped in URL-safe base64.
//! - The seek key identifies the last row of the previous page under the
//!   entity's total order; the query layer turns it into a row-comparison
//!   predicate ("everything strictly after this row").
//! - `total` is counted once on the first page and carried forward inside
//!   the cursor so subsequent pages skip the `COUNT(*)`.
//!
//! Queries fetch `page_size + 1` rows; the extra row is the has-more probe
//! and is trimmed before the page is returned (see [`assemble_page`]).
//!
//! A page size of `0` means "return all matching rows, unpaginated" -
//! a deliberate sentinel preserved from the legacy API contract.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::CursorError;

/// Field separator inside the decoded cursor payload.
///
/// Seek fields must not contain this character; [`Cursor::encode`]
/// rejects keys that do rather than producing an ambiguous token.
pub const CURSOR_DELIMITER: &str = "|";

// =============================================================================
// Seek Keys
// =============================================================================

/// A typed, entity-specific seek key.
///
/// The key's fields correspond to the columns of the entity's total
/// order, in sort order. Implementations live next to their models.
pub trait SeekKey: Sized + Clone + Send + Sync {
    /// Number of fields this key occupies in the encoded cursor.
    const FIELD_COUNT: usize;

    /// Encode the key into its ordered field list.
    fn to_fields(&self) -> Vec<String>;

    /// Decode the key from its ordered field list.
    ///
    /// `fields` is guaranteed to contain exactly [`Self::FIELD_COUNT`]
    /// entries when called from [`Cursor::decode`].
    fn from_fields(fields: &[&str]) -> Result<Self, CursorError>;
}

/// Parse a cursor field into any `FromStr` type with a descriptive error.
pub fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, CursorError> {
    value.parse().map_err(|_| CursorError::BadField {
        field,
        value: value.to_string(),
    })
}

/// Encode a timestamp as epoch milliseconds for use in a seek field.
pub fn millis_of(ts: &DateTime<Utc>) -> String {
    ts.timestamp_millis().to_string()
}

/// Decode an epoch-millisecond seek field back into a timestamp.
///
/// Round-trips exactly with [`millis_of`] since sub-millisecond precision
/// is never stored in the views this API reads.
pub fn millis_field(field: &'static str, value: &str) -> Result<DateTime<Utc>, CursorError> {
    let ms: i64 = parse_field(field, value)?;
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(CursorError::BadField {
            field,
            value: value.to_string(),
        })
}

// =============================================================================
// Cursor Codec
// =============================================================================

/// Decoded pagination cursor: seek position, total count, page size.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<K> {
    /// Key of the last row included in the previous page.
    pub seek: K,
    /// Total row count under the filter, measured on the first page.
    pub total: i64,
    /// Page size the traversal was started with.
    pub page_size: i32,
}

impl<K: SeekKey> Cursor<K> {
    /// Encode into an opaque URL-safe token.
    pub fn encode(&self) -> Result<String, CursorError> {
        let mut fields = self.seek.to_fields();
        for field in &fields {
            if field.contains(CURSOR_DELIMITER) {
                return Err(CursorError::DelimiterInField(field.clone()));
            }
        }
        fields.push(self.total.to_string());
        fields.push(self.page_size.to_string());
        Ok(URL_SAFE_NO_PAD.encode(fields.join(CURSOR_DELIMITER)))
    }

    /// Decode an opaque token produced by a prior [`Cursor::encode`].
    ///
    /// Any malformation is an error; a broken cursor must never degrade
    /// into first-page semantics.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| CursorError::BadEncoding(e.to_string()))?;
        let payload = String::from_utf8(bytes).map_err(|_| CursorError::BadPayload)?;

        let fields: Vec<&str> = payload.split(CURSOR_DELIMITER).collect();
        let expected = K::FIELD_COUNT + 2;
        if fields.len() != expected {
            return Err(CursorError::FieldCount {
                expected,
                got: fields.len(),
            });
        }

        let seek = K::from_fields(&fields[..K::FIELD_COUNT])?;
        let total: i64 = parse_field("total", fields[K::FIELD_COUNT])?;
        if total < 0 {
            return Err(CursorError::BadField {
                field: "total",
                value: fields[K::FIELD_COUNT].to_string(),
            });
        }
        let page_size: i32 = parse_field("page_size", fields[K::FIELD_COUNT + 1])?;
        // A cursor only exists for paginated traversals, so its embedded
        // page size must be positive.
        if page_size <= 0 {
            return Err(CursorError::InvalidPageSize(page_size));
        }

        Ok(Self {
            seek,
            total,
            page_size,
        })
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A validated pagination request: either a first page or a cursor resume.
#[derive(Debug, Clone)]
pub struct PageRequest<K> {
    /// Raw token as received, echoed back in the page.
    pub token: Option<String>,
    /// Decoded cursor, `None` on the first page.
    pub cursor: Option<Cursor<K>>,
    /// Effective page size; `0` means unpaginated.
    pub page_size: i32,
}

impl<K: SeekKey> PageRequest<K> {
    /// First-page request with an explicit page size.
    pub fn first_page(page_size: i32) -> Result<Self, CursorError> {
        if page_size < 0 {
            return Err(CursorError::InvalidPageSize(page_size));
        }
        Ok(Self {
            token: None,
            cursor: None,
            page_size,
        })
    }

    /// Build a request from the raw `page` and `page-size` parameters.
    ///
    /// When a cursor is supplied its embedded page size governs the
    /// traversal; the explicit parameter only applies to first pages.
    pub fn from_params(
        token: Option<&str>,
        page_size: Option<i32>,
        default_page_size: i32,
    ) -> Result<Self, CursorError> {
        match token.filter(|t| !t.is_empty()) {
            Some(t) => {
                let cursor = Cursor::<K>::decode(t)?;
                Ok(Self {
                    token: Some(t.to_string()),
                    page_size: cursor.page_size,
                    cursor: Some(cursor),
                })
            }
            None => Self::first_page(page_size.unwrap_or(default_page_size)),
        }
    }

    /// Whether this request asks for all rows in one page.
    pub fn is_unbounded(&self) -> bool {
        self.page_size == 0
    }

    /// SQL `LIMIT` for this request: one extra row as the has-more probe.
    ///
    /// `None` for unbounded requests.
    pub fn fetch_limit(&self) -> Option<i64> {
        (self.page_size > 0).then(|| i64::from(self.page_size) + 1)
    }

    /// Seek key for the query's "after last row" predicate, if resuming.
    pub fn seek(&self) -> Option<&K> {
        self.cursor.as_ref().map(|c| &c.seek)
    }

    /// Total carried forward from the first page, if resuming.
    pub fn known_total(&self) -> Option<i64> {
        self.cursor.as_ref().map(|c| c.total)
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of a filtered, ordered result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows of this page, at most `page_size` when paginated.
    pub entries: Vec<T>,
    /// The cursor this page was requested with, echoed back.
    pub page: Option<String>,
    /// Cursor for the next page; `None` on the final page.
    pub next_page: Option<String>,
    /// Effective page size.
    pub page_size: i32,
    /// Total row count under the filter.
    pub total: i64,
}

/// Assemble a page from rows fetched with `LIMIT page_size + 1`.
///
/// If the look-ahead row is present it is trimmed and a next cursor is
/// encoded from the key of the last row that *stays* in the page, which
/// is exactly the position the next seek predicate resumes after.
/// Empty results are valid pages, never errors.
pub fn assemble_page<T, K, F>(
    mut rows: Vec<T>,
    request: &PageRequest<K>,
    total: i64,
    key_of: F,
) -> Result<Page<T>, CursorError>
where
    K: SeekKey,
    F: Fn(&T) -> K,
{
    let mut next_page = None;
    if request.page_size > 0 && rows.len() > request.page_size as usize {
        rows.truncate(request.page_size as usize);
        if let Some(last) = rows.last() {
            let cursor = Cursor {
                seek: key_of(last),
                total,
                page_size: request.page_size,
            };
            next_page = Some(cursor.encode()?);
        }
    }

    Ok(Page {
        entries: rows,
        page: request.token.clone(),
        next_page,
        page_size: request.page_size,
        total,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-field key matching a `(name, office)` sort order.
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct TestKey {
        name: String,
        office: String,
    }

    impl SeekKey for TestKey {
        const FIELD_COUNT: usize = 2;

        fn to_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.office.clone()]
        }

        fn from_fields(fields: &[&str]) -> Result<Self, CursorError> {
            Ok(Self {
                name: fields[0].to_string(),
                office: fields[1].to_string(),
            })
        }
    }

    fn key(name: &str) -> TestKey {
        TestKey {
            name: name.to_string(),
            office: "SPK".to_string(),
        }
    }

    #[test]
    fn cursor_roundtrip() {
        let cursor = Cursor {
            seek: key("ALBU"),
            total: 1234,
            page_size: 50,
        };
        let token = cursor.encode().unwrap();
        let decoded = Cursor::<TestKey>::decode(&token).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn cursor_token_is_opaque() {
        let cursor = Cursor {
            seek: key("ALBU"),
            total: 10,
            page_size: 5,
        };
        let token = cursor.encode().unwrap();
        // No raw delimiter or field values leak into the token
        assert!(!token.contains('|'));
        assert!(!token.contains("ALBU"));
    }

    #[test]
    fn malformed_cursor_is_rejected() {
        // Garbage must fail, not fall back to first page
        let err = Cursor::<TestKey>::decode("not-a-real-cursor").unwrap_err();
        assert!(matches!(
            err,
            CursorError::BadEncoding(_) | CursorError::FieldCount { .. }
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let token = URL_SAFE_NO_PAD.encode("just-one-field");
        assert_eq!(
            Cursor::<TestKey>::decode(&token),
            Err(CursorError::FieldCount {
                expected: 4,
                got: 1
            })
        );
    }

    #[test]
    fn non_numeric_total_is_rejected() {
        let token = URL_SAFE_NO_PAD.encode("ALBU|SPK|abc|50");
        assert!(matches!(
            Cursor::<TestKey>::decode(&token),
            Err(CursorError::BadField { field: "total", .. })
        ));
    }

    #[test]
    fn embedded_nonpositive_page_size_is_rejected() {
        let token = URL_SAFE_NO_PAD.encode("ALBU|SPK|10|0");
        assert_eq!(
            Cursor::<TestKey>::decode(&token),
            Err(CursorError::InvalidPageSize(0))
        );
    }

    #[test]
    fn delimiter_in_seek_field_is_rejected() {
        let cursor = Cursor {
            seek: TestKey {
                name: "BAD|NAME".to_string(),
                office: "SPK".to_string(),
            },
            total: 10,
            page_size: 5,
        };
        assert_eq!(
            cursor.encode(),
            Err(CursorError::DelimiterInField("BAD|NAME".to_string()))
        );
    }

    #[test]
    fn millis_roundtrip() {
        let ts = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        let field = millis_of(&ts);
        assert_eq!(millis_field("date_time", &field).unwrap(), ts);
    }

    #[test]
    fn negative_page_size_param_is_rejected() {
        let err = PageRequest::<TestKey>::from_params(None, Some(-1), 20).unwrap_err();
        assert_eq!(err, CursorError::InvalidPageSize(-1));
    }

    #[test]
    fn empty_token_means_first_page() {
        let request = PageRequest::<TestKey>::from_params(Some(""), None, 20).unwrap();
        assert!(request.cursor.is_none());
        assert_eq!(request.page_size, 20);
        assert_eq!(request.fetch_limit(), Some(21));
    }

    #[test]
    fn cursor_page_size_wins_over_param() {
        let token = Cursor {
            seek: key("ALBU"),
            total: 40,
            page_size: 10,
        }
        .encode()
        .unwrap();

        let request = PageRequest::<TestKey>::from_params(Some(&token), Some(99), 20).unwrap();
        assert_eq!(request.page_size, 10);
        assert_eq!(request.known_total(), Some(40));
    }

    #[test]
    fn page_size_zero_is_unbounded() {
        let request = PageRequest::<TestKey>::first_page(0).unwrap();
        assert!(request.is_unbounded());
        assert_eq!(request.fetch_limit(), None);

        let rows = vec!["A", "B", "C"];
        let page = assemble_page(rows, &request, 3, |_| key("X")).unwrap();
        assert_eq!(page.entries.len(), 3);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn empty_result_is_a_valid_page() {
        let request = PageRequest::<TestKey>::first_page(20).unwrap();
        let page = assemble_page(Vec::<&str>::new(), &request, 0, |_| key("X")).unwrap();
        assert!(page.entries.is_empty());
        assert_eq!(page.total, 0);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn lookahead_row_is_trimmed() {
        let request = PageRequest::<TestKey>::first_page(2).unwrap();
        // 3 rows fetched for page size 2: has more
        let rows = vec!["A", "B", "C"];
        let page = assemble_page(rows, &request, 5, |r| key(r)).unwrap();
        assert_eq!(page.entries, vec!["A", "B"]);
        assert_eq!(page.total, 5);

        // Next cursor points at "B", the last row kept, not the probe row
        let next = Cursor::<TestKey>::decode(&page.next_page.unwrap()).unwrap();
        assert_eq!(next.seek, key("B"));
        assert_eq!(next.total, 5);
        assert_eq!(next.page_size, 2);
    }

    #[test]
    fn exact_fit_has_no_next_page() {
        let request = PageRequest::<TestKey>::first_page(3).unwrap();
        let rows = vec!["A", "B", "C"];
        let page = assemble_page(rows, &request, 3, |r| key(r)).unwrap();
        assert_eq!(page.entries.len(), 3);
        assert!(page.next_page.is_none());
    }

    /// Simulated keyset query over an in-memory snapshot: rows strictly
    /// after the seek key, limit+1.
    fn fetch(snapshot: &[&'static str], request: &PageRequest<TestKey>) -> Vec<&'static str> {
        let after = request.seek().cloned();
        let mut rows: Vec<&'static str> = snapshot
            .iter()
            .copied()
            .filter(|r| match &after {
                Some(k) => key(r) > *k,
                None => true,
            })
            .collect();
        rows.sort_by_key(|r| key(r));
        if let Some(limit) = request.fetch_limit() {
            rows.truncate(limit as usize);
        }
        rows
    }

    // 5 rows, page size 2 -> [A,B], [C,D], [E], terminating with no
    // gaps and no duplicates.
    #[test]
    fn full_traversal_has_no_gaps_or_duplicates() {
        let snapshot = ["A", "B", "C", "D", "E"];
        let mut request = PageRequest::<TestKey>::first_page(2).unwrap();
        let mut collected = Vec::new();
        let mut pages = 0;

        loop {
            let rows = fetch(&snapshot, &request);
            let total = request.known_total().unwrap_or(snapshot.len() as i64);
            let page = assemble_page(rows, &request, total, |r| key(r)).unwrap();
            collected.extend(page.entries.iter().copied());
            pages += 1;
            assert!(pages <= 3, "traversal must terminate in ceil(5/2) pages");

            match page.next_page {
                Some(token) => {
                    request = PageRequest::from_params(Some(&token), None, 2).unwrap();
                }
                None => break,
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(collected, vec!["A", "B", "C", "D", "E"]);
    }
}
