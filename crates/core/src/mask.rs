//! Filter masks for string columns.
//!
//! A mask is a case-insensitive regular expression applied to a string
//! column of a catalog view; an absent mask matches everything. Patterns
//! are validated here at the request boundary so a bad pattern becomes a
//! client error instead of a database error; matching itself runs in the
//! database (`~*`).

use crate::error::{DomainError, DomainResult};
use regex::RegexBuilder;

/// Case-insensitive regex filter on a string column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask(Option<String>);

impl Mask {
    /// Mask matching every value.
    pub fn any() -> Self {
        Self(None)
    }

    /// Mask from a regex pattern, validated eagerly.
    pub fn regex(pattern: impl Into<String>) -> DomainResult<Self> {
        let pattern = pattern.into();
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| DomainError::InvalidMask {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self(Some(pattern)))
    }

    /// Mask from an optional query parameter; empty and absent both mean
    /// "match all".
    pub fn from_param(param: Option<&str>) -> DomainResult<Self> {
        match param {
            Some(p) if !p.is_empty() => Self::regex(p),
            _ => Ok(Self::any()),
        }
    }

    /// The underlying pattern, `None` when the mask matches everything.
    pub fn pattern(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_any(&self) -> bool {
        self.0.is_none()
    }

    /// In-memory match with the same semantics the database applies.
    ///
    /// Production filtering happens in SQL; this exists for in-memory
    /// fakes and tests.
    pub fn matches(&self, value: &str) -> bool {
        match &self.0 {
            None => true,
            Some(p) => RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(value))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_mask_matches_all() {
        let mask = Mask::from_param(None).unwrap();
        assert!(mask.is_any());
        assert!(mask.matches("anything"));

        let mask = Mask::from_param(Some("")).unwrap();
        assert!(mask.is_any());
    }

    #[test]
    fn mask_is_case_insensitive() {
        let mask = Mask::regex("^sacr.*raw$").unwrap();
        assert!(mask.matches("SACR.Flow.Inst.1Hour.0.Raw"));
        assert!(!mask.matches("AMER.Flow.Inst.1Hour.0.Raw"));
    }

    #[test]
    fn invalid_pattern_is_a_client_error() {
        let err = Mask::regex("[unclosed").unwrap_err();
        assert!(matches!(err, DomainError::InvalidMask { .. }));
    }
}
