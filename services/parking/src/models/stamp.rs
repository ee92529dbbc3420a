//! Timestamps as they are stored in the documents

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseError};
use serde::{Deserialize, Serialize};

/// Format of every timestamp written to disk
pub const STAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Date-only format used by report filters and some older fine records
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A `dd/mm/yyyy HH:MM` timestamp, kept verbatim.
///
/// Stamps are validated when they are used rather than when the document is
/// loaded, so one unreadable date does not make a whole document unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stamp(String);

impl Stamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse the stamp as `dd/mm/yyyy HH:MM`
    pub fn to_datetime(&self) -> Result<NaiveDateTime, ParseError> {
        NaiveDateTime::parse_from_str(self.0.trim(), STAMP_FORMAT)
    }

    /// Parse the stamp as `dd/mm/yyyy HH:MM`, falling back to `dd/mm/yyyy`
    /// at midnight.
    pub fn to_datetime_lenient(&self) -> Result<NaiveDateTime, ParseError> {
        self.to_datetime().or_else(|err| {
            NaiveDate::parse_from_str(self.0.trim(), DATE_FORMAT)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| err)
        })
    }
}

impl From<NaiveDateTime> for Stamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.format(STAMP_FORMAT).to_string())
    }
}

impl From<String> for Stamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Stamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_format_drops_seconds() {
        let dt = NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap();
        let stamp = Stamp::from(dt);
        assert_eq!(stamp.as_str(), "03/06/2025 09:05");
        assert_eq!(stamp.to_datetime().unwrap(), at(3, 9, 5));
    }

    #[test]
    fn test_lenient_accepts_date_only() {
        let stamp = Stamp::from("03/06/2025");
        assert!(stamp.to_datetime().is_err());
        assert_eq!(stamp.to_datetime_lenient().unwrap(), at(3, 0, 0));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Stamp::from("tomorrow").to_datetime_lenient().is_err());
        assert!(Stamp::default().is_empty());
    }
}
