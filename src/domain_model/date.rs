use chrono::{NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}, expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| DateParseError {
        input: s.to_string(),
    })
}

/// Inclusive range of calendar days. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}
