//! Date path parameters and the inclusive ranges built from them.
//!
//! Dates are accepted as `YYYY-MM-DD`, or in the compact `YYYYMMDD` form the
//! legacy routes used. Both are always rendered back as `YYYY-MM-DD`, which is
//! the format the measurement table stores, so string comparison in SQL is
//! chronological comparison.

use time::{macros::format_description, Date};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date `{value}` must be formatted as YYYY-MM-DD or YYYYMMDD")]
    Format { value: String },
    #[error("date `{value}` is not a valid calendar date: {reason}")]
    Calendar { value: String, reason: String },
}

/// Parse a date path parameter.
pub fn parse_date(value: &str) -> Result<Date, ValidationError> {
    let parsed = match DateShape::of(value) {
        Some(DateShape::Dashed) => Date::parse(value, format_description!("[year]-[month]-[day]")),
        Some(DateShape::Compact) => Date::parse(value, format_description!("[year][month][day]")),
        None => {
            return Err(ValidationError::Format {
                value: value.to_owned(),
            })
        }
    };

    parsed.map_err(|e| ValidationError::Calendar {
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

/// Render a date the way the measurement table stores it.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

enum DateShape {
    Dashed,
    Compact,
}

impl DateShape {
    fn of(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        match bytes.len() {
            10 => {
                let separators_ok = bytes[4] == b'-' && bytes[7] == b'-';
                let digits_ok = bytes
                    .iter()
                    .enumerate()
                    .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
                (separators_ok && digits_ok).then_some(DateShape::Dashed)
            }
            8 => bytes
                .iter()
                .all(u8::is_ascii_digit)
                .then_some(DateShape::Compact),
            _ => None,
        }
    }
}

/// Inclusive date range: a measurement matches when `start <= date <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Build a range from raw path parameters. A missing end falls back to
    /// `default_end`, the last date the dataset is known to cover. Both
    /// parameters are validated before anything is returned.
    pub fn from_params(
        start: &str,
        end: Option<&str>,
        default_end: Date,
    ) -> Result<Self, ValidationError> {
        let start = parse_date(start)?;
        let end = match end {
            Some(end) => parse_date(end)?,
            None => default_end,
        };
        Ok(Self::new(start, end))
    }

    /// A reversed range matches nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[cfg(test)]
    fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}
