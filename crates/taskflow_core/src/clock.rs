use crate::error::AppError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Source of the current instant, injected so due-date comparisons and
/// creation timestamps stay deterministic under test.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

pub fn format_timestamp(moment: OffsetDateTime) -> Result<String, AppError> {
    moment
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Stored timestamps are not validated on load, so a parse failure is
/// `None` rather than an error.
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}
