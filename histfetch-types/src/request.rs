use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::kind::{DataKind, Granularity};

/// Inclusive UTC time window `[start, end]` shared by every request of a batch.
///
/// Deserialization goes through [`DateRange::new`], so reversed bounds are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = FetchError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range from explicit bounds.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, FetchError> {
        if start > end {
            return Err(FetchError::InvalidArg(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from ISO-8601 text.
    ///
    /// Accepts RFC 3339 timestamps (`2021-02-10T16:30:00Z`) and bare dates
    /// (`2021-02-10`), the latter meaning midnight UTC.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either bound fails to parse or the bounds are reversed.
    pub fn parse(start: &str, end: &str) -> Result<Self, FetchError> {
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }

    /// Lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn parse_instant(text: &str) -> Result<DateTime<Utc>, FetchError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FetchError::InvalidArg(format!("invalid ISO-8601 timestamp: {text}")))
}

/// One unit of work: fetch `kind` records for `identifier` over `range`.
///
/// Created by the facade for each identifier of a batch and consumed once by the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Symbol or other provider key designating the unit of work.
    pub identifier: String,
    /// Which category of records to fetch.
    pub kind: DataKind,
    /// Time window of the request.
    pub range: DateRange,
    /// Sampling resolution; only forwarded for kinds that take one.
    pub granularity: Option<Granularity>,
}

impl RequestSpec {
    /// Build a request for one identifier.
    pub fn new(
        identifier: impl Into<String>,
        kind: DataKind,
        range: DateRange,
        granularity: Option<Granularity>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            range,
            granularity,
        }
    }
}
