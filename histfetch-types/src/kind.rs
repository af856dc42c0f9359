use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Category of historical record requested from a provider.
///
/// The set is closed: routing matches on it exhaustively. Names outside the set
/// can only arrive as text and are rejected by [`FromStr`] with
/// [`FetchError::UnsupportedKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    /// Aggregated OHLCV bars.
    Bars,
    /// Individual trade prints.
    Trades,
    /// Top-of-book bid/ask quotes.
    Quotes,
}

impl DataKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::Bars, Self::Trades, Self::Quotes];

    /// Stable identifier for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bars => "Bars",
            Self::Trades => "Trades",
            Self::Quotes => "Quotes",
        }
    }

    /// Whether the provider call for this kind is parameterized by a granularity.
    ///
    /// Only bars are aggregated; trades and quotes are raw ticks.
    #[must_use]
    pub const fn takes_granularity(self) -> bool {
        matches!(self, Self::Bars)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bars" | "bar" => Ok(Self::Bars),
            "trades" | "trade" => Ok(Self::Trades),
            "quotes" | "quote" => Ok(Self::Quotes),
            _ => Err(FetchError::unsupported_kind(s.trim())),
        }
    }
}

/// Time unit of a [`Granularity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GranularityUnit {
    /// Minutes (1-59).
    Minute,
    /// Hours (1-23).
    Hour,
    /// Days (1 only).
    Day,
    /// Weeks (1 only).
    Week,
    /// Months (1, 2, 3, 4, 6 or 12).
    Month,
}

impl GranularityUnit {
    const fn wire_suffix(self) -> &'static str {
        match self {
            Self::Minute => "Min",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "min" | "minute" | "minutes" | "t" => Some(Self::Minute),
            "h" | "hour" | "hours" => Some(Self::Hour),
            "d" | "day" | "days" => Some(Self::Day),
            "w" | "week" | "weeks" => Some(Self::Week),
            "m" | "month" | "months" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Sampling resolution for bar requests, e.g. one minute or fifteen minutes.
///
/// Renders in the provider wire form (`1Min`, `15Min`, `1Hour`, `1Day`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGranularity")]
pub struct Granularity {
    amount: u32,
    unit: GranularityUnit,
}

#[derive(Deserialize)]
struct RawGranularity {
    amount: u32,
    unit: GranularityUnit,
}

impl TryFrom<RawGranularity> for Granularity {
    type Error = FetchError;

    fn try_from(raw: RawGranularity) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.unit)
    }
}

impl Granularity {
    /// One minute.
    pub const MINUTE: Self = Self {
        amount: 1,
        unit: GranularityUnit::Minute,
    };
    /// One hour.
    pub const HOUR: Self = Self {
        amount: 1,
        unit: GranularityUnit::Hour,
    };
    /// One day.
    pub const DAY: Self = Self {
        amount: 1,
        unit: GranularityUnit::Day,
    };
    /// One week.
    pub const WEEK: Self = Self {
        amount: 1,
        unit: GranularityUnit::Week,
    };
    /// One month.
    pub const MONTH: Self = Self {
        amount: 1,
        unit: GranularityUnit::Month,
    };

    /// Build a granularity, validating the amount against the unit.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the amount is outside what the unit allows.
    pub fn new(amount: u32, unit: GranularityUnit) -> Result<Self, FetchError> {
        let valid = match unit {
            GranularityUnit::Minute => (1..=59).contains(&amount),
            GranularityUnit::Hour => (1..=23).contains(&amount),
            GranularityUnit::Day | GranularityUnit::Week => amount == 1,
            GranularityUnit::Month => matches!(amount, 1 | 2 | 3 | 4 | 6 | 12),
        };
        if !valid {
            return Err(FetchError::InvalidArg(format!(
                "granularity amount {amount} is not allowed for unit {unit:?}"
            )));
        }
        Ok(Self { amount, unit })
    }

    /// Number of units per sample.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.amount
    }

    /// Unit of each sample.
    #[must_use]
    pub const fn unit(self) -> GranularityUnit {
        self.unit
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.wire_suffix())
    }
}

impl FromStr for Granularity {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| FetchError::InvalidArg(format!("granularity '{s}' has no unit")))?;
        let (digits, unit) = s.split_at(split);
        let amount = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| FetchError::InvalidArg(format!("invalid granularity amount in '{s}'")))?
        };
        // "M" alone is month, "Min"/"min" is minute: GranularityUnit::parse lowercases,
        // so disambiguate the single uppercase letter first.
        let unit = if unit == "M" {
            GranularityUnit::Month
        } else if unit == "m" {
            GranularityUnit::Minute
        } else {
            GranularityUnit::parse(unit)
                .ok_or_else(|| FetchError::InvalidArg(format!("unknown granularity unit in '{s}'")))?
        };
        Self::new(amount, unit)
    }
}
