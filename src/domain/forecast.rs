//! Forecast inputs and results.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::error::DomainError;

/// Forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Monthly,
}

impl Period {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Validate and build a month.
    pub fn try_new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The preceding calendar month.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The following calendar month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedMonth {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::try_new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The three most recent daily totals, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyLags {
    pub lag1: Decimal,
    pub lag2: Decimal,
    pub lag3: Decimal,
}

impl DailyLags {
    #[must_use]
    pub fn to_lags(self) -> Lags {
        Lags(vec![self.lag1, self.lag2, self.lag3])
    }
}

/// Ordered lag values fed to the model (1 to 3 entries, most recent first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Lags(Vec<Decimal>);

impl Lags {
    /// Validate the lag count.
    pub fn try_new(values: Vec<Decimal>) -> Result<Self, DomainError> {
        if values.is_empty() || values.len() > 3 {
            return Err(DomainError::LagCount {
                count: values.len(),
            });
        }
        Ok(Self(values))
    }

    /// A single previous-month total.
    #[must_use]
    pub fn monthly(prev_month_total: Decimal) -> Self {
        Self(vec![prev_month_total])
    }

    #[must_use]
    pub fn values(&self) -> &[Decimal] {
        &self.0
    }
}

/// A finished forecast for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub item_id: String,
    pub period: Period,
    pub lags: Lags,
    pub prediction: Decimal,
    /// Heuristic confidence in `[0.3, 0.95]` (daily) or one of the monthly steps.
    pub confidence: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Month the prediction is filed under when persisted.
    pub target_month: YearMonth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_time_ms: Option<f64>,
}
