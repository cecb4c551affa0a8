//! Calendar periods used as labels of a `PeriodIndex`.
use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The span covered by a single period. Anchored frequencies use the
/// conventional anchors (weeks end on Sunday, quarters and years end in December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    Day,
    BusinessDay,
    Week,
    Month,
    Quarter,
    Year,
}

impl Frequency {
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Day => "D",
            Frequency::BusinessDay => "B",
            Frequency::Week => "W-SUN",
            Frequency::Month => "M",
            Frequency::Quarter => "Q-DEC",
            Frequency::Year => "Y-DEC",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A period of a given frequency, identified by the first day it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub freq: Frequency,
    pub start: NaiveDate,
}

impl Period {
    /// Returns the period of frequency `freq` that contains `date`.
    pub fn containing(freq: Frequency, date: NaiveDate) -> Self {
        let start = match freq {
            Frequency::Day | Frequency::BusinessDay => date,
            Frequency::Week => date - TimeDelta::days(date.weekday().num_days_from_monday() as i64),
            Frequency::Month => date - TimeDelta::days(date.day0() as i64),
            Frequency::Quarter => {
                let first_month = date.month0() / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date)
            }
            Frequency::Year => date - TimeDelta::days(date.ordinal0() as i64),
        };
        Self { freq, start }
    }

    /// Last day covered by the period.
    pub fn end(&self) -> NaiveDate {
        match self.freq {
            Frequency::Day | Frequency::BusinessDay => self.start,
            Frequency::Week => self.start + TimeDelta::days(6),
            Frequency::Month | Frequency::Quarter | Frequency::Year => {
                let months = match self.freq {
                    Frequency::Month => 1,
                    Frequency::Quarter => 3,
                    _ => 12,
                };
                let next = self.start.checked_add_months(chrono::Months::new(months));
                next.map_or(self.start, |d| d - TimeDelta::days(1))
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.freq {
            Frequency::Day | Frequency::BusinessDay => write!(f, "{}", self.start.format("%Y-%m-%d")),
            Frequency::Week => write!(f, "{}/{}", self.start.format("%Y-%m-%d"), self.end().format("%Y-%m-%d")),
            Frequency::Month => write!(f, "{}", self.start.format("%Y-%m")),
            Frequency::Quarter => write!(f, "{}Q{}", self.start.year(), self.start.month0() / 3 + 1),
            Frequency::Year => write!(f, "{}", self.start.year()),
        }
    }
}
