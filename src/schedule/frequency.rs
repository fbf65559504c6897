use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::add_months;
use crate::errors::ZeptoError;

/// Cadence of a recurring transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    TriWeekly,
    Monthly,
    BiMonthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

/// Unit-aware size of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Days(u64),
    Months(u32),
}

impl Frequency {
    pub const ALL: [Frequency; 9] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::TriWeekly,
        Frequency::Monthly,
        Frequency::BiMonthly,
        Frequency::Quarterly,
        Frequency::SemiAnnually,
        Frequency::Annually,
    ];

    /// Parses a stored frequency, falling back to [`Frequency::Monthly`] for anything unrecognised.
    pub fn parse_lenient(raw: &str) -> Frequency {
        match raw.parse() {
            Ok(frequency) => frequency,
            Err(_) => {
                tracing::warn!(frequency = raw, "unsupported frequency, defaulting to Monthly");
                Frequency::Monthly
            }
        }
    }

    pub fn step(self) -> Step {
        match self {
            Frequency::Daily => Step::Days(1),
            Frequency::Weekly => Step::Days(7),
            Frequency::BiWeekly => Step::Days(14),
            Frequency::TriWeekly => Step::Days(21),
            Frequency::Monthly => Step::Months(1),
            Frequency::BiMonthly => Step::Months(2),
            Frequency::Quarterly => Step::Months(3),
            Frequency::SemiAnnually => Step::Months(6),
            Frequency::Annually => Step::Months(12),
        }
    }

    /// Returns the next occurrence strictly after `date`.
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self.step() {
            Step::Days(days) => date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX),
            Step::Months(months) => add_months(date, months),
        }
    }

    /// Approximate period length in days, for ordering only.
    pub fn approx_days(self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::BiWeekly => 14,
            Frequency::TriWeekly => 21,
            Frequency::Monthly => 30,
            Frequency::BiMonthly => 60,
            Frequency::Quarterly => 90,
            Frequency::SemiAnnually => 180,
            Frequency::Annually => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-Weekly",
            Frequency::TriWeekly => "Tri-Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::BiMonthly => "Bi-Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnually => "Semi-Annually",
            Frequency::Annually => "Annually",
        }
    }
}

impl FromStr for Frequency {
    type Err = ZeptoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let frequency = match raw {
            "Daily" | "daily" => Frequency::Daily,
            "Weekly" | "weekly" => Frequency::Weekly,
            "Bi-Weekly" => Frequency::BiWeekly,
            "Tri-Weekly" => Frequency::TriWeekly,
            "Monthly" | "monthly" => Frequency::Monthly,
            "Bi-Monthly" => Frequency::BiMonthly,
            "Quarterly" => Frequency::Quarterly,
            "Semi-Annually" => Frequency::SemiAnnually,
            "Annually" | "yearly" => Frequency::Annually,
            other => return Err(ZeptoError::UnknownFrequency(other.to_string())),
        };
        Ok(frequency)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Frequency {
    fn from(raw: String) -> Self {
        Frequency::parse_lenient(&raw)
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.label().to_string()
    }
}
