use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{
    most_recent_due_date, most_recent_index, next_dates, nth_occurrence, parse_date,
};
use super::frequency::Frequency;
use crate::errors::ZeptoError;

pub const DEFAULT_PREDICTION_LIMIT: usize = 2;
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

/// A recurring transaction as stored by the persistence layer. Dates and frequency stay raw
/// here and are only interpreted through [`RecurringTransaction::schedule`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTransaction {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub frequency: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecurringTransaction {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        amount: f64,
        frequency: impl Into<String>,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            user_id: None,
            name: name.into(),
            amount,
            kind: TransactionType::Expense,
            account_type: None,
            category_id: None,
            category_name: None,
            frequency: frequency.into(),
            start_date: Some(start_date.into()),
            end_date: None,
            description: None,
        }
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_category(mut self, category_id: i64, category_name: impl Into<String>) -> Self {
        self.category_id = Some(category_id);
        self.category_name = Some(category_name.into());
        self
    }

    /// Interprets the raw dates and frequency. A missing or unparseable start date is an error;
    /// an unparseable end date is ignored.
    pub fn schedule(&self) -> Result<Schedule, ZeptoError> {
        let raw_start = self
            .start_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| ZeptoError::Validation("start date is required".into()))?;
        let start = parse_date(raw_start)?;
        let end = match self.end_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_date(raw) {
                Ok(end) => Some(end),
                Err(err) => {
                    tracing::warn!(id = self.id, error = %err, "ignoring unparseable end date");
                    None
                }
            },
            _ => None,
        };
        Ok(Schedule {
            start,
            end,
            frequency: Frequency::parse_lenient(&self.frequency),
        })
    }

    /// Checks the rules a recurring transaction must satisfy when it is created or edited.
    pub fn validate(&self) -> Result<(), ZeptoError> {
        if self.name.trim().is_empty() {
            return Err(ZeptoError::Validation("transaction name is required".into()));
        }
        if self.amount.is_nan() || self.amount <= 0.0 {
            return Err(ZeptoError::Validation(
                "a positive transaction amount is required".into(),
            ));
        }
        self.frequency.parse::<Frequency>().map_err(|_| {
            ZeptoError::Validation(format!(
                "a valid frequency is required, got `{}`",
                self.frequency
            ))
        })?;
        let schedule = self.schedule()?;
        if let Some(end) = schedule.end {
            if end < schedule.start {
                return Err(ZeptoError::Validation(
                    "end date must not precede the start date".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Typed view over a recurring transaction's timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub frequency: Frequency,
}

impl Schedule {
    pub fn is_ended(&self, date: NaiveDate) -> bool {
        self.end.is_some_and(|end| date > end)
    }

    /// Most recent occurrence on or before `target`, ignoring the end date.
    pub fn most_recent_due(&self, target: NaiveDate) -> Option<NaiveDate> {
        most_recent_due_date(self.start, self.frequency, target)
    }

    /// Occurrence number `index`, where the start date is occurrence 0.
    pub fn occurrence(&self, index: u32) -> NaiveDate {
        nth_occurrence(self.start, self.frequency, index)
    }

    /// Index of the first occurrence strictly after today, or 0 if the schedule has not begun.
    fn next_index(&self, today: NaiveDate) -> u32 {
        if self.start >= today {
            return 0;
        }
        most_recent_index(self.start, self.frequency, today)
            .map_or(0, |index| index.saturating_add(1))
    }

    pub fn next_dates(&self, count: usize, today: NaiveDate, scan_factor: usize) -> Vec<NaiveDate> {
        next_dates(
            self.start,
            self.frequency,
            count,
            self.end,
            today,
            scan_factor,
        )
    }
}

/// Display-only materialization of a future occurrence. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictedTransaction {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub account_type: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub recurring_transaction_id: i64,
    pub recurring_frequency: Frequency,
    pub predicted: bool,
}

impl PredictedTransaction {
    fn from_recurring(
        id: i64,
        source: &RecurringTransaction,
        frequency: Frequency,
        date: NaiveDate,
        default_category: &str,
    ) -> Self {
        Self {
            id,
            user_id: source.user_id.clone(),
            date,
            amount: source.amount,
            name: source.name.clone(),
            description: source.description.clone().unwrap_or_default(),
            kind: source.kind,
            account_type: source.account_type.clone(),
            category_id: source.category_id,
            category_name: source
                .category_name
                .clone()
                .unwrap_or_else(|| default_category.to_string()),
            recurring_transaction_id: source.id,
            recurring_frequency: frequency,
            predicted: true,
        }
    }
}

/// Projects up to `limit` upcoming occurrences per recurring transaction, sorted by date.
///
/// Records without a usable start date are skipped; nothing here fails the batch.
pub fn predict_upcoming(
    recurring: &[RecurringTransaction],
    limit: usize,
    today: NaiveDate,
) -> Vec<PredictedTransaction> {
    predict_upcoming_with_category(recurring, limit, today, DEFAULT_CATEGORY)
}

pub fn predict_upcoming_with_category(
    recurring: &[RecurringTransaction],
    limit: usize,
    today: NaiveDate,
    default_category: &str,
) -> Vec<PredictedTransaction> {
    let mut predictions: Vec<PredictedTransaction> = Vec::new();

    for source in recurring {
        let schedule = match source.schedule() {
            Ok(schedule) => schedule,
            Err(err) => {
                tracing::warn!(id = source.id, error = %err, "skipping recurring transaction");
                continue;
            }
        };

        let mut index = schedule.next_index(today);
        tracing::debug!(id = source.id, index, frequency = %schedule.frequency, "projecting");

        for _ in 0..limit {
            let anchor = schedule.occurrence(index);
            if schedule.is_ended(anchor) {
                break;
            }
            if anchor >= today {
                let id = -(predictions.len() as i64 + 1);
                predictions.push(PredictedTransaction::from_recurring(
                    id,
                    source,
                    schedule.frequency,
                    anchor,
                    default_category,
                ));
            }
            index = index.saturating_add(1);
        }
    }

    predictions.sort_by_key(|prediction| prediction.date);
    predictions
}

/// Per-series status line for schedule overviews.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecurringSnapshot {
    pub recurring_transaction_id: i64,
    pub name: String,
    pub frequency: Frequency,
    pub cadence_days: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub last_due: Option<NaiveDate>,
    pub next_due: Option<NaiveDate>,
}

pub fn snapshot_recurring(
    recurring: &[RecurringTransaction],
    today: NaiveDate,
) -> Vec<RecurringSnapshot> {
    let mut snapshots: Vec<RecurringSnapshot> = recurring
        .iter()
        .filter_map(|source| match source.schedule() {
            Ok(schedule) => Some((source, schedule)),
            Err(err) => {
                tracing::warn!(id = source.id, error = %err, "skipping recurring transaction");
                None
            }
        })
        .map(|(source, schedule)| {
            let horizon = schedule.end.map_or(today, |end| end.min(today));
            let next = schedule.occurrence(schedule.next_index(today));
            RecurringSnapshot {
                recurring_transaction_id: source.id,
                name: source.name.clone(),
                frequency: schedule.frequency,
                cadence_days: schedule.frequency.approx_days(),
                start_date: schedule.start,
                end_date: schedule.end,
                last_due: schedule.most_recent_due(horizon),
                next_due: (!schedule.is_ended(next)).then_some(next),
            }
        })
        .collect();

    snapshots.sort_by_key(|snap| {
        (
            snap.next_due.is_none(),
            snap.next_due,
            snap.recurring_transaction_id,
        )
    });
    snapshots
}
