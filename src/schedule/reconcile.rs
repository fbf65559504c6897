//! Decides which due occurrences still need to be written to the ledger.
//!
//! Persistence stays with the caller: the planner only reads existing entries through
//! [`LedgerLookup`] and returns the rows to insert.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::recurring::{RecurringTransaction, TransactionType};

const DUE_DESCRIPTION: &str = "From recurring transaction";

/// Read-only view of stored transactions used for de-duplication.
///
/// Lookups are scoped to one owner; `None` matches only entries without an owner.
pub trait LedgerLookup {
    fn contains(&self, user_id: Option<&str>, date: NaiveDate, name: &str, amount: f64) -> bool;
}

/// Minimal stored-transaction shape needed to detect an already materialized occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub date: NaiveDate,
    pub name: String,
    pub amount: f64,
}

impl LedgerLookup for [LedgerEntry] {
    fn contains(&self, user_id: Option<&str>, date: NaiveDate, name: &str, amount: f64) -> bool {
        self.iter().any(|entry| {
            entry.user_id.as_deref() == user_id
                && entry.date == date
                && entry.name == name
                && entry.amount == amount
        })
    }
}

/// A ledger row to create for an occurrence that has come due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DueTransaction {
    pub recurring_transaction_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub date: NaiveDate,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub account_type: Option<String>,
    pub category_id: Option<i64>,
    pub description: String,
    pub recurring_frequency: Frequency,
}

impl DueTransaction {
    fn from_recurring(source: &RecurringTransaction, frequency: Frequency, date: NaiveDate) -> Self {
        let description = match source.description.as_deref() {
            Some(desc) if !desc.is_empty() => format!("{desc} ({DUE_DESCRIPTION})"),
            _ => DUE_DESCRIPTION.to_string(),
        };
        Self {
            recurring_transaction_id: source.id,
            user_id: source.user_id.clone(),
            date,
            name: source.name.clone(),
            amount: source.amount,
            kind: source.kind,
            account_type: source.account_type.clone(),
            category_id: source.category_id,
            description,
            recurring_frequency: frequency,
        }
    }
}

/// Plans at most one row per recurring transaction: its most recent occurrence on or before
/// `today`, unless the owner's ledger (or an earlier row in this plan for the same owner)
/// already holds it.
pub fn plan_due_transactions<L>(
    recurring: &[RecurringTransaction],
    today: NaiveDate,
    ledger: &L,
) -> Vec<DueTransaction>
where
    L: LedgerLookup + ?Sized,
{
    let mut planned: Vec<DueTransaction> = Vec::new();
    let mut seen: HashSet<(Option<String>, NaiveDate, String, u64)> = HashSet::new();

    for source in recurring {
        let schedule = match source.schedule() {
            Ok(schedule) => schedule,
            Err(err) => {
                tracing::warn!(id = source.id, error = %err, "skipping recurring transaction");
                continue;
            }
        };
        if schedule.start > today {
            continue;
        }
        if schedule.end.is_some_and(|end| end < today) {
            continue;
        }
        let Some(due) = schedule.most_recent_due(today) else {
            continue;
        };

        let owner = source.user_id.as_deref();
        if ledger.contains(owner, due, &source.name, source.amount) {
            tracing::debug!(id = source.id, %due, "occurrence already recorded");
            continue;
        }
        let key = (
            source.user_id.clone(),
            due,
            source.name.clone(),
            source.amount.to_bits(),
        );
        if !seen.insert(key) {
            continue;
        }

        planned.push(DueTransaction::from_recurring(source, schedule.frequency, due));
    }

    tracing::info!(count = planned.len(), "planned due transactions");
    planned
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ENTRIES: &[LedgerEntry] = &[];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plans_most_recent_occurrence() {
        let rent = RecurringTransaction::new(1, "Rent", 1200.0, "Monthly", "2025-01-03");
        let planned = plan_due_transactions(&[rent], date(2025, 6, 15), NO_ENTRIES);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].date, date(2025, 6, 3));
        assert_eq!(planned[0].description, "From recurring transaction");
    }

    #[test]
    fn existing_entries_are_not_planned_again() {
        let rent = RecurringTransaction::new(1, "Rent", 1200.0, "Monthly", "2025-01-03");
        let ledger = vec![LedgerEntry {
            user_id: None,
            date: date(2025, 6, 3),
            name: "Rent".into(),
            amount: 1200.0,
        }];
        let planned = plan_due_transactions(&[rent], date(2025, 6, 15), ledger.as_slice());
        assert!(planned.is_empty());
    }

    #[test]
    fn skips_future_and_ended_schedules() {
        let today = date(2025, 6, 15);
        let future = RecurringTransaction::new(1, "Later", 10.0, "Weekly", "2025-07-01");
        let ended = RecurringTransaction::new(2, "Done", 10.0, "Weekly", "2025-01-01")
            .with_end_date("2025-06-14");
        let planned = plan_due_transactions(&[future, ended], today, NO_ENTRIES);
        assert!(planned.is_empty());
    }

    #[test]
    fn duplicate_sources_within_one_plan_collapse() {
        let mut first = RecurringTransaction::new(1, "Gym", 40.0, "Weekly", "2025-06-01");
        first.description = Some("membership".into());
        let second = RecurringTransaction::new(2, "Gym", 40.0, "Weekly", "2025-06-01");
        let planned = plan_due_transactions(&[first, second], date(2025, 6, 10), NO_ENTRIES);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].date, date(2025, 6, 8));
        assert_eq!(planned[0].description, "membership (From recurring transaction)");
    }

    #[test]
    fn identical_series_of_different_users_are_both_planned() {
        let today = date(2025, 6, 15);
        let mut alice = RecurringTransaction::new(1, "Rent", 1200.0, "Monthly", "2025-01-01");
        alice.user_id = Some("alice".into());
        let mut bob = RecurringTransaction::new(2, "Rent", 1200.0, "Monthly", "2025-01-01");
        bob.user_id = Some("bob".into());

        let planned = plan_due_transactions(&[alice.clone(), bob.clone()], today, NO_ENTRIES);
        let users: Vec<Option<&str>> = planned.iter().map(|row| row.user_id.as_deref()).collect();
        assert_eq!(users, vec![Some("alice"), Some("bob")]);

        let ledger = vec![LedgerEntry {
            user_id: Some("alice".into()),
            date: date(2025, 6, 1),
            name: "Rent".into(),
            amount: 1200.0,
        }];
        let planned = plan_due_transactions(&[alice, bob], today, ledger.as_slice());
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].user_id.as_deref(), Some("bob"));
    }
}
