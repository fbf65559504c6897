//! Recurring-transaction scheduling: frequency calculus, upcoming predictions, and
//! reconciliation of occurrences that have come due.

pub mod calendar;
pub mod frequency;
pub mod reconcile;
pub mod recurring;

pub use calendar::{
    format_iso, most_recent_due_date, most_recent_index, next_dates, nth_occurrence, parse_date,
    CalendarDate,
};
pub use frequency::{Frequency, Step};
pub use reconcile::{plan_due_transactions, DueTransaction, LedgerEntry, LedgerLookup};
pub use recurring::{
    predict_upcoming, predict_upcoming_with_category, snapshot_recurring, PredictedTransaction,
    RecurringSnapshot, RecurringTransaction, Schedule, TransactionType, DEFAULT_CATEGORY,
    DEFAULT_PREDICTION_LIMIT,
};
