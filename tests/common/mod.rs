#![allow(dead_code)]

use chrono::NaiveDate;
use zepto_core::schedule::{RecurringTransaction, TransactionType};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// A small household budget covering every cadence family.
pub fn household() -> Vec<RecurringTransaction> {
    vec![
        RecurringTransaction::new(1, "Rent", 1450.0, "Monthly", "2024-01-01")
            .with_category(10, "Housing"),
        RecurringTransaction::new(2, "Salary", 4200.0, "Bi-Weekly", "2025-01-03")
            .with_kind(TransactionType::Income)
            .with_category(20, "Income"),
        RecurringTransaction::new(3, "Car insurance", 620.0, "Semi-Annually", "2023-09-30"),
        RecurringTransaction::new(4, "Domain renewal", 12.0, "yearly", "2022-02-28"),
        RecurringTransaction::new(5, "Lunch", 11.5, "daily", "2025-06-01")
            .with_end_date("2025-06-30"),
    ]
}
