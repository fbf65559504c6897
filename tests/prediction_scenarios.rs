mod common;

use chrono::{Duration, Months};
use common::{date, household};
use zepto_core::schedule::{
    most_recent_due_date, predict_upcoming, Frequency, RecurringTransaction,
};

#[test]
fn empty_input_produces_no_predictions() {
    for limit in [0, 1, 2, 10] {
        assert!(predict_upcoming(&[], limit, date(2025, 6, 15)).is_empty());
    }
}

#[test]
fn monthly_starting_today_yields_consecutive_months() {
    let today = date(2025, 6, 15);
    let rt = RecurringTransaction::new(1, "Monthly Subscription", 29.99, "Monthly", "2025-06-15");

    let predictions = predict_upcoming(&[rt], 3, today);
    let dates: Vec<_> = predictions.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 6, 15), date(2025, 7, 15), date(2025, 8, 15)]
    );
}

#[test]
fn monthly_with_past_start_only_predicts_forward() {
    let today = date(2025, 6, 15);
    let rt = RecurringTransaction::new(2, "Past Subscription", 19.99, "Monthly", "2024-01-01");

    let predictions = predict_upcoming(&[rt], 2, today);
    assert_eq!(predictions.len(), 2);
    assert!(predictions.iter().all(|p| p.date >= today));
    assert_eq!(
        predictions[0].date.checked_add_months(Months::new(1)),
        Some(predictions[1].date)
    );
    assert_eq!(predictions[0].date, date(2025, 7, 1));
}

#[test]
fn end_date_before_next_occurrence_stops_generation() {
    let today = date(2025, 6, 15);
    let ended = RecurringTransaction::new(3, "Old loan", 250.0, "Monthly", "2024-01-10")
        .with_end_date("2025-01-01");
    assert!(predict_upcoming(&[ended], 3, today).is_empty());

    let truncated = RecurringTransaction::new(4, "Last payments", 80.0, "Monthly", "2025-06-20")
        .with_end_date("2025-07-31");
    let dates: Vec<_> = predict_upcoming(&[truncated], 5, today)
        .iter()
        .map(|p| p.date)
        .collect();
    assert_eq!(dates, vec![date(2025, 6, 20), date(2025, 7, 20)]);
}

#[test]
fn bi_weekly_due_date_is_largest_multiple_of_fourteen_days() {
    let today = date(2025, 6, 15);
    let start = today - Duration::days(100);

    let due = most_recent_due_date(start, Frequency::BiWeekly, today).expect("schedule has begun");
    let offset = (due - start).num_days();
    assert_eq!(offset % 14, 0);
    assert!(due <= today);
    assert!(due + Duration::days(14) > today);
    assert_eq!(due, date(2025, 6, 13));
}

#[test]
fn unknown_frequency_behaves_like_monthly() {
    let today = date(2025, 6, 15);
    let start = date(2025, 1, 31);
    assert_eq!(
        Frequency::parse_lenient("Fortnightly").advance(start),
        Frequency::Monthly.advance(start)
    );

    let odd = RecurringTransaction::new(5, "Mystery", 9.0, "Fortnightly", "2025-01-31");
    let monthly = RecurringTransaction::new(5, "Mystery", 9.0, "Monthly", "2025-01-31");
    let odd_dates: Vec<_> = predict_upcoming(&[odd], 3, today)
        .into_iter()
        .map(|p| (p.date, p.recurring_frequency))
        .collect();
    let monthly_dates: Vec<_> = predict_upcoming(&[monthly], 3, today)
        .into_iter()
        .map(|p| (p.date, p.recurring_frequency))
        .collect();
    assert_eq!(odd_dates, monthly_dates);
    assert_eq!(odd_dates[0].0, date(2025, 6, 30));
    assert_eq!(odd_dates[1].0, date(2025, 7, 31));
}

#[test]
fn malformed_records_do_not_blank_out_the_batch() {
    let today = date(2025, 6, 15);
    let mut records = household();
    let mut broken = RecurringTransaction::new(99, "Broken", 1.0, "Weekly", "31/12/2024");
    records.push(broken.clone());
    broken.start_date = None;
    records.push(broken);

    let predictions = predict_upcoming(&records, 2, today);
    assert!(predictions.iter().all(|p| p.recurring_transaction_id != 99));
    assert_eq!(predictions.len(), 10);
}

#[test]
fn batch_output_is_sorted_by_date_with_unique_negative_ids() {
    let today = date(2025, 6, 15);
    let predictions = predict_upcoming(&household(), 2, today);

    assert!(predictions.windows(2).all(|pair| pair[0].date <= pair[1].date));
    assert!(predictions.iter().all(|p| p.id < 0 && p.predicted));

    let mut ids: Vec<i64> = predictions.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), predictions.len());
}

#[test]
fn predictions_are_stable_for_the_same_today() {
    let today = date(2025, 6, 15);
    let first = predict_upcoming(&household(), 3, today);
    let second = predict_upcoming(&household(), 3, today);
    assert_eq!(first, second);
}

#[test]
fn next_dates_scan_matches_predictions_for_recent_schedules() {
    let today = date(2025, 6, 15);
    let rt = RecurringTransaction::new(6, "Gym", 40.0, "Weekly", "2025-06-01");
    let schedule = rt.schedule().expect("valid schedule");

    let scanned = schedule.next_dates(2, today, 20);
    let predicted: Vec<_> = predict_upcoming(&[rt], 2, today)
        .into_iter()
        .map(|p| p.date)
        .collect();
    assert_eq!(scanned, vec![date(2025, 6, 15), date(2025, 6, 22)]);
    assert_eq!(predicted, vec![date(2025, 6, 22), date(2025, 6, 29)]);
}
