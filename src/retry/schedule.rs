//! Reschedule date arithmetic. All results are calendar dates strictly after
//! (or, for instant retries, equal to) the reference date.

use crate::domain::decision::RetryAction;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Next Friday strictly after `from`. A Friday input yields the following week's Friday.
pub fn next_friday(from: NaiveDate) -> NaiveDate {
    let offset = days_until(from.weekday(), Weekday::Fri);
    from + Duration::days(if offset == 0 { 7 } else { offset })
}

/// Last Friday of `from`'s month if it is still ahead, otherwise the last Friday of the next month.
pub fn end_of_month_friday(from: NaiveDate) -> NaiveDate {
    let this_month = last_friday_of_month(from);
    if this_month > from {
        return this_month;
    }
    let first_of_next = last_day_of_month(from) + Duration::days(1);
    last_friday_of_month(first_of_next)
}

/// `candidate`, unless a balance-due date after `from` comes sooner.
pub fn earliest_of(
    candidate: NaiveDate,
    balance_due_date: Option<NaiveDate>,
    from: NaiveDate,
) -> NaiveDate {
    match balance_due_date {
        Some(due) if due > from => candidate.min(due),
        _ => candidate,
    }
}

/// Concrete date for a rescheduling action; `None` for actions that do not reschedule.
pub fn reschedule_date(
    action: RetryAction,
    today: NaiveDate,
    balance_due_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match action {
        RetryAction::Instant => Some(today),
        RetryAction::ScheduleFriday => Some(earliest_of(next_friday(today), balance_due_date, today)),
        RetryAction::ScheduleFridayEom => Some(earliest_of(
            end_of_month_friday(today),
            balance_due_date,
            today,
        )),
        RetryAction::AlertAndBackoff | RetryAction::Backoff | RetryAction::NotPossible => None,
    }
}

fn days_until(from: Weekday, to: Weekday) -> i64 {
    let from = from.num_days_from_monday() as i64;
    let to = to.num_days_from_monday() as i64;
    (to - from).rem_euclid(7)
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while let Some(next) = day.succ_opt() {
        if next.month() != date.month() {
            break;
        }
        day = next;
    }
    day
}

fn last_friday_of_month(date: NaiveDate) -> NaiveDate {
    let last = last_day_of_month(date);
    last - Duration::days(days_until(Weekday::Fri, last.weekday()))
}
