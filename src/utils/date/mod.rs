// Date utility functions
// Local wall-clock day/week/month arithmetic shared by the views

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

pub fn start_of_day(date: DateTime<Local>) -> DateTime<Local> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(date.timezone())
        .unwrap()
}

pub fn end_of_day(date: DateTime<Local>) -> DateTime<Local> {
    date.date_naive()
        .and_hms_opt(23, 59, 59)
        .unwrap()
        .and_local_timezone(date.timezone())
        .unwrap()
}

/// Local midnight at the start of the given calendar date.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    date.and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First cell date of the 6x7 month grid containing `date`: the week start
/// of the first of the month, so leading days of the previous month fill
/// the top row.
pub fn month_grid_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let first_of_month = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of month is a valid date");
    week_start(first_of_month, first_day_of_week)
}

/// Step a date by whole months, clamping to the last day when the source
/// day does not exist in the target month.
pub fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) + 1;
    clamp_day(new_year, new_month as u32, current.day())
}

fn clamp_day(year: i32, month: u32, desired_day: u32) -> NaiveDate {
    let max_day = last_day_of_month(year, month);
    let day = desired_day.min(max_day);
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, max_day))
        .expect("valid calendar date")
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid next month");
    first_of_next.pred_opt().expect("previous day exists").day()
}
