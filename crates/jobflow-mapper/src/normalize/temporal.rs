//! Date/time resolution for the free-form temporal strings the source
//! platforms export: ISO dates, US slash dates, combined date-time cells,
//! AM/PM and 24-hour times, and start/end duration reconciliation.

use chrono::{Datelike, NaiveDate, NaiveTime};

/// Applied when a resolved year lands past `today + 3` years. `Lenient`
/// re-derives the date from today's year and the parsed month/day, the
/// defensive treatment for corrupted exports; `Strict` keeps the parsed date
/// untouched for callers that take far-future bookings at face value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSchedule {
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
}

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
static TIME_FORMATS: &[&str] = &["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

const SUSPECT_YEAR_HORIZON: i32 = 3;
const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn default_scheduled_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("literal time is valid")
}

/// Resolves a date/time pair from a raw date cell (which may carry a trailing
/// time) and an optional separate time cell. An unresolvable date yields
/// `date = None`; an unresolved time falls back to 09:00:00.
pub fn resolve_schedule(
    raw_date: &str,
    raw_time: Option<&str>,
    today: NaiveDate,
    policy: DatePolicy,
) -> ResolvedSchedule {
    let (head, tail) = split_date_token(raw_date.trim());
    let mut date = parse_date(head);

    let time = tail
        .and_then(parse_time)
        .or_else(|| raw_time.and_then(parse_time))
        .unwrap_or_else(default_scheduled_time);

    if policy == DatePolicy::Lenient {
        date = date.map(|d| correct_suspect_year(d, today));
    }

    ResolvedSchedule { date, time }
}

/// Parses a bare time cell, tolerating a combined date-time value by falling
/// back to whatever follows the date token.
pub fn parse_time_loose(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    parse_time(trimmed).or_else(|| {
        let (_, tail) = split_date_token(trimmed);
        tail.and_then(parse_time)
    })
}

/// Minutes between a start and end time, wrapping over midnight. When an
/// explicit duration disagrees with the elapsed time by more than 5 minutes
/// the computed value wins; within the tolerance the explicit value is kept.
pub fn reconcile_duration(start: NaiveTime, end: NaiveTime, explicit: Option<i64>) -> i64 {
    let mut computed = (end - start).num_minutes();
    if computed < 0 {
        computed += MINUTES_PER_DAY;
    }
    match explicit {
        Some(given) if (given - computed).abs() <= 5 => given,
        _ => computed,
    }
}

fn split_date_token(value: &str) -> (&str, Option<&str>) {
    match value.find([',', ' ']) {
        Some(idx) => {
            let (head, tail) = value.split_at(idx);
            let tail = tail.trim_start_matches([',', ' ']);
            (head, (!tail.is_empty()).then_some(tail))
        }
        None => (value, None),
    }
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim().trim_end_matches(',');
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let upper = value.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
}

fn correct_suspect_year(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if date.year() > today.year() + SUSPECT_YEAR_HORIZON {
        NaiveDate::from_ymd_opt(today.year(), date.month(), date.day()).unwrap_or(date)
    } else {
        date
    }
}
