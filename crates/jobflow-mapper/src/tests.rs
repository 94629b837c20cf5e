use chrono::NaiveDate;

use crate::aliases::{self, CanonicalField};
use crate::errors::SkipReason;
use crate::mapper::{map_document, MapperOptions};
use crate::model::{JobPriority, JobStatus, RawRow};
use crate::normalize::address::decompose_address;
use crate::normalize::label::sanitize_label;
use crate::normalize::status::{is_truthy_flag, normalize_status};
use crate::normalize::temporal::{
    parse_time, reconcile_duration, resolve_schedule, DatePolicy,
};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn time(h: u32, m: u32, s: u32) -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(h, m, s).expect("valid test time")
}

fn options() -> MapperOptions {
    MapperOptions::new(date(2025, 8, 6))
}

#[test]
fn resolves_iso_datetime_with_comma_delimited_time() {
    let schedule = resolve_schedule("2024-11-23, 9:00 AM", None, date(2025, 8, 6), DatePolicy::Lenient);
    assert_eq!(schedule.date, Some(date(2024, 11, 23)));
    assert_eq!(schedule.time, time(9, 0, 0));
}

#[test]
fn resolves_us_slash_date_with_24_hour_time() {
    let schedule = resolve_schedule("1/14/2026 9:59", None, date(2025, 8, 6), DatePolicy::Lenient);
    assert_eq!(schedule.date, Some(date(2026, 1, 14)));
    assert_eq!(schedule.time, time(9, 59, 0));
}

#[test]
fn iso_and_us_representations_resolve_to_the_same_date() {
    let today = date(2025, 8, 6);
    let iso = resolve_schedule("2024-11-23", None, today, DatePolicy::Lenient);
    let us = resolve_schedule("11/23/2024", None, today, DatePolicy::Lenient);
    assert_eq!(iso.date, us.date);
    assert_eq!(iso.time, us.time);
}

#[test]
fn falls_back_to_separate_time_field() {
    let schedule = resolve_schedule(
        "2024-11-23",
        Some("4:30:15 PM"),
        date(2025, 8, 6),
        DatePolicy::Lenient,
    );
    assert_eq!(schedule.date, Some(date(2024, 11, 23)));
    assert_eq!(schedule.time, time(16, 30, 15));
}

#[test]
fn unresolved_time_defaults_to_nine_am() {
    let schedule = resolve_schedule("2024-11-23", None, date(2025, 8, 6), DatePolicy::Lenient);
    assert_eq!(schedule.time, time(9, 0, 0));
}

#[test]
fn unparseable_date_yields_none() {
    let schedule = resolve_schedule("next Tuesday", None, date(2025, 8, 6), DatePolicy::Lenient);
    assert_eq!(schedule.date, None);
    assert_eq!(schedule.time, time(9, 0, 0));
}

#[test]
fn lenient_policy_corrects_suspect_far_future_year() {
    let today = date(2025, 8, 6);
    let lenient = resolve_schedule("5/1/2031", None, today, DatePolicy::Lenient);
    assert_eq!(lenient.date, Some(date(2025, 5, 1)));

    let strict = resolve_schedule("5/1/2031", None, today, DatePolicy::Strict);
    assert_eq!(strict.date, Some(date(2031, 5, 1)));
}

#[test]
fn years_within_the_horizon_are_left_alone() {
    let schedule = resolve_schedule("5/1/2027", None, date(2025, 8, 6), DatePolicy::Lenient);
    assert_eq!(schedule.date, Some(date(2027, 5, 1)));
}

#[test]
fn parses_times_case_insensitively() {
    assert_eq!(parse_time("9:00 am"), Some(time(9, 0, 0)));
    assert_eq!(parse_time("12:15 PM"), Some(time(12, 15, 0)));
    assert_eq!(parse_time("23:05"), Some(time(23, 5, 0)));
    assert_eq!(parse_time("not a time"), None);
}

#[test]
fn computed_duration_wins_over_stale_explicit_value() {
    let start = time(9, 0, 0);
    let end = time(11, 30, 0);
    assert_eq!(reconcile_duration(start, end, None), 150);
    assert_eq!(reconcile_duration(start, end, Some(60)), 150);
}

#[test]
fn explicit_duration_within_tolerance_is_kept() {
    assert_eq!(reconcile_duration(time(9, 0, 0), time(11, 30, 0), Some(148)), 148);
}

#[test]
fn duration_wraps_over_midnight() {
    assert_eq!(reconcile_duration(time(23, 0, 0), time(1, 0, 0), None), 120);
}

#[test]
fn status_families_map_to_canonical_values() {
    assert_eq!(normalize_status("Complete"), Some(JobStatus::Completed));
    assert_eq!(normalize_status("  finished  "), Some(JobStatus::Completed));
    assert_eq!(normalize_status("IN PROGRESS"), Some(JobStatus::InProgress));
    assert_eq!(normalize_status("started"), Some(JobStatus::InProgress));
    assert_eq!(
        normalize_status("Cancelled by customer"),
        Some(JobStatus::Cancelled)
    );
    assert_eq!(normalize_status("Upcoming"), Some(JobStatus::Pending));
    assert_eq!(normalize_status("gibberish"), None);
    assert_eq!(normalize_status(""), None);
}

#[test]
fn truthy_cancellation_flags_are_recognized() {
    for flag in ["true", "YES", "1", "x", "Cancelled"] {
        assert!(is_truthy_flag(flag), "expected '{flag}' to be truthy");
    }
    for flag in ["false", "no", "0", ""] {
        assert!(!is_truthy_flag(flag), "expected '{flag}' to be falsy");
    }
}

#[test]
fn decomposes_four_segment_address() {
    let address = decompose_address("4710 Parkdale Ln, New Port Richey, FL 34655, USA");
    assert_eq!(address.street, "4710 Parkdale Ln");
    assert_eq!(address.city, "New Port Richey");
    assert_eq!(address.state, "FL");
    assert_eq!(address.zip, "34655");
    assert_eq!(address.country, "USA");
}

#[test]
fn three_segment_address_defaults_country() {
    let address = decompose_address("12 Oak Ave, Tampa, FL 33601");
    assert_eq!(address.state, "FL");
    assert_eq!(address.zip, "33601");
    assert_eq!(address.country, "USA");
}

#[test]
fn short_address_becomes_street_only() {
    let address = decompose_address("123 Main St");
    assert_eq!(address.street, "123 Main St");
    assert!(address.city.is_empty());
    assert!(address.state.is_empty());
    assert!(address.country.is_empty());
}

#[test]
fn zip_falls_back_to_fourth_segment_first_token() {
    let address = decompose_address("1 Elm St, Springfield, IL, 62704");
    assert_eq!(address.state, "IL");
    assert_eq!(address.zip, "62704");
}

#[test]
fn strips_label_noise_suffix() {
    assert_eq!(
        sanitize_label("Deep Clean, + 1 more"),
        Some("Deep Clean".to_string())
    );
    assert_eq!(
        sanitize_label("Move Out Clean, + 2 others"),
        Some("Move Out Clean".to_string())
    );
    assert_eq!(sanitize_label("Standard Clean"), Some("Standard Clean".to_string()));
}

#[test]
fn noise_only_label_yields_no_label_not_empty_string() {
    assert_eq!(sanitize_label(", + -1 more"), None);
    assert_eq!(sanitize_label("+ 2 more"), None);
    assert_eq!(sanitize_label("  "), None);
    assert_eq!(sanitize_label("*, + 3 more"), None);
}

#[test]
fn alias_resolution_prefers_earlier_spellings_and_skips_empties() {
    let r = row(&[("booking id", ""), ("job id", "J-42")]);
    assert_eq!(aliases::resolve(&r, CanonicalField::ExternalId), Some("J-42"));

    let aliases_for = aliases::aliases_for(CanonicalField::ExternalId);
    assert_eq!(aliases_for.first(), Some(&"booking id"));
}

#[test]
fn presence_preserving_resolution_returns_empty_values() {
    let r = row(&[("payment status", "")]);
    assert_eq!(
        aliases::resolve_present(&r, CanonicalField::PaymentStatus),
        Some("")
    );
    assert_eq!(aliases::resolve(&r, CanonicalField::PaymentStatus), None);
    assert_eq!(
        aliases::resolve_present(&r, CanonicalField::InvoiceStatus),
        None
    );
}

#[test]
fn raw_row_lookup_is_case_insensitive() {
    let r = row(&[("Service Date", "2024-11-23")]);
    assert_eq!(r.get("service date"), Some("2024-11-23"));
    assert_eq!(r.get("SERVICE DATE"), Some("2024-11-23"));
    assert_eq!(r.get("missing"), None);
}

#[test]
fn maps_a_complete_booking_row() {
    let rows = vec![row(&[
        ("Booking ID", "BK-1001"),
        ("Customer First Name", "Ada"),
        ("Customer Last Name", "Lovelace"),
        ("Customer Email", "ada@example.com"),
        ("Customer Phone", "555-0100"),
        ("Service Address", "4710 Parkdale Ln, New Port Richey, FL 34655, USA"),
        ("Apt", "2B"),
        ("Service Date", "2024-11-23, 9:00 AM"),
        ("End Time", "11:30 AM"),
        ("Duration", "60"),
        ("Booking Status", "Confirmed"),
        ("Services", "Deep Clean, + 1 more"),
        ("Service Price", "$120.00"),
        ("Grand Total", "$1,234.50"),
        ("Subtotal", "110"),
        ("Tax", "not-a-number"),
        ("Special Instructions", "gate code 4455"),
        ("Priority", "High"),
        ("Team Size", "2"),
        ("Payment Status", ""),
        ("Crew", "crew-7"),
    ])];

    let mapped = map_document(&rows, &options());
    assert!(mapped.skipped.is_empty());
    assert_eq!(mapped.records.len(), 1);

    let record = &mapped.records[0];
    assert_eq!(record.import_key, "BK-1001");
    assert_eq!(record.source_row, 1);
    assert_eq!(record.first_name.as_deref(), Some("Ada"));
    assert_eq!(record.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(record.address.street, "4710 Parkdale Ln");
    assert_eq!(record.address.unit, "2B");
    assert_eq!(record.scheduled_date, date(2024, 11, 23));
    assert_eq!(record.scheduled_time, time(9, 0, 0));
    // end - start = 150 minutes, explicit 60 is stale, computed wins
    assert_eq!(record.duration_minutes, Some(150));
    assert_eq!(record.status, JobStatus::Pending);
    assert_eq!(record.priority, JobPriority::High);
    assert_eq!(record.workers_needed, 2);
    assert_eq!(record.service_name.as_deref(), Some("Deep Clean"));
    assert!((record.price - 120.0).abs() < f64::EPSILON);
    assert!((record.total - 1234.5).abs() < f64::EPSILON);
    assert!((record.tax - 0.0).abs() < f64::EPSILON);
    assert_eq!(record.notes.as_deref(), Some("gate code 4455"));
    assert_eq!(record.pass_through.payment_status.as_deref(), Some(""));
    assert_eq!(record.pass_through.crew_id.as_deref(), Some("crew-7"));
    assert_eq!(record.pass_through.invoice_status, None);
}

#[test]
fn rows_without_a_resolvable_date_are_skipped_one_for_one() {
    let rows = vec![
        row(&[("Name", "Ada Lovelace"), ("Date", "garbage")]),
        row(&[("Name", "Grace Hopper")]),
        row(&[("Name", "Mary Shelley"), ("Date", "2024-11-23")]),
    ];

    let mapped = map_document(&rows, &options());
    assert_eq!(mapped.records.len(), 1);
    assert_eq!(mapped.skipped.len(), 2);
    assert_eq!(mapped.skipped[0].row, 1);
    assert_eq!(mapped.skipped[0].reason, SkipReason::MissingDate);
    assert_eq!(mapped.skipped[1].row, 2);
    assert_eq!(mapped.records[0].source_row, 3);
}

#[test]
fn rows_without_customer_identity_are_skipped() {
    let rows = vec![row(&[("Date", "2024-11-23"), ("Service", "Deep Clean")])];
    let mapped = map_document(&rows, &options());
    assert!(mapped.records.is_empty());
    assert_eq!(mapped.skipped[0].reason, SkipReason::MissingCustomerIdentity);
}

#[test]
fn unrecognized_status_defaults_to_pending_with_a_warning() {
    let rows = vec![row(&[
        ("Name", "Ada Lovelace"),
        ("Date", "2024-11-23"),
        ("Status", "flarbled"),
    ])];

    let mapped = map_document(&rows, &options());
    assert_eq!(mapped.records[0].status, JobStatus::Pending);
    assert_eq!(mapped.warnings.len(), 1);
    assert_eq!(mapped.warnings[0].row, 1);
    assert!(mapped.warnings[0].message.contains("flarbled"));
}

#[test]
fn cancellation_flag_overrides_any_status() {
    let rows = vec![row(&[
        ("Name", "Ada Lovelace"),
        ("Date", "2024-11-23"),
        ("Status", "Complete"),
        ("Cancelled", "yes"),
    ])];

    let mapped = map_document(&rows, &options());
    assert_eq!(mapped.records[0].status, JobStatus::Cancelled);
}

#[test]
fn defaults_apply_when_columns_are_absent() {
    let rows = vec![row(&[("Name", "Ada Lovelace"), ("Date", "2024-11-23")])];
    let mapped = map_document(&rows, &options());

    let record = &mapped.records[0];
    assert_eq!(record.status, JobStatus::Pending);
    assert_eq!(record.priority, JobPriority::Normal);
    assert_eq!(record.workers_needed, 1);
    assert_eq!(record.scheduled_time, time(9, 0, 0));
    assert_eq!(record.duration_minutes, None);
    assert!(uuid::Uuid::parse_str(&record.import_key).is_ok());
}

#[test]
fn explicit_duration_tolerates_a_trailing_unit() {
    let rows = vec![row(&[
        ("Name", "Ada Lovelace"),
        ("Date", "2024-11-23"),
        ("Duration", "90 min"),
    ])];
    let mapped = map_document(&rows, &options());
    assert_eq!(mapped.records[0].duration_minutes, Some(90));
}

#[test]
fn full_name_splits_on_first_whitespace_gap() {
    let rows = vec![row(&[("Client Name", "Jane van Dyke"), ("Date", "2024-11-23")])];
    let mapped = map_document(&rows, &options());

    let record = &mapped.records[0];
    assert_eq!(record.first_name.as_deref(), Some("Jane"));
    assert_eq!(record.last_name.as_deref(), Some("van Dyke"));
}

#[test]
fn pass_through_serialization_distinguishes_empty_from_absent() {
    let rows = vec![row(&[
        ("Name", "Ada Lovelace"),
        ("Date", "2024-11-23"),
        ("Payment Status", ""),
    ])];
    let mapped = map_document(&rows, &options());

    let json = serde_json::to_value(&mapped.records[0]).expect("record serializes");
    let pass_through = &json["pass_through"];
    assert_eq!(pass_through["payment_status"], "");
    assert!(pass_through.get("invoice_status").is_none());
}
