//! Per-row orchestration: alias resolution, the four normalizers, defaults,
//! and validation. One raw row in, one canonical record (or a recorded skip)
//! out.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::aliases::{self, CanonicalField as F};
use crate::errors::SkipReason;
use crate::model::{CanonicalJobRecord, JobPriority, JobStatus, PassThroughFields, RawRow};
use crate::normalize::address::decompose_address;
use crate::normalize::label::sanitize_label;
use crate::normalize::status::{is_truthy_flag, normalize_status};
use crate::normalize::temporal::{
    parse_time_loose, reconcile_duration, resolve_schedule, DatePolicy,
};

pub const DEFAULT_WORKERS_NEEDED: u32 = 1;

#[derive(Debug, Clone, Copy)]
pub struct MapperOptions {
    pub date_policy: DatePolicy,
    /// Reference date for the suspect-year correction; injected so mapping
    /// stays a pure function of its inputs.
    pub today: NaiveDate,
}

impl MapperOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date_policy: DatePolicy::default(),
            today,
        }
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.date_policy = policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
    /// 1-based row number in the original document.
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct MappedDocument {
    pub records: Vec<CanonicalJobRecord>,
    pub skipped: Vec<RowSkip>,
    pub warnings: Vec<RowWarning>,
}

/// Maps every row of the document. Rows failing validation are dropped into
/// `skipped` with their reason; the rest become canonical records in input
/// order, each tagged with its original row number.
pub fn map_document(rows: &[RawRow], options: &MapperOptions) -> MappedDocument {
    let mut mapped = MappedDocument::default();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        match map_row(row, row_number, options, &mut mapped.warnings) {
            Ok(record) => mapped.records.push(record),
            Err(reason) => mapped.skipped.push(RowSkip {
                row: row_number,
                reason,
            }),
        }
    }

    mapped
}

fn map_row(
    row: &RawRow,
    row_number: usize,
    options: &MapperOptions,
    warnings: &mut Vec<RowWarning>,
) -> Result<CanonicalJobRecord, SkipReason> {
    if row.is_empty() {
        return Err(SkipReason::EmptyRow);
    }

    let (first_name, last_name) = resolve_customer_name(row);
    let email = resolve_owned(row, F::Email);
    let phone = resolve_owned(row, F::Phone);

    let raw_date = aliases::resolve(row, F::ScheduledDate).ok_or(SkipReason::MissingDate)?;
    let schedule = resolve_schedule(
        raw_date,
        aliases::resolve(row, F::ScheduledTime),
        options.today,
        options.date_policy,
    );
    let scheduled_date = schedule.date.ok_or(SkipReason::MissingDate)?;

    if first_name.is_none() && last_name.is_none() && email.is_none() && phone.is_none() {
        return Err(SkipReason::MissingCustomerIdentity);
    }

    let explicit_duration = aliases::resolve(row, F::DurationMinutes).and_then(parse_duration);
    let duration_minutes = match aliases::resolve(row, F::EndTime).and_then(parse_time_loose) {
        Some(end) => Some(reconcile_duration(schedule.time, end, explicit_duration)),
        None => explicit_duration,
    };

    let mut status = match aliases::resolve(row, F::Status) {
        Some(raw) => normalize_status(raw).unwrap_or_else(|| {
            warnings.push(RowWarning {
                row: row_number,
                message: format!("unrecognized status '{}', defaulting to pending", raw.trim()),
            });
            JobStatus::Pending
        }),
        None => JobStatus::Pending,
    };
    if aliases::resolve(row, F::CancellationFlag).is_some_and(is_truthy_flag) {
        status = JobStatus::Cancelled;
    }

    let mut address = aliases::resolve(row, F::Address)
        .map(decompose_address)
        .unwrap_or_default();
    if let Some(unit) = aliases::resolve(row, F::Unit) {
        address.unit = unit.to_string();
    }

    let service_name = aliases::resolve(row, F::ServiceName).and_then(sanitize_label);

    let priority = aliases::resolve(row, F::Priority)
        .and_then(|value| JobPriority::try_from(value).ok())
        .unwrap_or_default();

    let workers_needed = aliases::resolve(row, F::WorkersNeeded)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_WORKERS_NEEDED);

    let import_key = aliases::resolve(row, F::ExternalId)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(CanonicalJobRecord {
        import_key,
        source_row: row_number,
        first_name,
        last_name,
        email,
        phone,
        address,
        service_name,
        price: parse_money(aliases::resolve(row, F::Price)),
        total: parse_money(aliases::resolve(row, F::Total)),
        subtotal: parse_money(aliases::resolve(row, F::Subtotal)),
        tax: parse_money(aliases::resolve(row, F::Tax)),
        duration_minutes,
        scheduled_date,
        scheduled_time: schedule.time,
        status,
        priority,
        workers_needed,
        notes: resolve_owned(row, F::Notes),
        pass_through: PassThroughFields {
            payment_status: resolve_present_owned(row, F::PaymentStatus),
            invoice_status: resolve_present_owned(row, F::InvoiceStatus),
            crew_id: resolve_present_owned(row, F::CrewId),
            territory_id: resolve_present_owned(row, F::TerritoryId),
        },
    })
}

/// Dedicated first/last columns win; a combined full-name column is split on
/// the first whitespace gap as a fallback.
fn resolve_customer_name(row: &RawRow) -> (Option<String>, Option<String>) {
    let first = resolve_owned(row, F::FirstName);
    let last = resolve_owned(row, F::LastName);
    if first.is_some() || last.is_some() {
        return (first, last);
    }

    match aliases::resolve(row, F::FullName) {
        Some(full) => match full.split_once(char::is_whitespace) {
            Some((head, tail)) => (Some(head.to_string()), Some(tail.trim().to_string())),
            None => (Some(full.to_string()), None),
        },
        None => (None, None),
    }
}

fn resolve_owned(row: &RawRow, field: F) -> Option<String> {
    aliases::resolve(row, field).map(str::to_string)
}

fn resolve_present_owned(row: &RawRow, field: F) -> Option<String> {
    aliases::resolve_present(row, field).map(str::to_string)
}

/// Duration cells carry a leading minute count, sometimes with a trailing
/// unit ("90", "90 min"). Signed or digit-less values are treated as absent.
fn parse_duration(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse::<i64>().ok()
}

/// Money cells default to 0.0 on parse failure rather than dropping the row.
fn parse_money(raw: Option<&str>) -> f64 {
    raw.map(|value| {
        value
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .unwrap_or(0.0)
    })
    .unwrap_or(0.0)
}
