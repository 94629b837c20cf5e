//! Static table of raw column-name spellings recognized for each canonical
//! field, across every supported source vocabulary.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    ExternalId,
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    Unit,
    ScheduledDate,
    ScheduledTime,
    EndTime,
    DurationMinutes,
    Status,
    CancellationFlag,
    ServiceName,
    Price,
    Total,
    Subtotal,
    Tax,
    Notes,
    Priority,
    WorkersNeeded,
    PaymentStatus,
    InvoiceStatus,
    CrewId,
    TerritoryId,
}

impl CanonicalField {
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::ExternalId => "external_id",
            CanonicalField::FirstName => "first_name",
            CanonicalField::LastName => "last_name",
            CanonicalField::FullName => "full_name",
            CanonicalField::Email => "email",
            CanonicalField::Phone => "phone",
            CanonicalField::Address => "address",
            CanonicalField::Unit => "unit",
            CanonicalField::ScheduledDate => "scheduled_date",
            CanonicalField::ScheduledTime => "scheduled_time",
            CanonicalField::EndTime => "end_time",
            CanonicalField::DurationMinutes => "duration_minutes",
            CanonicalField::Status => "status",
            CanonicalField::CancellationFlag => "cancellation_flag",
            CanonicalField::ServiceName => "service_name",
            CanonicalField::Price => "price",
            CanonicalField::Total => "total",
            CanonicalField::Subtotal => "subtotal",
            CanonicalField::Tax => "tax",
            CanonicalField::Notes => "notes",
            CanonicalField::Priority => "priority",
            CanonicalField::WorkersNeeded => "workers_needed",
            CanonicalField::PaymentStatus => "payment_status",
            CanonicalField::InvoiceStatus => "invoice_status",
            CanonicalField::CrewId => "crew_id",
            CanonicalField::TerritoryId => "territory_id",
        }
    }
}

/// Source platforms whose export headers the table knows about. Spellings
/// shared by several platforms are left untagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVocabulary {
    BookingKoala,
    ZenMaid,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    pub field: CanonicalField,
    pub column: &'static str,
    pub vocabulary: Option<SourceVocabulary>,
}

const fn alias(
    field: CanonicalField,
    column: &'static str,
    vocabulary: Option<SourceVocabulary>,
) -> FieldAlias {
    FieldAlias {
        field,
        column,
        vocabulary,
    }
}

use CanonicalField as F;
use SourceVocabulary::{BookingKoala, ZenMaid};

/// Priority order within a field is the order entries appear here: the first
/// alias present (and non-empty, for value resolution) in a row wins.
static ALIAS_TABLE: &[FieldAlias] = &[
    alias(F::ExternalId, "booking id", Some(BookingKoala)),
    alias(F::ExternalId, "appointment id", Some(ZenMaid)),
    alias(F::ExternalId, "job id", None),
    alias(F::ExternalId, "id", None),
    alias(F::FirstName, "first name", None),
    alias(F::FirstName, "customer first name", Some(BookingKoala)),
    alias(F::FirstName, "client first name", Some(ZenMaid)),
    alias(F::LastName, "last name", None),
    alias(F::LastName, "customer last name", Some(BookingKoala)),
    alias(F::LastName, "client last name", Some(ZenMaid)),
    alias(F::FullName, "customer name", Some(BookingKoala)),
    alias(F::FullName, "client name", Some(ZenMaid)),
    alias(F::FullName, "name", None),
    alias(F::Email, "email", None),
    alias(F::Email, "customer email", Some(BookingKoala)),
    alias(F::Email, "client email", Some(ZenMaid)),
    alias(F::Email, "email address", None),
    alias(F::Phone, "phone", None),
    alias(F::Phone, "phone number", None),
    alias(F::Phone, "customer phone", Some(BookingKoala)),
    alias(F::Phone, "client phone", Some(ZenMaid)),
    alias(F::Phone, "mobile", None),
    alias(F::Address, "address", None),
    alias(F::Address, "service address", Some(BookingKoala)),
    alias(F::Address, "full address", None),
    alias(F::Address, "location", None),
    alias(F::Unit, "apt", None),
    alias(F::Unit, "unit", None),
    alias(F::Unit, "apartment", None),
    alias(F::Unit, "suite", None),
    alias(F::ScheduledDate, "service date", Some(BookingKoala)),
    alias(F::ScheduledDate, "appointment date", Some(ZenMaid)),
    alias(F::ScheduledDate, "scheduled date", None),
    alias(F::ScheduledDate, "date", None),
    alias(F::ScheduledDate, "appointment start", Some(ZenMaid)),
    alias(F::ScheduledTime, "service time", Some(BookingKoala)),
    alias(F::ScheduledTime, "appointment time", Some(ZenMaid)),
    alias(F::ScheduledTime, "scheduled time", None),
    alias(F::ScheduledTime, "start time", None),
    alias(F::ScheduledTime, "arrival time", None),
    alias(F::ScheduledTime, "time", None),
    alias(F::EndTime, "end time", None),
    alias(F::EndTime, "appointment end", Some(ZenMaid)),
    alias(F::EndTime, "finish time", None),
    alias(F::DurationMinutes, "duration", None),
    alias(F::DurationMinutes, "duration (minutes)", None),
    alias(F::DurationMinutes, "length", Some(BookingKoala)),
    alias(F::Status, "status", None),
    alias(F::Status, "job status", None),
    alias(F::Status, "appointment status", Some(ZenMaid)),
    alias(F::Status, "booking status", Some(BookingKoala)),
    alias(F::CancellationFlag, "cancelled", None),
    alias(F::CancellationFlag, "canceled", None),
    alias(F::CancellationFlag, "is cancelled", None),
    alias(F::ServiceName, "service", None),
    alias(F::ServiceName, "service name", None),
    alias(F::ServiceName, "services", Some(BookingKoala)),
    alias(F::ServiceName, "service type", Some(ZenMaid)),
    alias(F::ServiceName, "job type", None),
    alias(F::Price, "price", None),
    alias(F::Price, "service price", Some(BookingKoala)),
    alias(F::Price, "rate", None),
    alias(F::Total, "total", None),
    alias(F::Total, "total amount", None),
    alias(F::Total, "grand total", Some(BookingKoala)),
    alias(F::Subtotal, "subtotal", None),
    alias(F::Subtotal, "sub total", None),
    alias(F::Tax, "tax", None),
    alias(F::Tax, "tax amount", None),
    alias(F::Tax, "sales tax", None),
    alias(F::Notes, "notes", None),
    alias(F::Notes, "job notes", None),
    alias(F::Notes, "comments", None),
    alias(F::Notes, "special instructions", Some(BookingKoala)),
    alias(F::Notes, "description", None),
    alias(F::Priority, "priority", None),
    alias(F::Priority, "job priority", None),
    alias(F::WorkersNeeded, "workers", None),
    alias(F::WorkersNeeded, "workers needed", None),
    alias(F::WorkersNeeded, "team size", None),
    alias(F::WorkersNeeded, "number of cleaners", Some(ZenMaid)),
    alias(F::PaymentStatus, "payment status", None),
    alias(F::PaymentStatus, "payment", None),
    alias(F::PaymentStatus, "paid", None),
    alias(F::InvoiceStatus, "invoice status", None),
    alias(F::InvoiceStatus, "invoice", None),
    alias(F::CrewId, "crew", None),
    alias(F::CrewId, "crew id", None),
    alias(F::CrewId, "team", None),
    alias(F::CrewId, "assigned to", Some(ZenMaid)),
    alias(F::TerritoryId, "territory", None),
    alias(F::TerritoryId, "territory id", None),
    alias(F::TerritoryId, "zone", None),
    alias(F::TerritoryId, "region", None),
];

static ALIAS_INDEX: Lazy<HashMap<CanonicalField, Vec<&'static FieldAlias>>> = Lazy::new(|| {
    let mut index: HashMap<CanonicalField, Vec<&'static FieldAlias>> = HashMap::new();
    for entry in ALIAS_TABLE {
        index.entry(entry.field).or_default().push(entry);
    }
    index
});

/// The configured raw column spellings for a canonical field, in priority
/// order.
pub fn aliases_for(field: CanonicalField) -> Vec<&'static str> {
    ALIAS_INDEX
        .get(&field)
        .map(|entries| entries.iter().map(|entry| entry.column).collect())
        .unwrap_or_default()
}

/// First non-empty raw value among the field's aliases.
pub fn resolve<'a>(row: &'a RawRow, field: CanonicalField) -> Option<&'a str> {
    let entries = ALIAS_INDEX.get(&field)?;
    entries
        .iter()
        .filter_map(|entry| row.get(entry.column))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// First raw value among the field's aliases whose column exists in the row
/// at all, even when empty. Used for pass-through fields, where "present but
/// empty" and "never supplied" must stay distinguishable.
pub fn resolve_present<'a>(row: &'a RawRow, field: CanonicalField) -> Option<&'a str> {
    let entries = ALIAS_INDEX.get(&field)?;
    entries
        .iter()
        .find_map(|entry| row.get(entry.column))
        .map(str::trim)
}
