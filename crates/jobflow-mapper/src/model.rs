use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl JobPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPriority::Low => "low",
            JobPriority::Normal => "normal",
            JobPriority::High => "high",
            JobPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for JobPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobPriority {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(JobPriority::Low),
            "normal" | "standard" | "medium" => Ok(JobPriority::Normal),
            "high" => Ok(JobPriority::High),
            "urgent" | "rush" => Ok(JobPriority::Urgent),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// One row of the decoded source document, exactly as the collaborator
/// produced it. Column order is preserved; lookup is case-insensitive on the
/// trimmed column name. `get` returns `Some("")` for a column that is present
/// but empty, and `None` only when the column never appeared in the row.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        let wanted = column.trim();
        self.columns
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub unit: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Optional fields forwarded to the backing store verbatim. `Some("")` means
/// the source document carried the column with an empty value; `None` means
/// the column was never supplied. Downstream consumers act differently on the
/// two, so serialization drops only `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassThroughFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<String>,
}

/// The normalized output unit of the mapper. Never constructed without a
/// scheduled date and at least one customer-identifying field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalJobRecord {
    pub import_key: String,
    /// 1-based position of the source row in the original document.
    pub source_row: usize,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
    pub service_name: Option<String>,
    pub price: f64,
    pub total: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub duration_minutes: Option<i64>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: JobStatus,
    pub priority: JobPriority,
    pub workers_needed: u32,
    pub notes: Option<String>,
    #[serde(default)]
    pub pass_through: PassThroughFields,
}

impl CanonicalJobRecord {
    pub fn has_customer_identity(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
    }
}
