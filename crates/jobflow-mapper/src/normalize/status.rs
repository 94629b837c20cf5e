use crate::model::JobStatus;

/// Ordered substring families; the first pattern contained in the trimmed,
/// lowercased input decides the status. Order matters: "in progress" and the
/// completion words must be probed before the catch-all pending family.
static STATUS_RULES: &[(&str, JobStatus)] = &[
    ("in progress", JobStatus::InProgress),
    ("in-progress", JobStatus::InProgress),
    ("cancel", JobStatus::Cancelled),
    ("complete", JobStatus::Completed),
    ("done", JobStatus::Completed),
    ("finished", JobStatus::Completed),
    ("closed", JobStatus::Completed),
    ("active", JobStatus::InProgress),
    ("working", JobStatus::InProgress),
    ("started", JobStatus::InProgress),
    ("pending", JobStatus::Pending),
    ("scheduled", JobStatus::Pending),
    ("upcoming", JobStatus::Pending),
    ("confirmed", JobStatus::Pending),
];

/// Maps an arbitrary status string to the canonical enum. `None` means the
/// vocabulary is unrecognized; the caller defaults to `Pending` and records a
/// warning rather than failing.
pub fn normalize_status(raw: &str) -> Option<JobStatus> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    STATUS_RULES
        .iter()
        .find(|(pattern, _)| needle.contains(pattern))
        .map(|(_, status)| *status)
}

/// Truthiness of a cancellation-flag cell. A truthy flag overrides any other
/// status determination.
pub fn is_truthy_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x" | "cancelled" | "canceled"
    )
}
