use crate::model::Address;

const DEFAULT_COUNTRY: &str = "USA";

/// Best-effort split of a `street, city, state-and-zip, country` string.
/// Fewer than three comma segments puts the whole string in `street`. This is
/// a heuristic decomposer, not a validated postal parser; the unit field is
/// filled from its own column by the mapper, never from this string.
pub fn decompose_address(raw: &str) -> Address {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Address::default();
    }

    let segments: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if segments.len() < 3 {
        return Address {
            street: trimmed.to_string(),
            ..Address::default()
        };
    }

    let mut state_zip = segments[2].split_whitespace();
    let state = state_zip.next().unwrap_or_default().to_string();
    let mut zip = state_zip.collect::<Vec<_>>().join(" ");
    if zip.is_empty() && segments.len() >= 4 {
        zip = segments[3]
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
    }

    let country = if segments.len() >= 4 {
        segments.last().copied().unwrap_or_default().to_string()
    } else {
        DEFAULT_COUNTRY.to_string()
    };

    Address {
        street: segments[0].to_string(),
        unit: String::new(),
        city: segments[1].to_string(),
        state,
        zip,
        country,
    }
}
