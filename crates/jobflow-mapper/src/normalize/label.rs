/// Strips the `, + <N> more|other` suffix noise some platforms append to
/// multi-value service cells. Returns `None` when nothing usable remains;
/// callers must treat that as "no label", never as an empty label.
pub fn sanitize_label(raw: &str) -> Option<String> {
    let mut remainder = raw.trim();

    loop {
        match remainder.rfind(',') {
            Some(pos) if is_noise_suffix(&remainder[pos + 1..]) => {
                remainder = remainder[..pos].trim_end();
            }
            _ => break,
        }
    }

    // The whole cell can be noise with no leading segment, e.g. "+ 2 more".
    if is_noise_suffix(remainder) {
        return None;
    }

    let cleaned =
        remainder.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '+' | '*'));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Matches `[*,+ ]* [+-]? digits (more|other|others)`.
fn is_noise_suffix(segment: &str) -> bool {
    let stripped =
        segment.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '+' | ','));

    let mut chars = stripped.chars().peekable();
    if matches!(chars.peek(), Some('+') | Some('-')) {
        chars.next();
    }

    let mut saw_digit = false;
    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
        saw_digit = true;
        chars.next();
    }
    if !saw_digit {
        return false;
    }

    let word: String = chars.collect::<String>().trim().to_ascii_lowercase();
    matches!(word.as_str(), "more" | "other" | "others")
}
