//! Display-label formatting for upstream values.
//!
//! Upstream durations arrive as ISO-8601-style tokens of the form
//! `PT[nH][nM][nS]` (any subset of the three may be absent). The
//! presentation layer receives pre-formatted labels, never raw values.

/// Parses a `PT[nH][nM][nS]` token into total seconds.
///
/// Returns `None` when the token does not start with `PT` or contains
/// anything other than digit runs followed by `H`, `M` or `S`.
pub fn parse_iso8601_duration(token: &str) -> Option<u64> {
    let rest = token.strip_prefix("PT")?;

    let mut total: u64 = 0;
    let mut digits = String::new();

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let value: u64 = digits.parse().ok()?;
        digits.clear();

        match ch {
            'H' => total += value * 3600,
            'M' => total += value * 60,
            'S' => total += value,
            _ => return None,
        }
    }

    // Trailing digits without a unit make the token malformed.
    if !digits.is_empty() {
        return None;
    }

    Some(total)
}

/// Renders an upstream duration token as `H:MM:SS` when hours > 0, else
/// `M:SS`, with minutes and seconds zero-padded to two digits.
///
/// Unparseable input renders as `0:00`.
pub fn format_duration(token: &str) -> String {
    let total = parse_iso8601_duration(token).unwrap_or(0);

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Renders a view count as a grouped label, e.g. `"1,234,567 views"`.
pub fn format_views(count: u64) -> String {
    format!("{} views", group_thousands(count))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
