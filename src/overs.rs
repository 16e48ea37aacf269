//! Overs arithmetic and the small display formats derived from it.

use chrono::{Local, TimeZone};

use crate::text::parse_int_prefix;

/// Normalizes an "overs.balls" value, carrying six balls into an over.
///
/// Values without a dot pass through trimmed; values that do not parse are
/// returned as typed rather than dropped.
pub fn normalize_overs_value(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let Some((over_part, rest)) = text.split_once('.') else {
        return Some(text.to_string());
    };
    let ball_part = rest.split_once('.').map_or(rest, |(first, _)| first);
    let ball_digits_end = ball_part
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(ball_part.len());
    let (Some(overs), Some(balls)) = (
        parse_int_prefix(over_part),
        parse_int_prefix(&ball_part[..ball_digits_end]),
    ) else {
        return Some(text.to_string());
    };
    let adjusted = overs + balls / 6;
    let remainder = balls % 6;
    if remainder == 0 {
        Some(adjusted.to_string())
    } else {
        Some(format!("{adjusted}.{remainder}"))
    }
}

pub fn format_overs_label(raw: Option<&str>) -> String {
    match raw.and_then(normalize_overs_value) {
        Some(normalized) => format!("{normalized} Overs"),
        None => "-".to_string(),
    }
}

/// Overs as a decimal number of overs, e.g. "12.3" -> 12.5.
pub fn overs_to_decimal(raw: &str) -> Option<f64> {
    let normalized = normalize_overs_value(raw)?;
    let (overs_text, balls_text) = match normalized.split_once('.') {
        Some((o, b)) => (o, b),
        None => (normalized.as_str(), ""),
    };
    let overs: f64 = overs_text.parse().ok()?;
    let balls: f64 = if balls_text.is_empty() {
        0.0
    } else {
        balls_text.parse().ok()?
    };
    Some(overs + balls / 6.0)
}

pub fn format_run_rate(runs: Option<&str>, overs: Option<&str>) -> String {
    let runs_value = runs.and_then(|r| r.trim().parse::<f64>().ok());
    let overs_value = overs.and_then(overs_to_decimal);
    match (runs_value, overs_value) {
        (Some(runs), Some(overs)) if overs > 0.0 => format!("{:.2}", runs / overs),
        _ => "-".to_string(),
    }
}

/// Epoch milliseconds rendered in local time, e.g. "Aug 6, 2026, 7:30 PM".
pub fn format_start_date(epoch_ms: Option<i64>) -> String {
    let Some(ms) = epoch_ms.filter(|&ms| ms > 0) else {
        return "-".to_string();
    };
    match Local.timestamp_millis_opt(ms).single() {
        Some(when) => when.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_balls_carry_into_an_over() {
        assert_eq!(normalize_overs_value("19.6").as_deref(), Some("20"));
        assert_eq!(normalize_overs_value("4.8").as_deref(), Some("5.2"));
        assert_eq!(normalize_overs_value("12.3").as_deref(), Some("12.3"));
        assert_eq!(normalize_overs_value("17").as_deref(), Some("17"));
    }

    #[test]
    fn unparseable_overs_pass_through() {
        assert_eq!(normalize_overs_value("").is_none(), true);
        assert_eq!(normalize_overs_value("DLS").as_deref(), Some("DLS"));
        assert_eq!(normalize_overs_value("4.2)").as_deref(), Some("4.2"));
    }

    #[test]
    fn overs_decimal_uses_sixths() {
        assert_eq!(overs_to_decimal("12.3"), Some(12.5));
        assert_eq!(overs_to_decimal("20"), Some(20.0));
        assert_eq!(overs_to_decimal("overs"), None);
    }

    #[test]
    fn run_rate_requires_positive_overs() {
        assert_eq!(format_run_rate(Some("86"), Some("12.3")), "6.88");
        assert_eq!(format_run_rate(Some("86"), Some("0")), "-");
        assert_eq!(format_run_rate(None, Some("12.3")), "-");
    }

    #[test]
    fn overs_label_and_missing_values() {
        assert_eq!(format_overs_label(Some("19.6")), "20 Overs");
        assert_eq!(format_overs_label(None), "-");
        assert_eq!(format_start_date(None), "-");
        assert_eq!(format_start_date(Some(0)), "-");
    }

    #[test]
    fn start_date_renders_local_time() {
        let label = format_start_date(Some(1_754_500_000_000));
        assert!(label.contains(", 20"));
        assert!(label.ends_with("AM") || label.ends_with("PM"));
    }
}
