//! Win probability recovery from page text.
//!
//! The widget markup changes often, so this works on tag-stripped text: find
//! a percentage near each team label, or failing that, a pair of percentages
//! inside a "win ... prediction/probability" snippet. A pair is only trusted
//! when it sums to roughly one hundred.

use crate::state::{TeamSnapshot, WinPrediction};
use crate::text::clean_text;

fn normalize_percent(value: &str) -> Option<String> {
    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() || !(0.0..=100.0).contains(&parsed) {
        return None;
    }
    let rendered = if parsed.fract() == 0.0 {
        format!("{}", parsed as i64)
    } else {
        let fixed = format!("{parsed:.1}");
        fixed
            .strip_suffix(".0")
            .map(str::to_string)
            .unwrap_or(fixed)
    };
    Some(format!("{rendered}%"))
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| from + i)
}

/// Number text ending at `end` (exclusive): an optional ".digits" fraction
/// preceded by an integer part of at most three digits. Longer digit runs
/// keep only their last three digits.
fn number_ending_at(text: &str, end: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let mut start = end;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }
    if start == end {
        return None;
    }
    if start > 0 && bytes[start - 1] == b'.' && start >= 2 && bytes[start - 2].is_ascii_digit() {
        let int_end = start - 1;
        let mut int_start = int_end;
        while int_start > 0 && bytes[int_start - 1].is_ascii_digit() {
            int_start -= 1;
        }
        let int_from = int_start.max(int_end.saturating_sub(3));
        Some(format!("{}.{}", &text[int_from..int_end], &text[start..end]))
    } else {
        Some(text[start.max(end.saturating_sub(3))..end].to_string())
    }
}

/// Number text starting at `start`: one to three digits plus an optional
/// fraction, which must be followed by optional spaces and a percent sign.
fn percent_number_at(text: &str, start: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let mut digits_end = start;
    while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
        digits_end += 1;
    }
    if digits_end == start || digits_end - start > 3 {
        return None;
    }
    let mut number_end = digits_end;
    if digits_end < bytes.len() && bytes[digits_end] == b'.' {
        let mut frac_end = digits_end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end == digits_end + 1 {
            return None;
        }
        number_end = frac_end;
    }
    let mut percent_at = number_end;
    while percent_at < bytes.len() && bytes[percent_at].is_ascii_whitespace() {
        percent_at += 1;
    }
    if percent_at < bytes.len() && bytes[percent_at] == b'%' {
        Some(text[start..number_end].to_string())
    } else {
        None
    }
}

/// A percentage within 24 characters after the label.
fn percent_after_label(text: &str, lower: &[u8], label_lower: &[u8]) -> Option<String> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(at) = find_bytes(lower, label_lower, from) {
        from = at + 1;
        let after = at + label_lower.len();
        let mut i = after;
        while i < bytes.len() && i - after <= 24 {
            let byte = bytes[i];
            if byte.is_ascii_digit() {
                if let Some(percent) =
                    percent_number_at(text, i).and_then(|n| normalize_percent(&n))
                {
                    return Some(percent);
                }
                break;
            }
            if byte == b'%' {
                break;
            }
            i += 1;
        }
    }
    None
}

/// A percentage within 24 non-alphanumeric characters before the label.
fn percent_before_label(text: &str, lower: &[u8], label_lower: &[u8]) -> Option<String> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(at) = find_bytes(lower, label_lower, from) {
        from = at + 1;
        let mut i = at;
        let mut gap = 0;
        while i > 0 && gap <= 24 {
            let byte = bytes[i - 1];
            if byte.is_ascii_alphanumeric() {
                break;
            }
            if byte == b'%' {
                let mut number_end = i - 1;
                while number_end > 0 && bytes[number_end - 1].is_ascii_whitespace() {
                    number_end -= 1;
                }
                if let Some(percent) =
                    number_ending_at(text, number_end).and_then(|n| normalize_percent(&n))
                {
                    return Some(percent);
                }
            }
            i -= 1;
            gap += 1;
        }
    }
    None
}

fn percent_near_label(text: &str, lower: &[u8], label: &str) -> Option<String> {
    if label.is_empty() {
        return None;
    }
    let label_lower = label.to_ascii_lowercase();
    percent_after_label(text, lower, label_lower.as_bytes())
        .or_else(|| percent_before_label(text, lower, label_lower.as_bytes()))
}

fn percent_by_team(text: &str, lower: &[u8], team: &TeamSnapshot) -> Option<String> {
    let mut candidates: Vec<String> = [&team.short_name, &team.name]
        .iter()
        .map(|value| clean_text(value))
        .filter(|value| !value.is_empty())
        .collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    candidates
        .iter()
        .find_map(|candidate| percent_near_label(text, lower, candidate))
}

fn two_percents_from_snippet(snippet: &str) -> Vec<String> {
    let bytes = snippet.as_bytes();
    let mut values: Vec<String> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        match percent_number_at(snippet, i) {
            Some(number) => {
                if let Some(percent) = normalize_percent(&number)
                    && !values.contains(&percent)
                {
                    values.push(percent);
                }
                i += number.len();
                while i < bytes.len() && bytes[i] != b'%' {
                    i += 1;
                }
                i += 1;
            }
            None => {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }
    }
    values.truncate(2);
    values
}

fn is_likely_pair(team1: &str, team2: &str) -> bool {
    let parse = |value: &str| value.trim_end_matches('%').parse::<f64>().ok();
    match (parse(team1), parse(team2)) {
        (Some(first), Some(second)) => (90.0..=110.0).contains(&(first + second)),
        _ => false,
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Sentence-bounded snippets mentioning winning alongside a prediction or
/// probability. The gap between the two words never crosses a period.
fn prediction_snippets(text: &str, lower: &[u8]) -> Vec<String> {
    let pairs: [(&str, &str, usize); 3] = [
        ("win", "prediction", 160),
        ("win", "probability", 160),
        ("prediction", "win", 120),
    ];
    let mut snippets = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;
    'scan: while pos < bytes.len() {
        for (first, second, limit) in pairs {
            if !lower[pos..].starts_with(first.as_bytes()) {
                continue;
            }
            let gap_start = pos + first.len();
            let mut gap_end = gap_start;
            while gap_end < bytes.len() && bytes[gap_end] != b'.' && gap_end - gap_start < limit {
                gap_end += 1;
            }
            let mut second_at = None;
            let mut search = gap_start;
            while let Some(at) = find_bytes(lower, second.as_bytes(), search) {
                if at > gap_end {
                    break;
                }
                second_at = Some(at);
                search = at + 1;
            }
            let Some(second_start) = second_at else {
                continue;
            };
            let mut end = second_start + second.len();
            let tail_start = end;
            while end < bytes.len() && bytes[end] != b'.' && end - tail_start < limit {
                end += 1;
            }
            snippets.push(String::from_utf8_lossy(&bytes[pos..end]).into_owned());
            pos = end.max(pos + 1);
            continue 'scan;
        }
        pos += 1;
    }
    snippets
}

/// Win percentages for both teams, or `None` when nothing trustworthy is on
/// the page.
pub fn parse_win_prediction_from_html(
    html: &str,
    team1: &TeamSnapshot,
    team2: &TeamSnapshot,
) -> Option<WinPrediction> {
    let plain_text = clean_text(&strip_tags(html));
    if plain_text.is_empty() {
        return None;
    }
    let lower = plain_text.to_ascii_lowercase();
    let lower = lower.as_bytes();

    let team1_percent = percent_by_team(&plain_text, lower, team1);
    let team2_percent = percent_by_team(&plain_text, lower, team2);
    if let (Some(first), Some(second)) = (&team1_percent, &team2_percent)
        && is_likely_pair(first, second)
    {
        return Some(WinPrediction {
            team1_percent: first.clone(),
            team2_percent: second.clone(),
        });
    }

    for snippet in prediction_snippets(&plain_text, lower) {
        let values = two_percents_from_snippet(&snippet);
        if let [first, second] = values.as_slice()
            && is_likely_pair(first, second)
        {
            return Some(WinPrediction {
                team1_percent: first.clone(),
                team2_percent: second.clone(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, short: &str) -> TeamSnapshot {
        TeamSnapshot {
            name: name.to_string(),
            short_name: short.to_string(),
            score: String::new(),
            flag_url: None,
        }
    }

    #[test]
    fn percents_attach_to_team_labels() {
        let html = "<div>Win probability</div><span>IND 63%</span><span>37% AUS</span>";
        let prediction = parse_win_prediction_from_html(
            html,
            &team("India", "IND"),
            &team("Australia", "AUS"),
        )
        .expect("prediction");
        assert_eq!(prediction.team1_percent, "63%");
        assert_eq!(prediction.team2_percent, "37%");
    }

    #[test]
    fn pair_must_sum_near_one_hundred() {
        let html = "<span>IND 63%</span><span>AUS 80%</span>";
        assert!(
            parse_win_prediction_from_html(
                html,
                &team("India", "IND"),
                &team("Australia", "AUS"),
            )
            .is_none()
        );
    }

    #[test]
    fn snippet_fallback_reads_anonymous_pairs() {
        let html = "<p>Live win prediction for this game: 55% to 45% after the powerplay</p>";
        let prediction = parse_win_prediction_from_html(
            html,
            &team("India", "IND"),
            &team("Australia", "AUS"),
        )
        .expect("prediction");
        assert_eq!(prediction.team1_percent, "55%");
        assert_eq!(prediction.team2_percent, "45%");
    }

    #[test]
    fn trailing_point_zero_is_dropped() {
        assert_eq!(normalize_percent("63.0").as_deref(), Some("63%"));
        assert_eq!(normalize_percent("63.4").as_deref(), Some("63.4%"));
        assert_eq!(normalize_percent("163"), None);
    }

    #[test]
    fn stray_percents_outside_snippets_are_ignored() {
        let html = "<p>Humidity 80% and chance of rain 20% at the ground</p>";
        assert!(
            parse_win_prediction_from_html(
                html,
                &team("India", "IND"),
                &team("Australia", "AUS"),
            )
            .is_none()
        );
    }
}
