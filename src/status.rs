//! Status line selection and match-state classification.
//!
//! List pages and scorecard blobs disagree about the status text, so every
//! caller gathers the candidates it has and lets [`pick_best_status`] score
//! them. Classification into live / upcoming / complete feeds the tab
//! partitioning.

use crate::state::MatchStatusType;
use crate::text::{collapse_whitespace, select_best};

pub fn normalize_status(status: &str) -> String {
    collapse_whitespace(status)
}

/// Placeholder statuses that should never be shown on a list row.
pub fn is_generic_status(status: &str) -> bool {
    let trimmed = status.trim();
    trimmed.is_empty()
        || trimmed == "-"
        || trimmed.to_lowercase().contains("status unavailable")
}

pub fn has_usable_status(status: &str) -> bool {
    !is_generic_status(&normalize_status(status))
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// "day" followed by optional spaces and a digit, as in "Day 3: stumps".
fn has_day_number(text: &str) -> bool {
    let mut from = 0;
    while let Some(found) = text[from..].find("day") {
        let after = from + found + 3;
        let rest = text[after..].trim_start();
        if rest.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            return true;
        }
        from = after;
    }
    false
}

/// "by <n> runs" or "by <n> wickets" style result margins.
fn has_result_margin(text: &str) -> bool {
    let mut from = 0;
    while let Some(found) = text[from..].find("by") {
        let mut rest = &text[from + found + 2..];
        from += found + 2;
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            continue;
        }
        rest = trimmed;
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }
        rest = &rest[digits..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            continue;
        }
        if trimmed.starts_with("run") || trimmed.starts_with("wicket") {
            return true;
        }
    }
    false
}

fn status_priority(status: &str) -> i64 {
    let lowered = status.to_lowercase();
    if lowered.is_empty() || lowered == "-" {
        return -1;
    }
    let mut score = lowered.len() as i64;
    if contains_any(&lowered, &["super over", "bowl out", "eliminator"]) {
        score += 120;
    }
    if contains_any(
        &lowered,
        &["won by", "won", "beats", "beat", "defeat", "defeated", "match over", "result"],
    ) || has_result_margin(&lowered)
    {
        score += 60;
    }
    if lowered.contains("tie") {
        score += 8;
    }
    if contains_any(&lowered, &["stumps", "innings", "need", "trail", "lead", "lunch", "tea"])
        || has_day_number(&lowered)
    {
        score += 20;
    }
    score
}

/// Highest-priority candidate, deduped case-insensitively. Later duplicates
/// refresh the casing but keep the original position.
pub fn pick_best_status(candidates: &[Option<&str>]) -> String {
    let mut deduped: Vec<(String, String)> = Vec::new();
    for candidate in candidates.iter().flatten() {
        let normalized = normalize_status(candidate);
        if normalized.is_empty() {
            continue;
        }
        let key = normalized.to_lowercase();
        if let Some(existing) = deduped.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = normalized;
        } else {
            deduped.push((key, normalized));
        }
    }
    let best = select_best(deduped, |(_, text)| status_priority(text));
    match best {
        Some((_, text)) => text,
        None => "-".to_string(),
    }
}

/// Classifies a match from whatever signal text is around.
///
/// Completion keywords outrank upcoming keywords; a visible score forces
/// live; live keywords catch the rest; everything else is upcoming.
pub fn derive_status_type(status: &str, state: &str, title: &str, has_score: bool) -> MatchStatusType {
    let text = format!("{status} {state} {title}").to_lowercase();
    if contains_any(
        &text,
        &["won", "drawn", "tied", "abandon", "no result", "match over", "complete"],
    ) {
        return MatchStatusType::Complete;
    }
    if contains_any(
        &text,
        &["preview", "upcoming", "yet to begin", "schedule", "starts at", "start at"],
    ) {
        return MatchStatusType::Upcoming;
    }
    if has_score {
        return MatchStatusType::Live;
    }
    if contains_any(&text, &["stumps", "innings", "need", "trail", "lead", "lunch", "tea", "live"])
        || has_day_number(&text)
    {
        return MatchStatusType::Live;
    }
    MatchStatusType::Upcoming
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_statuses_beat_session_notes() {
        let best = pick_best_status(&[
            Some("Day 2: Stumps"),
            Some("India won by 7 wickets"),
            None,
        ]);
        assert_eq!(best, "India won by 7 wickets");
    }

    #[test]
    fn dedupe_keeps_position_but_refreshes_casing() {
        let best = pick_best_status(&[Some("stumps  day 2"), Some("Stumps Day 2")]);
        assert_eq!(best, "Stumps Day 2");
    }

    #[test]
    fn empty_candidates_collapse_to_dash() {
        assert_eq!(pick_best_status(&[None, Some("   ")]), "-");
    }

    #[test]
    fn generic_statuses_are_unusable() {
        assert!(!has_usable_status("Status unavailable"));
        assert!(!has_usable_status(" - "));
        assert!(has_usable_status("India need 54 runs"));
    }

    #[test]
    fn margins_count_as_results() {
        assert!(has_result_margin("australia win by 23 runs"));
        assert!(has_result_margin("won by 5   wickets"));
        assert!(!has_result_margin("standby 5 overs"));
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(
            derive_status_type("Match tied (India win Super Over)", "", "", true),
            MatchStatusType::Complete
        );
        assert_eq!(
            derive_status_type("Preview", "", "IND vs AUS", false),
            MatchStatusType::Upcoming
        );
        assert_eq!(derive_status_type("", "", "", true), MatchStatusType::Live);
        assert_eq!(
            derive_status_type("Day 3: Lunch", "", "", false),
            MatchStatusType::Live
        );
        assert_eq!(derive_status_type("", "", "", false), MatchStatusType::Upcoming);
    }
}
