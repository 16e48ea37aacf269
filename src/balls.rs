//! Ball-by-ball token handling: classification of raw delivery tokens and
//! reconstruction of over-relative labels.

use crate::state::{BallKind, LiveOverBall};
use crate::text::{collapse_whitespace, contains_word, first_digit_run};

/// A classified delivery token before it gets a positional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBall {
    pub value: String,
    pub kind: BallKind,
    pub legal: bool,
}

/// Strips decoration while keeping run suffixes such as "4lb" or "Wd+1".
pub fn normalize_ball_token(raw: &str) -> String {
    let start = raw
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphanumeric())
        .map(|(i, _)| i);
    let Some(start) = start else {
        return String::new();
    };
    let mut end = raw.len();
    for (i, c) in raw.char_indices().rev() {
        if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-') {
            end = i + c.len_utf8();
            break;
        }
        end = i;
    }
    raw[start..end.max(start)].trim().to_string()
}

pub(crate) fn contains_no_ball(token: &str) -> bool {
    let mut from = 0;
    while let Some(found) = token[from..].find("no") {
        let after = from + found + 2;
        let rest = token[after..].trim_start_matches([' ', '-']);
        if rest.starts_with("ball") {
            return true;
        }
        from = after;
    }
    false
}

fn contains_leg_bye(token: &str) -> bool {
    let mut from = 0;
    while let Some(found) = token[from..].find("leg") {
        let after = from + found + 3;
        let rest = token[after..].trim_start_matches([' ', '-']);
        if rest.starts_with("bye") {
            return true;
        }
        from = after;
    }
    false
}

/// Classifies a single delivery token.
///
/// The priority order matters: extras are recognized before wickets so that
/// "wd" never reads as a wicket, and boundaries before the generic digit
/// fallback.
pub fn classify_ball_token(raw: &str) -> ClassifiedBall {
    let normalized = normalize_ball_token(raw);
    let token = normalized.to_lowercase();
    if token.is_empty() {
        return ClassifiedBall {
            value: "-".to_string(),
            kind: BallKind::Other,
            legal: true,
        };
    }
    let run_value = first_digit_run(&token).map(str::to_string);
    if token.contains("wide") || contains_word(&token, "wd") {
        return ClassifiedBall {
            value: match &run_value {
                Some(runs) => format!("Wd+{runs}"),
                None => "Wd".to_string(),
            },
            kind: BallKind::Extra,
            legal: false,
        };
    }
    if contains_no_ball(&token) || contains_word(&token, "nb") {
        return ClassifiedBall {
            value: match &run_value {
                Some(runs) => format!("Nb+{runs}"),
                None => "Nb".to_string(),
            },
            kind: BallKind::Extra,
            legal: false,
        };
    }
    if token == "w" || token.contains("wicket") || token.contains("out") {
        return ClassifiedBall {
            value: "W".to_string(),
            kind: BallKind::Wicket,
            legal: true,
        };
    }
    if token == "4" || token.contains("four") || token.contains("boundary") {
        return ClassifiedBall {
            value: "4".to_string(),
            kind: BallKind::Four,
            legal: true,
        };
    }
    if token == "6" || token.contains("six") {
        return ClassifiedBall {
            value: "6".to_string(),
            kind: BallKind::Six,
            legal: true,
        };
    }
    if token == "." || token == "0" || token.contains("dot") {
        return ClassifiedBall {
            value: "0".to_string(),
            kind: BallKind::Dot,
            legal: true,
        };
    }
    if contains_leg_bye(&token) || contains_word(&token, "lb") {
        return ClassifiedBall {
            value: match &run_value {
                Some(runs) => format!("Lb{runs}"),
                None => "Lb".to_string(),
            },
            kind: BallKind::Run,
            legal: true,
        };
    }
    if contains_word(&token, "bye") {
        return ClassifiedBall {
            value: match &run_value {
                Some(runs) => format!("B{runs}"),
                None => "B".to_string(),
            },
            kind: BallKind::Run,
            legal: true,
        };
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return ClassifiedBall {
            value: token.clone(),
            kind: BallKind::Run,
            legal: true,
        };
    }
    ClassifiedBall {
        value: normalized,
        kind: BallKind::Other,
        legal: true,
    }
}

/// Splits a pipe-delimited over summary string into delivery tokens.
///
/// Only the last segment is kept unless `include_all_segments` is set;
/// a leading "label:" prefix inside a segment is dropped.
pub fn parse_over_tokens_from_string(value: &str, limit: usize, include_all_segments: bool) -> Vec<String> {
    let collapsed = collapse_whitespace(value);
    let segments: Vec<&str> = collapsed
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let chosen: Vec<&str> = if include_all_segments {
        segments
    } else {
        segments.last().copied().into_iter().collect()
    };
    let mut tokens = Vec::new();
    for segment in chosen {
        let body = segment.rsplit_once(':').map_or(segment, |(_, rest)| rest);
        for piece in body.split_whitespace() {
            let token = normalize_ball_token(piece);
            if token.is_empty() || token.eq_ignore_ascii_case("ov") || token.eq_ignore_ascii_case("over") {
                continue;
            }
            tokens.push(token);
        }
    }
    let skip = tokens.len().saturating_sub(limit);
    tokens.split_off(skip)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverContext {
    pub over_number: Option<i64>,
    pub completed_balls: i64,
}

/// Reads "17.4" as being inside over 18 with 4 legal balls bowled.
pub fn parse_over_context(raw: &str) -> OverContext {
    let none = OverContext {
        over_number: None,
        completed_balls: 0,
    };
    let (over_text, ball_text) = match raw.split_once('.') {
        Some((o, b)) => (o, b),
        None => (raw, ""),
    };
    if over_text.is_empty() || !over_text.bytes().all(|b| b.is_ascii_digit()) {
        return none;
    }
    if !ball_text.is_empty() && !ball_text.bytes().all(|b| b.is_ascii_digit()) {
        return none;
    }
    let Ok(base) = over_text.parse::<i64>() else {
        return none;
    };
    let balls = ball_text.parse::<i64>().unwrap_or(0);
    let carry = balls / 6;
    let completed_balls = balls % 6;
    OverContext {
        over_number: Some(base + carry + if completed_balls > 0 { 1 } else { 0 }),
        completed_balls,
    }
}

/// Labels outcomes backwards from the number of legal balls already bowled,
/// so a partial token list still ends on the current delivery.
pub fn to_labeled_balls(
    over_number: i64,
    completed_legal_balls: i64,
    outcomes: Vec<ClassifiedBall>,
) -> Vec<LiveOverBall> {
    let legal_deliveries = outcomes.iter().filter(|o| o.legal).count() as i64;
    let mut current_ball = 1i64;
    if completed_legal_balls > 0 && legal_deliveries > 0 {
        current_ball = (completed_legal_balls - legal_deliveries + 1).max(1);
    }
    let mut balls = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        balls.push(LiveOverBall {
            label: format!("{over_number}.{}", current_ball.clamp(1, 6)),
            value: outcome.value,
            kind: outcome.kind,
        });
        if outcome.legal {
            current_ball += 1;
        }
    }
    balls
}

/// Current-over view of a token list; degrades to anonymous "Ball N" labels
/// when the over context is unknown or the list is implausibly long.
pub fn to_current_over_balls(tokens: &[String], overs_raw: &str) -> Vec<LiveOverBall> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let outcomes: Vec<ClassifiedBall> = tokens.iter().map(|t| classify_ball_token(t)).collect();
    let context = parse_over_context(overs_raw.trim());
    match context.over_number {
        // over 0 means the context was a bare "0" placeholder
        Some(over_number) if over_number != 0 && tokens.len() <= 10 => {
            to_labeled_balls(over_number, context.completed_balls, outcomes)
        }
        _ => outcomes
            .into_iter()
            .enumerate()
            .map(|(i, outcome)| LiveOverBall {
                label: format!("Ball {}", i + 1),
                value: outcome.value,
                kind: outcome.kind,
            })
            .collect(),
    }
}

/// Last ten tokens as anonymously labeled balls.
pub fn to_recent_balls(tokens: &[String]) -> Vec<LiveOverBall> {
    let skip = tokens.len().saturating_sub(10);
    tokens[skip..]
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let outcome = classify_ball_token(token);
            LiveOverBall {
                label: format!("Ball {}", i + 1),
                value: outcome.value,
                kind: outcome.kind,
            }
        })
        .collect()
}

pub fn format_recent_balls_label(count: usize) -> String {
    if count >= 10 {
        "Last 10 balls".to_string()
    } else if count > 0 {
        format!("Last {count} balls")
    } else {
        "Current over".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(token: &str) -> BallKind {
        classify_ball_token(token).kind
    }

    #[test]
    fn every_token_family_classifies() {
        assert_eq!(classify_ball_token("wd").value, "Wd");
        assert_eq!(classify_ball_token("wide 1").value, "Wd+1");
        assert_eq!(classify_ball_token("no-ball").value, "Nb");
        assert_eq!(classify_ball_token("W").kind, BallKind::Wicket);
        assert_eq!(classify_ball_token("caught out").value, "W");
        assert_eq!(kind_of("4"), BallKind::Four);
        assert_eq!(kind_of("SIX"), BallKind::Six);
        assert_eq!(classify_ball_token(".").value, "0");
        assert_eq!(classify_ball_token("leg bye 2").value, "Lb2");
        assert_eq!(classify_ball_token("bye").value, "B");
        assert_eq!(kind_of("3"), BallKind::Run);
        assert_eq!(kind_of("??"), BallKind::Other);
    }

    #[test]
    fn extras_need_word_boundaries() {
        assert_eq!(classify_ball_token("wd 2").kind, BallKind::Extra);
        assert!(!classify_ball_token("wd 2").legal);
        assert_eq!(classify_ball_token("no ball 4").value, "Nb+4");
        // digits glued to the marker defeat the word match
        assert_eq!(classify_ball_token("1wd").kind, BallKind::Other);
    }

    #[test]
    fn token_strings_use_last_segment() {
        let tokens = parse_over_tokens_from_string("Ov 17: 1 4 W | Ov 18: 0 6 wd", 8, false);
        assert_eq!(tokens, vec!["0", "6", "wd"]);
        let all = parse_over_tokens_from_string("Ov 17: 1 4 | Ov 18: 0 6", 8, true);
        assert_eq!(all, vec!["1", "4", "0", "6"]);
    }

    #[test]
    fn over_context_carries_and_rejects() {
        assert_eq!(
            parse_over_context("17.4"),
            OverContext { over_number: Some(18), completed_balls: 4 }
        );
        assert_eq!(
            parse_over_context("20"),
            OverContext { over_number: Some(20), completed_balls: 0 }
        );
        assert_eq!(parse_over_context("17.4 ov").over_number, None);
        assert_eq!(parse_over_context("").over_number, None);
    }

    #[test]
    fn labels_count_backwards_from_completed_balls() {
        let outcomes = vec![
            classify_ball_token("1"),
            classify_ball_token("wd"),
            classify_ball_token("4"),
        ];
        let balls = to_labeled_balls(18, 4, outcomes);
        let labels: Vec<&str> = balls.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["18.3", "18.4", "18.4"]);
    }

    #[test]
    fn unknown_context_degrades_to_anonymous_labels() {
        let tokens = vec!["1".to_string(), "W".to_string()];
        let balls = to_current_over_balls(&tokens, "not-an-over");
        assert_eq!(balls[0].label, "Ball 1");
        assert_eq!(balls[1].label, "Ball 2");
    }

    #[test]
    fn recent_balls_cap_at_ten() {
        let tokens: Vec<String> = (0..14).map(|i| (i % 7).to_string()).collect();
        let balls = to_recent_balls(&tokens);
        assert_eq!(balls.len(), 10);
        assert_eq!(format_recent_balls_label(10), "Last 10 balls");
        assert_eq!(format_recent_balls_label(4), "Last 4 balls");
        assert_eq!(format_recent_balls_label(0), "Current over");
    }
}
