//! Ball positions and outcomes recovered from commentary payloads.
//!
//! Commentary lines carry their over/ball position either as separate integer
//! fields or as a dotted "12.3" value. Lines offering neither are dropped.

use serde_json::Value;

use crate::balls::{
    ClassifiedBall, classify_ball_token, contains_no_ball, parse_over_context, to_labeled_balls,
};
use crate::json_extract::pick_text;
use crate::state::LiveOverBall;
use crate::text::{contains_word, parse_int_prefix};

#[derive(Debug, Clone)]
pub struct CommentaryBall {
    pub over: i64,
    pub raw_ball: i64,
    pub outcome: ClassifiedBall,
    pub index: usize,
}

fn pick_int(line: &Value, keys: &[&str]) -> Option<i64> {
    pick_text(line, keys).as_deref().and_then(parse_int_prefix)
}

/// Over/ball position of one commentary line, or `None` when the line does
/// not place itself.
pub fn parse_over_ball(line: &Value) -> Option<(i64, i64)> {
    let over_text = pick_text(line, &["overNumber", "overNum", "o_no"]).unwrap_or_default();
    let direct_over = parse_int_prefix(&over_text);
    let direct_ball = pick_int(line, &["ballNbr", "ballNumber", "ball"]);
    if let (Some(over), Some(ball)) = (direct_over, direct_ball) {
        return Some((over, ball));
    }
    let (over_part, ball_part) = over_text.split_once('.')?;
    let over = parse_int_prefix(over_part)?;
    let ball = parse_int_prefix(ball_part)?;
    Some((over, ball))
}

/// Outcome of one commentary line, sharing the token classifier's priority
/// order except that six is checked before four.
pub fn derive_commentary_outcome(line: &Value) -> ClassifiedBall {
    let text = pick_text(line, &["eventType", "event", "commText", "comm", "commentary"])
        .unwrap_or_default();
    let lower = text.to_lowercase();
    let runs = pick_int(line, &["runsScored", "runs"]);
    let with_runs = |prefix: &str| match runs {
        Some(r) => format!("{prefix}+{r}"),
        None => prefix.to_string(),
    };
    if lower.contains("wide") || contains_word(&lower, "wd") {
        return ClassifiedBall {
            value: with_runs("Wd"),
            kind: crate::state::BallKind::Extra,
            legal: false,
        };
    }
    if contains_no_ball(&lower) || contains_word(&lower, "nb") {
        return ClassifiedBall {
            value: with_runs("Nb"),
            kind: crate::state::BallKind::Extra,
            legal: false,
        };
    }
    if lower.contains("wicket") || lower.contains("out") {
        return ClassifiedBall {
            value: "W".to_string(),
            kind: crate::state::BallKind::Wicket,
            legal: true,
        };
    }
    if lower.contains("six") {
        return ClassifiedBall {
            value: "6".to_string(),
            kind: crate::state::BallKind::Six,
            legal: true,
        };
    }
    if lower.contains("four") || lower.contains("boundary") {
        return ClassifiedBall {
            value: "4".to_string(),
            kind: crate::state::BallKind::Four,
            legal: true,
        };
    }
    if let Some(runs) = runs {
        if runs == 0 {
            return ClassifiedBall {
                value: "0".to_string(),
                kind: crate::state::BallKind::Dot,
                legal: true,
            };
        }
        return ClassifiedBall {
            value: runs.to_string(),
            kind: crate::state::BallKind::Run,
            legal: true,
        };
    }
    classify_ball_token(if text.is_empty() { "-" } else { &text })
}

pub fn parse_commentary_balls(lines: &[&Value]) -> Vec<CommentaryBall> {
    let mut parsed = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let Some((over, raw_ball)) = parse_over_ball(line) else {
            continue;
        };
        parsed.push(CommentaryBall {
            over,
            raw_ball,
            outcome: derive_commentary_outcome(line),
            index,
        });
    }
    parsed
}

fn sort_balls(balls: &mut [CommentaryBall]) {
    balls.sort_by(|a, b| {
        a.over
            .cmp(&b.over)
            .then(a.raw_ball.cmp(&b.raw_ball))
            .then(a.index.cmp(&b.index))
    });
}

/// Commentary lines, preferring whichever of `commentaryList` / `comm_lines`
/// has more entries.
pub fn parse_commentary_list(payload: &Value) -> Vec<&Value> {
    let from_list: Vec<&Value> = match payload.get("commentaryList") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    };
    let from_comm_lines: Vec<&Value> = match payload.get("comm_lines") {
        Some(Value::Array(items)) => items.iter().collect(),
        _ => Vec::new(),
    };
    let preferred = if from_list.len() >= from_comm_lines.len() {
        from_list
    } else {
        from_comm_lines
    };
    preferred.into_iter().filter(|v| v.is_object()).collect()
}

/// Rebuilds the latest over from commentary balls. The overs value, when it
/// names the same over, anchors the starting ball number.
pub fn parse_current_over_from_commentary(
    balls: &[CommentaryBall],
    overs_raw: Option<&str>,
) -> Vec<LiveOverBall> {
    if balls.is_empty() {
        return Vec::new();
    }
    let latest_over = balls.iter().map(|b| b.over).max().unwrap_or(0);
    let mut in_over: Vec<CommentaryBall> = balls
        .iter()
        .filter(|b| b.over == latest_over)
        .cloned()
        .collect();
    if in_over.is_empty() {
        return Vec::new();
    }
    sort_balls(&mut in_over);
    let context = parse_over_context(overs_raw.unwrap_or("").trim());
    let completed_legal_balls = if context.over_number == Some(latest_over) {
        context.completed_balls
    } else {
        0
    };
    to_labeled_balls(
        latest_over,
        completed_legal_balls,
        in_over.into_iter().map(|b| b.outcome).collect(),
    )
}

/// Last ten balls across all overs, labeled with their real positions.
pub fn parse_recent_balls_from_commentary(balls: &[CommentaryBall]) -> Vec<LiveOverBall> {
    if balls.is_empty() {
        return Vec::new();
    }
    let mut sorted = balls.to_vec();
    sort_balls(&mut sorted);
    let skip = sorted.len().saturating_sub(10);
    sorted[skip..]
        .iter()
        .map(|b| LiveOverBall {
            label: format!("{}.{}", b.over, b.raw_ball),
            value: b.outcome.value.clone(),
            kind: b.outcome.kind,
        })
        .collect()
}
