//! Live-center state recovered from mini-score blobs and commentary.
//!
//! Several embedded objects can describe the in-progress innings and none is
//! reliably complete, so every candidate is normalized into a
//! [`MatchLiveState`], scored for completeness, and the best-scoring whole
//! object wins. Merging never mixes fields from different candidates except
//! for the commentary back-fill of empty ball lists.

use serde_json::Value;

use crate::balls::{
    format_recent_balls_label, parse_over_tokens_from_string, to_current_over_balls,
    to_recent_balls,
};
use crate::commentary::{
    CommentaryBall, parse_commentary_balls, parse_commentary_list,
    parse_current_over_from_commentary, parse_recent_balls_from_commentary,
};
use crate::json_extract::{
    pick_array_by_key, pick_bool_or, pick_object_by_key, pick_text, stat_text, value_text,
};
use crate::overs::normalize_overs_value;
use crate::state::{LiveBatter, LiveBowler, LiveOverBall, MatchInnings, MatchLiveState};
use crate::text::normalize_player_key;

fn normalize_token_from_value(entry: &Value) -> String {
    use crate::balls::normalize_ball_token;
    match entry {
        Value::String(_) | Value::Number(_) => {
            normalize_ball_token(&value_text(entry).unwrap_or_default())
        }
        Value::Object(_) => normalize_ball_token(
            &pick_text(
                entry,
                &["value", "result", "ballResult", "event", "eventType", "runs", "runsScored"],
            )
            .unwrap_or_default(),
        ),
        _ => String::new(),
    }
}

pub fn parse_over_tokens_from_array(values: &[Value], limit: usize) -> Vec<String> {
    let tokens: Vec<String> = values
        .iter()
        .map(normalize_token_from_value)
        .filter(|t| !t.is_empty())
        .collect();
    let skip = tokens.len().saturating_sub(limit);
    tokens[skip..].to_vec()
}

fn extract_over_tokens(candidate: &Value) -> Vec<String> {
    const ARRAY_SOURCES: [&str; 7] = [
        "currentOver",
        "thisOver",
        "overSummary",
        "overSummaryList",
        "currOver",
        "thisOverStats",
        "recentOvsStatsArr",
    ];
    for key in ARRAY_SOURCES {
        if let Some(Value::Array(items)) = candidate.get(key) {
            let parsed = parse_over_tokens_from_array(items, 8);
            if !parsed.is_empty() {
                return parsed;
            }
        }
    }
    const STRING_SOURCES: [&str; 6] = [
        "currentOver",
        "thisOver",
        "overSummary",
        "recentOvsStats",
        "currOver",
        "thisOverStats",
    ];
    for key in STRING_SOURCES {
        if let Some(Value::String(text)) = candidate.get(key) {
            let parsed = parse_over_tokens_from_string(text, 8, false);
            if !parsed.is_empty() {
                return parsed;
            }
        }
    }
    Vec::new()
}

fn extract_recent_ball_tokens(candidate: &Value) -> Vec<String> {
    const ARRAY_SOURCES: [&str; 5] = [
        "recentBalls",
        "latestBalls",
        "lastTenBalls",
        "last10Balls",
        "recentOvsStatsArr",
    ];
    for key in ARRAY_SOURCES {
        if let Some(Value::Array(items)) = candidate.get(key) {
            let parsed = parse_over_tokens_from_array(items, 10);
            if !parsed.is_empty() {
                return parsed;
            }
        }
    }
    const STRING_SOURCES: [&str; 5] = [
        "recentBalls",
        "latestBalls",
        "lastTenBalls",
        "last10Balls",
        "recentOvsStats",
    ];
    for key in STRING_SOURCES {
        if let Some(Value::String(text)) = candidate.get(key)
            && !text.is_empty()
        {
            let parsed = parse_over_tokens_from_string(text, 10, true);
            if !parsed.is_empty() {
                return parsed;
            }
        }
    }
    Vec::new()
}

fn to_live_batter(value: &Value, default_strike: bool) -> Option<LiveBatter> {
    let name = pick_text(value, &["batName", "name"])?;
    let id = pick_text(value, &["id", "batId"]).unwrap_or_else(|| name.clone());
    Some(LiveBatter {
        id,
        runs: stat_text(value, &["runs", "batRuns"]),
        balls: stat_text(value, &["balls", "batBalls"]),
        fours: stat_text(value, &["fours", "batFours"]),
        sixes: stat_text(value, &["sixes", "batSixes"]),
        strike_rate: stat_text(value, &["strikeRate", "batStrikeRate"]),
        on_strike: pick_bool_or(value, &["isOnStrike", "isStriker"], default_strike),
        name,
    })
}

fn to_live_batters(candidate: &Value) -> Vec<LiveBatter> {
    let mut result: Vec<LiveBatter> = Vec::new();
    let add_one = |result: &mut Vec<LiveBatter>, player: Option<LiveBatter>| {
        if let Some(player) = player {
            let key = player.name.to_lowercase();
            if !result.iter().any(|p| p.name.to_lowercase() == key) {
                result.push(player);
            }
        }
    };

    let probe = |candidate: &Value, key: &str, strike: bool| {
        candidate.get(key).and_then(|v| to_live_batter(v, strike))
    };
    add_one(&mut result, probe(candidate, "batsmanStriker", true));
    add_one(&mut result, probe(candidate, "batsmanNonStriker", false));
    add_one(&mut result, probe(candidate, "striker", true));
    add_one(&mut result, probe(candidate, "nonStriker", false));
    let empty = result.is_empty();
    add_one(&mut result, probe(candidate, "batsman1", empty));
    let one = result.len() == 1;
    add_one(&mut result, probe(candidate, "batsman2", one));
    let empty = result.is_empty();
    add_one(&mut result, probe(candidate, "currentBatter", empty));
    if let Some(Value::Array(entries)) = candidate.get("currentBatters") {
        for entry in entries {
            let strike = result.is_empty();
            add_one(&mut result, to_live_batter(entry, strike));
        }
    }
    if !result.is_empty() {
        return result;
    }

    // last resort: the batting team's full card, keeping only active batters
    let Some(Value::Array(fallback)) = candidate.get("batTeam").and_then(|t| t.get("batsmen"))
    else {
        return result;
    };
    for entry in fallback {
        if !entry.is_object() {
            continue;
        }
        let out_desc = pick_text(entry, &["outDesc"])
            .unwrap_or_default()
            .to_lowercase();
        let likely_active = out_desc.is_empty()
            || out_desc.contains("batting")
            || out_desc.contains("not out")
            || out_desc.contains("retired hurt");
        if !likely_active {
            continue;
        }
        let strike = result.is_empty();
        add_one(&mut result, to_live_batter(entry, strike));
        if result.len() == 2 {
            break;
        }
    }
    result
}

fn to_live_bowler(value: &Value) -> Option<LiveBowler> {
    let name = pick_text(value, &["bowlName", "name"])?;
    let id = pick_text(value, &["id", "bowlId"]).unwrap_or_else(|| name.clone());
    let overs_raw = pick_text(value, &["overs", "bowlOvs"]);
    let overs = match overs_raw {
        Some(raw) => normalize_overs_value(&raw).unwrap_or(raw),
        None => "-".to_string(),
    };
    Some(LiveBowler {
        id,
        overs,
        maidens: stat_text(value, &["maidens", "bowlMaidens"]),
        runs: stat_text(value, &["runs", "bowlRuns"]),
        wickets: stat_text(value, &["wickets", "bowlWkts"]),
        economy: stat_text(value, &["economy", "bowlEcon"]),
        name,
    })
}

fn has_bowler_stats(bowler: &LiveBowler) -> bool {
    [&bowler.overs, &bowler.maidens, &bowler.runs, &bowler.wickets]
        .iter()
        .any(|value| !value.is_empty() && value.as_str() != "-")
}

fn to_bowling_state(candidate: &Value) -> (Option<LiveBowler>, Vec<LiveBowler>) {
    let mut result: Vec<LiveBowler> = Vec::new();
    let add_bowler = |result: &mut Vec<LiveBowler>, raw: Option<&Value>| {
        let Some(parsed) = raw.and_then(to_live_bowler) else {
            return;
        };
        let key = format!("{}:{}", parsed.id, parsed.name.to_lowercase());
        if !result
            .iter()
            .any(|b| format!("{}:{}", b.id, b.name.to_lowercase()) == key)
        {
            result.push(parsed);
        }
    };

    add_bowler(&mut result, candidate.get("currentBowler"));
    add_bowler(&mut result, candidate.get("bowlerStriker"));
    add_bowler(&mut result, candidate.get("bowler"));
    for key in ["bowlers", "previousBowlers"] {
        if let Some(Value::Array(entries)) = candidate.get("bowlTeam").and_then(|t| t.get(key)) {
            for entry in entries {
                if entry.is_object() {
                    add_bowler(&mut result, Some(entry));
                }
            }
        }
    }

    let mut iter = result.into_iter();
    let bowler = iter.next();
    let previous_bowlers = iter.filter(has_bowler_stats).collect();
    (bowler, previous_bowlers)
}

fn has_content(state: &MatchLiveState) -> bool {
    !state.batters.is_empty()
        || state.bowler.is_some()
        || !state.previous_bowlers.is_empty()
        || !state.current_over_balls.is_empty()
        || !state.recent_balls.is_empty()
}

/// Completeness score; whole-object preference keys off this.
pub fn score_state(state: &MatchLiveState) -> i64 {
    let mut score = 0i64;
    score += state.batters.len() as i64 * 4;
    score += if state.bowler.is_some() { 4 } else { 0 };
    score += state.previous_bowlers.len().min(4) as i64 * 2;
    score += state.current_over_balls.len().min(8) as i64;
    score += state.recent_balls.len().min(10) as i64;
    score += i64::from(state.current_run_rate != "-");
    score += i64::from(state.required_run_rate != "-");
    score
}

/// Normalizes one raw candidate object, or `None` when it carries nothing.
pub fn parse_candidate_state(
    candidate: &Value,
    fallback_current_over_balls: &[LiveOverBall],
) -> Option<MatchLiveState> {
    let batters = to_live_batters(candidate);
    let (bowler, previous_bowlers) = to_bowling_state(candidate);
    let overs_raw = pick_text(candidate, &["overs"]);
    let over_tokens = extract_over_tokens(candidate);
    let recent_tokens = extract_recent_ball_tokens(candidate);
    let current_over_balls = if over_tokens.is_empty() {
        fallback_current_over_balls.to_vec()
    } else {
        to_current_over_balls(&over_tokens, overs_raw.as_deref().unwrap_or("0"))
    };
    let recent_balls = if recent_tokens.is_empty() {
        current_over_balls.clone()
    } else {
        to_recent_balls(&recent_tokens)
    };
    let state = MatchLiveState {
        batters,
        bowler,
        previous_bowlers,
        recent_balls,
        recent_balls_label: if recent_tokens.is_empty() {
            "Current over".to_string()
        } else {
            format_recent_balls_label(recent_tokens.len())
        },
        current_over_label: match &overs_raw {
            Some(raw) => normalize_overs_value(raw).unwrap_or_else(|| raw.clone()),
            None => "-".to_string(),
        },
        current_run_rate: stat_text(candidate, &["crr", "currentRunRate"]),
        required_run_rate: stat_text(candidate, &["reqRate", "requiredRunRate"]),
        current_over_balls,
    };
    has_content(&state).then_some(state)
}

/// Keeps the more complete of two candidate states; ties keep the incumbent.
pub fn pick_preferred_live_state(
    current: Option<MatchLiveState>,
    incoming: Option<MatchLiveState>,
) -> Option<MatchLiveState> {
    match (current, incoming) {
        (None, incoming) => incoming,
        (current, None) => current,
        (Some(current), Some(incoming)) => {
            if score_state(&incoming) > score_state(&current) {
                Some(incoming)
            } else {
                Some(current)
            }
        }
    }
}

/// Live state from a scorecard or live page, trying every mini-score spelling
/// and falling back to per-innings score entries, newest first.
pub fn parse_live_state_from_html(html: &str) -> Option<MatchLiveState> {
    let mut candidates: Vec<Value> = Vec::new();
    for key in ["miniScore", "miniscore", "miniScoreCard", "miniScorecard"] {
        if let Some(value) = pick_object_by_key(html, key) {
            candidates.push(value);
        }
    }
    if let Some(details) = pick_object_by_key(html, "matchScoreDetails")
        && let Some(Value::Array(entries)) = details.get("inningsScoreList")
    {
        candidates.extend(entries.iter().rev().cloned());
    }
    if let Some(Value::Array(entries)) = pick_array_by_key(html, "inningsScoreList").as_ref() {
        candidates.extend(entries.iter().rev().cloned());
    }

    let mut best: Option<MatchLiveState> = None;
    for candidate in &candidates {
        best = pick_preferred_live_state(best, parse_candidate_state(candidate, &[]));
    }
    best
}

fn extract_candidates_from_payload(payload: &Value) -> Vec<&Value> {
    let mut candidates: Vec<&Value> = Vec::new();
    fn push<'a>(value: Option<&'a Value>, candidates: &mut Vec<&'a Value>) {
        if let Some(value) = value
            && value.is_object()
        {
            candidates.push(value);
        }
    }
    push(payload.get("miniScore"), &mut candidates);
    push(payload.get("miniscore"), &mut candidates);
    push(Some(payload), &mut candidates);
    if let Some(Value::Array(entries)) = payload
        .get("matchScoreDetails")
        .and_then(|d| d.get("inningsScoreList"))
    {
        for entry in entries.iter().rev() {
            push(Some(entry), &mut candidates);
        }
    }
    if let Some(Value::Array(entries)) = payload.get("inningsScoreList") {
        for entry in entries.iter().rev() {
            push(Some(entry), &mut candidates);
        }
    }
    candidates
}

/// Live state from a commentary payload. The best candidate keeps its own
/// ball lists; commentary-reconstructed balls back-fill the empty ones.
pub fn parse_live_state_from_commentary_payload(payload: &Value) -> Option<MatchLiveState> {
    if !payload.is_object() {
        return None;
    }
    let lines = parse_commentary_list(payload);
    let balls: Vec<CommentaryBall> = parse_commentary_balls(&lines);
    let commentary_current = parse_current_over_from_commentary(&balls, None);
    let commentary_recent = parse_recent_balls_from_commentary(&balls);

    let mut best: Option<MatchLiveState> = None;
    for candidate in extract_candidates_from_payload(payload) {
        let fallback = parse_current_over_from_commentary(
            &balls,
            pick_text(candidate, &["overs"]).as_deref(),
        );
        best = pick_preferred_live_state(best, parse_candidate_state(candidate, &fallback));
    }

    if let Some(best) = best {
        let merged_current = if best.current_over_balls.is_empty() {
            commentary_current
        } else {
            best.current_over_balls
        };
        let merged_recent = if commentary_recent.len() > best.recent_balls.len() {
            commentary_recent.clone()
        } else {
            best.recent_balls
        };
        let recent_balls = if merged_recent.is_empty() {
            merged_current.clone()
        } else {
            merged_recent
        };
        let recent_balls_label = if !commentary_recent.is_empty() {
            format_recent_balls_label(commentary_recent.len())
        } else if !recent_balls.is_empty() {
            best.recent_balls_label
        } else {
            "Current over".to_string()
        };
        return Some(MatchLiveState {
            batters: best.batters,
            bowler: best.bowler,
            previous_bowlers: best.previous_bowlers,
            current_over_balls: merged_current,
            recent_balls,
            recent_balls_label,
            current_over_label: best.current_over_label,
            current_run_rate: best.current_run_rate,
            required_run_rate: best.required_run_rate,
        });
    }

    if commentary_current.is_empty() && commentary_recent.is_empty() {
        return None;
    }
    let over_label = commentary_current
        .first()
        .and_then(|b| b.label.split('.').next())
        .unwrap_or("-")
        .to_string();
    let recent_balls = if commentary_recent.is_empty() {
        commentary_current.clone()
    } else {
        commentary_recent.clone()
    };
    Some(MatchLiveState {
        batters: Vec::new(),
        bowler: None,
        previous_bowlers: Vec::new(),
        current_over_balls: commentary_current,
        recent_balls,
        recent_balls_label: if commentary_recent.is_empty() {
            "Current over".to_string()
        } else {
            format_recent_balls_label(commentary_recent.len())
        },
        current_over_label: over_label,
        current_run_rate: "-".to_string(),
        required_run_rate: "-".to_string(),
    })
}

/// Score-line overs, e.g. "245/5 (45.3 Overs)" -> "45.3".
pub fn parse_overs_from_score_line(score_line: &str) -> String {
    let Some(open) = score_line.find('(') else {
        return "-".to_string();
    };
    let Some(close) = score_line[open..].find(')') else {
        return "-".to_string();
    };
    let inner = score_line[open + 1..open + close].trim();
    let lowered = inner.to_lowercase();
    let stripped = if let Some(pos) = lowered.find("over") {
        inner[..pos].trim_end()
    } else {
        inner
    };
    if stripped.is_empty() {
        "-".to_string()
    } else {
        stripped.to_string()
    }
}

/// Last-resort live state synthesized from the most recent innings rows when
/// no mini-score candidate survived.
pub fn derive_live_state_from_innings(innings: &[MatchInnings]) -> Option<MatchLiveState> {
    let active = innings
        .iter()
        .rev()
        .find(|i| !i.batsmen.is_empty() || !i.bowlers.is_empty())?;

    let likely_active: Vec<usize> = active
        .batsmen
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            let dismissal = b.dismissal.to_lowercase();
            dismissal.contains("not out")
                || dismissal.contains("batting")
                || dismissal.contains("retired hurt")
        })
        .map(|(i, _)| i)
        .collect();
    let source: Vec<usize> = if likely_active.is_empty() {
        (0..active.batsmen.len().min(2)).collect()
    } else {
        likely_active.into_iter().take(2).collect()
    };
    let batters: Vec<LiveBatter> = source
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            let row = &active.batsmen[idx];
            LiveBatter {
                id: format!("{}-{}", normalize_player_key(&row.name), i + 1),
                name: row.name.clone(),
                runs: row.runs.clone(),
                balls: row.balls.clone(),
                fours: row.fours.clone(),
                sixes: row.sixes.clone(),
                strike_rate: row.strike_rate.clone(),
                on_strike: i == 0,
            }
        })
        .collect();

    let bowlers: Vec<LiveBowler> = active
        .bowlers
        .iter()
        .enumerate()
        .map(|(i, row)| LiveBowler {
            id: format!("{}-{}", normalize_player_key(&row.name), i + 1),
            name: row.name.clone(),
            overs: row.overs.clone(),
            maidens: row.maidens.clone(),
            runs: row.runs.clone(),
            wickets: row.wickets.clone(),
            economy: row.economy.clone(),
        })
        .collect();
    let mut bowler_iter = bowlers.into_iter();
    let bowler = bowler_iter.next();
    let previous_bowlers: Vec<LiveBowler> = bowler_iter.collect();

    if batters.is_empty() && bowler.is_none() {
        return None;
    }
    Some(MatchLiveState {
        batters,
        bowler,
        previous_bowlers,
        current_over_balls: Vec::new(),
        recent_balls: Vec::new(),
        recent_balls_label: "Current over".to_string(),
        current_over_label: parse_overs_from_score_line(&active.score_line),
        current_run_rate: if active.run_rate.is_empty() {
            "-".to_string()
        } else {
            active.run_rate.clone()
        },
        required_run_rate: "-".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BallKind, MatchBatter, MatchBowler};
    use serde_json::json;

    fn mini_score(overs: &str) -> Value {
        json!({
            "batsmanStriker": {"batName": "Kohli", "batRuns": 57, "batBalls": 40},
            "batsmanNonStriker": {"batName": "Gill", "batRuns": 21},
            "bowlerStriker": {"bowlName": "Starc", "bowlOvs": "7.2", "bowlWkts": 1},
            "overs": overs,
            "crr": "6.52",
            "recentOvsStats": "1 4 | W 0 6",
        })
    }

    #[test]
    fn candidate_state_reads_probe_chains() {
        let state = parse_candidate_state(&mini_score("24.3"), &[]).expect("has content");
        assert_eq!(state.batters.len(), 2);
        assert!(state.batters[0].on_strike);
        assert!(!state.batters[1].on_strike);
        assert_eq!(state.bowler.as_ref().map(|b| b.name.as_str()), Some("Starc"));
        assert_eq!(state.current_over_label, "24.3");
        assert_eq!(state.current_run_rate, "6.52");
        // string over summary takes the last pipe segment
        assert_eq!(state.current_over_balls.len(), 3);
        assert_eq!(state.current_over_balls[0].kind, BallKind::Wicket);
    }

    #[test]
    fn duplicate_batters_are_deduped() {
        let candidate = json!({
            "striker": {"name": "Head", "runs": 10},
            "currentBatters": [{"name": "HEAD"}, {"name": "Smith"}],
        });
        let batters = to_live_batters(&candidate);
        assert_eq!(batters.len(), 2);
        assert_eq!(batters[0].name, "Head");
    }

    #[test]
    fn bat_team_card_only_supplies_active_batters() {
        let candidate = json!({"batTeam": {"batsmen": [
            {"batName": "Latham", "outDesc": "c Smith b Starc"},
            {"batName": "Conway", "outDesc": "batting"},
            {"batName": "Mitchell", "outDesc": "not out"},
            {"batName": "Phillips", "outDesc": ""},
        ]}});
        let batters = to_live_batters(&candidate);
        assert_eq!(batters.len(), 2);
        assert_eq!(batters[0].name, "Conway");
        assert!(batters[0].on_strike);
        assert_eq!(batters[1].name, "Mitchell");
    }

    #[test]
    fn preference_is_monotone_in_completeness() {
        let sparse = parse_candidate_state(&json!({"bowler": {"bowlName": "Ashwin"}}), &[]);
        let rich = parse_candidate_state(&mini_score("10"), &[]);
        assert!(sparse.is_some() && rich.is_some());
        let preferred = pick_preferred_live_state(sparse.clone(), rich.clone());
        assert_eq!(
            preferred.as_ref().map(|s| s.batters.len()),
            rich.as_ref().map(|s| s.batters.len())
        );
        // ties keep the incumbent
        let kept = pick_preferred_live_state(rich.clone(), rich);
        assert!(kept.is_some());
    }

    #[test]
    fn html_candidates_prefer_the_mini_score() {
        let html = format!(
            r#"<script>"miniScore":{} other "inningsScoreList":[{{"overs":"12"}}]</script>"#,
            mini_score("24.3")
        );
        let state = parse_live_state_from_html(&html).expect("live state");
        assert_eq!(state.batters.len(), 2);
    }

    #[test]
    fn commentary_back_fills_empty_ball_lists() {
        let payload = json!({
            "miniScore": {
                "batsmanStriker": {"batName": "Rahul", "batRuns": 33},
                "bowlerStriker": {"bowlName": "Rabada"},
                "crr": "5.10",
            },
            "commentaryList": [
                {"overNumber": 11, "ballNbr": 1, "runsScored": 1},
                {"overNumber": 11, "ballNbr": 2, "event": "FOUR"},
            ],
        });
        let state = parse_live_state_from_commentary_payload(&payload).expect("state");
        assert_eq!(state.current_over_balls.len(), 2);
        assert_eq!(state.recent_balls.len(), 2);
        assert_eq!(state.recent_balls_label, "Last 2 balls");
    }

    #[test]
    fn commentary_without_mini_score_still_yields_balls() {
        let payload = json!({"comm_lines": [
            {"overNumber": 3, "ballNbr": 6, "event": "SIX"},
        ]});
        let state = parse_live_state_from_commentary_payload(&payload).expect("state");
        assert!(state.batters.is_empty());
        assert_eq!(state.current_over_balls.len(), 1);
        assert_eq!(state.current_over_balls[0].label, "3.1");
        assert_eq!(state.recent_balls_label, "Last 1 balls");
    }

    #[test]
    fn innings_rows_synthesize_a_last_resort_state() {
        let innings = vec![MatchInnings {
            innings_id: "1".to_string(),
            batting_team: "India".to_string(),
            bowling_team: "Australia".to_string(),
            score_line: "245/5 (45.3 Overs)".to_string(),
            run_rate: "5.38".to_string(),
            extras_line: "-".to_string(),
            batsmen: vec![
                MatchBatter {
                    name: "Jadeja".to_string(),
                    runs: "40".to_string(),
                    balls: "38".to_string(),
                    fours: "3".to_string(),
                    sixes: "1".to_string(),
                    strike_rate: "105.26".to_string(),
                    dismissal: "not out".to_string(),
                },
                MatchBatter {
                    name: "Kohli".to_string(),
                    runs: "88".to_string(),
                    balls: "90".to_string(),
                    fours: "9".to_string(),
                    sixes: "0".to_string(),
                    strike_rate: "97.78".to_string(),
                    dismissal: "c Carey b Starc".to_string(),
                },
            ],
            bowlers: vec![MatchBowler {
                name: "Starc".to_string(),
                overs: "9.3".to_string(),
                maidens: "0".to_string(),
                runs: "52".to_string(),
                wickets: "2".to_string(),
                economy: "5.47".to_string(),
                wides: "1".to_string(),
                no_balls: "0".to_string(),
            }],
            fall_of_wickets: Vec::new(),
            yet_to_bat: Vec::new(),
        }];
        let state = derive_live_state_from_innings(&innings).expect("state");
        assert_eq!(state.batters.len(), 1);
        assert_eq!(state.batters[0].name, "Jadeja");
        assert_eq!(state.current_over_label, "45.3");
        assert_eq!(state.current_run_rate, "5.38");
    }
}
