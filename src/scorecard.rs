//! Full scorecard assembly from a scorecard page.
//!
//! A scorecard page can embed several `scoreCard` arrays (current match,
//! related matches, stale hydration copies). The one whose team names best
//! match the expected teams wins. Team scores come from the chosen scorecard
//! first, then the list-page summary, then a "Yet to bat" inference.

use serde_json::Value;

use crate::json_extract::{
    pick_all_arrays_by_key, pick_all_objects_by_key, pick_bool, pick_text, stat_text, value_text,
};
use crate::match_links::{get_short_name, parse_title_meta};
use crate::overs::{format_overs_label, format_run_rate, format_start_date, normalize_overs_value};
use crate::players::{fallback_players_from_raw_innings, merge_team_players, to_team_players};
use crate::state::{MatchBatter, MatchBowler, MatchDetailData, MatchInnings, TeamSnapshot};
use crate::status::pick_best_status;
use crate::summaries::MatchSummary;
use crate::team_flags::get_team_flag_url;
use crate::text::{first_digit_run, normalize_team_key, safe_text};

fn by_numeric_suffix(a: &str, b: &str) -> std::cmp::Ordering {
    let num_a = first_digit_run(a).and_then(|run| run.parse::<i64>().ok());
    let num_b = first_digit_run(b).and_then(|run| run.parse::<i64>().ok());
    match (num_a, num_b) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        _ => a.cmp(b),
    }
}

fn sorted_entries(data: Option<&Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<(&String, &Value)> = match data {
        Some(Value::Object(map)) => map.iter().collect(),
        _ => Vec::new(),
    };
    entries.sort_by(|a, b| by_numeric_suffix(a.0, b.0));
    entries
}

fn stat_number(value: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match value.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                return if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                };
            }
            Some(_) => return f64::NAN,
        }
    }
    0.0
}

/// Whether a batsmen-table row describes someone who actually batted.
fn should_include_batter(player: &Value) -> bool {
    let dismissal = pick_text(player, &["outDesc"])
        .unwrap_or_default()
        .to_lowercase();
    for marker in ["did not bat", "dnb", "yet to bat", "to bat"] {
        if dismissal.contains(marker) {
            return false;
        }
    }
    let active = ["runs", "balls", "fours", "sixes"]
        .iter()
        .any(|key| stat_number(player, &[key]) > 0.0);
    active || !dismissal.is_empty()
}

/// Loose equality for team names across long names, short names, and
/// partial containment. Short keys are too ambiguous for containment.
pub fn team_names_likely_match(innings_team_name: &str, team_name: &str, team_short_name: &str) -> bool {
    let innings_key = normalize_team_key(innings_team_name);
    let team_key = normalize_team_key(team_name);
    let short_key = normalize_team_key(team_short_name);
    if innings_key.is_empty() {
        return false;
    }
    innings_key == team_key
        || innings_key == short_key
        || (team_key.len() > 3
            && (innings_key.contains(&team_key) || team_key.contains(&innings_key)))
        || (short_key.len() > 1
            && (innings_key.contains(&short_key) || short_key.contains(&innings_key)))
}

fn add_score_for_team(runs_by_team: &mut Vec<(String, Vec<String>)>, team_name: &str, score: &str) {
    let key = normalize_team_key(team_name);
    if key.is_empty() {
        return;
    }
    match runs_by_team.iter_mut().find(|(k, _)| *k == key) {
        None => runs_by_team.push((key, vec![score.to_string()])),
        Some((_, scores)) => scores.push(score.to_string()),
    }
}

fn format_team_scores_from_scorecard(score_card: &[Value]) -> Vec<(String, String)> {
    let mut runs_by_team: Vec<(String, Vec<String>)> = Vec::new();
    for innings in score_card {
        let details = innings.get("batTeamDetails");
        let team_name = details
            .and_then(|d| pick_text(d, &["batTeamName"]))
            .unwrap_or_default();
        let team_short_name = details
            .and_then(|d| pick_text(d, &["batTeamShortName"]))
            .unwrap_or_default();

        let score_details = innings.get("scoreDetails");
        let runs = score_details.map_or("-".to_string(), |d| stat_text(d, &["runs"]));
        let wickets = score_details.map_or("-".to_string(), |d| stat_text(d, &["wickets"]));
        let overs = score_details.and_then(|d| d.get("overs")).and_then(value_text);
        let score = format!(
            "{runs}/{wickets} ({})",
            format_overs_label(overs.as_deref())
        );

        if !team_name.is_empty() {
            add_score_for_team(&mut runs_by_team, &team_name, &score);
        }
        if !team_short_name.is_empty() && team_short_name != team_name {
            add_score_for_team(&mut runs_by_team, &team_short_name, &score);
        }
    }
    runs_by_team
        .into_iter()
        .map(|(key, scores)| (key, scores.join(" & ")))
        .collect()
}

fn get_score_for_team(
    team_score_map: &[(String, String)],
    team_name: &str,
    team_short_name: &str,
) -> String {
    let direct_keys: Vec<String> = [normalize_team_key(team_name), normalize_team_key(team_short_name)]
        .into_iter()
        .filter(|key| !key.is_empty())
        .collect();

    for key in &direct_keys {
        if let Some((_, score)) = team_score_map.iter().find(|(k, _)| k == key) {
            return score.clone();
        }
    }
    for key in &direct_keys {
        if key.len() < 3 {
            continue;
        }
        let fallback = team_score_map.iter().find(|(candidate, _)| {
            candidate.contains(key.as_str()) || (key.len() > 4 && key.contains(candidate.as_str()))
        });
        if let Some((_, score)) = fallback
            && !score.is_empty()
        {
            return score.clone();
        }
    }
    String::new()
}

fn batting_team_of(innings: Option<&Value>) -> String {
    let details = innings.and_then(|i| i.get("batTeamDetails"));
    details
        .and_then(|d| pick_text(d, &["batTeamName"]))
        .or_else(|| details.and_then(|d| pick_text(d, &["batTeamShortName"])))
        .unwrap_or_default()
}

/// "Yet to bat" only when exactly one innings exists and it belongs to the
/// other team.
fn infer_yet_to_bat_score(score_card: &[Value], team_name: &str, team_short_name: &str) -> String {
    if score_card.len() != 1 {
        return String::new();
    }
    let batting_team_name = batting_team_of(score_card.first());
    if batting_team_name.is_empty() {
        return String::new();
    }
    if team_names_likely_match(&batting_team_name, team_name, team_short_name) {
        String::new()
    } else {
        "Yet to bat".to_string()
    }
}

fn scorecard_team_match_score(score_card: &[Value], team_names: &[String]) -> i64 {
    let targets: Vec<String> = team_names
        .iter()
        .map(|team| normalize_team_key(team))
        .filter(|team| team.len() > 1)
        .collect();
    if targets.is_empty() {
        return score_card.len() as i64;
    }
    let mut score = score_card.len() as i64;
    for innings in score_card {
        let bat = innings.get("batTeamDetails");
        let bowl = innings.get("bowlTeamDetails");
        let keys: Vec<String> = [
            bat.and_then(|d| pick_text(d, &["batTeamName"])),
            bat.and_then(|d| pick_text(d, &["batTeamShortName"])),
            bowl.and_then(|d| pick_text(d, &["bowlTeamName"])),
            bowl.and_then(|d| pick_text(d, &["bowlTeamShortName"])),
        ]
        .into_iter()
        .flatten()
        .map(|name| normalize_team_key(&name))
        .filter(|key| !key.is_empty())
        .collect();
        for candidate in &keys {
            if targets.iter().any(|target| {
                candidate == target
                    || (target.len() > 3 && candidate.contains(target.as_str()))
                    || (candidate.len() > 3 && target.contains(candidate.as_str()))
            }) {
                score += 2;
            }
        }
    }
    score
}

fn pick_best_score_card(candidates: Vec<Vec<Value>>, team_names: &[String]) -> Vec<Value> {
    let mut best: Vec<Value> = Vec::new();
    let mut best_score = -1;
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        let score = scorecard_team_match_score(&candidate, team_names);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    best
}

fn to_team_snapshot(name: &str, short_name: &str, score: &str) -> TeamSnapshot {
    TeamSnapshot {
        name: name.to_string(),
        short_name: short_name.to_string(),
        score: score.to_string(),
        flag_url: get_team_flag_url(name, short_name, 48),
    }
}

fn to_display_batsmen(batsmen_data: Option<&Value>) -> Vec<MatchBatter> {
    sorted_entries(batsmen_data)
        .into_iter()
        .filter(|(_, player)| should_include_batter(player))
        .map(|(_, player)| {
            let mut tags: Vec<&str> = Vec::new();
            if pick_bool(player, &["isCaptain"]) {
                tags.push("c");
            }
            if pick_bool(player, &["isKeeper"]) {
                tags.push("wk");
            }
            let base_name =
                pick_text(player, &["batName"]).unwrap_or_else(|| "Unknown".to_string());
            let name = if tags.is_empty() {
                base_name
            } else {
                format!("{base_name} ({})", tags.join(", "))
            };
            MatchBatter {
                name,
                runs: stat_text(player, &["runs"]),
                balls: stat_text(player, &["balls"]),
                fours: stat_text(player, &["fours"]),
                sixes: stat_text(player, &["sixes"]),
                strike_rate: stat_text(player, &["strikeRate"]),
                dismissal: stat_text(player, &["outDesc"]),
            }
        })
        .collect()
}

fn to_display_bowlers(bowlers_data: Option<&Value>) -> Vec<MatchBowler> {
    sorted_entries(bowlers_data)
        .into_iter()
        .map(|(_, player)| {
            let overs_raw = pick_text(player, &["overs"]).unwrap_or_default();
            MatchBowler {
                name: pick_text(player, &["bowlName"]).unwrap_or_else(|| "Unknown".to_string()),
                overs: normalize_overs_value(&overs_raw).unwrap_or_else(|| "-".to_string()),
                maidens: stat_text(player, &["maidens"]),
                runs: stat_text(player, &["runs"]),
                wickets: stat_text(player, &["wickets"]),
                economy: stat_text(player, &["economy"]),
                wides: stat_text(player, &["wides"]),
                no_balls: stat_text(player, &["no_balls"]),
            }
        })
        .collect()
}

fn to_fall_of_wickets(wickets_data: Option<&Value>) -> Vec<String> {
    sorted_entries(wickets_data)
        .into_iter()
        .map(|(_, wicket)| {
            let number = pick_text(wicket, &["wktNbr"]).unwrap_or_default();
            let batter =
                pick_text(wicket, &["batName"]).unwrap_or_else(|| "Unknown batter".to_string());
            let score = stat_text(wicket, &["wktRuns"]);
            let over_raw = pick_text(wicket, &["wktOver"]).unwrap_or_default();
            let over = normalize_overs_value(&over_raw).unwrap_or_else(|| "-".to_string());
            format!("{number}. {batter} - {score} ({over})")
        })
        .collect()
}

fn extras_line_of(innings: &Value) -> String {
    let Some(extras) = innings.get("extrasData").filter(|e| e.is_object()) else {
        return "-".to_string();
    };
    let field = |key: &str| pick_text(extras, &[key]).unwrap_or_else(|| "0".to_string());
    format!(
        "Total {} (b {}, lb {}, w {}, nb {}, p {})",
        field("total"),
        field("byes"),
        field("legByes"),
        field("wides"),
        field("noBalls"),
        field("penalty"),
    )
}

fn to_display_innings(score_card: &[Value]) -> Vec<MatchInnings> {
    score_card
        .iter()
        .map(|entry| {
            let score_details = entry.get("scoreDetails");
            let runs = score_details.map_or("-".to_string(), |d| stat_text(d, &["runs"]));
            let wickets = score_details.map_or("-".to_string(), |d| stat_text(d, &["wickets"]));
            let runs_raw = score_details.and_then(|d| d.get("runs")).and_then(value_text);
            let overs_raw = score_details.and_then(|d| d.get("overs")).and_then(value_text);
            let score_line = format!(
                "{runs}/{wickets} ({})",
                format_overs_label(overs_raw.as_deref())
            );

            let bat = entry.get("batTeamDetails");
            let bowl = entry.get("bowlTeamDetails");
            MatchInnings {
                innings_id: stat_text(entry, &["inningsId"]),
                batting_team: bat
                    .and_then(|d| pick_text(d, &["batTeamName", "batTeamShortName"]))
                    .unwrap_or_else(|| "Batting Team".to_string()),
                bowling_team: bowl
                    .and_then(|d| pick_text(d, &["bowlTeamName", "bowlTeamShortName"]))
                    .unwrap_or_else(|| "Bowling Team".to_string()),
                score_line,
                run_rate: format_run_rate(runs_raw.as_deref(), overs_raw.as_deref()),
                extras_line: extras_line_of(entry),
                batsmen: to_display_batsmen(bat.and_then(|d| d.get("batsmenData"))),
                bowlers: to_display_bowlers(bowl.and_then(|d| d.get("bowlersData"))),
                fall_of_wickets: to_fall_of_wickets(entry.get("wicketsData")),
                yet_to_bat: Vec::new(),
            }
        })
        .collect()
}

fn start_date_of(match_header: Option<&Value>, fallback_summary: Option<&MatchSummary>) -> Option<i64> {
    match match_header.and_then(|h| h.get("matchStartTimestamp")) {
        Some(value) if !value.is_null() => match value {
            Value::Number(n) => n.as_f64().map(|f| f as i64),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0)
                } else {
                    trimmed.parse::<f64>().ok().map(|f| f as i64)
                }
            }
            _ => None,
        },
        _ => fallback_summary.and_then(|s| s.start_date),
    }
}

/// Builds the full detail view from a scorecard page, with list-page summary
/// and link title as fallbacks for the header fields.
pub fn parse_scorecard_details(
    id: u64,
    scorecard_html: &str,
    fallback_summary: Option<&MatchSummary>,
    fallback_title: Option<&str>,
) -> MatchDetailData {
    let header_candidates = pick_all_objects_by_key(scorecard_html, "matchHeader");
    let match_header = header_candidates
        .iter()
        .find(|entry| {
            entry
                .get("matchId")
                .and_then(value_text)
                .and_then(|text| text.parse::<u64>().ok())
                == Some(id)
        })
        .or_else(|| header_candidates.first());
    let info_candidates = pick_all_objects_by_key(scorecard_html, "matchInfo");
    let match_info = info_candidates.first();

    let score_card_candidates: Vec<Vec<Value>> =
        pick_all_arrays_by_key(scorecard_html, "scoreCard")
            .into_iter()
            .filter_map(|value| match value {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .collect();

    let header_team = |key: &str| {
        match_header
            .and_then(|h| h.get(key))
            .and_then(|t| pick_text(t, &["name"]))
            .unwrap_or_default()
    };
    let expected_team_names: Vec<String> = [
        header_team("team1"),
        header_team("team2"),
        safe_text(fallback_summary.and_then(|s| s.team1.as_deref())),
        safe_text(fallback_summary.and_then(|s| s.team2.as_deref())),
    ]
    .into_iter()
    .filter(|name| !name.is_empty())
    .collect();
    let score_card = pick_best_score_card(score_card_candidates, &expected_team_names);

    let fallback_name = |value: Option<&str>, default: &str| {
        let text = safe_text(value);
        if text.is_empty() { default.to_string() } else { text }
    };
    let team1_name = {
        let header = header_team("team1");
        if header.is_empty() {
            fallback_name(fallback_summary.and_then(|s| s.team1.as_deref()), "Team 1")
        } else {
            header
        }
    };
    let team2_name = {
        let header = header_team("team2");
        if header.is_empty() {
            fallback_name(fallback_summary.and_then(|s| s.team2.as_deref()), "Team 2")
        } else {
            header
        }
    };

    let header_short = |key: &str| {
        match_header
            .and_then(|h| h.get(key))
            .and_then(|t| pick_text(t, &["shortName"]))
            .unwrap_or_default()
    };
    let team1_short = [
        header_short("team1"),
        safe_text(fallback_summary.and_then(|s| s.team1_short_name.as_deref())),
    ]
    .into_iter()
    .find(|name| !name.is_empty())
    .unwrap_or_else(|| get_short_name(&team1_name));
    let team2_short = [
        header_short("team2"),
        safe_text(fallback_summary.and_then(|s| s.team2_short_name.as_deref())),
    ]
    .into_iter()
    .find(|name| !name.is_empty())
    .unwrap_or_else(|| get_short_name(&team2_name));

    let header_venue = match_header.and_then(|h| h.get("venue"));
    let venue_parts: Vec<String> = ["name", "city", "country"]
        .iter()
        .filter_map(|key| header_venue.and_then(|v| pick_text(v, &[key])))
        .collect();
    let venue = if venue_parts.is_empty() {
        safe_text(fallback_summary.and_then(|s| s.venue.as_deref()))
    } else {
        venue_parts.join(", ")
    };

    let toss_results = match_header.and_then(|h| h.get("tossResults"));
    let toss = match (
        toss_results.and_then(|t| pick_text(t, &["tossWinnerName"])),
        toss_results.and_then(|t| pick_text(t, &["decision"])),
    ) {
        (Some(winner), Some(decision)) => format!("{winner} opted to {decision}"),
        _ => "-".to_string(),
    };

    let team_score_map = format_team_scores_from_scorecard(&score_card);
    let mut team1_score = get_score_for_team(&team_score_map, &team1_name, &team1_short);
    let mut team2_score = get_score_for_team(&team_score_map, &team2_name, &team2_short);
    if team1_score.is_empty() {
        team1_score = safe_text(fallback_summary.and_then(|s| s.team1_score.as_deref()));
    }
    if team1_score.is_empty() {
        team1_score = infer_yet_to_bat_score(&score_card, &team1_name, &team1_short);
    }
    if team2_score.is_empty() {
        team2_score = safe_text(fallback_summary.and_then(|s| s.team2_score.as_deref()));
    }
    if team2_score.is_empty() {
        team2_score = infer_yet_to_bat_score(&score_card, &team2_name, &team2_short);
    }

    // A lone innings sometimes gets attributed to both sides through the
    // summary fallback.
    if score_card.len() == 1
        && !team1_score.is_empty()
        && !team2_score.is_empty()
        && team1_score == team2_score
    {
        let batting_team_name = batting_team_of(score_card.first());
        if team_names_likely_match(&batting_team_name, &team1_name, &team1_short) {
            team2_score = infer_yet_to_bat_score(&score_card, &team2_name, &team2_short);
        } else if team_names_likely_match(&batting_team_name, &team2_name, &team2_short) {
            team1_score = infer_yet_to_bat_score(&score_card, &team1_name, &team1_short);
        }
    }
    if team1_score.is_empty() {
        team1_score = "-".to_string();
    }
    if team2_score.is_empty() {
        team2_score = "-".to_string();
    }

    let innings = to_display_innings(&score_card);

    let title_meta = parse_title_meta(fallback_title.unwrap_or(""));
    let header_desc = match_header.and_then(|h| pick_text(h, &["matchDescription"]));
    let title = match fallback_title {
        Some(text) => text.to_string(),
        None => match &header_desc {
            Some(desc) => format!("{team1_name} vs {team2_name}, {desc}"),
            None => format!("{team1_name} vs {team2_name}"),
        },
    };

    let header_players = |key: &str| {
        to_team_players(match_header.and_then(|h| h.get(key)).and_then(|t| t.get("playerDetails")))
    };
    let info_players = |key: &str| {
        to_team_players(match_info.and_then(|i| i.get(key)).and_then(|t| t.get("playerDetails")))
    };
    let team1_players = merge_team_players(
        &merge_team_players(&header_players("team1"), &info_players("team1")),
        &fallback_players_from_raw_innings(&score_card, &team1_name),
    );
    let team2_players = merge_team_players(
        &merge_team_players(&header_players("team2"), &info_players("team2")),
        &fallback_players_from_raw_innings(&score_card, &team2_name),
    );

    let pick_field = |candidates: [Option<String>; 3]| {
        candidates
            .into_iter()
            .flatten()
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| "-".to_string())
    };

    MatchDetailData {
        id,
        title,
        series: pick_field([
            match_header.and_then(|h| pick_text(h, &["seriesDesc"])),
            fallback_summary.and_then(|s| s.series_name.clone()),
            None,
        ]),
        match_desc: pick_field([
            header_desc.clone(),
            fallback_summary.and_then(|s| s.match_desc.clone()),
            title_meta.match_desc.clone(),
        ]),
        format: pick_field([
            match_header.and_then(|h| pick_text(h, &["matchFormat"])),
            fallback_summary.and_then(|s| s.match_format.clone()),
            None,
        ]),
        venue: if venue.is_empty() { "-".to_string() } else { venue },
        start_time: format_start_date(start_date_of(match_header, fallback_summary)),
        status: pick_best_status(&[
            match_header
                .and_then(|h| pick_text(h, &["status"]))
                .as_deref(),
            fallback_summary.and_then(|s| s.status.as_deref()),
            title_meta.status.as_deref(),
            match_header
                .and_then(|h| pick_text(h, &["state"]))
                .as_deref(),
            fallback_summary.and_then(|s| s.state.as_deref()),
        ]),
        state: pick_field([
            match_header.and_then(|h| pick_text(h, &["state"])),
            fallback_summary.and_then(|s| s.state.clone()),
            None,
        ]),
        toss,
        team1: to_team_snapshot(&team1_name, &team1_short, &team1_score),
        team2: to_team_snapshot(&team2_name, &team2_short, &team2_score),
        innings,
        team1_players,
        team2_players,
        live_state: None,
        win_prediction: None,
    }
}
