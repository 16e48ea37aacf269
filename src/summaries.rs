//! Match summaries embedded in list-page HTML.
//!
//! List pages inline one `matchInfo` block per match, usually followed by a
//! `matchScore` block before the next match begins. Association is positional:
//! a score belongs to the info block it follows, within a bounded window.

use serde_json::Value;

use crate::json_extract::{extract_balanced, parse_escaped_json, pick_text, stat_text, value_text};
use crate::overs::format_overs_label;

const INFO_TOKENS: [&str; 2] = ["\\\"matchInfo\\\":{", "\"matchInfo\":{"];
const SCORE_TOKENS: [&str; 2] = ["\\\"matchScore\\\":{", "\"matchScore\":{"];

/// One match as the list pages describe it, before any detail fetch.
#[derive(Debug, Clone, Default)]
pub struct MatchSummary {
    pub match_id: u64,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub team1_short_name: Option<String>,
    pub team2_short_name: Option<String>,
    pub team1_score: Option<String>,
    pub team2_score: Option<String>,
    pub series_name: Option<String>,
    pub match_desc: Option<String>,
    pub match_format: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub venue: Option<String>,
    pub start_date: Option<i64>,
}

fn next_token(html: &str, from: usize, tokens: &[&str]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for token in tokens {
        if let Some(found) = html[from..].find(token) {
            let at = from + found;
            if best.is_none_or(|(b, _)| at < b) {
                best = Some((at, token.len()));
            }
        }
    }
    best
}

fn parse_start_date(info: &Value) -> Option<i64> {
    match info.get("startDate") {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_f64().map(|f| f as i64),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0)
            } else {
                trimmed.parse::<f64>().ok().map(|f| f as i64)
            }
        }
        _ => None,
    }
}

/// Joins the innings of one team's score object as "245/5 (45.3 Overs)",
/// multiple innings separated by " & ".
fn format_team_score(score: Option<&Value>) -> Option<String> {
    let map = match score {
        Some(Value::Object(map)) => map,
        _ => return None,
    };
    let innings: Vec<&Value> = map.values().filter(|entry| entry.is_object()).collect();
    if innings.is_empty() {
        return None;
    }
    let parts: Vec<String> = innings
        .iter()
        .map(|entry| {
            let runs = stat_text(entry, &["runs"]);
            let wickets = stat_text(entry, &["wickets"]);
            let overs = entry.get("overs").and_then(value_text);
            format!("{runs}/{wickets} ({})", format_overs_label(overs.as_deref()))
        })
        .collect();
    Some(parts.join(" & "))
}

fn venue_of(info: &Value) -> Option<String> {
    let venue_info = info.get("venueInfo")?;
    let parts: Vec<String> = ["ground", "city", "country"]
        .iter()
        .filter_map(|key| pick_text(venue_info, &[key]))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Walks every embedded `matchInfo` block and builds one summary per match
/// id. The first block for an id wins unless it lacked a team1 score and a
/// later block carries one.
pub fn parse_embedded_summaries(html: &str) -> Vec<MatchSummary> {
    let mut summaries: Vec<MatchSummary> = Vec::new();
    let mut cursor = 0;
    while let Some((token_index, token_len)) = next_token(html, cursor, &INFO_TOKENS) {
        cursor = token_index + token_len;
        let info_start = token_index + token_len - 1;
        let Some((info_body, info_end)) = extract_balanced(html, info_start) else {
            continue;
        };
        let Some(info) = parse_escaped_json(info_body) else {
            continue;
        };
        let Some(match_id) = info
            .get("matchId")
            .and_then(value_text)
            .and_then(|text| text.parse::<u64>().ok())
            .filter(|id| *id != 0)
        else {
            continue;
        };

        let window_end = match next_token(html, info_end, &INFO_TOKENS) {
            Some((next_index, _)) => next_index,
            None => (info_end + 4_000).min(html.len()),
        };
        let score = next_token(&html[..window_end], info_end, &SCORE_TOKENS)
            .and_then(|(score_index, score_len)| {
                extract_balanced(html, score_index + score_len - 1)
            })
            .and_then(|(body, _)| parse_escaped_json(body));

        let summary = MatchSummary {
            match_id,
            team1: info
                .get("team1")
                .and_then(|t| pick_text(t, &["teamName", "teamSName"])),
            team2: info
                .get("team2")
                .and_then(|t| pick_text(t, &["teamName", "teamSName"])),
            team1_short_name: info.get("team1").and_then(|t| pick_text(t, &["teamSName"])),
            team2_short_name: info.get("team2").and_then(|t| pick_text(t, &["teamSName"])),
            team1_score: format_team_score(
                score.as_ref().and_then(|s| s.get("team1Score")),
            ),
            team2_score: format_team_score(
                score.as_ref().and_then(|s| s.get("team2Score")),
            ),
            series_name: pick_text(&info, &["seriesName"]),
            match_desc: pick_text(&info, &["matchDesc"]),
            match_format: pick_text(&info, &["matchFormat"]),
            state: pick_text(&info, &["state"]),
            status: pick_text(&info, &["status"]),
            venue: venue_of(&info),
            start_date: parse_start_date(&info),
        };

        match summaries.iter_mut().find(|s| s.match_id == match_id) {
            None => summaries.push(summary),
            Some(existing) => {
                if existing.team1_score.is_none() && summary.team1_score.is_some() {
                    *existing = summary;
                }
            }
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_block_with_trailing_score() {
        let html = concat!(
            r#"x = "{\"matchInfo\":{\"matchId\":101,\"team1\":{\"teamName\":\"India\",\"teamSName\":\"IND\"},"#,
            r#"\"team2\":{\"teamSName\":\"AUS\"},\"seriesName\":\"Test Series\",\"state\":\"In Progress\","#,
            r#"\"status\":\"Day 2\",\"venueInfo\":{\"ground\":\"MCG\",\"city\":\"Melbourne\"},\"startDate\":\"1700000000000\"},"#,
            r#"\"matchScore\":{\"team1Score\":{\"inngs1\":{\"runs\":245,\"wickets\":5,\"overs\":45.3}}}}";"#,
        );
        let summaries = parse_embedded_summaries(html);
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.match_id, 101);
        assert_eq!(summary.team1.as_deref(), Some("India"));
        assert_eq!(summary.team2.as_deref(), Some("AUS"));
        assert_eq!(summary.team2_short_name.as_deref(), Some("AUS"));
        assert_eq!(summary.team1_score.as_deref(), Some("245/5 (45.3 Overs)"));
        assert_eq!(summary.team2_score, None);
        assert_eq!(summary.venue.as_deref(), Some("MCG, Melbourne"));
        assert_eq!(summary.start_date, Some(1_700_000_000_000));
    }

    #[test]
    fn score_past_next_info_block_is_not_associated() {
        let html = concat!(
            r#"{"matchInfo":{"matchId":1}}"#,
            r#" {"matchInfo":{"matchId":2},"matchScore":{"team1Score":{"inngs1":{"runs":10,"wickets":0,"overs":2}}}}"#,
        );
        let summaries = parse_embedded_summaries(html);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].team1_score, None);
        assert_eq!(
            summaries[1].team1_score.as_deref(),
            Some("10/0 (2 Overs)")
        );
    }

    #[test]
    fn later_block_with_score_replaces_scoreless_entry() {
        let html = concat!(
            r#"{"matchInfo":{"matchId":7,"state":"Preview"}}"#,
            " pad ",
            r#"{"matchInfo":{"matchId":7,"state":"In Progress"},"matchScore":{"team1Score":{"inngs1":{"runs":88,"wickets":3,"overs":"12.4"}}}}"#,
        );
        let summaries = parse_embedded_summaries(html);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].state.as_deref(), Some("In Progress"));
        assert_eq!(summaries[0].team1_score.as_deref(), Some("88/3 (12.4 Overs)"));
    }

    #[test]
    fn scored_entry_is_not_replaced() {
        let html = concat!(
            r#"{"matchInfo":{"matchId":7,"state":"In Progress"},"matchScore":{"team1Score":{"inngs1":{"runs":88,"wickets":3,"overs":12}}}}"#,
            " pad ",
            r#"{"matchInfo":{"matchId":7,"state":"Stumps"}}"#,
        );
        let summaries = parse_embedded_summaries(html);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].state.as_deref(), Some("In Progress"));
    }

    #[test]
    fn multi_innings_scores_join_with_ampersand() {
        let html = concat!(
            r#"{"matchInfo":{"matchId":9},"matchScore":"#,
            r#"{"team1Score":{"inngs1":{"runs":300,"wickets":10,"overs":90},"inngs2":{"runs":50,"wickets":2,"overs":"10.2"}}}}"#,
        );
        let summaries = parse_embedded_summaries(html);
        assert_eq!(
            summaries[0].team1_score.as_deref(),
            Some("300/10 (90 Overs) & 50/2 (10.2 Overs)")
        );
    }

    #[test]
    fn blocks_without_a_numeric_id_are_skipped() {
        let html = r#"{"matchInfo":{"matchId":"abc"}} {"matchInfo":{"state":"Preview"}}"#;
        assert!(parse_embedded_summaries(html).is_empty());
    }
}
