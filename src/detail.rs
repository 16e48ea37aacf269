//! Match detail assembly: scorecard page plus live page and commentary JSON.
//!
//! The scorecard page is the backbone. The live page and the two commentary
//! endpoints only ever improve on it, so each of those fetches is allowed to
//! fail without failing the whole detail.

use anyhow::{anyhow, Error, Result};
use serde_json::Value;

use crate::http::{fetch_html, fetch_json, live_matches_url, upcoming_matches_url, CRICBUZZ_BASE_URL};
use crate::live_state::{
    derive_live_state_from_innings, parse_live_state_from_commentary_payload,
    parse_live_state_from_html, pick_preferred_live_state,
};
use crate::match_links::{
    build_live_url, extract_match_id_from_url, parse_match_links, to_scorecard_url, MatchLink,
};
use crate::matches::build_match_item_from_summary;
use crate::players::{merge_team_players, parse_team_players_from_commentary_payload};
use crate::scorecard::{parse_scorecard_details, team_names_likely_match};
use crate::state::{MatchDetailData, MatchInnings, MatchStatusType, TeamPlayer};
use crate::status::derive_status_type;
use crate::summaries::{parse_embedded_summaries, MatchSummary};
use crate::text::normalize_player_key;
use crate::win_prediction::parse_win_prediction_from_html;

fn commentary_url(match_id: u64) -> String {
    format!("{CRICBUZZ_BASE_URL}/match-api/{match_id}/commentary.json")
}

fn commentary_full_url(match_id: u64) -> String {
    format!("{CRICBUZZ_BASE_URL}/match-api/{match_id}/commentary-full.json")
}

fn batting_squad_for_innings<'a>(
    innings: &MatchInnings,
    team1_name: &str,
    team2_name: &str,
    team1_players: &'a [TeamPlayer],
    team2_players: &'a [TeamPlayer],
) -> &'a [TeamPlayer] {
    if team_names_likely_match(&innings.batting_team, team1_name, "") {
        team1_players
    } else if team_names_likely_match(&innings.batting_team, team2_name, "") {
        team2_players
    } else {
        &[]
    }
}

/// Fills each innings' yet-to-bat list from the matching squad, skipping
/// substitutes and anyone who already batted.
pub fn add_yet_to_bat(
    innings: &mut [MatchInnings],
    team1_name: &str,
    team2_name: &str,
    team1_players: &[TeamPlayer],
    team2_players: &[TeamPlayer],
) {
    for entry in innings.iter_mut() {
        let squad =
            batting_squad_for_innings(entry, team1_name, team2_name, team1_players, team2_players);
        if squad.is_empty() {
            continue;
        }

        let batted: Vec<String> = entry
            .batsmen
            .iter()
            .map(|batter| normalize_player_key(&batter.name))
            .collect();
        let mut seen: Vec<String> = Vec::new();
        let mut yet_to_bat: Vec<String> = Vec::new();

        for player in squad {
            if player.substitute {
                continue;
            }
            let key = normalize_player_key(&player.name);
            if key.is_empty() || batted.contains(&key) || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            yet_to_bat.push(player.name.clone());
        }
        entry.yet_to_bat = yet_to_bat;
    }
}

fn synthetic_match_link(summary: &MatchSummary) -> MatchLink {
    MatchLink {
        title: build_match_item_from_summary(summary).title,
        url: build_live_url(
            summary.match_id,
            summary.team1.as_deref().unwrap_or("team-1"),
            summary.team2.as_deref().unwrap_or("team-2"),
            summary.match_desc.as_deref().unwrap_or(""),
        ),
    }
}

fn first_fetched_html(candidates: &[String]) -> (Option<String>, Option<Error>) {
    let mut last_error = None;
    for url in candidates {
        match fetch_html(url) {
            Ok(html) => return (Some(html), last_error),
            Err(err) => last_error = Some(err),
        }
    }
    (None, last_error)
}

/// Assembles the full detail from already-fetched sources. The scorecard HTML
/// is mandatory; the live page and commentary payloads only ever improve on it.
pub fn build_match_detail(
    match_id: u64,
    scorecard_html: &str,
    live_page_html: Option<&str>,
    commentary_payloads: &[Value],
    fallback_summary: Option<&MatchSummary>,
    fallback_title: Option<&str>,
) -> MatchDetailData {
    let mut detail =
        parse_scorecard_details(match_id, scorecard_html, fallback_summary, fallback_title);

    let mut live_state = parse_live_state_from_html(scorecard_html);
    let mut team1_players = detail.team1_players.clone();
    let mut team2_players = detail.team2_players.clone();

    if let Some(html) = live_page_html {
        live_state = pick_preferred_live_state(live_state, parse_live_state_from_html(html));
    }

    let has_score = !detail.team1.score.is_empty() || !detail.team2.score.is_empty();
    let is_live_match =
        derive_status_type(&detail.status, &detail.state, &detail.title, has_score)
            == MatchStatusType::Live;

    for payload in commentary_payloads {
        if is_live_match {
            live_state = pick_preferred_live_state(
                live_state,
                parse_live_state_from_commentary_payload(payload),
            );
        }
        let extracted = parse_team_players_from_commentary_payload(payload);
        team1_players = merge_team_players(&team1_players, &extracted.team1);
        team2_players = merge_team_players(&team2_players, &extracted.team2);
    }

    if is_live_match {
        live_state =
            pick_preferred_live_state(live_state, derive_live_state_from_innings(&detail.innings));
    }

    let team1_name = detail.team1.name.clone();
    let team2_name = detail.team2.name.clone();
    add_yet_to_bat(
        &mut detail.innings,
        &team1_name,
        &team2_name,
        &team1_players,
        &team2_players,
    );

    if detail.win_prediction.is_none() {
        detail.win_prediction =
            parse_win_prediction_from_html(scorecard_html, &detail.team1, &detail.team2);
    }

    detail.team1_players = team1_players;
    detail.team2_players = team2_players;
    detail.live_state = live_state;
    detail
}

/// Full detail for one match. Fails only when no scorecard rendition could be
/// fetched at all.
pub fn fetch_match_detail(match_id: u64) -> Result<MatchDetailData> {
    let live_html = fetch_html(&live_matches_url()).unwrap_or_default();
    let upcoming_html = fetch_html(&upcoming_matches_url()).unwrap_or_default();

    let mut all_links = Vec::new();
    if !live_html.is_empty() {
        all_links.extend(parse_match_links(&live_html));
    }
    if !upcoming_html.is_empty() {
        all_links.extend(parse_match_links(&upcoming_html));
    }
    let match_link = all_links
        .into_iter()
        .find(|link| extract_match_id_from_url(&link.url) == Some(match_id));

    let live_summaries = if live_html.is_empty() {
        Vec::new()
    } else {
        parse_embedded_summaries(&live_html)
    };
    let upcoming_summaries = if upcoming_html.is_empty() {
        Vec::new()
    } else {
        parse_embedded_summaries(&upcoming_html)
    };
    let fallback_summary = live_summaries
        .iter()
        .find(|summary| summary.match_id == match_id)
        .or_else(|| {
            upcoming_summaries
                .iter()
                .find(|summary| summary.match_id == match_id)
        });

    let synthetic_link = fallback_summary.map(synthetic_match_link);

    let mut scorecard_candidates = Vec::new();
    if let Some(link) = &match_link {
        scorecard_candidates.push(to_scorecard_url(&link.url));
    }
    if let Some(link) = &synthetic_link {
        scorecard_candidates.push(to_scorecard_url(&link.url));
    }
    scorecard_candidates.push(format!("{CRICBUZZ_BASE_URL}/live-cricket-scorecard/{match_id}"));

    let (scorecard_html, last_error) = first_fetched_html(&scorecard_candidates);
    let Some(scorecard_html) = scorecard_html else {
        return Err(
            last_error.unwrap_or_else(|| anyhow!("Could not fetch scorecard details."))
        );
    };

    let fallback_title = match_link
        .as_ref()
        .map(|link| link.title.clone())
        .or_else(|| synthetic_link.as_ref().map(|link| link.title.clone()));

    let mut live_page_candidates = Vec::new();
    if let Some(link) = &match_link {
        live_page_candidates.push(link.url.clone());
    }
    if let Some(link) = &synthetic_link {
        live_page_candidates.push(link.url.clone());
    }
    live_page_candidates.push(format!("{CRICBUZZ_BASE_URL}/live-cricket-scores/{match_id}"));
    let (live_page_html, _) = first_fetched_html(&live_page_candidates);

    let commentary_payloads: Vec<Value> =
        [commentary_url(match_id), commentary_full_url(match_id)]
            .iter()
            .filter_map(|url| fetch_json(url).ok())
            .collect();

    Ok(build_match_detail(
        match_id,
        &scorecard_html,
        live_page_html.as_deref(),
        &commentary_payloads,
        fallback_summary,
        fallback_title.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MatchBatter;

    fn innings(batting_team: &str, batsmen: &[&str]) -> MatchInnings {
        MatchInnings {
            innings_id: "1".to_string(),
            batting_team: batting_team.to_string(),
            bowling_team: String::new(),
            score_line: String::new(),
            run_rate: String::new(),
            extras_line: String::new(),
            batsmen: batsmen
                .iter()
                .map(|name| MatchBatter {
                    name: name.to_string(),
                    runs: "10".to_string(),
                    balls: "8".to_string(),
                    fours: "1".to_string(),
                    sixes: "0".to_string(),
                    strike_rate: "125.0".to_string(),
                    dismissal: "not out".to_string(),
                })
                .collect(),
            bowlers: Vec::new(),
            fall_of_wickets: Vec::new(),
            yet_to_bat: Vec::new(),
        }
    }

    fn player(name: &str, substitute: bool) -> TeamPlayer {
        TeamPlayer {
            id: name.to_lowercase(),
            name: name.to_string(),
            role: "Batter".to_string(),
            batting_style: String::new(),
            bowling_style: String::new(),
            captain: false,
            keeper: false,
            substitute,
            image_url: None,
        }
    }

    #[test]
    fn yet_to_bat_excludes_batted_and_substitutes() {
        let mut all = vec![innings("India", &["Rohit Sharma"])];
        let squad = vec![
            player("Rohit Sharma", false),
            player("Virat Kohli", false),
            player("Sub Fielder", true),
        ];
        add_yet_to_bat(&mut all, "India", "Australia", &squad, &[]);
        assert_eq!(all[0].yet_to_bat, vec!["Virat Kohli".to_string()]);
    }

    #[test]
    fn yet_to_bat_skips_innings_without_a_matching_squad() {
        let mut all = vec![innings("Zimbabwe", &["Someone"])];
        let squad = vec![player("Virat Kohli", false)];
        add_yet_to_bat(&mut all, "India", "Australia", &squad, &[]);
        assert!(all[0].yet_to_bat.is_empty());
    }

    #[test]
    fn yet_to_bat_dedupes_squad_entries() {
        let mut all = vec![innings("Australia", &[])];
        let squad = vec![
            player("Steve Smith", false),
            player("Steve  Smith", false),
            player("Pat Cummins", false),
        ];
        add_yet_to_bat(&mut all, "India", "Australia", &[], &squad);
        assert_eq!(
            all[0].yet_to_bat,
            vec!["Steve Smith".to_string(), "Pat Cummins".to_string()]
        );
    }

    #[test]
    fn commentary_endpoints_hang_off_the_match_api() {
        assert_eq!(
            commentary_url(133),
            "https://www.cricbuzz.com/match-api/133/commentary.json"
        );
        assert_eq!(
            commentary_full_url(133),
            "https://www.cricbuzz.com/match-api/133/commentary-full.json"
        );
    }
}
