use std::fs;
use std::path::PathBuf;

use cricket_terminal::detail::build_match_detail;
use cricket_terminal::live_state::{
    parse_live_state_from_commentary_payload, parse_live_state_from_html,
};
use cricket_terminal::match_links::{extract_match_id_from_url, parse_match_links};
use cricket_terminal::matches::build_matches_data;
use cricket_terminal::players::parse_team_players_from_commentary_payload;
use cricket_terminal::scorecard::parse_scorecard_details;
use cricket_terminal::state::{BallKind, MatchStatusType, TeamSnapshot};
use cricket_terminal::summaries::parse_embedded_summaries;
use cricket_terminal::win_prediction::parse_win_prediction_from_html;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn team(name: &str, short: &str) -> TeamSnapshot {
    TeamSnapshot {
        name: name.to_string(),
        short_name: short.to_string(),
        score: String::new(),
        flag_url: None,
    }
}

#[test]
fn parses_live_page_match_links() {
    let raw = read_fixture("live_matches.html");
    let links = parse_match_links(&raw);
    assert_eq!(links.len(), 2);
    assert_eq!(
        links[0].title,
        "India vs Australia, 3rd T20I - India need 54 runs in 32 balls"
    );
    assert_eq!(extract_match_id_from_url(&links[0].url), Some(118928));
    assert_eq!(extract_match_id_from_url(&links[1].url), Some(118927));
}

#[test]
fn parses_embedded_summaries_from_live_page() {
    let raw = read_fixture("live_matches.html");
    let summaries = parse_embedded_summaries(&raw);
    assert_eq!(summaries.len(), 3);

    let chase = summaries
        .iter()
        .find(|s| s.match_id == 118928)
        .expect("chase summary");
    assert_eq!(chase.team1.as_deref(), Some("India"));
    assert_eq!(chase.team2_short_name.as_deref(), Some("AUS"));
    assert_eq!(chase.team1_score.as_deref(), Some("129/5 (14.4 Overs)"));
    assert_eq!(chase.team2_score.as_deref(), Some("182/7 (20 Overs)"));
    assert_eq!(chase.series_name.as_deref(), Some("Australia tour of India, 2026"));
    assert_eq!(chase.match_desc.as_deref(), Some("3rd T20I"));
    assert_eq!(chase.match_format.as_deref(), Some("T20"));
    assert_eq!(chase.state.as_deref(), Some("In Progress"));
    assert_eq!(chase.venue.as_deref(), Some("Wankhede Stadium, Mumbai, India"));
    assert_eq!(chase.start_date, Some(1_754_500_000_000));
}

#[test]
fn match_list_pages_bucket_into_tabs() {
    let live = read_fixture("live_matches.html");
    let upcoming = read_fixture("upcoming_matches.html");
    let data = build_matches_data(&live, &upcoming);

    let live_ids: Vec<u64> = data.live.iter().map(|m| m.id).collect();
    assert_eq!(live_ids, vec![119201, 118928]);
    let upcoming_ids: Vec<u64> = data.upcoming.iter().map(|m| m.id).collect();
    assert_eq!(upcoming_ids, vec![119500, 119455]);
    let recent_ids: Vec<u64> = data.recent.iter().map(|m| m.id).collect();
    assert_eq!(recent_ids, vec![118927]);

    let chase = data.live.iter().find(|m| m.id == 118928).expect("chase item");
    assert_eq!(chase.title, "India vs Australia, 3rd T20I");
    assert_eq!(chase.team1.short_name, "IND");
    assert_eq!(chase.team1.score, "129/5 (14.4 Overs)");
    assert_eq!(chase.team2.score, "182/7 (20 Overs)");
    assert_eq!(chase.status, "India need 54 runs in 32 balls");
    assert_eq!(chase.series, "Australia tour of India, 2026");
    assert_eq!(chase.venue, "Wankhede Stadium, Mumbai, India");

    // summary-only match with no anchor still gets a synthesized url
    let odi = data.live.iter().find(|m| m.id == 119201).expect("odi item");
    assert_eq!(odi.title, "Pakistan vs England, 1st ODI");
    assert_eq!(
        odi.match_url,
        "https://www.cricbuzz.com/live-cricket-scores/119201/pakistan-vs-england-1st-odi"
    );
}

#[test]
fn upcoming_page_alone_still_yields_matches() {
    let upcoming = read_fixture("upcoming_matches.html");
    let data = build_matches_data("", &upcoming);
    assert!(data.live.is_empty());
    assert!(data.recent.is_empty());

    let test_match = data
        .upcoming
        .iter()
        .find(|m| m.id == 119455)
        .expect("test match");
    assert_eq!(test_match.status_type, MatchStatusType::Upcoming);
    assert_eq!(test_match.status, "Match starts at 10:00 AM");
    assert_eq!(test_match.team1.short_name, "NZ");
    assert_eq!(test_match.venue, "Basin Reserve, Wellington, New Zealand");
}

#[test]
fn scorecard_page_assembles_full_detail() {
    let raw = read_fixture("scorecard.html");
    let detail = parse_scorecard_details(118928, &raw, None, None);

    assert_eq!(detail.title, "India vs Australia, 3rd T20I");
    assert_eq!(detail.series, "Australia tour of India, 2026");
    assert_eq!(detail.match_desc, "3rd T20I");
    assert_eq!(detail.format, "T20");
    assert_eq!(detail.venue, "Wankhede Stadium, Mumbai, India");
    assert_eq!(detail.toss, "Australia opted to bat");
    assert_eq!(detail.status, "India need 54 runs in 32 balls");
    assert_eq!(detail.state, "In Progress");
    assert_eq!(detail.team1.score, "129/5 (14.4 Overs)");
    assert_eq!(detail.team2.score, "182/7 (20 Overs)");

    assert_eq!(detail.innings.len(), 2);
    let first = &detail.innings[0];
    assert_eq!(first.batting_team, "Australia");
    assert_eq!(first.bowling_team, "India");
    assert_eq!(first.score_line, "182/7 (20 Overs)");
    assert_eq!(first.run_rate, "9.10");
    assert_eq!(first.batsmen.len(), 9);
    assert_eq!(first.batsmen[0].name, "Travis Head");
    assert_eq!(first.batsmen[2].name, "Steven Smith (c)");
    assert_eq!(first.batsmen[5].name, "Matthew Wade (wk)");
    assert_eq!(first.extras_line, "Total 5 (b 0, lb 2, w 3, nb 0, p 0)");
    assert_eq!(first.fall_of_wickets[0], "1. Mitchell Marsh - 39 (5.2)");
    assert_eq!(first.bowlers[0].name, "Jasprit Bumrah");
    assert_eq!(first.bowlers[0].economy, "6.75");

    let second = &detail.innings[1];
    assert_eq!(second.run_rate, "8.80");
    assert_eq!(
        second.fall_of_wickets.last().map(String::as_str),
        Some("5. Tilak Varma - 125 (14.3)")
    );

    assert_eq!(detail.team1_players.len(), 11);
    assert_eq!(detail.team2_players.len(), 11);
    let skipper = detail
        .team1_players
        .iter()
        .find(|p| p.name == "Suryakumar Yadav")
        .expect("captain in squad");
    assert!(skipper.captain);
    let keeper = detail
        .team1_players
        .iter()
        .find(|p| p.name == "Sanju Samson")
        .expect("keeper in squad");
    assert!(keeper.keeper);

    assert!(detail.live_state.is_none());
    assert!(detail.win_prediction.is_none());
}

#[test]
fn scorecard_page_yields_live_state() {
    let raw = read_fixture("scorecard.html");
    let state = parse_live_state_from_html(&raw).expect("live state");

    assert_eq!(state.batters.len(), 2);
    assert_eq!(state.batters[0].name, "Hardik Pandya");
    assert_eq!(state.batters[0].runs, "4");
    assert!(state.batters[0].on_strike);
    assert_eq!(state.batters[1].name, "Ravindra Jadeja");
    assert!(!state.batters[1].on_strike);

    let bowler = state.bowler.as_ref().expect("bowler");
    assert_eq!(bowler.name, "Adam Zampa");
    assert_eq!(bowler.overs, "3.4");
    assert_eq!(bowler.wickets, "3");

    assert_eq!(state.current_over_label, "14.4");
    assert_eq!(state.current_run_rate, "8.80");
    assert_eq!(state.required_run_rate, "10.13");

    let labels: Vec<&str> = state
        .current_over_balls
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(labels, vec!["15.1", "15.2", "15.3", "15.4"]);
    let kinds: Vec<BallKind> = state.current_over_balls.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BallKind::Dot, BallKind::Run, BallKind::Wicket, BallKind::Four]
    );

    assert_eq!(state.recent_balls.len(), 10);
    assert_eq!(state.recent_balls[0].label, "Ball 1");
    assert_eq!(state.recent_balls[9].label, "Ball 10");
    assert_eq!(state.recent_balls_label, "Last 10 balls");
}

#[test]
fn scorecard_page_yields_win_prediction() {
    let raw = read_fixture("scorecard.html");
    let prediction =
        parse_win_prediction_from_html(&raw, &team("India", "IND"), &team("Australia", "AUS"))
            .expect("prediction");
    assert_eq!(prediction.team1_percent, "44%");
    assert_eq!(prediction.team2_percent, "56%");
}

#[test]
fn commentary_payload_yields_live_state() {
    let raw = read_fixture("commentary.json");
    let payload: serde_json::Value = serde_json::from_str(&raw).expect("valid fixture json");
    let state = parse_live_state_from_commentary_payload(&payload).expect("live state");

    assert_eq!(state.batters.len(), 2);
    assert_eq!(state.batters[0].name, "Hardik Pandya");
    assert!(state.batters[0].on_strike);
    let bowler = state.bowler.as_ref().expect("bowler");
    assert_eq!(bowler.name, "Adam Zampa");
    assert_eq!(bowler.overs, "3.4");

    assert_eq!(state.current_over_label, "14.4");
    assert_eq!(state.current_run_rate, "8.80");
    assert_eq!(state.required_run_rate, "10.13");

    // commentary reconstructs the ball strip the payload itself lacks
    let labels: Vec<&str> = state
        .current_over_balls
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(labels, vec!["15.1", "15.2", "15.3", "15.4"]);
    let kinds: Vec<BallKind> = state.current_over_balls.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BallKind::Dot, BallKind::Run, BallKind::Wicket, BallKind::Four]
    );

    assert_eq!(state.recent_balls.len(), 10);
    assert_eq!(state.recent_balls[0].label, "14.1");
    assert_eq!(state.recent_balls[9].label, "15.4");
    assert_eq!(state.recent_balls_label, "Last 10 balls");
}

#[test]
fn commentary_payload_yields_squads() {
    let raw = read_fixture("commentary.json");
    let payload: serde_json::Value = serde_json::from_str(&raw).expect("valid fixture json");
    let squads = parse_team_players_from_commentary_payload(&payload);

    assert_eq!(squads.team1.len(), 12);
    assert_eq!(squads.team2.len(), 11);

    let substitute = squads
        .team1
        .iter()
        .find(|p| p.name == "Rinku Singh")
        .expect("substitute listed");
    assert!(substitute.substitute);
    let skipper = squads
        .team1
        .iter()
        .find(|p| p.name == "Suryakumar Yadav")
        .expect("captain listed");
    assert!(skipper.captain);
    let keeper = squads
        .team1
        .iter()
        .find(|p| p.name == "Sanju Samson")
        .expect("keeper listed");
    assert!(keeper.keeper);
    assert!(
        squads
            .team2
            .iter()
            .all(|p| !p.substitute)
    );
}

#[test]
fn detail_merges_scorecard_and_commentary_sources() {
    let scorecard = read_fixture("scorecard.html");
    let raw = read_fixture("commentary.json");
    let payload: serde_json::Value = serde_json::from_str(&raw).expect("valid fixture json");
    let detail = build_match_detail(118928, &scorecard, None, &[payload], None, None);

    assert_eq!(detail.title, "India vs Australia, 3rd T20I");
    let state = detail.live_state.expect("live state");
    assert_eq!(state.batters[0].name, "Hardik Pandya");
    assert_eq!(
        state.bowler.as_ref().map(|b| b.name.as_str()),
        Some("Adam Zampa")
    );
    assert_eq!(state.current_run_rate, "8.80");

    // the commentary squad contributes the substitute the scorecard lacks
    assert_eq!(detail.team1_players.len(), 12);
    assert!(
        detail
            .team1_players
            .iter()
            .any(|p| p.name == "Rinku Singh" && p.substitute)
    );

    assert_eq!(
        detail.innings[1].yet_to_bat,
        vec![
            "Arshdeep Singh",
            "Axar Patel",
            "Jasprit Bumrah",
            "Varun Chakravarthy"
        ]
    );

    let prediction = detail.win_prediction.expect("prediction");
    assert_eq!(prediction.team1_percent, "44%");
    assert_eq!(prediction.team2_percent, "56%");
}
