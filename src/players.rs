//! Squad extraction from squads pages, commentary payloads, and raw
//! scorecard blocks.
//!
//! Player lists appear under several keys and shapes (arrays, keyed objects,
//! or arrays of bare ids pointing into a catalog). Every source is mapped to
//! [`TeamPlayer`] and merged, keeping whichever copy of a player carries more
//! filled-in fields.

use std::collections::HashMap;

use serde_json::Value;

use crate::http::CRICBUZZ_BASE_URL;
use crate::json_extract::{
    pick_all_arrays_by_key, pick_all_objects_by_key, pick_bool, pick_text, stat_text,
};
use crate::state::TeamPlayer;
use crate::text::{normalize_player_key, normalize_player_name, normalize_team_key};

#[derive(Debug, Clone, Default)]
pub struct SquadPlayers {
    pub team1: Vec<TeamPlayer>,
    pub team2: Vec<TeamPlayer>,
}

fn to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_f64().map(|f| format!("{f}")))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn to_url_candidate(value: Option<&Value>) -> Option<String> {
    let Some(Value::String(s)) = value else {
        return None;
    };
    let candidate = s.trim();
    if candidate.is_empty() {
        return None;
    }
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Some(candidate.to_string());
    }
    if let Some(rest) = candidate.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if candidate.starts_with('/') {
        return Some(format!("{CRICBUZZ_BASE_URL}{candidate}"));
    }
    None
}

fn numeric_image_id(value: Option<&Value>) -> Option<i64> {
    let parsed = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    (parsed > 0.0).then_some(parsed as i64)
}

fn image_url_from_id(value: Option<&Value>) -> Option<String> {
    numeric_image_id(value).map(|id| format!("{CRICBUZZ_BASE_URL}/a/img/v1/72x72/i1/c{id}/i.jpg"))
}

fn player_image_url(player: &Value) -> Option<String> {
    for key in ["imageUrl", "imgUrl", "image", "headshot"] {
        if let Some(url) = to_url_candidate(player.get(key)) {
            return Some(url);
        }
    }
    for key in [
        "faceImageId",
        "face_image_id",
        "imageId",
        "image_id",
        "imageID",
        "id",
    ] {
        if let Some(url) = image_url_from_id(player.get(key)) {
            return Some(url);
        }
    }
    None
}

fn to_one_player(player: &Value) -> TeamPlayer {
    let id = {
        let text = to_text(player.get("id"));
        if text.is_empty() { "-".to_string() } else { text }
    };
    TeamPlayer {
        id,
        name: pick_text(
            player,
            &["fullName", "name", "f_name", "shortName", "nickName"],
        )
        .unwrap_or_else(|| "Unknown".to_string()),
        role: stat_text(player, &["role", "specialist", "roleDesc"]),
        batting_style: stat_text(player, &["battingStyle", "batStyle", "bat_style"]),
        bowling_style: stat_text(player, &["bowlingStyle", "bowlStyle", "bowl_style"]),
        captain: pick_bool(player, &["isCaptain", "captain"]),
        keeper: pick_bool(player, &["isKeeper", "keeper"]),
        substitute: pick_bool(player, &["substitute"]),
        image_url: player_image_url(player),
    }
}

/// Maps a `players` node, whether an array or a keyed object, to players.
pub fn to_team_players(players: Option<&Value>) -> Vec<TeamPlayer> {
    let entries: Vec<&Value> = match players {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter(|entry| entry.is_object())
        .map(to_one_player)
        .collect()
}

fn players_from_slice(players: &[Value]) -> Vec<TeamPlayer> {
    players
        .iter()
        .filter(|entry| entry.is_object())
        .map(to_one_player)
        .collect()
}

fn has_value(text: &str) -> bool {
    !text.is_empty() && text != "-"
}

fn score_player_quality(player: &TeamPlayer) -> i64 {
    let mut score = 0;
    if has_value(&player.id) {
        score += 2;
    }
    if has_value(&player.role) {
        score += 2;
    }
    if has_value(&player.batting_style) {
        score += 1;
    }
    if has_value(&player.bowling_style) {
        score += 1;
    }
    if player.image_url.is_some() {
        score += 2;
    }
    if player.captain {
        score += 1;
    }
    if player.keeper {
        score += 1;
    }
    score
}

fn merge_one_player(existing: &TeamPlayer, incoming: &TeamPlayer) -> TeamPlayer {
    let keep_incoming = score_player_quality(incoming) > score_player_quality(existing);
    let (better, other) = if keep_incoming {
        (incoming, existing)
    } else {
        (existing, incoming)
    };
    let pick = |a: &str, b: &str| {
        if a != "-" { a.to_string() } else { b.to_string() }
    };
    TeamPlayer {
        id: pick(&better.id, &other.id),
        name: if !better.name.is_empty() {
            better.name.clone()
        } else if !other.name.is_empty() {
            other.name.clone()
        } else {
            "Unknown".to_string()
        },
        role: pick(&better.role, &other.role),
        batting_style: pick(&better.batting_style, &other.batting_style),
        bowling_style: pick(&better.bowling_style, &other.bowling_style),
        captain: existing.captain || incoming.captain,
        keeper: existing.keeper || incoming.keeper,
        substitute: existing.substitute || incoming.substitute,
        image_url: better.image_url.clone().or_else(|| other.image_url.clone()),
    }
}

/// Merges two squad lists keyed by normalized name. The fallback list seeds
/// the map so primary entries can upgrade it in place.
pub fn merge_team_players(primary: &[TeamPlayer], fallback: &[TeamPlayer]) -> Vec<TeamPlayer> {
    let mut merged: Vec<(String, TeamPlayer)> = Vec::new();
    let mut merge_one = |player: &TeamPlayer| {
        let key = normalize_player_key(&player.name);
        match merged.iter_mut().find(|(k, _)| *k == key) {
            None => merged.push((key, player.clone())),
            Some((_, existing)) => *existing = merge_one_player(existing, player),
        }
    };
    for player in fallback {
        merge_one(player);
    }
    for player in primary {
        merge_one(player);
    }
    let mut players: Vec<TeamPlayer> = merged.into_iter().map(|(_, p)| p).collect();
    players.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    players
}

struct PlayerAccumulator {
    name: String,
    captain: bool,
    keeper: bool,
    batted: bool,
    bowled: bool,
    image_url: Option<String>,
}

#[derive(Default)]
struct Appearance {
    captain: bool,
    keeper: bool,
    batted: bool,
    bowled: bool,
    image_url: Option<String>,
}

fn upsert_team_player(
    map: &mut Vec<(String, PlayerAccumulator)>,
    player_name: &str,
    seen: Appearance,
) {
    let cleaned = normalize_player_name(player_name);
    if cleaned.is_empty() {
        return;
    }
    let key = normalize_player_key(&cleaned);
    match map.iter_mut().find(|(k, _)| *k == key) {
        None => map.push((
            key,
            PlayerAccumulator {
                name: cleaned,
                captain: seen.captain,
                keeper: seen.keeper,
                batted: seen.batted,
                bowled: seen.bowled,
                image_url: seen.image_url,
            },
        )),
        Some((_, existing)) => {
            existing.captain |= seen.captain;
            existing.keeper |= seen.keeper;
            existing.batted |= seen.batted;
            existing.bowled |= seen.bowled;
            if existing.image_url.is_none() {
                existing.image_url = seen.image_url;
            }
        }
    }
}

fn role_from_appearances(player: &PlayerAccumulator) -> String {
    if player.batted && player.bowled {
        "All-rounder"
    } else if player.bowled {
        "Bowler"
    } else if player.batted {
        "Batter"
    } else {
        "-"
    }
    .to_string()
}

fn object_values(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Rebuilds a squad from raw scorecard blocks when no squads page exists.
/// Anyone who batted, bowled, or fell in a wicket for the team counts.
pub fn fallback_players_from_raw_innings(score_card: &[Value], team_name: &str) -> Vec<TeamPlayer> {
    let team_key = normalize_team_key(team_name);
    let mut players: Vec<(String, PlayerAccumulator)> = Vec::new();

    for innings in score_card {
        let bat_team_name = innings
            .get("batTeamDetails")
            .and_then(|t| pick_text(t, &["batTeamName", "batTeamShortName"]))
            .unwrap_or_default();
        let bowl_team_name = innings
            .get("bowlTeamDetails")
            .and_then(|t| pick_text(t, &["bowlTeamName", "bowlTeamShortName"]))
            .unwrap_or_default();
        let is_batting_team = normalize_team_key(&bat_team_name) == team_key;
        let is_bowling_team = normalize_team_key(&bowl_team_name) == team_key;

        if is_batting_team {
            let batsmen = innings.get("batTeamDetails").and_then(|t| t.get("batsmenData"));
            for batter in object_values(batsmen) {
                let image_url = image_url_from_id(batter.get("id"))
                    .or_else(|| image_url_from_id(batter.get("batId")));
                let name = pick_text(batter, &["batName"]).unwrap_or_default();
                upsert_team_player(
                    &mut players,
                    &name,
                    Appearance {
                        captain: pick_bool(batter, &["isCaptain"]),
                        keeper: pick_bool(batter, &["isKeeper"]),
                        batted: true,
                        image_url,
                        ..Appearance::default()
                    },
                );
            }
        }

        if is_bowling_team {
            let bowlers = innings
                .get("bowlTeamDetails")
                .and_then(|t| t.get("bowlersData"));
            for bowler in object_values(bowlers) {
                let image_url = image_url_from_id(bowler.get("id"))
                    .or_else(|| image_url_from_id(bowler.get("bowlId")));
                let name = pick_text(bowler, &["bowlName"]).unwrap_or_default();
                upsert_team_player(
                    &mut players,
                    &name,
                    Appearance {
                        bowled: true,
                        image_url,
                        ..Appearance::default()
                    },
                );
            }
        }

        if is_batting_team {
            for wicket in object_values(innings.get("wicketsData")) {
                let name = pick_text(wicket, &["batName"]).unwrap_or_default();
                upsert_team_player(
                    &mut players,
                    &name,
                    Appearance {
                        batted: true,
                        ..Appearance::default()
                    },
                );
            }
        }
    }

    let mut accumulated: Vec<PlayerAccumulator> = players.into_iter().map(|(_, p)| p).collect();
    accumulated.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    accumulated
        .into_iter()
        .enumerate()
        .map(|(index, player)| {
            let role = role_from_appearances(&player);
            TeamPlayer {
                id: format!("{team_key}-{}", index + 1),
                name: player.name,
                role,
                batting_style: "-".to_string(),
                bowling_style: "-".to_string(),
                captain: player.captain,
                keeper: player.keeper,
                substitute: false,
                image_url: player.image_url,
            }
        })
        .collect()
}

fn to_players_from_unknown(value: Option<&Value>) -> Vec<TeamPlayer> {
    match value {
        Some(Value::Array(items)) => {
            let records: Vec<Value> = items.iter().filter(|v| v.is_object()).cloned().collect();
            players_from_slice(&records)
        }
        Some(Value::Object(map)) => {
            if map.values().all(|entry| entry.is_object()) {
                to_team_players(value)
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

fn to_id_set_from_mixed(
    value: Option<&Value>,
    players_by_id: &HashMap<String, TeamPlayer>,
) -> Vec<TeamPlayer> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let mut direct: Vec<Value> = Vec::new();
    let mut by_id: Vec<TeamPlayer> = Vec::new();
    for entry in items {
        if entry.is_object() {
            direct.push(entry.clone());
            continue;
        }
        let id = to_text(Some(entry));
        if id.is_empty() {
            continue;
        }
        if let Some(mapped) = players_by_id.get(&id) {
            by_id.push(mapped.clone());
        }
    }
    merge_team_players(&players_from_slice(&direct), &by_id)
}

const TEAM_NODE_PLAYER_KEYS: [&str; 7] = [
    "playerDetails",
    "players",
    "squad",
    "playingXI",
    "playingXi",
    "playing11",
    "xi",
];

fn collect_players_from_team_node(
    team_node: Option<&Value>,
    players_by_id: &HashMap<String, TeamPlayer>,
) -> Vec<TeamPlayer> {
    let Some(node) = team_node.filter(|n| n.is_object()) else {
        return Vec::new();
    };
    let mut team_players: Vec<TeamPlayer> = Vec::new();
    for key in TEAM_NODE_PLAYER_KEYS {
        let candidate = node.get(key);
        team_players = merge_team_players(&team_players, &to_players_from_unknown(candidate));
        team_players = merge_team_players(
            &team_players,
            &to_id_set_from_mixed(candidate, players_by_id),
        );
    }
    team_players
}

fn team_id_text(player: &Value) -> String {
    let value = match player.get("teamId") {
        None | Some(Value::Null) => player.get("team_id"),
        some => some,
    };
    to_text(value)
}

fn catalog_index(catalog: &[Value]) -> HashMap<String, TeamPlayer> {
    let mut by_id = HashMap::new();
    for player in players_from_slice(catalog) {
        if has_value(&player.id) {
            by_id.insert(player.id.clone(), player);
        }
    }
    by_id
}

fn catalog_for_team(catalog: &[Value], team_id: &str) -> Vec<TeamPlayer> {
    let matching: Vec<Value> = catalog
        .iter()
        .filter(|player| {
            let player_team_id = team_id_text(player);
            !player_team_id.is_empty() && player_team_id == team_id
        })
        .cloned()
        .collect();
    players_from_slice(&matching)
}

fn object_node<'a>(value: Option<&'a Value>) -> Option<&'a Value> {
    value.filter(|v| v.is_object())
}

fn assemble_squads(
    team1_candidates: &[Option<&Value>],
    team2_candidates: &[Option<&Value>],
    catalog: &[Value],
) -> SquadPlayers {
    let players_by_id = catalog_index(catalog);

    let mut team1: Vec<TeamPlayer> = Vec::new();
    let mut team2: Vec<TeamPlayer> = Vec::new();
    for node in team1_candidates {
        team1 = merge_team_players(&team1, &collect_players_from_team_node(*node, &players_by_id));
    }
    for node in team2_candidates {
        team2 = merge_team_players(&team2, &collect_players_from_team_node(*node, &players_by_id));
    }

    let team1_id = team1_candidates
        .iter()
        .map(|node| to_text(node.and_then(|n| n.get("id"))))
        .find(|id| !id.is_empty())
        .unwrap_or_default();
    let team2_id = team2_candidates
        .iter()
        .map(|node| to_text(node.and_then(|n| n.get("id"))))
        .find(|id| !id.is_empty())
        .unwrap_or_default();

    if !team1_id.is_empty() || !team2_id.is_empty() {
        team1 = merge_team_players(&team1, &catalog_for_team(catalog, &team1_id));
        team2 = merge_team_players(&team2, &catalog_for_team(catalog, &team2_id));
    }

    SquadPlayers { team1, team2 }
}

/// Squads from a squads-page HTML document. Team membership comes from the
/// `matchHeader` / `matchInfo` team nodes, supplemented by the flat `players`
/// catalog filtered on team id.
pub fn parse_team_players_from_html(html: &str) -> SquadPlayers {
    let headers = pick_all_objects_by_key(html, "matchHeader");
    let infos = pick_all_objects_by_key(html, "matchInfo");
    let match_header = headers.first();
    let match_info = infos.first();

    let mut catalog: Vec<Value> = Vec::new();
    for array in pick_all_arrays_by_key(html, "players") {
        if let Value::Array(items) = array {
            catalog.extend(items);
        }
    }
    for object in pick_all_objects_by_key(html, "players") {
        if let Value::Object(map) = object {
            catalog.extend(map.into_iter().map(|(_, v)| v));
        }
    }

    let header_team1 = object_node(match_header.and_then(|h| h.get("team1")));
    let header_team2 = object_node(match_header.and_then(|h| h.get("team2")));
    let info_team1 = object_node(match_info.and_then(|i| i.get("team1")));
    let info_team2 = object_node(match_info.and_then(|i| i.get("team2")));

    assemble_squads(
        &[header_team1, info_team1],
        &[header_team2, info_team2],
        &catalog,
    )
}

/// Squads from a commentary JSON payload, probing the match header, match
/// info, and root team nodes in that order.
pub fn parse_team_players_from_commentary_payload(payload: &Value) -> SquadPlayers {
    if !payload.is_object() {
        return SquadPlayers::default();
    }

    let header_team1 = object_node(payload.get("matchHeader").and_then(|h| h.get("team1")));
    let header_team2 = object_node(payload.get("matchHeader").and_then(|h| h.get("team2")));
    let info_team1 = object_node(payload.get("matchInfo").and_then(|i| i.get("team1")));
    let info_team2 = object_node(payload.get("matchInfo").and_then(|i| i.get("team2")));
    let root_team1 = object_node(payload.get("team1"));
    let root_team2 = object_node(payload.get("team2"));

    let catalog: Vec<Value> = match payload.get("players") {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => map.values().cloned().collect(),
        _ => Vec::new(),
    };

    assemble_squads(
        &[header_team1, info_team1, root_team1],
        &[header_team2, info_team2, root_team2],
        &catalog,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn player_fields_probe_alternate_keys() {
        let raw = json!([{
            "id": 123,
            "fullName": "Virat Kohli",
            "role": "Batter",
            "batStyle": "Right-hand bat",
            "isCaptain": true,
            "faceImageId": 456,
        }]);
        let players = to_team_players(Some(&raw));
        assert_eq!(players.len(), 1);
        let player = &players[0];
        assert_eq!(player.id, "123");
        assert_eq!(player.name, "Virat Kohli");
        assert_eq!(player.batting_style, "Right-hand bat");
        assert_eq!(player.bowling_style, "-");
        assert!(player.captain);
        assert_eq!(
            player.image_url.as_deref(),
            Some("https://www.cricbuzz.com/a/img/v1/72x72/i1/c456/i.jpg")
        );
    }

    #[test]
    fn relative_image_urls_gain_the_site_host() {
        let raw = json!([
            {"name": "A", "imageUrl": "//static.cricbuzz.com/a.jpg"},
            {"name": "B", "imgUrl": "/img/b.jpg"},
            {"name": "C", "image": "ftp://nope"},
        ]);
        let players = to_team_players(Some(&raw));
        assert_eq!(
            players[0].image_url.as_deref(),
            Some("https://static.cricbuzz.com/a.jpg")
        );
        assert_eq!(
            players[1].image_url.as_deref(),
            Some("https://www.cricbuzz.com/img/b.jpg")
        );
        assert_eq!(players[2].image_url, None);
    }

    #[test]
    fn merge_keeps_the_richer_copy_per_field() {
        let sparse = TeamPlayer {
            id: "-".to_string(),
            name: "Rohit Sharma".to_string(),
            role: "-".to_string(),
            batting_style: "Right-hand bat".to_string(),
            bowling_style: "-".to_string(),
            captain: true,
            keeper: false,
            substitute: false,
            image_url: None,
        };
        let rich = TeamPlayer {
            id: "42".to_string(),
            name: "Rohit Sharma (c)".to_string(),
            role: "Batter".to_string(),
            batting_style: "-".to_string(),
            bowling_style: "-".to_string(),
            captain: false,
            keeper: false,
            substitute: false,
            image_url: Some("https://example.com/r.jpg".to_string()),
        };
        let merged = merge_team_players(&[rich], &[sparse]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "42");
        assert_eq!(merged[0].role, "Batter");
        assert_eq!(merged[0].batting_style, "Right-hand bat");
        assert!(merged[0].captain);
        assert!(merged[0].image_url.is_some());
    }

    #[test]
    fn innings_fallback_assigns_roles_from_appearances() {
        let score_card = vec![
            json!({
                "batTeamDetails": {
                    "batTeamName": "India",
                    "batsmenData": {
                        "bat_1": {"batName": "Kohli (c)", "isCaptain": true},
                        "bat_2": {"batName": "Jadeja"},
                    },
                },
                "bowlTeamDetails": {"bowlTeamName": "Australia"},
            }),
            json!({
                "batTeamDetails": {"batTeamName": "Australia"},
                "bowlTeamDetails": {
                    "bowlTeamName": "India",
                    "bowlersData": {
                        "bowl_1": {"bowlName": "Jadeja"},
                        "bowl_2": {"bowlName": "Bumrah", "id": 99},
                    },
                },
            }),
        ];
        let players = fallback_players_from_raw_innings(&score_card, "India");
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bumrah", "Jadeja", "Kohli"]);
        let jadeja = players.iter().find(|p| p.name == "Jadeja").unwrap();
        assert_eq!(jadeja.role, "All-rounder");
        let kohli = players.iter().find(|p| p.name == "Kohli").unwrap();
        assert_eq!(kohli.role, "Batter");
        assert!(kohli.captain);
        let bumrah = players.iter().find(|p| p.name == "Bumrah").unwrap();
        assert_eq!(bumrah.role, "Bowler");
        assert!(bumrah.image_url.is_some());
        assert_eq!(players[0].id, "india-1");
    }

    #[test]
    fn id_lists_resolve_through_the_catalog() {
        let payload = json!({
            "matchHeader": {
                "team1": {"id": 1, "playingXI": [10, 11]},
                "team2": {"id": 2, "playingXI": [{"id": 20, "name": "Direct Entry"}]},
            },
            "players": [
                {"id": 10, "name": "Catalog One", "teamId": 1},
                {"id": 11, "name": "Catalog Two", "teamId": 1},
                {"id": 20, "name": "Catalog Twenty", "teamId": 2, "role": "Bowler"},
            ],
        });
        let squads = parse_team_players_from_commentary_payload(&payload);
        let team1_names: Vec<&str> = squads.team1.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(team1_names, vec!["Catalog One", "Catalog Two"]);
        let twenty = squads
            .team2
            .iter()
            .find(|p| p.name == "Catalog Twenty")
            .unwrap();
        assert_eq!(twenty.role, "Bowler");
        assert!(squads.team2.iter().any(|p| p.name == "Direct Entry"));
    }

    #[test]
    fn squads_html_uses_embedded_team_nodes() {
        let html = concat!(
            r#"{"matchHeader":{"team1":{"id":5,"name":"India","playerDetails":"#,
            r#"[{"id":1,"fullName":"Kohli"},{"id":2,"fullName":"Bumrah"}]},"#,
            r#""team2":{"id":6,"name":"Australia","playerDetails":[{"id":3,"fullName":"Smith"}]}}}"#,
        );
        let squads = parse_team_players_from_html(html);
        assert_eq!(squads.team1.len(), 2);
        assert_eq!(squads.team2.len(), 1);
        assert_eq!(squads.team2[0].name, "Smith");
    }
}
