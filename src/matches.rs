//! Match list assembly from the live and upcoming list pages.
//!
//! Each match can appear twice, as an anchor link and as an embedded summary
//! block. Both are turned into list items and merged per id, keeping whichever
//! rendition carries more signal.

use anyhow::{anyhow, Result};

use crate::http::{fetch_html, live_matches_url, upcoming_matches_url};
use crate::match_links::{
    build_live_url, extract_match_id_from_url, get_short_name, normalize_title, parse_match_links,
    parse_title_meta, MatchLink,
};
use crate::state::{MatchListItem, MatchStatusType, MatchesData, TeamSnapshot};
use crate::status::{derive_status_type, has_usable_status, pick_best_status};
use crate::summaries::{parse_embedded_summaries, MatchSummary};
use crate::team_flags::get_team_flag_url;
use crate::text::safe_text;

const LIST_FLAG_SIZE: u32 = 40;

fn to_team_snapshot(name: String, short_name: String, score: String) -> TeamSnapshot {
    let flag_url = get_team_flag_url(&name, &short_name, LIST_FLAG_SIZE);
    TeamSnapshot {
        name,
        short_name,
        score,
        flag_url,
    }
}

fn build_match_item(link: &MatchLink, summary: Option<&MatchSummary>) -> Option<MatchListItem> {
    let id = extract_match_id_from_url(&link.url)?;

    let title_meta = parse_title_meta(&link.title);

    let mut team1 = safe_text(summary.and_then(|s| s.team1.as_deref()));
    if team1.is_empty() {
        team1 = safe_text(title_meta.team1.as_deref());
    }
    let mut team2 = safe_text(summary.and_then(|s| s.team2.as_deref()));
    if team2.is_empty() {
        team2 = safe_text(title_meta.team2.as_deref());
    }
    let mut team1_short = safe_text(summary.and_then(|s| s.team1_short_name.as_deref()));
    if team1_short.is_empty() {
        team1_short = get_short_name(&team1);
    }
    let mut team2_short = safe_text(summary.and_then(|s| s.team2_short_name.as_deref()));
    if team2_short.is_empty() {
        team2_short = get_short_name(&team2);
    }

    let team1_score = safe_text(summary.and_then(|s| s.team1_score.as_deref()));
    let team2_score = safe_text(summary.and_then(|s| s.team2_score.as_deref()));

    let status = pick_best_status(&[
        summary.and_then(|s| s.status.as_deref()),
        title_meta.status.as_deref(),
        summary.and_then(|s| s.state.as_deref()),
    ]);
    let state = safe_text(summary.and_then(|s| s.state.as_deref()));
    let mut match_desc = safe_text(summary.and_then(|s| s.match_desc.as_deref()));
    if match_desc.is_empty() {
        match_desc = safe_text(title_meta.match_desc.as_deref());
    }
    let series = safe_text(summary.and_then(|s| s.series_name.as_deref()));
    let venue = safe_text(summary.and_then(|s| s.venue.as_deref()));

    let has_score = !team1_score.is_empty() || !team2_score.is_empty();
    let status_type = derive_status_type(&status, &state, &link.title, has_score);

    let team1_name = if team1.is_empty() {
        "Team 1".to_string()
    } else {
        team1
    };
    let team2_name = if team2.is_empty() {
        "Team 2".to_string()
    } else {
        team2
    };

    Some(MatchListItem {
        id,
        title: normalize_title(&link.title, &match_desc),
        match_desc,
        series,
        venue,
        team1: to_team_snapshot(team1_name, team1_short, team1_score),
        team2: to_team_snapshot(team2_name, team2_short, team2_score),
        status,
        state,
        status_type,
        match_url: link.url.clone(),
    })
}

pub fn build_match_item_from_summary(summary: &MatchSummary) -> MatchListItem {
    let mut team1 = safe_text(summary.team1.as_deref());
    if team1.is_empty() {
        team1 = "Team 1".to_string();
    }
    let mut team2 = safe_text(summary.team2.as_deref());
    if team2.is_empty() {
        team2 = "Team 2".to_string();
    }
    let mut team1_short = safe_text(summary.team1_short_name.as_deref());
    if team1_short.is_empty() {
        team1_short = get_short_name(&team1);
    }
    let mut team2_short = safe_text(summary.team2_short_name.as_deref());
    if team2_short.is_empty() {
        team2_short = get_short_name(&team2);
    }
    let match_desc = safe_text(summary.match_desc.as_deref());
    let status = pick_best_status(&[summary.status.as_deref(), summary.state.as_deref()]);
    let title = if match_desc.is_empty() {
        format!("{team1} vs {team2}")
    } else {
        format!("{team1} vs {team2}, {match_desc}")
    };
    let team1_score = safe_text(summary.team1_score.as_deref());
    let team2_score = safe_text(summary.team2_score.as_deref());

    let state = safe_text(summary.state.as_deref());
    let has_score = !team1_score.is_empty() || !team2_score.is_empty();
    let status_type = derive_status_type(&status, &state, &title, has_score);
    let match_url = build_live_url(summary.match_id, &team1, &team2, &match_desc);

    MatchListItem {
        id: summary.match_id,
        title,
        match_desc,
        series: safe_text(summary.series_name.as_deref()),
        venue: safe_text(summary.venue.as_deref()),
        team1: to_team_snapshot(team1, team1_short, team1_score),
        team2: to_team_snapshot(team2, team2_short, team2_score),
        status,
        state,
        status_type,
        match_url,
    }
}

fn count_filled_fields(item: &MatchListItem) -> usize {
    [
        &item.match_desc,
        &item.series,
        &item.venue,
        &item.team1.name,
        &item.team2.name,
        &item.team1.score,
        &item.team2.score,
        &item.status,
        &item.state,
    ]
    .into_iter()
    .filter(|value| !value.trim().is_empty())
    .count()
}

fn is_live_like(item: &MatchListItem) -> bool {
    item.status_type == MatchStatusType::Live
        || !item.team1.score.is_empty()
        || !item.team2.score.is_empty()
}

fn pick_better_match(current: MatchListItem, incoming: MatchListItem) -> MatchListItem {
    if is_live_like(&incoming) && !is_live_like(&current) {
        return incoming;
    }
    if !is_live_like(&incoming) && is_live_like(&current) {
        return current;
    }
    if count_filled_fields(&incoming) > count_filled_fields(&current) {
        incoming
    } else {
        current
    }
}

/// First-seen order is preserved so later duplicates improve an entry without
/// moving it.
fn upsert_match(matches: &mut Vec<(u64, MatchListItem)>, item: MatchListItem) {
    match matches.iter_mut().find(|(id, _)| *id == item.id) {
        Some((_, existing)) => {
            let current = existing.clone();
            *existing = pick_better_match(current, item);
        }
        None => matches.push((item.id, item)),
    }
}

fn summary_for<'a>(
    live: &'a [MatchSummary],
    upcoming: &'a [MatchSummary],
    id: u64,
) -> Option<&'a MatchSummary> {
    live.iter()
        .find(|summary| summary.match_id == id)
        .or_else(|| upcoming.iter().find(|summary| summary.match_id == id))
}

/// Merge both list pages into the tab buckets. Either page may be empty when
/// its fetch failed.
pub fn build_matches_data(live_html: &str, upcoming_html: &str) -> MatchesData {
    let mut all_links = Vec::new();
    if !live_html.is_empty() {
        all_links.extend(parse_match_links(live_html));
    }
    if !upcoming_html.is_empty() {
        all_links.extend(parse_match_links(upcoming_html));
    }

    let live_summaries = if live_html.is_empty() {
        Vec::new()
    } else {
        parse_embedded_summaries(live_html)
    };
    let upcoming_summaries = if upcoming_html.is_empty() {
        Vec::new()
    } else {
        parse_embedded_summaries(upcoming_html)
    };

    let mut all_matches: Vec<(u64, MatchListItem)> = Vec::new();

    for link in &all_links {
        let Some(id) = extract_match_id_from_url(&link.url) else {
            continue;
        };
        let summary = summary_for(&live_summaries, &upcoming_summaries, id);
        if let Some(item) = build_match_item(link, summary) {
            upsert_match(&mut all_matches, item);
        }
    }

    for summary in &live_summaries {
        upsert_match(&mut all_matches, build_match_item_from_summary(summary));
    }
    for summary in &upcoming_summaries {
        upsert_match(&mut all_matches, build_match_item_from_summary(summary));
    }

    let mut all: Vec<MatchListItem> = all_matches
        .into_iter()
        .map(|(_, item)| item)
        .filter(|item| has_usable_status(&item.status))
        .collect();
    all.sort_by(|a, b| b.id.cmp(&a.id));

    let mut data = MatchesData::default();
    for item in all {
        match item.status_type {
            MatchStatusType::Live => data.live.push(item),
            MatchStatusType::Upcoming => data.upcoming.push(item),
            MatchStatusType::Complete => data.recent.push(item),
        }
    }
    data
}

/// Fetch both list pages and assemble the buckets. One page failing is
/// tolerated; both failing is an error naming each cause.
pub fn fetch_matches_data() -> Result<MatchesData> {
    let live = fetch_html(&live_matches_url());
    let upcoming = fetch_html(&upcoming_matches_url());

    if let (Err(live_err), Err(upcoming_err)) = (&live, &upcoming) {
        return Err(anyhow!(
            "Unable to fetch Cricbuzz match data right now. \
             Live error: {live_err:#}. Upcoming error: {upcoming_err:#}."
        ));
    }

    let live_html = live.unwrap_or_default();
    let upcoming_html = upcoming.unwrap_or_default();
    Ok(build_matches_data(&live_html, &upcoming_html))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_html(id: u64, title: &str) -> String {
        format!(
            r#"<a href="/live-cricket-scores/{id}/ind-vs-aus" title="{title}">{title}</a>"#
        )
    }

    fn summary_block(id: u64, status: &str, with_score: bool) -> String {
        let score_block = if with_score {
            r#","matchScore":{"team1Score":{"inngs1":{"runs":186,"wickets":5,"overs":"5.4"}}}"#
        } else {
            ""
        };
        format!(
            r#"{{"matchInfo":{{"matchId":{id},"team1":{{"teamName":"India","teamSName":"IND"}},"team2":{{"teamName":"Australia","teamSName":"AUS"}},"status":"{status}","state":"In Progress","matchDesc":"1st T20I","seriesName":"Border-Gavaskar","venueInfo":{{"ground":"MCG","city":"Melbourne"}}}}{score_block}}}"#
        )
    }

    #[test]
    fn link_and_summary_merge_into_one_item() {
        let html = format!(
            "{}{}",
            link_html(1001, "India vs Australia, 1st T20I - India won the toss"),
            summary_block(1001, "India opt to bowl", true)
        );
        let data = build_matches_data(&html, "");
        let all: Vec<_> = data
            .live
            .iter()
            .chain(data.upcoming.iter())
            .chain(data.recent.iter())
            .collect();
        assert_eq!(all.len(), 1);
        let item = all[0];
        assert_eq!(item.id, 1001);
        assert_eq!(item.team1.name, "India");
        assert_eq!(item.team1.short_name, "IND");
        assert_eq!(item.series, "Border-Gavaskar");
    }

    #[test]
    fn summary_only_matches_still_appear() {
        let html = summary_block(2002, "Starts at 7:00 PM", false);
        let data = build_matches_data("", &html);
        assert_eq!(data.upcoming.len(), 1);
        let item = &data.upcoming[0];
        assert_eq!(item.id, 2002);
        assert_eq!(item.title, "India vs Australia, 1st T20I");
        assert!(item.match_url.contains("/live-cricket-scores/2002/"));
    }

    #[test]
    fn unusable_statuses_are_filtered_out() {
        let html = link_html(3003, "India vs Australia, 2nd T20I");
        let data = build_matches_data(&html, "");
        assert!(data.live.is_empty());
        assert!(data.upcoming.is_empty());
        assert!(data.recent.is_empty());
    }

    #[test]
    fn buckets_sort_by_id_descending() {
        let html = format!(
            "{}{}",
            summary_block(10, "Match tied", false),
            summary_block(20, "India won by 6 wickets", false)
        );
        let data = build_matches_data(&html, "");
        let ids: Vec<u64> = data.recent.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[test]
    fn live_like_rendition_wins_the_merge() {
        let sparse = MatchListItem {
            id: 7,
            title: "A vs B".to_string(),
            match_desc: String::new(),
            series: String::new(),
            venue: String::new(),
            team1: to_team_snapshot("A".into(), "A".into(), String::new()),
            team2: to_team_snapshot("B".into(), "B".into(), String::new()),
            status: "Starts soon".to_string(),
            state: "Preview".to_string(),
            status_type: MatchStatusType::Upcoming,
            match_url: String::new(),
        };
        let mut scored = sparse.clone();
        scored.team1.score = "120/3".to_string();
        scored.status_type = MatchStatusType::Live;

        let mut matches = Vec::new();
        upsert_match(&mut matches, sparse.clone());
        upsert_match(&mut matches, scored.clone());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].1.team1.score, "120/3");

        // Reversed arrival order keeps the scored rendition too.
        let mut matches = Vec::new();
        upsert_match(&mut matches, scored);
        upsert_match(&mut matches, sparse);
        assert_eq!(matches[0].1.team1.score, "120/3");
    }

    #[test]
    fn fuller_rendition_wins_when_neither_is_live() {
        let mut sparse = build_match_item_from_summary(&MatchSummary {
            match_id: 5,
            team1: Some("India".into()),
            team2: Some("Australia".into()),
            status: Some("Match drawn".into()),
            ..MatchSummary::default()
        });
        sparse.venue.clear();
        let full = build_match_item_from_summary(&MatchSummary {
            match_id: 5,
            team1: Some("India".into()),
            team2: Some("Australia".into()),
            status: Some("Match drawn".into()),
            venue: Some("MCG".into()),
            series_name: Some("Border-Gavaskar".into()),
            ..MatchSummary::default()
        });

        let mut matches = Vec::new();
        upsert_match(&mut matches, sparse);
        upsert_match(&mut matches, full);
        assert_eq!(matches[0].1.venue, "MCG");
    }
}
