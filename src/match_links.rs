//! Match links harvested from the list pages, plus the metadata packed into
//! their title attributes.

use crate::http::CRICBUZZ_BASE_URL;
use crate::text::{clean_text, slugify};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMeta {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub match_desc: Option<String>,
    pub status: Option<String>,
}

const LIVE_SCORES_SEGMENT: &str = "/live-cricket-scores/";

/// Match id from a "/live-cricket-scores/{id}/..." URL.
pub fn extract_match_id_from_url(url: &str) -> Option<u64> {
    let mut from = 0;
    while let Some(found) = url[from..].find(LIVE_SCORES_SEGMENT) {
        let digits_start = from + found + LIVE_SCORES_SEGMENT.len();
        let digits_len = url[digits_start..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len > 0 && url[digits_start + digits_len..].starts_with('/') {
            if let Ok(id) = url[digits_start..digits_start + digits_len].parse() {
                return Some(id);
            }
        }
        from = digits_start;
    }
    None
}

pub fn to_scorecard_url(live_url: &str) -> String {
    live_url.replacen(LIVE_SCORES_SEGMENT, "/live-cricket-scorecard/", 1)
}

/// Synthesizes a live-scores URL when no real link was harvested.
pub fn build_live_url(match_id: u64, team1: &str, team2: &str, match_desc: &str) -> String {
    let slug_source: Vec<&str> = [team1, "vs", team2, match_desc]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    format!(
        "{CRICBUZZ_BASE_URL}{LIVE_SCORES_SEGMENT}{match_id}/{}",
        slugify(&slug_source.join(" "))
    )
}

/// Validates the path shape "/live-cricket-scores/{digits}/{rest}".
fn is_live_scores_path(path: &str) -> bool {
    let Some(rest) = path.strip_prefix(LIVE_SCORES_SEGMENT) else {
        return false;
    };
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && rest[digits..].starts_with('/') && rest.len() > digits + 1
}

fn attribute_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    for quote in ['"', '\''] {
        let token = format!("{name}={quote}");
        let mut from = 0;
        while let Some(found) = tag[from..].find(&token) {
            let start = from + found;
            let is_word_start = start == 0
                || !tag.as_bytes()[start - 1].is_ascii_alphanumeric();
            let value_start = start + token.len();
            if let Some(end) = tag[value_start..].find(quote) {
                if is_word_start && end > 0 {
                    return Some(&tag[value_start..value_start + end]);
                }
                from = value_start + end + 1;
            } else {
                break;
            }
        }
    }
    None
}

fn add_link(links: &mut Vec<MatchLink>, path: &str, raw_title: &str) {
    let normalized_path = path.trim();
    if !normalized_path.contains(LIVE_SCORES_SEGMENT) {
        return;
    }
    let url = format!("{CRICBUZZ_BASE_URL}{normalized_path}");
    let title = if raw_title.is_empty() {
        let mut fallback = normalized_path;
        if is_live_scores_path(fallback) {
            let rest = &fallback[LIVE_SCORES_SEGMENT.len()..];
            let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
            fallback = &rest[digits + 1..];
        }
        clean_text(&fallback.trim_end_matches('/').replace('-', " "))
    } else {
        clean_text(raw_title)
    };
    if title.is_empty() || title.to_lowercase() == "live score" {
        return;
    }
    if let Some(existing) = links.iter_mut().find(|l| l.url == url) {
        if title.len() > existing.title.len() {
            existing.title = title;
        }
    } else {
        links.push(MatchLink { title, url });
    }
}

/// Harvests match links from anchors and from bare title/href attribute
/// pairs, keeping the longest title seen per URL.
pub fn parse_match_links(html: &str) -> Vec<MatchLink> {
    let mut links: Vec<MatchLink> = Vec::new();

    let mut from = 0;
    while let Some(found) = html[from..].find("<a") {
        let tag_start = from + found;
        let after = tag_start + 2;
        from = after;
        if html[after..]
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_alphanumeric())
        {
            continue;
        }
        let Some(gt) = html[after..].find('>') else {
            break;
        };
        let tag = &html[tag_start..after + gt + 1];
        let Some(path) = attribute_value(tag, "href") else {
            continue;
        };
        if !is_live_scores_path(path) {
            continue;
        }
        let title = attribute_value(tag, "title").unwrap_or("");
        add_link(&mut links, path, title);
    }

    // title/href pairs that sit outside a harvestable anchor tag
    let mut from = 0;
    while let Some(found) = html[from..].find("title=\"") {
        let start = from + found + 7;
        from = start;
        let Some(end) = html[start..].find('"') else {
            break;
        };
        let title = &html[start..start + end];
        let rest = html[start + end + 1..].trim_start();
        if let Some(href_rest) = rest.strip_prefix("href=\"")
            && let Some(href_end) = href_rest.find('"')
        {
            let path = &href_rest[..href_end];
            if is_live_scores_path(path) {
                add_link(&mut links, path, title);
            }
        }
    }
    let mut from = 0;
    while let Some(found) = html[from..].find("href=\"") {
        let start = from + found + 6;
        from = start;
        let Some(end) = html[start..].find('"') else {
            break;
        };
        let path = &html[start..start + end];
        if !is_live_scores_path(path) {
            continue;
        }
        let rest = html[start + end + 1..].trim_start();
        if let Some(title_rest) = rest.strip_prefix("title=\"")
            && let Some(title_end) = title_rest.find('"')
        {
            add_link(&mut links, path, &title_rest[..title_end]);
        }
    }

    links
}

/// First standalone "vs" with whitespace on both sides.
fn split_on_vs(text: &str) -> Option<(String, String)> {
    let bytes = text.as_bytes();
    let mut i = 1;
    while i + 2 < bytes.len() {
        if bytes[i].eq_ignore_ascii_case(&b'v')
            && bytes[i + 1].eq_ignore_ascii_case(&b's')
            && bytes[i - 1].is_ascii_whitespace()
            && bytes[i + 2].is_ascii_whitespace()
        {
            let left = text[..i].trim_end();
            let right = text[i + 2..].trim_start();
            if !left.is_empty() && !right.is_empty() {
                return Some((left.to_string(), right.to_string()));
            }
        }
        i += 1;
    }
    None
}

/// Splits "A vs B, 3rd T20I - Status" into its parts; absent parts are None.
pub fn parse_title_meta(title: &str) -> TitleMeta {
    let (before_status, status) = match title.split_once(" - ") {
        Some((before, rest)) => {
            let status = rest.trim();
            (before, (!status.is_empty()).then(|| status.to_string()))
        }
        None => (title, None),
    };
    let (teams_text, match_desc) = match before_status.split_once(',') {
        Some((teams, rest)) => {
            let desc = rest.trim();
            (teams, (!desc.is_empty()).then(|| desc.to_string()))
        }
        None => (before_status, None),
    };
    match split_on_vs(teams_text) {
        Some((team1, team2)) => {
            let team1 = clean_text(&team1);
            let team2 = clean_text(&team2);
            TitleMeta {
                team1: (!team1.is_empty()).then_some(team1),
                team2: (!team2.is_empty()).then_some(team2),
                match_desc,
                status,
            }
        }
        None => TitleMeta {
            team1: None,
            team2: None,
            match_desc,
            status,
        },
    }
}

/// Replaces the description part of a title when a better one is known.
pub fn normalize_title(title: &str, match_desc: &str) -> String {
    if match_desc.is_empty() {
        return title.to_string();
    }
    let teams_part = title.split(',').next().unwrap_or(title).trim();
    format!("{teams_part}, {match_desc}")
}

/// Fabricates a short name: initials for multi-word names, a prefix
/// otherwise.
pub fn get_short_name(name: &str) -> String {
    let cleaned = name.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() == 1 {
        return words[0].chars().take(3).collect::<String>().to_uppercase();
    }
    words
        .iter()
        .filter_map(|word| word.chars().next())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}
