//! Shared text helpers for HTML-scraped content.

/// Decodes the handful of HTML entities Cricbuzz pages actually emit.
pub fn decode_html_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&decode_html_entities(text))
}

/// Trimmed text, or empty string when the value is absent.
pub fn safe_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or("").to_string()
}

/// Lowercase URL slug; "match" when nothing survives.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in text.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(lower);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "match".to_string()
    } else {
        slug
    }
}

/// Strips a trailing captain/keeper tag such as " (c)" or "(wk, c)".
pub fn normalize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    if let Some(open) = trimmed.rfind('(')
        && trimmed.ends_with(')')
    {
        let inner: String = trimmed[open + 1..trimmed.len() - 1]
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if matches!(inner.as_str(), "c" | "wk" | "c,wk" | "wk,c") {
            return trimmed[..open].trim().to_string();
        }
    }
    trimmed.to_string()
}

pub fn normalize_player_key(name: &str) -> String {
    collapse_whitespace(&normalize_player_name(name).to_lowercase())
}

/// Lowercase alphanumerics only; used to compare team names loosely.
pub fn normalize_team_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Keeps the first item whose score is never beaten; later items must score
/// strictly higher to replace it.
pub fn select_best<T, F>(items: impl IntoIterator<Item = T>, score: F) -> Option<T>
where
    F: Fn(&T) -> i64,
{
    let mut best: Option<(T, i64)> = None;
    for item in items {
        let item_score = score(&item);
        match &best {
            Some((_, best_score)) if item_score <= *best_score => {}
            _ => best = Some((item, item_score)),
        }
    }
    best.map(|(item, _)| item)
}

/// Whole-word containment with non-alphanumeric boundaries.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(pos) = text[from..].find(word) {
        let begin = from + pos;
        let end = begin + word.len();
        let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
        let before_ok = begin == 0 || !is_word(text.as_bytes()[begin - 1]);
        let after_ok = end == text.len() || !is_word(text.as_bytes()[end]);
        if before_ok && after_ok {
            return true;
        }
        from = begin + 1;
    }
    false
}

/// Leading-integer parse: skips leading whitespace, accepts an optional sign,
/// stops at the first non-digit.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut i = 0;
    let mut negative = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        negative = bytes[i] == b'-';
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    trimmed[digits_start..i]
        .parse::<i64>()
        .ok()
        .map(|v| if negative { -v } else { v })
}

/// First contiguous run of digits anywhere in the text.
pub fn first_digit_run(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_entities_and_collapses_whitespace() {
        assert_eq!(clean_text("  India &amp; Pakistan\n\t match  "), "India & Pakistan match");
        assert_eq!(clean_text("O&#x27;Brien &lt;b&gt;50&lt;/b&gt;"), "O'Brien <b>50</b>");
    }

    #[test]
    fn safe_text_handles_missing_values() {
        assert_eq!(safe_text(Some("  IND  ")), "IND");
        assert_eq!(safe_text(None), "");
    }

    #[test]
    fn slugify_collapses_and_falls_back() {
        assert_eq!(slugify("India vs Australia, 3rd T20I"), "india-vs-australia-3rd-t20i");
        assert_eq!(slugify("  --  "), "match");
    }

    #[test]
    fn player_name_tags_are_stripped() {
        assert_eq!(normalize_player_name("Rohit Sharma (c)"), "Rohit Sharma");
        assert_eq!(normalize_player_name("Jos Buttler (wk, c)"), "Jos Buttler");
        assert_eq!(normalize_player_name("MS Dhoni (wk)"), "MS Dhoni");
        assert_eq!(normalize_player_name("Smith (retired)"), "Smith (retired)");
    }

    #[test]
    fn team_keys_ignore_punctuation() {
        assert_eq!(normalize_team_key("New Zealand"), "newzealand");
        assert_eq!(normalize_team_key("U.A.E."), "uae");
    }

    #[test]
    fn select_best_prefers_first_on_ties() {
        let best = select_best(vec!["aa", "bb", "c"], |s| s.len() as i64);
        assert_eq!(best, Some("aa"));
    }

    #[test]
    fn word_boundaries_are_respected() {
        assert_eq!(contains_word("wd 1", "wd"), true);
        assert_eq!(contains_word("crowd", "wd"), false);
        assert_eq!(contains_word("no-ball", "ball"), true);
    }

    #[test]
    fn int_prefix_matches_loose_numbers() {
        assert_eq!(parse_int_prefix(" 42nd"), Some(42));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(first_digit_run("over 17.4"), Some("17"));
    }
}
