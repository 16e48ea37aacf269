//! Country lookup for team names and short codes.
//!
//! Table order matters: the containment scan returns the first entry whose
//! key contains (or is contained by) the normalized name.

const TEAM_TO_COUNTRY: [(&str, &str); 47] = [
    // Full names
    ("india", "in"),
    ("australia", "au"),
    ("england", "gb"),
    ("south africa", "za"),
    ("new zealand", "nz"),
    ("pakistan", "pk"),
    ("sri lanka", "lk"),
    ("bangladesh", "bd"),
    ("west indies", "jm"),
    ("afghanistan", "af"),
    ("ireland", "ie"),
    ("zimbabwe", "zw"),
    ("netherlands", "nl"),
    ("scotland", "gb"),
    ("nepal", "np"),
    ("oman", "om"),
    ("namibia", "na"),
    ("united arab emirates", "ae"),
    ("uae", "ae"),
    ("italy", "it"),
    ("qatar", "qa"),
    ("bahrain", "bh"),
    ("usa", "us"),
    ("united states", "us"),
    ("canada", "ca"),
    // Short codes
    ("ind", "in"),
    ("aus", "au"),
    ("eng", "gb"),
    ("rsa", "za"),
    ("sa", "za"),
    ("nz", "nz"),
    ("pak", "pk"),
    ("sl", "lk"),
    ("ban", "bd"),
    ("wi", "jm"),
    ("afg", "af"),
    ("ire", "ie"),
    ("zim", "zw"),
    ("ned", "nl"),
    ("sco", "gb"),
    ("nep", "np"),
    ("nam", "na"),
    ("oma", "om"),
    ("ita", "it"),
    ("qat", "qa"),
    ("bhr", "bh"),
    ("can", "ca"),
];

/// Lowercases and strips the "Women", "U-19" and trailing " A" squad
/// qualifiers, so "India Women" and "India A" both resolve like "India".
fn normalize_team_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut words: Vec<&str> = lower
        .split_whitespace()
        .filter(|word| !matches!(*word, "women" | "u-19" | "u19"))
        .collect();
    if words.len() > 1 && words.last() == Some(&"a") {
        words.pop();
    }
    words.join(" ")
}

fn lookup(normalized: &str) -> Option<&'static str> {
    TEAM_TO_COUNTRY
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, code)| *code)
}

fn country_code(team_name: &str, short_name: &str) -> Option<&'static str> {
    let name = normalize_team_name(team_name);
    let short = normalize_team_name(short_name);

    if !short.is_empty()
        && let Some(code) = lookup(&short)
    {
        return Some(code);
    }
    if !name.is_empty()
        && let Some(code) = lookup(&name)
    {
        return Some(code);
    }
    if name.is_empty() {
        return None;
    }
    TEAM_TO_COUNTRY
        .iter()
        .find(|(key, _)| name.contains(key) || key.contains(name.as_str()))
        .map(|(_, code)| *code)
}

pub fn get_team_flag_url(team_name: &str, short_name: &str, size: u32) -> Option<String> {
    country_code(team_name, short_name)
        .map(|code| format!("https://flagcdn.com/w{size}/{code}.png"))
}

/// Regional-indicator flag for terminals that render emoji.
pub fn get_team_flag_emoji(team_name: &str, short_name: &str) -> Option<String> {
    country_code(team_name, short_name).map(|code| {
        code.chars()
            .filter_map(|ch| char::from_u32(127_397 + ch.to_ascii_uppercase() as u32))
            .collect()
    })
}

/// Up to two uppercase initials, or "?" for blank names.
pub fn get_team_initials(name: &str) -> String {
    let cleaned = name.trim();
    if cleaned.is_empty() {
        return "?".to_string();
    }
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() == 1 {
        cleaned.chars().take(2).collect::<String>().to_uppercase()
    } else {
        words
            .iter()
            .take(2)
            .filter_map(|word| word.chars().next())
            .collect::<String>()
            .to_uppercase()
    }
}
