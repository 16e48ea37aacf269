//! Cricbuzz endpoints and the retry-once fetch wrappers.

use anyhow::{anyhow, Context, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;

use crate::http_client::http_client;

pub const CRICBUZZ_BASE_URL: &str = "https://www.cricbuzz.com";

pub fn live_matches_url() -> String {
    format!("{CRICBUZZ_BASE_URL}/cricket-match/live-scores")
}

pub fn upcoming_matches_url() -> String {
    format!("{CRICBUZZ_BASE_URL}/cricket-schedule/upcoming-series/international")
}

const MAX_ATTEMPTS: u32 = 2;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const JSON_ACCEPT: &str = "application/json,text/plain,*/*";

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

fn fetch_text(url: &str, accept: &'static str) -> Result<String> {
    let client = http_client()?;
    let mut last_error = None;

    for attempt in 1..=MAX_ATTEMPTS {
        let response = match client.get(url).header(ACCEPT, accept).send() {
            Ok(response) => response,
            Err(err) => {
                last_error = Some(anyhow!(err).context(format!("request to {url} failed")));
                if attempt == MAX_ATTEMPTS {
                    break;
                }
                continue;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error = anyhow!("failed to fetch {url} ({status})");
            if !should_retry(status) || attempt == MAX_ATTEMPTS {
                return Err(error);
            }
            last_error = Some(error);
            continue;
        }

        return response
            .text()
            .with_context(|| format!("failed to read body from {url}"));
    }

    Err(last_error.unwrap_or_else(|| anyhow!("failed to fetch {url}")))
}

pub fn fetch_html(url: &str) -> Result<String> {
    fetch_text(url, HTML_ACCEPT)
}

pub fn fetch_json(url: &str) -> Result<Value> {
    let text = fetch_text(url, JSON_ACCEPT)?;
    serde_json::from_str(&text).with_context(|| format!("invalid json response from {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_covers_timeouts_throttling_and_server_errors() {
        assert!(should_retry(StatusCode::REQUEST_TIMEOUT));
        assert!(should_retry(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(should_retry(StatusCode::BAD_GATEWAY));
        assert!(!should_retry(StatusCode::NOT_FOUND));
        assert!(!should_retry(StatusCode::FORBIDDEN));
    }

    #[test]
    fn endpoint_urls_share_the_base() {
        assert_eq!(
            live_matches_url(),
            "https://www.cricbuzz.com/cricket-match/live-scores"
        );
        assert_eq!(
            upcoming_matches_url(),
            "https://www.cricbuzz.com/cricket-schedule/upcoming-series/international"
        );
    }
}
