use std::collections::{HashMap, VecDeque};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatusType {
    Live,
    Upcoming,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Wicket,
    Four,
    Six,
    Extra,
    Dot,
    Run,
    Other,
}

/// One delivery as shown in the over strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOverBall {
    pub label: String,
    pub value: String,
    pub kind: BallKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveBatter {
    pub id: String,
    pub name: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
    pub on_strike: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveBowler {
    pub id: String,
    pub name: String,
    pub overs: String,
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub economy: String,
}

/// Who is at the crease and what the last deliveries were. All display
/// strings; "-" marks stats the source page did not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchLiveState {
    pub batters: Vec<LiveBatter>,
    pub bowler: Option<LiveBowler>,
    pub previous_bowlers: Vec<LiveBowler>,
    pub current_over_balls: Vec<LiveOverBall>,
    pub recent_balls: Vec<LiveOverBall>,
    pub recent_balls_label: String,
    pub current_over_label: String,
    pub current_run_rate: String,
    pub required_run_rate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchBatter {
    pub name: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
    pub dismissal: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchBowler {
    pub name: String,
    pub overs: String,
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub economy: String,
    pub wides: String,
    pub no_balls: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchInnings {
    pub innings_id: String,
    pub batting_team: String,
    pub bowling_team: String,
    pub score_line: String,
    pub run_rate: String,
    pub extras_line: String,
    pub batsmen: Vec<MatchBatter>,
    pub bowlers: Vec<MatchBowler>,
    pub fall_of_wickets: Vec<String>,
    pub yet_to_bat: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSnapshot {
    pub name: String,
    pub short_name: String,
    pub score: String,
    pub flag_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamPlayer {
    pub id: String,
    pub name: String,
    pub role: String,
    pub batting_style: String,
    pub bowling_style: String,
    pub captain: bool,
    pub keeper: bool,
    pub substitute: bool,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinPrediction {
    pub team1_percent: String,
    pub team2_percent: String,
}

/// Everything the detail screen renders for one match.
#[derive(Debug, Clone)]
pub struct MatchDetailData {
    pub id: u64,
    pub title: String,
    pub series: String,
    pub match_desc: String,
    pub format: String,
    pub venue: String,
    pub start_time: String,
    pub status: String,
    pub state: String,
    pub toss: String,
    pub team1: TeamSnapshot,
    pub team2: TeamSnapshot,
    pub innings: Vec<MatchInnings>,
    pub team1_players: Vec<TeamPlayer>,
    pub team2_players: Vec<TeamPlayer>,
    pub live_state: Option<MatchLiveState>,
    pub win_prediction: Option<WinPrediction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchListItem {
    pub id: u64,
    pub title: String,
    pub match_desc: String,
    pub series: String,
    pub venue: String,
    pub team1: TeamSnapshot,
    pub team2: TeamSnapshot,
    pub status: String,
    pub state: String,
    pub status_type: MatchStatusType,
    pub match_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct MatchesData {
    pub live: Vec<MatchListItem>,
    pub upcoming: Vec<MatchListItem>,
    pub recent: Vec<MatchListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MatchList,
    MatchDetail { match_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTab {
    Live,
    Upcoming,
    Recent,
}

impl MatchTab {
    pub fn next(self) -> Self {
        match self {
            MatchTab::Live => MatchTab::Upcoming,
            MatchTab::Upcoming => MatchTab::Recent,
            MatchTab::Recent => MatchTab::Live,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTab::Live => "Live",
            MatchTab::Upcoming => "Upcoming",
            MatchTab::Recent => "Recent",
        }
    }
}

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub tab: MatchTab,
    pub selected: usize,
    pub matches: MatchesData,
    pub matches_cached_at: Option<SystemTime>,
    pub match_detail: HashMap<u64, MatchDetailData>,
    pub match_detail_cached_at: HashMap<u64, SystemTime>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub detail_scroll: u16,
    pub detail_innings_selected: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::MatchList,
            tab: MatchTab::Live,
            selected: 0,
            matches: MatchesData::default(),
            matches_cached_at: None,
            match_detail: HashMap::with_capacity(16),
            match_detail_cached_at: HashMap::with_capacity(16),
            logs: VecDeque::with_capacity(MAX_LOG_LINES),
            help_overlay: false,
            detail_scroll: 0,
            detail_innings_selected: 0,
        }
    }

    pub fn visible_matches(&self) -> &[MatchListItem] {
        match self.tab {
            MatchTab::Live => &self.matches.live,
            MatchTab::Upcoming => &self.matches.upcoming,
            MatchTab::Recent => &self.matches.recent,
        }
    }

    pub fn selected_match(&self) -> Option<&MatchListItem> {
        self.visible_matches().get(self.selected)
    }

    /// The detail screen stays pinned to its id even when the match drops off
    /// the visible list between refreshes.
    pub fn selected_match_id(&self) -> Option<u64> {
        match self.screen {
            Screen::MatchDetail { match_id } => Some(match_id),
            Screen::MatchList => self.selected_match().map(|m| m.id),
        }
    }

    pub fn push_log(&mut self, line: String) {
        self.logs.push_back(line);
        while self.logs.len() > MAX_LOG_LINES {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(MatchesData),
    SetMatchDetail { id: u64, detail: MatchDetailData },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchMatches,
    FetchMatchDetail { match_id: u64 },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches(matches) => {
            let selected_id = state.selected_match().map(|m| m.id);
            state.matches = matches;
            state.matches_cached_at = Some(SystemTime::now());
            let visible = state.visible_matches();
            state.selected = selected_id
                .and_then(|id| visible.iter().position(|m| m.id == id))
                .unwrap_or_else(|| state.selected.min(visible.len().saturating_sub(1)));
        }
        Delta::SetMatchDetail { id, detail } => {
            state.match_detail.insert(id, detail);
            state.match_detail_cached_at.insert(id, SystemTime::now());
        }
        Delta::Log(line) => state.push_log(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> TeamSnapshot {
        TeamSnapshot {
            name: name.to_string(),
            short_name: name.to_string(),
            score: String::new(),
            flag_url: None,
        }
    }

    fn item(id: u64) -> MatchListItem {
        MatchListItem {
            id,
            title: format!("Match {id}"),
            match_desc: String::new(),
            series: String::new(),
            venue: String::new(),
            team1: snapshot("IND"),
            team2: snapshot("AUS"),
            status: "Live".to_string(),
            state: "In Progress".to_string(),
            status_type: MatchStatusType::Live,
            match_url: String::new(),
        }
    }

    #[test]
    fn set_matches_follows_the_selected_id() {
        let mut state = AppState::new();
        state.matches.live = vec![item(1), item(2), item(3)];
        state.selected = 1;

        apply_delta(
            &mut state,
            Delta::SetMatches(MatchesData {
                live: vec![item(2), item(3)],
                upcoming: Vec::new(),
                recent: Vec::new(),
            }),
        );
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_match().map(|m| m.id), Some(2));
    }

    #[test]
    fn set_matches_clamps_a_vanished_selection() {
        let mut state = AppState::new();
        state.matches.live = vec![item(1), item(2), item(3)];
        state.selected = 2;

        apply_delta(
            &mut state,
            Delta::SetMatches(MatchesData {
                live: vec![item(9)],
                upcoming: Vec::new(),
                recent: Vec::new(),
            }),
        );
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn detail_screen_pins_the_match_id() {
        let mut state = AppState::new();
        state.screen = Screen::MatchDetail { match_id: 42 };
        assert_eq!(state.selected_match_id(), Some(42));
    }

    #[test]
    fn logs_are_capped() {
        let mut state = AppState::new();
        for i in 0..250 {
            apply_delta(&mut state, Delta::Log(format!("line {i}")));
        }
        assert_eq!(state.logs.len(), 200);
        assert_eq!(state.logs.front().map(String::as_str), Some("line 50"));
    }

    #[test]
    fn tabs_cycle() {
        assert_eq!(MatchTab::Live.next(), MatchTab::Upcoming);
        assert_eq!(MatchTab::Recent.next(), MatchTab::Live);
    }
}
