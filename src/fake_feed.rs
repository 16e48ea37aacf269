//! Offline provider: simulates a T20 chase so the interface can be exercised
//! without touching the network. Enabled with FAKE_FEED=1.

use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::balls::{to_current_over_balls, to_recent_balls};
use crate::overs::format_run_rate;
use crate::state::{
    Delta, LiveBatter, LiveBowler, MatchBatter, MatchBowler, MatchDetailData, MatchInnings,
    MatchListItem, MatchLiveState, MatchStatusType, MatchesData, ProviderCommand, TeamSnapshot,
    WinPrediction,
};
use crate::team_flags::get_team_flag_url;
use crate::text::normalize_player_key;

const FAKE_MATCH_ID: u64 = 118_928;
const TARGET: u32 = 187;
const TOTAL_BALLS: u32 = 120;

const CHASE_BATTERS: [&str; 11] = [
    "Travis Head",
    "David Warner",
    "Steven Smith",
    "Glenn Maxwell",
    "Mitchell Marsh",
    "Tim David",
    "Matthew Wade",
    "Pat Cummins",
    "Mitchell Starc",
    "Adam Zampa",
    "Josh Hazlewood",
];

const BOWLERS: [&str; 5] = [
    "Jasprit Bumrah",
    "Mohammed Siraj",
    "Kuldeep Yadav",
    "Ravindra Jadeja",
    "Hardik Pandya",
];

struct FakeChase {
    runs: u32,
    wickets: u32,
    balls: u32,
    striker: usize,
    non_striker: usize,
    next_batter: usize,
    batter_runs: [u32; 11],
    batter_balls: [u32; 11],
    batter_fours: [u32; 11],
    batter_sixes: [u32; 11],
    dismissals: [Option<usize>; 11],
    bowler_runs: [u32; 5],
    bowler_wickets: [u32; 5],
    over_tokens: Vec<String>,
    recent_tokens: Vec<String>,
    fall_of_wickets: Vec<String>,
}

impl FakeChase {
    fn new() -> Self {
        Self {
            runs: 0,
            wickets: 0,
            balls: 0,
            striker: 0,
            non_striker: 1,
            next_batter: 2,
            batter_runs: [0; 11],
            batter_balls: [0; 11],
            batter_fours: [0; 11],
            batter_sixes: [0; 11],
            dismissals: [None; 11],
            bowler_runs: [0; 5],
            bowler_wickets: [0; 5],
            over_tokens: Vec::new(),
            recent_tokens: Vec::new(),
            fall_of_wickets: Vec::new(),
        }
    }

    fn finished(&self) -> bool {
        self.runs >= TARGET || self.wickets >= 10 || self.balls >= TOTAL_BALLS
    }

    fn bowler_index(&self) -> usize {
        (self.balls / 6) as usize % BOWLERS.len()
    }

    fn overs_text(&self) -> String {
        if self.balls % 6 == 0 {
            format!("{}", self.balls / 6)
        } else {
            format!("{}.{}", self.balls / 6, self.balls % 6)
        }
    }

    fn push_token(&mut self, token: &str) {
        self.over_tokens.push(token.to_string());
        self.recent_tokens.push(token.to_string());
        let overflow = self.recent_tokens.len().saturating_sub(12);
        if overflow > 0 {
            self.recent_tokens.drain(..overflow);
        }
    }

    fn tick(&mut self, rng: &mut impl Rng) {
        if self.finished() {
            return;
        }

        let bowler = self.bowler_index();

        if rng.gen_bool(0.06) {
            self.runs += 1;
            self.bowler_runs[bowler] += 1;
            self.push_token("Wd");
            return;
        }

        let outcome = rng.gen_range(0..10);
        self.balls += 1;
        self.batter_balls[self.striker] += 1;

        match outcome {
            0 => {
                self.wickets += 1;
                self.bowler_wickets[bowler] += 1;
                self.dismissals[self.striker] = Some(bowler);
                self.fall_of_wickets.push(format!(
                    "{}-{} ({}, {})",
                    self.runs,
                    self.wickets,
                    CHASE_BATTERS[self.striker],
                    self.overs_text()
                ));
                self.push_token("W");
                if self.next_batter < CHASE_BATTERS.len() {
                    self.striker = self.next_batter;
                    self.next_batter += 1;
                }
            }
            1 | 2 => self.push_token("0"),
            3..=5 => self.score(1, bowler),
            6 => self.score(2, bowler),
            7 | 8 => self.score(4, bowler),
            _ => self.score(6, bowler),
        }

        if self.balls % 6 == 0 {
            self.over_tokens.clear();
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        }
    }

    fn score(&mut self, runs: u32, bowler: usize) {
        self.runs += runs;
        self.batter_runs[self.striker] += runs;
        self.bowler_runs[bowler] += runs;
        match runs {
            4 => self.batter_fours[self.striker] += 1,
            6 => self.batter_sixes[self.striker] += 1,
            _ => {}
        }
        self.push_token(&runs.to_string());
        if runs % 2 == 1 {
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        }
    }

    fn score_line(&self) -> String {
        format!("{}/{} ({})", self.runs, self.wickets, self.overs_text())
    }

    fn status(&self) -> String {
        if self.runs >= TARGET {
            format!("Australia won by {} wickets", 10 - self.wickets)
        } else if self.wickets >= 10 || self.balls >= TOTAL_BALLS {
            format!("India won by {} runs", TARGET - 1 - self.runs)
        } else {
            format!(
                "Australia need {} runs in {} balls",
                TARGET - self.runs,
                TOTAL_BALLS - self.balls
            )
        }
    }
}

fn snapshot(name: &str, short: &str, score: &str) -> TeamSnapshot {
    TeamSnapshot {
        name: name.to_string(),
        short_name: short.to_string(),
        score: score.to_string(),
        flag_url: get_team_flag_url(name, short, 40),
    }
}

fn live_item(chase: &FakeChase) -> MatchListItem {
    let status_type = if chase.finished() {
        MatchStatusType::Complete
    } else {
        MatchStatusType::Live
    };
    MatchListItem {
        id: FAKE_MATCH_ID,
        title: "India vs Australia, 2nd T20I".to_string(),
        match_desc: "2nd T20I".to_string(),
        series: "Australia tour of India".to_string(),
        venue: "Wankhede Stadium, Mumbai".to_string(),
        team1: snapshot("India", "IND", "186/6 (20)"),
        team2: snapshot("Australia", "AUS", &chase.score_line()),
        status: chase.status(),
        state: if chase.finished() {
            "Complete".to_string()
        } else {
            "In Progress".to_string()
        },
        status_type,
        match_url: format!("/live-cricket-scores/{FAKE_MATCH_ID}/ind-vs-aus-2nd-t20i"),
    }
}

fn upcoming_item() -> MatchListItem {
    MatchListItem {
        id: FAKE_MATCH_ID + 1,
        title: "Pakistan vs South Africa, 1st ODI".to_string(),
        match_desc: "1st ODI".to_string(),
        series: "South Africa tour of Pakistan".to_string(),
        venue: "Gaddafi Stadium, Lahore".to_string(),
        team1: snapshot("Pakistan", "PAK", ""),
        team2: snapshot("South Africa", "RSA", ""),
        status: "Starts at 10:00 AM".to_string(),
        state: "Preview".to_string(),
        status_type: MatchStatusType::Upcoming,
        match_url: format!(
            "/live-cricket-scores/{}/pak-vs-rsa-1st-odi",
            FAKE_MATCH_ID + 1
        ),
    }
}

fn recent_item() -> MatchListItem {
    MatchListItem {
        id: FAKE_MATCH_ID - 1,
        title: "Sri Lanka vs Bangladesh, 3rd T20I".to_string(),
        match_desc: "3rd T20I".to_string(),
        series: "Bangladesh tour of Sri Lanka".to_string(),
        venue: "R. Premadasa Stadium, Colombo".to_string(),
        team1: snapshot("Sri Lanka", "SL", "174/7 (20)"),
        team2: snapshot("Bangladesh", "BAN", "151 (18.3)"),
        status: "Sri Lanka won by 23 runs".to_string(),
        state: "Complete".to_string(),
        status_type: MatchStatusType::Complete,
        match_url: format!(
            "/live-cricket-scores/{}/sl-vs-ban-3rd-t20i",
            FAKE_MATCH_ID - 1
        ),
    }
}

fn matches_data(chase: &FakeChase) -> MatchesData {
    let item = live_item(chase);
    let mut data = MatchesData {
        live: Vec::new(),
        upcoming: vec![upcoming_item()],
        recent: vec![recent_item()],
    };
    match item.status_type {
        MatchStatusType::Live => data.live.push(item),
        MatchStatusType::Complete => data.recent.insert(0, item),
        MatchStatusType::Upcoming => data.upcoming.push(item),
    }
    data
}

fn strike_rate(runs: u32, balls: u32) -> String {
    if balls == 0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", runs as f64 * 100.0 / balls as f64)
    }
}

fn first_innings() -> MatchInnings {
    let batter = |name: &str, runs: &str, balls: &str, fours: &str, sixes: &str, sr: &str, out: &str| {
        MatchBatter {
            name: name.to_string(),
            runs: runs.to_string(),
            balls: balls.to_string(),
            fours: fours.to_string(),
            sixes: sixes.to_string(),
            strike_rate: sr.to_string(),
            dismissal: out.to_string(),
        }
    };
    MatchInnings {
        innings_id: "1".to_string(),
        batting_team: "India".to_string(),
        bowling_team: "Australia".to_string(),
        score_line: "186/6 (20)".to_string(),
        run_rate: "9.30".to_string(),
        extras_line: "Extras 9 (b 1, lb 3, w 5)".to_string(),
        batsmen: vec![
            batter("Rohit Sharma", "58", "39", "6", "3", "148.72", "c Wade b Starc"),
            batter("Virat Kohli", "44", "31", "4", "1", "141.94", "b Zampa"),
            batter("Suryakumar Yadav", "52", "28", "5", "3", "185.71", "not out"),
            batter("Hardik Pandya", "17", "14", "1", "0", "121.43", "run out"),
        ],
        bowlers: vec![
            MatchBowler {
                name: "Mitchell Starc".to_string(),
                overs: "4".to_string(),
                maidens: "0".to_string(),
                runs: "38".to_string(),
                wickets: "2".to_string(),
                economy: "9.50".to_string(),
                wides: "2".to_string(),
                no_balls: "0".to_string(),
            },
            MatchBowler {
                name: "Adam Zampa".to_string(),
                overs: "4".to_string(),
                maidens: "0".to_string(),
                runs: "29".to_string(),
                wickets: "2".to_string(),
                economy: "7.25".to_string(),
                wides: "1".to_string(),
                no_balls: "0".to_string(),
            },
        ],
        fall_of_wickets: vec![
            "82-1 (Rohit Sharma, 9.2)".to_string(),
            "121-2 (Virat Kohli, 13.4)".to_string(),
        ],
        yet_to_bat: Vec::new(),
    }
}

fn chase_innings(chase: &FakeChase) -> MatchInnings {
    let mut batsmen = Vec::new();
    for (index, name) in CHASE_BATTERS.iter().enumerate() {
        let appeared = chase.batter_balls[index] > 0
            || index == chase.striker
            || index == chase.non_striker;
        if !appeared || index >= chase.next_batter && index != chase.striker && index != chase.non_striker {
            continue;
        }
        let dismissal = match chase.dismissals[index] {
            Some(bowler) => format!("b {}", BOWLERS[bowler]),
            None => "not out".to_string(),
        };
        batsmen.push(MatchBatter {
            name: name.to_string(),
            runs: chase.batter_runs[index].to_string(),
            balls: chase.batter_balls[index].to_string(),
            fours: chase.batter_fours[index].to_string(),
            sixes: chase.batter_sixes[index].to_string(),
            strike_rate: strike_rate(chase.batter_runs[index], chase.batter_balls[index]),
            dismissal,
        });
    }

    let bowlers = BOWLERS
        .iter()
        .enumerate()
        .filter(|(index, _)| chase.balls / 6 > *index as u32 || chase.bowler_runs[*index] > 0)
        .map(|(index, name)| {
            let overs_bowled = (chase.balls / 6 / BOWLERS.len() as u32
                + u32::from((chase.balls / 6) % BOWLERS.len() as u32 > index as u32))
            .max(u32::from(chase.bowler_runs[index] > 0));
            MatchBowler {
                name: name.to_string(),
                overs: overs_bowled.to_string(),
                maidens: "0".to_string(),
                runs: chase.bowler_runs[index].to_string(),
                wickets: chase.bowler_wickets[index].to_string(),
                economy: if overs_bowled == 0 {
                    "0.00".to_string()
                } else {
                    format!("{:.2}", chase.bowler_runs[index] as f64 / overs_bowled as f64)
                },
                wides: "0".to_string(),
                no_balls: "0".to_string(),
            }
        })
        .collect();

    MatchInnings {
        innings_id: "2".to_string(),
        batting_team: "Australia".to_string(),
        bowling_team: "India".to_string(),
        score_line: chase.score_line(),
        run_rate: format_run_rate(Some(&chase.runs.to_string()), Some(&chase.overs_text())),
        extras_line: String::new(),
        batsmen,
        bowlers,
        fall_of_wickets: chase.fall_of_wickets.clone(),
        yet_to_bat: CHASE_BATTERS[chase.next_batter.min(CHASE_BATTERS.len())..]
            .iter()
            .map(|name| name.to_string())
            .collect(),
    }
}

fn live_state(chase: &FakeChase) -> MatchLiveState {
    let live_batter = |index: usize, on_strike: bool| LiveBatter {
        id: normalize_player_key(CHASE_BATTERS[index]),
        name: CHASE_BATTERS[index].to_string(),
        runs: chase.batter_runs[index].to_string(),
        balls: chase.batter_balls[index].to_string(),
        fours: chase.batter_fours[index].to_string(),
        sixes: chase.batter_sixes[index].to_string(),
        strike_rate: strike_rate(chase.batter_runs[index], chase.batter_balls[index]),
        on_strike,
    };
    let bowler_index = chase.bowler_index();
    let overs = chase.overs_text();
    let remaining = TOTAL_BALLS.saturating_sub(chase.balls);
    let required = if remaining == 0 || chase.runs >= TARGET {
        "-".to_string()
    } else {
        format!("{:.2}", (TARGET - chase.runs) as f64 * 6.0 / remaining as f64)
    };

    let recent = to_recent_balls(&chase.recent_tokens);
    let recent_count = recent.len();
    MatchLiveState {
        batters: vec![
            live_batter(chase.striker, true),
            live_batter(chase.non_striker, false),
        ],
        bowler: Some(LiveBowler {
            id: normalize_player_key(BOWLERS[bowler_index]),
            name: BOWLERS[bowler_index].to_string(),
            overs: overs.clone(),
            maidens: "0".to_string(),
            runs: chase.bowler_runs[bowler_index].to_string(),
            wickets: chase.bowler_wickets[bowler_index].to_string(),
            economy: "-".to_string(),
        }),
        previous_bowlers: Vec::new(),
        current_over_balls: to_current_over_balls(&chase.over_tokens, &overs),
        recent_balls: recent,
        recent_balls_label: crate::balls::format_recent_balls_label(recent_count),
        current_over_label: format!("Over {}", chase.balls / 6 + 1),
        current_run_rate: format_run_rate(Some(&chase.runs.to_string()), Some(&overs)),
        required_run_rate: required,
    }
}

fn win_prediction(chase: &FakeChase, rng: &mut impl Rng) -> WinPrediction {
    let remaining = TOTAL_BALLS.saturating_sub(chase.balls).max(1);
    let need = TARGET.saturating_sub(chase.runs) as f64;
    let pressure = need * 6.0 / remaining as f64 - 9.3;
    let wickets_left = (10 - chase.wickets) as f64;
    let mut chasing = 50.0 - pressure * 12.0 + (wickets_left - 5.0) * 4.0;
    chasing += rng.gen_range(-3.0..3.0);
    let chasing = chasing.clamp(1.0, 99.0);
    WinPrediction {
        team1_percent: format!("{:.0}%", 100.0 - chasing),
        team2_percent: format!("{chasing:.0}%"),
    }
}

fn detail(chase: &FakeChase, rng: &mut impl Rng) -> MatchDetailData {
    let item = live_item(chase);
    MatchDetailData {
        id: FAKE_MATCH_ID,
        title: item.title.clone(),
        series: item.series.clone(),
        match_desc: item.match_desc.clone(),
        format: "T20".to_string(),
        venue: item.venue.clone(),
        start_time: "Today, 7:00 PM".to_string(),
        status: item.status.clone(),
        state: item.state.clone(),
        toss: "India won the toss and opted to bat".to_string(),
        team1: item.team1.clone(),
        team2: item.team2.clone(),
        innings: vec![first_innings(), chase_innings(chase)],
        team1_players: Vec::new(),
        team2_players: Vec::new(),
        live_state: if chase.finished() {
            None
        } else {
            Some(live_state(chase))
        },
        win_prediction: Some(win_prediction(chase, rng)),
    }
}

pub fn spawn_fake_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let mut chase = FakeChase::new();

        let _ = tx.send(Delta::Log(
            "[INFO] Fake feed active; no network calls will be made".to_string(),
        ));
        let _ = tx.send(Delta::SetMatches(matches_data(&chase)));

        loop {
            thread::sleep(Duration::from_millis(900));

            let was_finished = chase.finished();
            chase.tick(&mut rng);
            if chase.finished() && !was_finished {
                let _ = tx.send(Delta::Log(format!("[ALERT] {}", chase.status())));
            }
            let _ = tx.send(Delta::SetMatches(matches_data(&chase)));

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    ProviderCommand::FetchMatches => {
                        let _ = tx.send(Delta::SetMatches(matches_data(&chase)));
                    }
                    ProviderCommand::FetchMatchDetail { match_id } => {
                        if match_id == FAKE_MATCH_ID {
                            let _ = tx.send(Delta::SetMatchDetail {
                                id: match_id,
                                detail: detail(&chase, &mut rng),
                            });
                        } else {
                            let _ = tx.send(Delta::Log(format!(
                                "[WARN] No fake detail for match {match_id}"
                            )));
                        }
                    }
                }
            }
        }
    });
}
