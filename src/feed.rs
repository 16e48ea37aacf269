use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::detail::fetch_match_detail;
use crate::matches::fetch_matches_data;
use crate::state::{Delta, ProviderCommand};

// Floor for the r-key refresh so a held key cannot hammer Cricbuzz.
const MANUAL_REFRESH_FLOOR: Duration = Duration::from_secs(5);

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let pool = build_fetch_pool();
        let inflight_max = env::var("DETAILS_INFLIGHT_MAX")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(8)
            .clamp(1, 64);
        let inflight_details: Arc<Mutex<HashSet<u64>>> = Arc::new(Mutex::new(HashSet::new()));

        let matches_interval = Duration::from_secs(
            env::var("MATCHES_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(60)
                .max(10),
        );
        let detail_interval = Duration::from_secs(
            env::var("DETAIL_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(30)
                .max(10),
        );

        if let Err(err) = refresh_matches(&tx) {
            let _ = tx.send(Delta::Log(format!("[WARN] Match list fetch error: {err:#}")));
        }
        let mut last_matches = Instant::now();
        let mut last_detail: HashMap<u64, Instant> = HashMap::new();

        loop {
            thread::sleep(Duration::from_millis(900));

            if last_matches.elapsed() >= matches_interval {
                if let Err(err) = refresh_matches(&tx) {
                    let _ =
                        tx.send(Delta::Log(format!("[WARN] Match list fetch error: {err:#}")));
                }
                last_matches = Instant::now();
            }

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    ProviderCommand::FetchMatches => {
                        if last_matches.elapsed() < MANUAL_REFRESH_FLOOR {
                            let _ = tx.send(Delta::Log(format!(
                                "[INFO] Matches refresh throttled ({}s)",
                                MANUAL_REFRESH_FLOOR.as_secs()
                            )));
                            continue;
                        }
                        if let Err(err) = refresh_matches(&tx) {
                            let _ = tx.send(Delta::Log(format!(
                                "[WARN] Match list fetch error: {err:#}"
                            )));
                        }
                        last_matches = Instant::now();
                    }
                    ProviderCommand::FetchMatchDetail { match_id } => {
                        // The detail screen re-requests every tick; the map
                        // turns that into one fetch per poll interval.
                        if last_detail
                            .get(&match_id)
                            .is_some_and(|at| at.elapsed() < detail_interval)
                        {
                            continue;
                        }
                        {
                            let mut inflight = inflight_details
                                .lock()
                                .expect("inflight details lock poisoned");
                            if inflight.contains(&match_id) {
                                continue;
                            }
                            if inflight.len() >= inflight_max {
                                continue;
                            }
                            inflight.insert(match_id);
                        }
                        last_detail.insert(match_id, Instant::now());

                        let tx = tx.clone();
                        let inflight_details = inflight_details.clone();
                        let job = move || {
                            match fetch_match_detail(match_id) {
                                Ok(detail) => {
                                    let _ = tx.send(Delta::SetMatchDetail {
                                        id: match_id,
                                        detail,
                                    });
                                }
                                Err(err) => {
                                    let _ = tx.send(Delta::Log(format!(
                                        "[WARN] Match detail error: {err:#}"
                                    )));
                                }
                            }
                            let mut inflight = inflight_details
                                .lock()
                                .expect("inflight details lock poisoned");
                            inflight.remove(&match_id);
                        };

                        if let Some(pool) = pool.as_ref() {
                            pool.spawn(job);
                        } else {
                            thread::spawn(job);
                        }
                    }
                }
            }
        }
    });
}

fn refresh_matches(tx: &Sender<Delta>) -> anyhow::Result<()> {
    let data = fetch_matches_data()?;
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Matches updated: {} live, {} upcoming, {} recent",
        data.live.len(),
        data.upcoming.len(),
        data.recent.len()
    )));
    let _ = tx.send(Delta::SetMatches(data));
    Ok(())
}

fn build_fetch_pool() -> Option<rayon::ThreadPool> {
    let threads = fetch_parallelism();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .ok()
}

fn fetch_parallelism() -> usize {
    env::var("FETCH_PARALLELISM")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(6)
        .clamp(2, 32)
}
