use std::{env, path::PathBuf, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("HUNT_SERVER_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000)
}

pub fn ledger_path() -> PathBuf {
    env::var("SCORE_LEDGER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("results.csv"))
}

// Minimum wall-clock gap between effective /update ticks.
pub fn update_interval() -> Duration {
    let millis = env::var("UPDATE_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(100);
    Duration::from_millis(millis)
}
