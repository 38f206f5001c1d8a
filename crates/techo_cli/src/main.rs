//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `techo_core` linkage without the Flutter runtime.
//! - Print the annotations of one date and the events of its week.
//!
//! Usage: `techo_cli [YYYY-MM-DD]` (defaults to today). Events are read from
//! `TECHO_DB_PATH`, or `techo_events.sqlite3` in the temp directory.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::process::ExitCode;
use techo_core::db::open_db;
use techo_core::{CalendarService, SqliteBlobStore};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("techo_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("techo_core ping={}", techo_core::ping());
    println!("techo_core version={}", techo_core::core_version());

    let date = match std::env::args().nth(1) {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|err| format!("invalid date `{raw}`: {err}"))?,
        None => Local::now().date_naive(),
    };

    let conn = open_db(db_path()).map_err(|err| format!("event DB open failed: {err}"))?;
    let service = CalendarService::new(SqliteBlobStore::new(&conn));

    let day = service.annotate(date);
    println!(
        "{} {} lunar={} rokuyo={} moon={}",
        date, day.era_label, day.lunar_label, day.cycle_label, day.moon_emoji
    );

    for overview in service.week_strip(date) {
        for event in &overview.events {
            println!("  {} {}", overview.date(), event.title);
        }
    }
    Ok(())
}

fn db_path() -> PathBuf {
    std::env::var("TECHO_DB_PATH")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("techo_events.sqlite3"))
}
