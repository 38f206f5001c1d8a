//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose calendar annotations and event use-cases as sync FRB calls.
//! - Translate core types into flat, string-friendly records.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD`, times as `HH:MM`.
//! - Failures are reported in the response envelope, never thrown.

use chrono::{NaiveDate, NaiveTime};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use techo_core::db::open_db;
use techo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddEventRequest, CalendarService, DayAnnotation, DayOverview, Event, SqliteBlobStore, Weekend,
};

const DB_FILE_NAME: &str = "techo_events.sqlite3";
const DB_PATH_ENV: &str = "TECHO_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Health-check call.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Stored event as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub title: String,
    pub description: String,
    /// Stored RFC 3339 timestamp.
    pub date: String,
}

/// Annotated day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    /// `YYYY-MM-DD`
    pub date: String,
    pub era_label: String,
    pub lunar_label: String,
    pub cycle_label: String,
    pub moon_emoji: String,
    /// `saturday`, `sunday` or empty.
    pub weekend: String,
    pub events: Vec<EventItem>,
}

/// Envelope for single-day and event-list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventItem>,
    pub message: String,
}

/// Envelope for multi-day calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayListResponse {
    pub ok: bool,
    pub days: Vec<DayCard>,
    /// Era of the first day shown (month views) or of the center day.
    pub era_label: String,
    /// Empty grid cells before the first day (month view only).
    pub leading_blanks: u32,
    pub message: String,
}

/// Envelope for a single annotated day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCardResponse {
    pub ok: bool,
    pub day: Option<DayCard>,
    pub message: String,
}

impl EventListResponse {
    fn success(items: Vec<EventItem>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            items,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

impl DayListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            days: Vec::new(),
            era_label: String::new(),
            leading_blanks: 0,
            message: message.into(),
        }
    }
}

/// Annotations of one day (no events).
#[flutter_rust_bridge::frb(sync)]
pub fn day_annotation(date: String) -> DayCardResponse {
    match parse_date(&date) {
        Ok(day) => DayCardResponse {
            ok: true,
            day: Some(to_day_card(techo_core::annotate(day), Vec::new(), None)),
            message: String::new(),
        },
        Err(err) => DayCardResponse {
            ok: false,
            day: None,
            message: format!("day_annotation failed: {err}"),
        },
    }
}

/// Events recorded on `date`, in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn day_events(date: String) -> EventListResponse {
    let day = match parse_date(&date) {
        Ok(day) => day,
        Err(err) => return EventListResponse::failure(format!("day_events failed: {err}")),
    };
    match with_calendar_service(|service| Ok(service.events_on_day(day))) {
        Ok(events) => {
            let message = format!("{} event(s).", events.len());
            EventListResponse::success(to_event_items(events), message)
        }
        Err(err) => EventListResponse::failure(format!("day_events failed: {err}")),
    }
}

/// Appends an event on `date` and returns the full updated list.
///
/// `time` is `HH:MM`; empty means the current time. Blank titles are
/// rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn add_event(
    title: String,
    description: String,
    date: String,
    time: Option<String>,
) -> EventListResponse {
    let request = match build_request(title, description, &date, time.as_deref()) {
        Ok(request) => request,
        Err(err) => return EventListResponse::failure(format!("add_event failed: {err}")),
    };
    let added = with_calendar_service(|service| {
        service.add_event(request).map_err(|err| err.to_string())
    });
    match added {
        Ok(events) => EventListResponse::success(to_event_items(events), "Event added."),
        Err(err) => EventListResponse::failure(format!("add_event failed: {err}")),
    }
}

/// Seven annotated days centered on `date`, with their events.
#[flutter_rust_bridge::frb(sync)]
pub fn week_strip(date: String) -> DayListResponse {
    let center = match parse_date(&date) {
        Ok(day) => day,
        Err(err) => return DayListResponse::failure(format!("week_strip failed: {err}")),
    };
    match with_calendar_service(|service| Ok(service.week_strip(center))) {
        Ok(days) => DayListResponse {
            ok: true,
            days: days.into_iter().map(overview_to_day_card).collect(),
            era_label: techo_core::format_era(center),
            leading_blanks: 0,
            message: String::new(),
        },
        Err(err) => DayListResponse::failure(format!("week_strip failed: {err}")),
    }
}

/// All days of a month for the Sunday-first grid.
#[flutter_rust_bridge::frb(sync)]
pub fn month_grid(year: i32, month: u32) -> DayListResponse {
    match with_calendar_service(|service| {
        service
            .month_grid(year, month)
            .map_err(|err| err.to_string())
    }) {
        Ok(grid) => DayListResponse {
            ok: true,
            era_label: grid.era_label,
            leading_blanks: grid.leading_blanks,
            days: grid.days.into_iter().map(overview_to_day_card).collect(),
            message: String::new(),
        },
        Err(err) => DayListResponse::failure(format!("month_grid failed: {err}")),
    }
}

fn build_request(
    title: String,
    description: String,
    date: &str,
    time: Option<&str>,
) -> Result<AddEventRequest, String> {
    let day = parse_date(date)?;
    let time = match time.map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw) => Some(
            NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|err| format!("invalid time `{raw}`: {err}"))?,
        ),
        None => None,
    };
    Ok(AddEventRequest {
        title,
        description,
        day,
        time,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{trimmed}`: {err}"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| db_path_from(std::env::var(DB_PATH_ENV).ok()))
        .clone()
}

fn db_path_from(configured: Option<String>) -> PathBuf {
    match configured.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => PathBuf::from(raw),
        _ => std::env::temp_dir().join(DB_FILE_NAME),
    }
}

fn with_calendar_service<T>(
    f: impl FnOnce(&mut CalendarService<SqliteBlobStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("event DB open failed: {err}")
    })?;
    let mut service = CalendarService::new(SqliteBlobStore::new(&conn));
    f(&mut service)
}

fn to_event_items(events: Vec<Event>) -> Vec<EventItem> {
    events
        .into_iter()
        .map(|event| EventItem {
            title: event.title,
            description: event.description,
            date: event.date,
        })
        .collect()
}

fn overview_to_day_card(overview: DayOverview) -> DayCard {
    to_day_card(overview.annotation, overview.events, overview.weekend)
}

fn to_day_card(
    annotation: DayAnnotation,
    events: Vec<Event>,
    weekend: Option<Weekend>,
) -> DayCard {
    DayCard {
        date: annotation.date.format("%Y-%m-%d").to_string(),
        era_label: annotation.era_label,
        lunar_label: annotation.lunar_label,
        cycle_label: annotation.cycle_label,
        moon_emoji: annotation.moon_emoji,
        weekend: match weekend {
            Some(Weekend::Saturday) => "saturday",
            Some(Weekend::Sunday) => "sunday",
            None => "",
        }
        .to_string(),
        events: to_event_items(events),
    }
}
