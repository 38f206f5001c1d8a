//! Calendar use-case service.
//!
//! # Responsibility
//! - Provide day annotations, per-day event lists, a 7-day strip and a
//!   month grid.
//! - Accept new events from the add-event form and return the full list.
//!
//! # Invariants
//! - The event day comes from the selected day, never from "now"; only the
//!   time-of-day defaults to the current time.
//! - Empty (whitespace-only) titles are rejected before reaching the store.
//! - Annotation methods are pure and safe to call on every render.

use crate::calendar::{annotate, era::format_era, DayAnnotation};
use crate::model::event::{Event, EventCollection, EventValidationError};
use crate::store::blob::BlobStore;
use crate::store::event_store::EventStore;
use crate::store::StoreError;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Weekday};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Days shown on each side of the center day in the week strip.
pub const WEEK_STRIP_RADIUS: i64 = 3;

/// Service error for calendar use-cases.
#[derive(Debug)]
pub enum CalendarServiceError {
    /// Form input failed validation.
    Validation(EventValidationError),
    /// Event could not be persisted.
    Store(StoreError),
    /// Requested date or month does not exist.
    InvalidDate(String),
}

impl Display for CalendarServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidDate(details) => write!(f, "invalid date: {details}"),
        }
    }
}

impl Error for CalendarServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidDate(_) => None,
        }
    }
}

impl From<EventValidationError> for CalendarServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CalendarServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Input of the add-event form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEventRequest {
    pub title: String,
    pub description: String,
    /// Day selected in the calendar.
    pub day: NaiveDate,
    /// Time-of-day; `None` uses the current wall-clock time.
    pub time: Option<NaiveTime>,
}

impl AddEventRequest {
    /// Rejects blank titles.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Weekend marker used for colouring day cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Weekend {
    Saturday,
    Sunday,
}

/// One day with its annotations and events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverview {
    pub annotation: DayAnnotation,
    /// Insertion order.
    pub events: Vec<Event>,
    pub weekend: Option<Weekend>,
}

impl DayOverview {
    pub fn date(&self) -> NaiveDate {
        self.annotation.date
    }
}

/// All days of one month, laid out for a Sunday-first grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Era of the month's first day, e.g. `令和6年`.
    pub era_label: String,
    /// Empty cells before the 1st (Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<DayOverview>,
}

/// Calendar service facade over an event store.
pub struct CalendarService<S: BlobStore> {
    store: EventStore<S>,
}

impl<S: BlobStore> CalendarService<S> {
    /// Opens the service over the persisted event list in `blob`.
    pub fn new(blob: S) -> Self {
        Self {
            store: EventStore::open(blob),
        }
    }

    /// Annotation labels for `date`.
    pub fn annotate(&self, date: NaiveDate) -> DayAnnotation {
        annotate(date)
    }

    pub fn events(&self) -> &EventCollection {
        self.store.events()
    }

    /// Events on `day` in insertion order.
    pub fn events_on_day(&self, day: NaiveDate) -> Vec<Event> {
        self.store
            .events_on_day(day)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Validates and appends a new event, returning the full updated list.
    pub fn add_event(
        &mut self,
        request: AddEventRequest,
    ) -> Result<Vec<Event>, CalendarServiceError> {
        request.validate()?;

        let time = request.time.unwrap_or_else(|| Local::now().time());
        // earliest() picks the first instant of a repeated DST hour
        let at = Local
            .from_local_datetime(&request.day.and_time(time))
            .earliest()
            .ok_or_else(|| {
                CalendarServiceError::InvalidDate(format!(
                    "{} {time} does not exist in the local timezone",
                    request.day
                ))
            })?;

        let event = Event::new(request.title, request.description, at.fixed_offset());
        let events = self.store.append(event)?;
        info!(
            "event=event_add module=service status=ok day={} count={}",
            request.day,
            events.len()
        );
        Ok(events.to_vec())
    }

    /// Seven days centered on `center`, each with annotations and events.
    pub fn week_strip(&self, center: NaiveDate) -> Vec<DayOverview> {
        let groups = self.store.events().group_by_day();
        (-WEEK_STRIP_RADIUS..=WEEK_STRIP_RADIUS)
            .filter_map(|offset| center.checked_add_signed(Duration::days(offset)))
            .map(|date| overview(date, groups.get(&date).map(Vec::as_slice)))
            .collect()
    }

    /// Every day of `year`-`month` for the month view.
    ///
    /// # Errors
    /// Returns `InvalidDate` when the month does not exist.
    pub fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid, CalendarServiceError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CalendarServiceError::InvalidDate(format!("{year}-{month:02}")))?;
        let groups = self.store.events().group_by_day();
        let days = first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(|date| overview(date, groups.get(&date).map(Vec::as_slice)))
            .collect();

        Ok(MonthGrid {
            year,
            month,
            era_label: format_era(first),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }
}

fn overview(date: NaiveDate, events: Option<&[&Event]>) -> DayOverview {
    DayOverview {
        annotation: annotate(date),
        events: events
            .unwrap_or_default()
            .iter()
            .map(|event| (*event).clone())
            .collect(),
        weekend: match date.weekday() {
            Weekday::Sat => Some(Weekend::Saturday),
            Weekday::Sun => Some(Weekend::Sunday),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::MemoryBlobStore;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(title: &str, day: NaiveDate, hour: u32) -> AddEventRequest {
        AddEventRequest {
            title: title.to_string(),
            description: String::new(),
            day,
            time: NaiveTime::from_hms_opt(hour, 0, 0),
        }
    }

    #[test]
    fn add_event_rejects_blank_title() {
        let mut service = CalendarService::new(MemoryBlobStore::new());
        let err = service
            .add_event(request("  ", ymd(2024, 2, 10), 9))
            .unwrap_err();
        assert!(matches!(
            err,
            CalendarServiceError::Validation(EventValidationError::EmptyTitle)
        ));
        assert!(service.events().is_empty());
    }

    #[test]
    fn add_event_keeps_selected_day_for_any_time() {
        let mut service = CalendarService::new(MemoryBlobStore::new());
        let day = ymd(2024, 2, 10);
        service.add_event(request("early", day, 0)).unwrap();
        let events = service.add_event(request("late", day, 23)).unwrap();

        assert_eq!(2, events.len());
        assert!(events[1].date.starts_with("2024-02-10T23:00:00"));
        let titles: Vec<_> = service
            .events_on_day(day)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(vec!["early", "late"], titles);
    }

    #[test]
    fn add_event_keeps_form_text_unchanged() {
        let mut service = CalendarService::new(MemoryBlobStore::new());
        let mut req = request("  tea  ", ymd(2024, 2, 10), 15);
        req.description = " with\nfriends ".to_string();
        let events = service.add_event(req).unwrap();
        assert_eq!("  tea  ", events[0].title);
        assert_eq!(" with\nfriends ", events[0].description);
    }

    #[test]
    fn add_event_without_time_stays_on_selected_day() {
        let mut service = CalendarService::new(MemoryBlobStore::new());
        let day = ymd(2024, 7, 4);
        let mut req = request("now-ish", day, 0);
        req.time = None;
        service.add_event(req).unwrap();
        assert_eq!(1, service.events_on_day(day).len());
    }

    #[test]
    fn week_strip_is_centered_with_events() {
        let mut service = CalendarService::new(MemoryBlobStore::new());
        service
            .add_event(request("new year", ymd(2024, 2, 10), 10))
            .unwrap();

        let strip = service.week_strip(ymd(2024, 2, 10));
        let dates: Vec<_> = strip.iter().map(DayOverview::date).collect();
        assert_eq!(ymd(2024, 2, 7), dates[0]);
        assert_eq!(ymd(2024, 2, 13), dates[6]);
        assert_eq!(7, dates.len());
        assert_eq!(1, strip[3].events.len());
        assert_eq!("1/1", strip[3].annotation.lunar_label);
        assert_eq!(Some(Weekend::Saturday), strip[3].weekend);
        assert!(strip.iter().enumerate().all(|(i, d)| i == 3 || d.events.is_empty()));
    }

    #[test]
    fn month_grid_lays_out_sunday_first() {
        let service = CalendarService::new(MemoryBlobStore::new());
        let grid = service.month_grid(2024, 2).unwrap();
        // 2024-02-01 is a Thursday
        assert_eq!(4, grid.leading_blanks);
        assert_eq!(29, grid.days.len());
        assert_eq!("令和6年", grid.era_label);
        assert_eq!(Some(Weekend::Sunday), grid.days[3].weekend);
        assert_eq!(None, grid.days[0].weekend);
    }

    #[test]
    fn month_grid_rejects_invalid_month() {
        let service = CalendarService::new(MemoryBlobStore::new());
        assert!(matches!(
            service.month_grid(2024, 13),
            Err(CalendarServiceError::InvalidDate(_))
        ));
    }
}
