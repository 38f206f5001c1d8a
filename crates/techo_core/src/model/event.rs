//! Event record and collection.
//!
//! # Responsibility
//! - Define the `{title, description, date}` wire shape.
//! - Resolve the calendar day an event belongs to.
//! - Filter and group a collection by calendar day.
//!
//! # Invariants
//! - `date` is kept exactly as stored; parsing happens on read.
//! - The day of a zoned timestamp is its wall-clock date in the local
//!   timezone; offset-less forms are taken as local wall-clock already.
//! - Events whose `date` does not parse belong to no day.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One user event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    /// Free text, empty when the user left it blank.
    #[serde(default)]
    pub description: String,
    /// RFC 3339 timestamp captured when the event was created.
    pub date: String,
}

/// Validation errors for event input at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyTitle,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title cannot be empty"),
        }
    }
}

impl Error for EventValidationError {}

impl Event {
    /// Creates an event stamped at `at`.
    ///
    /// No validation happens here; see
    /// [`AddEventRequest::validate`](crate::AddEventRequest::validate).
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: at.to_rfc3339(),
        }
    }

    /// Local calendar day of the event, or `None` when `date` is unparsable.
    ///
    /// Accepts RFC 3339 (`2024-02-09T15:00:00.000Z`), offset-less
    /// timestamps (`2024-02-10T09:00:00`) and bare dates (`2024-02-10`).
    /// RFC 3339 values are converted to the local timezone first.
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Local).date_naive());
        }
        if let Ok(at) = raw.parse::<NaiveDateTime>() {
            return Some(at.date());
        }
        raw.parse::<NaiveDate>().ok()
    }

    /// Returns whether this event falls on `day`, ignoring time-of-day.
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == Some(day)
    }
}

/// Ordered, append-only list of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCollection {
    events: Vec<Event>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new collection with `event` appended after all others.
    pub fn appended(&self, event: Event) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    pub(crate) fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn pop(&mut self) -> Option<Event> {
        self.events.pop()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Events on `day` in insertion order.
    pub fn events_on_day(&self, day: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|event| event.is_on(day)).collect()
    }

    /// Partitions the collection by calendar day.
    ///
    /// Each day keeps insertion order. Events without a parsable day are left
    /// out. Callers should not rely on the map's key order.
    pub fn group_by_day(&self) -> BTreeMap<NaiveDate, Vec<&Event>> {
        let mut groups: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
        for event in &self.events {
            if let Some(day) = event.day() {
                groups.entry(day).or_default().push(event);
            }
        }
        groups
    }
}

impl From<Vec<Event>> for EventCollection {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
