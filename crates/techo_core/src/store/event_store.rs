//! Append-only event store over a blob transport.
//!
//! # Responsibility
//! - Load the persisted collection, tolerating missing or corrupt data.
//! - Append events and re-serialize the whole collection after each one.
//!
//! # Invariants
//! - After a successful `append`, memory and the blob hold the same list.
//! - A failed write leaves memory unchanged (the event is rolled back).
//! - Titles are stored as given; validation belongs to the caller.

use crate::model::event::{Event, EventCollection};
use crate::store::blob::BlobStore;
use crate::store::StoreResult;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Well-known key of the serialized event list.
pub const EVENTS_STORAGE_KEY: &str = "calendar_events";

/// Reads the persisted collection from `blob`.
///
/// Never fails: an absent key, a transport error or malformed JSON all yield
/// an empty collection (the latter two are logged at `warn`).
pub fn load_events<S: BlobStore + ?Sized>(blob: &S) -> EventCollection {
    let raw = match blob.get(EVENTS_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=events_load module=store status=ok source=empty count=0");
            return EventCollection::new();
        }
        Err(err) => {
            warn!(
                "event=events_load module=store status=fallback reason=read_failed error={err}"
            );
            return EventCollection::new();
        }
    };

    match serde_json::from_str::<EventCollection>(&raw) {
        Ok(events) => {
            debug!(
                "event=events_load module=store status=ok source=blob count={}",
                events.len()
            );
            events
        }
        Err(err) => {
            // serde messages can quote stored text; log position only
            warn!(
                "event=events_load module=store status=fallback reason=malformed category={:?} line={} column={} bytes={}",
                err.classify(),
                err.line(),
                err.column(),
                raw.len()
            );
            EventCollection::new()
        }
    }
}

/// In-memory event list mirrored to a [`BlobStore`].
pub struct EventStore<S: BlobStore> {
    blob: S,
    events: EventCollection,
}

impl<S: BlobStore> EventStore<S> {
    /// Loads the persisted collection from `blob`.
    pub fn open(blob: S) -> Self {
        let events = load_events(&blob);
        Self { blob, events }
    }

    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    /// Re-reads the blob, discarding the in-memory copy.
    pub fn reload(&mut self) -> &EventCollection {
        self.events = load_events(&self.blob);
        &self.events
    }

    /// Appends `event` and writes the whole collection back.
    ///
    /// # Errors
    /// Returns the encode or transport error; the event is not kept.
    pub fn append(&mut self, event: Event) -> StoreResult<&EventCollection> {
        self.events.push(event);
        if let Err(err) = self.persist() {
            self.events.pop();
            warn!(
                "event=events_append module=store status=error count={} error={err}",
                self.events.len()
            );
            return Err(err);
        }
        info!(
            "event=events_append module=store status=ok count={}",
            self.events.len()
        );
        Ok(&self.events)
    }

    /// Events on `day` in insertion order.
    pub fn events_on_day(&self, day: NaiveDate) -> Vec<&Event> {
        self.events.events_on_day(day)
    }

    fn persist(&self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.events)?;
        self.blob.set(EVENTS_STORAGE_KEY, &encoded)
    }
}
