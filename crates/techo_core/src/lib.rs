//! Core domain logic for Techo.
//! Calendar annotations are pure functions; events are the only user data.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use calendar::era::{era_of, format_era, Era, EraYear};
pub use calendar::lunar::{lunar_date_of, lunar_label, nearest_anchor, LunarAnchor, LunarDate};
pub use calendar::moon::{phase_emoji, phase_of, MoonPhase};
pub use calendar::rokuyo::{rokuyo_of, Rokuyo};
pub use calendar::{annotate, DayAnnotation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventCollection, EventValidationError};
pub use service::calendar_service::{
    AddEventRequest, CalendarService, CalendarServiceError, DayOverview, MonthGrid, Weekend,
};
pub use store::blob::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use store::event_store::{load_events, EventStore, EVENTS_STORAGE_KEY};
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
