use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use techo_core::db::open_db;
use techo_core::{
    load_events, BlobStore, Event, EventStore, MemoryBlobStore, SqliteBlobStore,
    EVENTS_STORAGE_KEY,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Event stamped at local wall-clock time `at` (`YYYY-MM-DDTHH:MM:SS`).
fn event(title: &str, description: &str, at: &str) -> Event {
    let naive: NaiveDateTime = at.parse().unwrap();
    let local = Local.from_local_datetime(&naive).earliest().unwrap();
    Event::new(title, description, local.fixed_offset())
}

#[test]
fn same_day_events_keep_append_order() {
    let mut store = EventStore::open(MemoryBlobStore::new());
    let first = event("dentist", "", "2024-02-10T15:00:00");
    let second = event("dinner", "with family", "2024-02-10T08:00:00");
    let other = event("market", "", "2024-02-11T10:00:00");

    store.append(first.clone()).unwrap();
    store.append(second.clone()).unwrap();
    store.append(other.clone()).unwrap();

    assert_eq!(vec![&first, &second], store.events_on_day(ymd(2024, 2, 10)));
    assert_eq!(vec![&other], store.events_on_day(ymd(2024, 2, 11)));
    assert!(store.events_on_day(ymd(2024, 2, 12)).is_empty());
}

#[test]
fn events_on_distinct_days_are_separated() {
    let mut store = EventStore::open(MemoryBlobStore::new());
    let e1 = event("one", "", "2024-05-01T09:00:00");
    let e2 = event("two", "", "2024-05-02T09:00:00");
    store.append(e1.clone()).unwrap();
    store.append(e2.clone()).unwrap();

    assert_eq!(vec![&e1], store.events_on_day(ymd(2024, 5, 1)));
    assert_eq!(vec![&e2], store.events_on_day(ymd(2024, 5, 2)));
}

#[test]
fn sqlite_round_trip_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.sqlite3");
    let created = event("旧正月", "家族で集まる", "2024-02-10T12:34:56");

    {
        let conn = open_db(&path).unwrap();
        let mut store = EventStore::open(SqliteBlobStore::new(&conn));
        assert!(store.events().is_empty());
        store.append(created.clone()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let reloaded = load_events(&SqliteBlobStore::new(&conn));
    assert_eq!(1, reloaded.len());
    assert_eq!(&created, &reloaded.as_slice()[0]);
    assert!(reloaded.as_slice()[0].date.starts_with("2024-02-10T12:34:56"));
    assert_eq!(Some(ymd(2024, 2, 10)), reloaded.as_slice()[0].day());
}

#[test]
fn corrupt_persisted_blob_is_treated_as_no_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.sqlite3");
    let conn = open_db(&path).unwrap();
    let blob = SqliteBlobStore::new(&conn);
    blob.set(EVENTS_STORAGE_KEY, "[{\"title\": ").unwrap();

    let mut store = EventStore::open(&blob);
    assert!(store.events().is_empty());

    // The next append overwrites the corrupt blob with a valid list.
    store
        .append(event("fresh", "", "2024-02-10T09:00:00"))
        .unwrap();
    assert_eq!(1, load_events(&blob).len());
}

#[test]
fn group_by_day_preserves_per_day_order() {
    let mut store = EventStore::open(MemoryBlobStore::new());
    for (title, at) in [
        ("a", "2024-02-10T20:00:00"),
        ("b", "2024-02-11T08:00:00"),
        ("c", "2024-02-10T06:00:00"),
    ] {
        store.append(event(title, "", at)).unwrap();
    }

    let groups = store.events().group_by_day();
    let titles: Vec<_> = groups[&ymd(2024, 2, 10)]
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(vec!["a", "c"], titles);
    assert_eq!(1, groups[&ymd(2024, 2, 11)].len());
}
