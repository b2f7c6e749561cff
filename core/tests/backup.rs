//! Backup export/import: round-trips, browser-made files, and rejection
//! of malformed documents without touching the current state.

use carwash_core::{
    backup::{backup_file_name, generate_backup_document, parse_backup_document},
    catalog::ServiceCatalog,
    clock::{Clock, ManualClock},
    error::WashError,
    queue::QueueStore,
    store::KvStore,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn desk_at(clock: &ManualClock) -> QueueStore {
    QueueStore::open(
        ServiceCatalog::standard(),
        Box::new(KvStore::open_migrated(":memory:").unwrap()),
        Box::new(clock.clone()),
    )
}

fn busy_desk() -> (QueueStore, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    let mut desk = desk_at(&clock);
    desk.add_customer("Alice", 1).unwrap();
    clock.advance(chrono::Duration::milliseconds(1_250));
    desk.add_customer("Bob", 4).unwrap();
    desk.add_customer("Cleo", 3).unwrap();
    desk.complete_service().unwrap();
    clock.advance(chrono::Duration::minutes(3));
    desk.add_customer("Dev", 2).unwrap();
    (desk, clock)
}

#[test]
fn export_then_import_restores_the_same_state() {
    let (desk, clock) = busy_desk();
    let original = desk.snapshot();
    let document = generate_backup_document(&original, clock.now()).unwrap();

    let mut restored = desk_at(&ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    restored
        .replace_state(parse_backup_document(&document).unwrap())
        .unwrap();
    assert_eq!(restored.snapshot(), original);
}

#[test]
fn export_has_the_documented_shape() {
    let (desk, clock) = busy_desk();
    let document = generate_backup_document(&desk.snapshot(), clock.now()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&document).unwrap();

    assert_eq!(doc["totalRevenue"], 20.0);
    assert_eq!(doc["customersServed"], 1);
    assert_eq!(doc["exportDate"], "2024-05-01T09:03:01.250Z");
    let customers = doc["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 3);
    assert_eq!(customers[0]["name"], "Bob");
    assert_eq!(customers[0]["addedAt"], "2024-05-01T09:00:01.250Z");
    for key in ["id", "name", "serviceType", "serviceCost", "addedAt"] {
        assert!(customers[2].get(key).is_some(), "customer missing {key}");
    }
}

#[test]
fn browser_backup_imports() {
    let raw = r#"{
      "customers": [
        {"id": 1714554000000, "name": "John Smith", "serviceType": 1,
         "serviceCost": 20, "addedAt": "2024-05-01T09:00:00.000Z", "vip": true}
      ],
      "totalRevenue": 95,
      "customersServed": 3,
      "exportDate": "2024-05-01T12:00:00.000Z",
      "appVersion": "1.0"
    }"#;
    let state = parse_backup_document(raw).unwrap();
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.queue[0].name, "John Smith");
    assert_eq!(state.queue[0].service_cost, 20.0);
    assert_eq!(state.total_revenue, 95.0);
    assert_eq!(state.customers_served, 3);
}

#[test]
fn missing_fields_default_to_empty() {
    let state = parse_backup_document("{}").unwrap();
    assert!(state.is_blank());

    let state = parse_backup_document(r#"{"customers": null, "totalRevenue": 12}"#).unwrap();
    assert!(state.queue.is_empty());
    assert_eq!(state.total_revenue, 12.0);
    assert_eq!(state.customers_served, 0);
}

#[test]
fn malformed_counters_read_as_zero() {
    let state =
        parse_backup_document(r#"{"totalRevenue": "lots", "customersServed": -4}"#).unwrap();
    assert_eq!(state.total_revenue, 0.0);
    assert_eq!(state.customers_served, 0);

    let state =
        parse_backup_document(r#"{"totalRevenue": "80.00", "customersServed": "2"}"#).unwrap();
    assert_eq!(state.total_revenue, 80.0);
    assert_eq!(state.customers_served, 2);
}

#[test]
fn oversized_served_count_reads_as_zero() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    for raw in [
        r#"{"customersServed": 1e30}"#,
        r#"{"customersServed": 18446744073709551615}"#,
        r#"{"customersServed": "18446744073709551615"}"#,
    ] {
        let mut desk = desk_at(&clock);
        desk.import_backup(raw).unwrap();
        assert_eq!(desk.snapshot().customers_served, 0, "{raw}");

        desk.add_customer("Alice", 1).unwrap();
        desk.complete_service().unwrap();
        assert_eq!(desk.snapshot().customers_served, 1, "{raw}");
    }
}

#[test]
fn full_served_counter_refuses_service_without_side_effects() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    let mut desk = desk_at(&clock);
    desk.add_customer("Alice", 1).unwrap();
    let mut state = desk.snapshot().to_state();
    state.customers_served = u64::MAX;
    desk.replace_state(state).unwrap();
    let before = desk.snapshot();

    let err = desk.complete_service().unwrap_err();
    assert!(matches!(err, WashError::Validation(_)), "got {err:?}");
    assert_eq!(desk.snapshot(), before);
}

#[test]
fn imported_timestamps_are_cut_to_milliseconds() {
    let doc = r#"{
        "customers": [
            {"id": 7, "name": "Alice", "serviceType": 1, "serviceCost": 20,
             "addedAt": "2024-05-01T09:00:00.123456789Z"}
        ],
        "totalRevenue": 0,
        "customersServed": 0
    }"#;
    let first = parse_backup_document(doc).unwrap();
    assert_eq!(
        first.queue[0].added_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
            + chrono::Duration::milliseconds(123)
    );

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap());
    let mut desk = desk_at(&clock);
    desk.replace_state(first.clone()).unwrap();
    let exported = generate_backup_document(&desk.snapshot(), clock.now()).unwrap();
    assert_eq!(parse_backup_document(&exported).unwrap(), first);
}

#[test]
fn malformed_documents_are_rejected() {
    let cases = [
        "",
        "{not json",
        "[1, 2, 3]",
        r#"{"customers": "Alice"}"#,
        r#"{"customers": [{"name": "Alice"}]}"#,
        r#"{"customers": [{"id": 1, "name": "  ", "serviceType": 1, "serviceCost": 20, "addedAt": "2024-05-01T09:00:00.000Z"}]}"#,
        r#"{"customers": [{"id": 1, "name": "Al", "serviceType": 1, "serviceCost": -5, "addedAt": "2024-05-01T09:00:00.000Z"}]}"#,
        r#"{"customers": [{"id": 1, "name": "Al", "serviceType": 1, "serviceCost": 20, "addedAt": "yesterday"}]}"#,
        r#"{"customers": [
            {"id": 7, "name": "Al", "serviceType": 1, "serviceCost": 20, "addedAt": "2024-05-01T09:00:00.000Z"},
            {"id": 7, "name": "Bo", "serviceType": 2, "serviceCost": 35, "addedAt": "2024-05-01T09:00:00.000Z"}]}"#,
    ];
    for raw in cases {
        let err = parse_backup_document(raw).unwrap_err();
        assert!(matches!(err, WashError::Parse(_)), "{raw:?} gave {err:?}");
    }
}

#[test]
fn failed_import_leaves_state_unchanged() {
    let (mut desk, _) = busy_desk();
    let before = desk.snapshot();

    let err = desk.import_backup("{\"customers\": [oops").unwrap_err();
    assert!(matches!(err, WashError::Parse(_)));
    assert_eq!(desk.snapshot(), before);

    let err = desk.import_backup(r#"{"customers": 5}"#).unwrap_err();
    assert!(matches!(err, WashError::Parse(_)));
    assert_eq!(desk.snapshot(), before);
}

#[test]
fn import_replaces_and_persists() {
    let (mut desk, _) = busy_desk();
    desk.import_backup(
        r#"{"customers": [{"id": 99999999999999, "name": "Zed", "serviceType": 3,
            "serviceCost": 40, "addedAt": "2024-04-30T17:00:00.000Z"}],
            "totalRevenue": 500, "customersServed": 10}"#,
    )
    .unwrap();

    let snap = desk.snapshot();
    assert_eq!(snap.queue_len(), 1);
    assert_eq!(snap.total_revenue, 500.0);
    assert_eq!(desk.storage().load().unwrap().unwrap(), snap.to_state());

    // New ids continue after the imported ones.
    let next = desk.add_customer("Amy", 1).unwrap();
    assert_eq!(next.id, 99999999999999 + 1);
}

#[test]
fn file_name_uses_the_date() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert_eq!(backup_file_name(date), "carwash_backup_2024-05-01.json");
}
