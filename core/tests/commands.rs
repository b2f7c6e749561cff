//! Command dispatch, the JSON command format, and demo data.

use carwash_core::{
    catalog::ServiceCatalog,
    clock::ManualClock,
    command::{CommandReply, DeskCommand},
    demo,
    error::WashError,
    queue::QueueStore,
    store::KvStore,
};
use chrono::{TimeZone, Utc};

fn desk() -> QueueStore {
    QueueStore::open(
        ServiceCatalog::standard(),
        Box::new(KvStore::open_migrated(":memory:").unwrap()),
        Box::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())),
    )
}

#[test]
fn commands_parse_from_json() {
    let cmd: DeskCommand =
        serde_json::from_str(r#"{"cmd":"add_customer","name":"Alice","service_type":1}"#).unwrap();
    assert_eq!(
        cmd,
        DeskCommand::AddCustomer {
            name: "Alice".into(),
            service_type: 1
        }
    );
    let cmd: DeskCommand = serde_json::from_str(r#"{"cmd":"complete_service"}"#).unwrap();
    assert_eq!(cmd, DeskCommand::CompleteService);
    let cmd: DeskCommand = serde_json::from_str(r#"{"cmd":"demo","count":3}"#).unwrap();
    assert_eq!(cmd, DeskCommand::Demo { count: 3, seed: 0 });
}

#[test]
fn dispatch_drives_the_store() {
    let mut store = desk();
    let reply = DeskCommand::AddCustomer {
        name: "Alice".into(),
        service_type: 1,
    }
    .apply(&mut store)
    .unwrap();
    match &reply {
        CommandReply::Added { customer, position } => {
            assert_eq!(customer.name, "Alice");
            assert_eq!(*position, 1);
        }
        other => panic!("unexpected reply {other:?}"),
    }
    assert_eq!(
        reply.notification(),
        "Customer Alice added to queue! (position 1)"
    );

    let reply = DeskCommand::CompleteService.apply(&mut store).unwrap();
    assert_eq!(
        reply.notification(),
        "Service completed for Alice! Revenue: $20"
    );

    let err = DeskCommand::CompleteService.apply(&mut store).unwrap_err();
    assert!(matches!(err, WashError::EmptyQueue));
    assert_eq!(err.to_string(), "No customers in queue");
}

#[test]
fn export_and_import_commands_round_trip() {
    let mut store = desk();
    DeskCommand::Demo { count: 5, seed: 9 }
        .apply(&mut store)
        .unwrap();
    DeskCommand::CompleteService.apply(&mut store).unwrap();
    let before = store.snapshot();

    let CommandReply::Exported { document } = DeskCommand::Export.apply(&mut store).unwrap() else {
        panic!("export should return a document");
    };
    DeskCommand::ClearAll.apply(&mut store).unwrap();
    assert_eq!(store.queue_len(), 0);

    let reply = DeskCommand::Import { document }.apply(&mut store).unwrap();
    assert!(matches!(reply, CommandReply::Imported { queued: 4 }));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn report_command_returns_text() {
    let mut store = desk();
    let CommandReply::Report { text } = DeskCommand::Report.apply(&mut store).unwrap() else {
        panic!("report should return text");
    };
    assert!(text.starts_with("=== CAR WASH MANAGEMENT SYSTEM REPORT ===\n"));
}

#[test]
fn only_destructive_commands_need_confirmation() {
    assert!(DeskCommand::ResetCounters.needs_confirmation());
    assert!(DeskCommand::ClearAll.needs_confirmation());
    assert!(!DeskCommand::CompleteService.needs_confirmation());
    assert!(!DeskCommand::Export.needs_confirmation());
}

#[test]
fn demo_data_is_deterministic() {
    let mut a = desk();
    let mut b = desk();
    let added_a = demo::populate(&mut a, 6, 42).unwrap();
    let added_b = demo::populate(&mut b, 6, 42).unwrap();
    assert_eq!(added_a.len(), 6);
    assert_eq!(added_a, added_b);
    for customer in &added_a {
        let price = a.catalog().get(customer.service_id).unwrap().cost;
        assert_eq!(customer.service_cost, price);
    }
}

#[test]
fn demo_data_needs_an_empty_queue() {
    let mut store = desk();
    store.add_customer("Real Customer", 1).unwrap();
    let err = demo::populate(&mut store, 3, 1).unwrap_err();
    assert!(matches!(err, WashError::Validation(_)));
    assert_eq!(store.queue_len(), 1);
}

#[test]
fn demo_count_is_bounded() {
    let mut store = desk();
    let cmd: DeskCommand =
        serde_json::from_str(r#"{"cmd":"demo","count":18446744073709551615}"#).unwrap();
    let err = cmd.apply(&mut store).unwrap_err();
    assert!(matches!(err, WashError::Validation(_)), "got {err:?}");
    assert_eq!(store.queue_len(), 0);

    let err = demo::populate(&mut store, demo::MAX_DEMO_CUSTOMERS + 1, 1).unwrap_err();
    assert!(matches!(err, WashError::Validation(_)));
    let added = demo::populate(&mut store, demo::MAX_DEMO_CUSTOMERS, 1).unwrap();
    assert_eq!(added.len(), demo::MAX_DEMO_CUSTOMERS);
}
