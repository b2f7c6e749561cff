//! Text report layout.

use carwash_core::{
    catalog::{ServiceCatalog, ServiceEntry},
    clock::ManualClock,
    queue::QueueStore,
    report::{generate_text_report, report_file_name},
    store::KvStore,
};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

fn desk() -> QueueStore {
    QueueStore::open(
        ServiceCatalog::standard(),
        Box::new(KvStore::open_migrated(":memory:").unwrap()),
        Box::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())),
    )
}

fn afternoon() -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, 14, 5, 9)
        .unwrap()
}

#[test]
fn report_lists_remaining_customers() {
    let mut desk = desk();
    desk.add_customer("Alice", 1).unwrap();
    desk.add_customer("Bob", 4).unwrap();
    desk.add_customer("Cleo", 2).unwrap();
    desk.complete_service().unwrap();

    let report = generate_text_report(&desk.snapshot(), desk.catalog(), afternoon());
    let expected = "\
=== CAR WASH MANAGEMENT SYSTEM REPORT ===
Date: 5/1/2024
Time: 2:05:09 PM
----------------------------------------
Total Revenue: $20.00
Customers Served: 1
Customers in Queue: 2
----------------------------------------
Remaining customers in queue:
1. Bob - Full Package - $60
2. Cleo - Wax + Dent Removing - $35
";
    assert_eq!(report, expected);
}

#[test]
fn empty_queue_has_no_customer_section() {
    let desk = desk();
    let report = generate_text_report(&desk.snapshot(), desk.catalog(), afternoon());
    assert!(report.contains("Total Revenue: $0.00\n"));
    assert!(report.contains("Customers in Queue: 0\n"));
    assert!(!report.contains("Remaining customers"));
    assert!(report.ends_with("----------------------------------------\n"));
}

#[test]
fn report_is_a_pure_function() {
    let mut desk = desk();
    desk.add_customer("Alice", 3).unwrap();
    let snap = desk.snapshot();
    let a = generate_text_report(&snap, desk.catalog(), afternoon());
    let b = generate_text_report(&snap, desk.catalog(), afternoon());
    assert_eq!(a, b);
    assert_eq!(desk.snapshot(), snap);
}

#[test]
fn queued_price_shown_even_after_catalog_change() {
    let mut desk = desk();
    desk.add_customer("Alice", 1).unwrap();
    let cheaper = ServiceCatalog::from_entries(vec![ServiceEntry {
        id: 1,
        name: "Basic Wash".into(),
        cost: 15.5,
    }])
    .unwrap();
    desk.set_catalog(cheaper);
    desk.add_customer("Bob", 1).unwrap();

    let report = generate_text_report(&desk.snapshot(), desk.catalog(), afternoon());
    assert!(report.contains("1. Alice - Basic Wash - $20\n"), "{report}");
    assert!(report.contains("2. Bob - Basic Wash - $15.50\n"), "{report}");
}

#[test]
fn file_name_uses_the_date() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
    assert_eq!(report_file_name(date), "carwash_report_2024-12-24.txt");
}
