//! Plain-text desk report.
//!
//! A pure function of (snapshot, catalog, now). The layout is fixed:
//! header marker, date and time lines, dashed separators, counters and
//! a 1-based list of everyone still waiting.

use crate::{catalog::ServiceCatalog, snapshot::QueueSnapshot, types::format_price};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::fmt::Write;

pub const REPORT_HEADER: &str = "=== CAR WASH MANAGEMENT SYSTEM REPORT ===";
pub const SEPARATOR: &str = "----------------------------------------";

pub fn generate_text_report(
    snapshot: &QueueSnapshot,
    catalog: &ServiceCatalog,
    now: DateTime<FixedOffset>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{REPORT_HEADER}");
    let _ = writeln!(out, "Date: {}", now.format("%-m/%-d/%Y"));
    let _ = writeln!(out, "Time: {}", now.format("%-I:%M:%S %p"));
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "Total Revenue: ${:.2}", snapshot.total_revenue);
    let _ = writeln!(out, "Customers Served: {}", snapshot.customers_served);
    let _ = writeln!(out, "Customers in Queue: {}", snapshot.queue_len());
    let _ = writeln!(out, "{SEPARATOR}");

    if !snapshot.is_queue_empty() {
        let _ = writeln!(out, "Remaining customers in queue:");
        for (index, customer) in snapshot.customers.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - {} - ${}",
                index + 1,
                customer.name,
                catalog.display_name(customer.service_id),
                format_price(customer.service_cost)
            );
        }
    }
    out
}

/// `carwash_report_2024-05-01.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("carwash_report_{}.txt", date.format("%Y-%m-%d"))
}
