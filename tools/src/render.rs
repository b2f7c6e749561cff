//! Terminal rendering: queue listing, revenue summary, service menu
//! and one-line notifications.

use carwash_core::{
    catalog::ServiceCatalog, snapshot::QueueSnapshot, state::Customer, types::format_price,
};
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

pub enum Notice {
    Success,
    Info,
    Warning,
    Error,
}

pub fn notify(kind: Notice, message: &str) {
    let tag = match kind {
        Notice::Success => "ok",
        Notice::Info => "info",
        Notice::Warning => "warn",
        Notice::Error => "error",
    };
    println!("[{tag}] {message}");
}

pub fn customer_line(customer: &Customer, catalog: &ServiceCatalog) -> String {
    format!(
        "Name: {} | Service: {} | Cost: ${:.2} | Added: {}",
        customer.name,
        catalog.display_name(customer.service_id),
        customer.service_cost,
        customer
            .added_at
            .with_timezone(&chrono::Local)
            .format("%-I:%M:%S %p")
    )
}

pub fn queue_view(snapshot: &QueueSnapshot, catalog: &ServiceCatalog) -> String {
    let mut out = String::new();
    if snapshot.is_queue_empty() {
        let _ = writeln!(out, "\nNo customers in queue");
        return out;
    }
    let _ = writeln!(out, "\n=== CURRENT QUEUE ===");
    let _ = writeln!(out, "Total customers waiting: {}", snapshot.queue_len());
    let _ = writeln!(out, "{RULE}");
    for (position, customer) in snapshot.customers.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", position + 1, customer_line(customer, catalog));
    }
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn stats_view(snapshot: &QueueSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== REVENUE SUMMARY ===");
    let _ = writeln!(out, "Total Revenue:      ${:.2}", snapshot.total_revenue);
    let _ = writeln!(out, "Customers Served:   {}", snapshot.customers_served);
    let _ = writeln!(out, "Customers in Queue: {}", snapshot.queue_len());
    let _ = writeln!(out, "Pending Revenue:    ${:.2}", snapshot.pending_revenue());
    out
}

pub fn services_menu(catalog: &ServiceCatalog) -> String {
    let mut out = String::new();
    for entry in catalog.entries() {
        let _ = writeln!(out, "{}. {} - ${}", entry.id, entry.name, format_price(entry.cost));
    }
    out
}
