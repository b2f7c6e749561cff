//! Interactive menu loop.
//!
//! The store is shared with the autosave thread, so every action takes
//! the lock for its whole duration. Reset and clear ask for
//! confirmation first; leaving the menu saves a final report.

use crate::{dispatch, render, show_storage_warning, write_output};
use anyhow::Result;
use carwash_core::{
    autosave,
    backup::backup_file_name,
    command::{CommandReply, DeskCommand},
    config::DeskConfig,
    queue::QueueStore,
    report::report_file_name,
};
use chrono::Local;
use render::Notice;
use std::io::{self, BufRead, Write};
use parking_lot::Mutex;
use std::sync::Arc;

const MENU: &str = "
=== MAIN MENU ===
1. Add Customer to Queue        (n)
2. Show Current Queue
3. Complete Service             (c)
4. Show Revenue Summary
5. Save Report to File
6. Export Backup
7. Import Backup
8. Reset Revenue and Served
9. Clear All Data
r. Refresh
d. Add Sample Customers
0. Exit                         (q)";

pub fn run(store: QueueStore, config: &DeskConfig) -> Result<()> {
    let store = Arc::new(Mutex::new(store));
    let autosaver = autosave::spawn(Arc::clone(&store), config.autosave_interval);

    println!("=== CAR WASH MANAGEMENT SYSTEM ===");
    println!("Welcome to the Car Wash Queue Manager!");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        println!("{MENU}");
        let Some(choice) = prompt(&mut input, "Enter your choice: ")? else {
            break; // EOF
        };
        match choice.as_str() {
            "1" | "n" => add_customer(&store, &mut input)?,
            "2" => {
                let desk = store.lock();
                print!("{}", render::queue_view(&desk.snapshot(), desk.catalog()));
            }
            "3" | "c" => {
                dispatch(&mut *store.lock(), DeskCommand::CompleteService);
            }
            "4" => print!("{}", render::stats_view(&store.lock().snapshot())),
            "5" => save_report(&mut *store.lock(), config),
            "6" => export_backup(&mut *store.lock(), config),
            "7" => {
                let Some(path) = prompt(&mut input, "Backup file path: ")? else {
                    continue;
                };
                match std::fs::read_to_string(&path) {
                    Ok(document) => {
                        dispatch(&mut *store.lock(), DeskCommand::Import { document });
                    }
                    Err(e) => render::notify(Notice::Error, &format!("Cannot read {path}: {e}")),
                }
            }
            "8" => {
                if confirm(
                    &mut input,
                    "Reset total revenue and customers served to zero? This cannot be undone. [y/N] ",
                )? {
                    dispatch(&mut *store.lock(), DeskCommand::ResetCounters);
                }
            }
            "9" => {
                if confirm(&mut input, "Clear all data? This cannot be undone. [y/N] ")? {
                    dispatch(&mut *store.lock(), DeskCommand::ClearAll);
                }
            }
            "r" => {
                let mut desk = store.lock();
                dispatch(&mut desk, DeskCommand::Refresh);
                print!("{}", render::stats_view(&desk.snapshot()));
                print!("{}", render::queue_view(&desk.snapshot(), desk.catalog()));
            }
            "d" => {
                dispatch(&mut *store.lock(), DeskCommand::Demo { count: 4, seed: 42 });
            }
            "0" | "q" => break,
            _ => render::notify(Notice::Error, "Invalid choice!"),
        }
    }

    autosaver.stop();
    let mut desk = store.lock();
    println!("\n=== EXITING SYSTEM ===");
    println!("Saving final report...");
    save_report(&mut desk, config);
    if let Err(e) = desk.flush() {
        render::notify(Notice::Warning, &format!("final save failed: {e}"));
    }
    println!("Thank you for using Car Wash Management System!");
    Ok(())
}

fn add_customer(store: &Arc<Mutex<QueueStore>>, input: &mut impl BufRead) -> Result<()> {
    println!("\n=== ADD NEW CUSTOMER ===");
    let Some(name) = prompt(input, "Enter customer name: ")? else {
        return Ok(());
    };
    println!("\nSelect service type:");
    print!("{}", render::services_menu(store.lock().catalog()));
    let Some(choice) = prompt(input, "Enter choice: ")? else {
        return Ok(());
    };
    match choice.parse() {
        Ok(service_type) => {
            dispatch(
                &mut *store.lock(),
                DeskCommand::AddCustomer { name, service_type },
            );
        }
        Err(_) => render::notify(Notice::Error, "Please fill in all fields"),
    }
    Ok(())
}

fn save_report(desk: &mut QueueStore, config: &DeskConfig) {
    let today = Local::now().date_naive();
    if let Some(CommandReply::Report { text }) = dispatch(desk, DeskCommand::Report) {
        match write_output(&config.report_dir, None, &report_file_name(today), &text) {
            Ok(path) => println!("Report saved to '{}'", path.display()),
            Err(e) => render::notify(Notice::Error, &format!("Error saving report: {e}")),
        }
    }
}

fn export_backup(desk: &mut QueueStore, config: &DeskConfig) {
    let today = Local::now().date_naive();
    if let Some(CommandReply::Exported { document }) = dispatch(desk, DeskCommand::Export) {
        match write_output(&config.report_dir, None, &backup_file_name(today), &document) {
            Ok(path) => println!("Backup saved to '{}'", path.display()),
            Err(e) => render::notify(Notice::Error, &format!("Error saving backup: {e}")),
        }
    }
    show_storage_warning(desk);
}

fn prompt(input: &mut impl BufRead, question: &str) -> Result<Option<String>> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn confirm(input: &mut impl BufRead, question: &str) -> Result<bool> {
    Ok(matches!(
        prompt(input, question)?.as_deref(),
        Some("y" | "Y" | "yes")
    ))
}
