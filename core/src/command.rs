use crate::{
    backup, demo,
    error::WashResult,
    queue::QueueStore,
    report,
    state::Customer,
    types::{format_price, ServiceId},
};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Every action the presentation layer can ask of the desk.
/// The menu, one-shot subcommands and the IPC loop all dispatch here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    AddCustomer {
        name: String,
        service_type: ServiceId,
    },
    CompleteService,
    ResetCounters,
    ClearAll,
    Import {
        document: String,
    },
    Export,
    Report,
    Refresh,
    Demo {
        count: usize,
        #[serde(default)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum CommandReply {
    Added { customer: Customer, position: usize },
    Served { customer: Customer },
    CountersReset,
    Cleared,
    Imported { queued: usize },
    Exported { document: String },
    Report { text: String },
    Refreshed,
    DemoQueued { count: usize },
}

impl DeskCommand {
    pub fn apply(self, store: &mut QueueStore) -> WashResult<CommandReply> {
        let reply = match self {
            Self::AddCustomer { name, service_type } => {
                let customer = store.add_customer(&name, service_type)?;
                CommandReply::Added {
                    customer,
                    position: store.queue_len(),
                }
            }
            Self::CompleteService => CommandReply::Served {
                customer: store.complete_service()?,
            },
            Self::ResetCounters => {
                store.reset_counters();
                CommandReply::CountersReset
            }
            Self::ClearAll => {
                store.clear_all();
                CommandReply::Cleared
            }
            Self::Import { document } => {
                store.import_backup(&document)?;
                CommandReply::Imported {
                    queued: store.queue_len(),
                }
            }
            Self::Export => CommandReply::Exported {
                document: backup::generate_backup_document(&store.snapshot(), store.now())?,
            },
            Self::Report => {
                let now = store.now().with_timezone(&Local).fixed_offset();
                CommandReply::Report {
                    text: report::generate_text_report(&store.snapshot(), store.catalog(), now),
                }
            }
            Self::Refresh => CommandReply::Refreshed,
            Self::Demo { count, seed } => CommandReply::DemoQueued {
                count: demo::populate(store, count, seed)?.len(),
            },
        };
        Ok(reply)
    }

    /// Irreversible commands the presentation layer must confirm first.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Self::ResetCounters | Self::ClearAll)
    }
}

impl CommandReply {
    /// Short notification text for the user.
    pub fn notification(&self) -> String {
        match self {
            Self::Added { customer, position } => format!(
                "Customer {} added to queue! (position {position})",
                customer.name
            ),
            Self::Served { customer } => format!(
                "Service completed for {}! Revenue: ${}",
                customer.name,
                format_price(customer.service_cost)
            ),
            Self::CountersReset => "Revenue and customers served reset to zero!".into(),
            Self::Cleared => "All data cleared!".into(),
            Self::Imported { queued } => {
                format!("Data imported successfully! {queued} customer(s) in queue")
            }
            Self::Exported { .. } => "Data exported successfully!".into(),
            Self::Report { .. } => "Report generated!".into(),
            Self::Refreshed => "Queue refreshed!".into(),
            Self::DemoQueued { count } => format!("{count} sample customer(s) added!"),
        }
    }
}
