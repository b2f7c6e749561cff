//! One-shot subcommands: run a single action and exit.

use crate::{dispatch, render, write_output};
use anyhow::{bail, Result};
use carwash_core::{
    backup::backup_file_name,
    command::{CommandReply, DeskCommand},
    config::DeskConfig,
    queue::QueueStore,
    report::report_file_name,
    types::ServiceId,
};
use chrono::Local;
use render::Notice;

pub struct Options {
    pub assume_yes: bool,
    pub seed: u64,
}

const HELP: &str = "\
commands:
  add <name> <service>   queue a customer (service 1-4, see `services`)
  next                   complete service for the first customer
  queue                  show the current queue
  stats                  show revenue summary
  services               list services and prices
  report [path]          save a text report
  export [path]          save a JSON backup
  import <path>          replace all data with a JSON backup
  reset --yes            zero revenue and customers served
  clear --yes            delete all data
  demo [count]           queue sample customers (empty queue only)";

pub fn run(
    mut store: QueueStore,
    config: &DeskConfig,
    args: &[String],
    opts: &Options,
) -> Result<()> {
    let arg = |i: usize| args.get(i).map(String::as_str);
    let today = Local::now().date_naive();

    match arg(0).unwrap_or("help") {
        "add" => {
            let (Some(name), Some(service)) = (arg(1), arg(2)) else {
                bail!("usage: carwash add <name> <service>");
            };
            let service_type: ServiceId = match service.parse() {
                Ok(id) => id,
                Err(_) => bail!("service must be a number, got '{service}'"),
            };
            dispatch(
                &mut store,
                DeskCommand::AddCustomer {
                    name: name.to_string(),
                    service_type,
                },
            );
        }
        "next" | "complete" => {
            dispatch(&mut store, DeskCommand::CompleteService);
        }
        "queue" => print!("{}", render::queue_view(&store.snapshot(), store.catalog())),
        "stats" => print!("{}", render::stats_view(&store.snapshot())),
        "services" => print!("{}", render::services_menu(store.catalog())),
        "report" => {
            if let Some(CommandReply::Report { text }) = dispatch(&mut store, DeskCommand::Report) {
                let path =
                    write_output(&config.report_dir, arg(1), &report_file_name(today), &text)?;
                println!("Report saved to '{}'", path.display());
            }
        }
        "export" => {
            if let Some(CommandReply::Exported { document }) =
                dispatch(&mut store, DeskCommand::Export)
            {
                let path =
                    write_output(&config.report_dir, arg(1), &backup_file_name(today), &document)?;
                println!("Backup saved to '{}'", path.display());
            }
        }
        "import" => {
            let Some(path) = arg(1) else {
                bail!("usage: carwash import <path>");
            };
            match std::fs::read_to_string(path) {
                Ok(document) => {
                    dispatch(&mut store, DeskCommand::Import { document });
                }
                Err(e) => render::notify(Notice::Error, &format!("Cannot read {path}: {e}")),
            }
        }
        "reset" | "clear" => {
            if !opts.assume_yes {
                bail!("this cannot be undone; re-run with --yes to confirm");
            }
            let command = if arg(0) == Some("reset") {
                DeskCommand::ResetCounters
            } else {
                DeskCommand::ClearAll
            };
            dispatch(&mut store, command);
        }
        "demo" => {
            let count = arg(1).and_then(|c| c.parse().ok()).unwrap_or(4);
            dispatch(
                &mut store,
                DeskCommand::Demo {
                    count,
                    seed: opts.seed,
                },
            );
        }
        "help" => println!("{HELP}"),
        other => bail!("unknown command '{other}'\n{HELP}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carwash_core::{catalog::ServiceCatalog, clock::SystemClock, store::KvStore};

    fn store() -> QueueStore {
        QueueStore::open(
            ServiceCatalog::standard(),
            Box::new(KvStore::open_migrated(":memory:").unwrap()),
            Box::new(SystemClock),
        )
    }

    #[test]
    fn unreadable_import_file_is_reported_not_fatal() {
        let args = vec!["import".to_string(), "/no/such/dir/backup.json".to_string()];
        let opts = Options {
            assume_yes: false,
            seed: 0,
        };
        let result = run(store(), &DeskConfig::default_test(), &args, &opts);
        assert!(result.is_ok(), "got {result:?}");
    }
}
