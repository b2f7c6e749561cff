//! carwash: terminal desk for the car wash queue.
//!
//! Usage:
//!   carwash                          interactive menu (autosaves every 30s)
//!   carwash add "Alice" 1            one-shot commands, see `carwash help`
//!   carwash --ipc-mode               JSON lines on stdin/stdout
//!
//! Flags: --db PATH  --data-dir DIR  --autosave-secs N  --seed N  --yes

mod ipc;
mod menu;
mod oneshot;
mod render;

use anyhow::Result;
use carwash_core::{
    clock::SystemClock,
    command::{CommandReply, DeskCommand},
    config::DeskConfig,
    error::WashResult,
    queue::QueueStore,
    store::KvStore,
};
use render::Notice;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &["--db", "--data-dir", "--autosave-secs", "--seed"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = flag_value(&args, "--data-dir").unwrap_or(".");
    let mut config = DeskConfig::load(data_dir)?;
    if let Some(db) = flag_value(&args, "--db") {
        config.storage_path = db.to_string();
    }
    let autosave_secs = parse_arg(&args, "--autosave-secs", config.autosave_interval.as_secs());
    config.autosave_interval = Duration::from_secs(autosave_secs.max(1));

    let store = open_store(&config)?;
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let positional = positionals(&args);

    if ipc_mode {
        ipc::run(store)
    } else if positional.is_empty() {
        menu::run(store, &config)
    } else {
        let opts = oneshot::Options {
            assume_yes: args.iter().any(|a| a == "--yes"),
            seed: parse_arg(&args, "--seed", 42u64),
        };
        oneshot::run(store, &config, &positional, &opts)
    }
}

/// Storage trouble is never fatal: fall back to an in-memory store and
/// keep the desk usable for this session.
fn open_store(config: &DeskConfig) -> Result<QueueStore> {
    let storage = match KvStore::open_migrated(&config.storage_path) {
        Ok(storage) => storage,
        Err(e) => {
            // stderr, so IPC replies on stdout stay clean.
            log::warn!("cannot open {}: {e}", config.storage_path);
            eprintln!(
                "[warn] cannot open {} ({e}); changes will not be saved this session",
                config.storage_path
            );
            KvStore::open_migrated(":memory:")?
        }
    };
    Ok(QueueStore::open(
        config.catalog.clone(),
        Box::new(storage),
        Box::new(SystemClock),
    ))
}

/// Run one command and show its outcome plus any pending storage warning.
pub(crate) fn dispatch(store: &mut QueueStore, command: DeskCommand) -> Option<CommandReply> {
    let outcome = command.apply(store);
    let reply = match outcome {
        Ok(reply) => {
            let kind = match reply {
                CommandReply::Refreshed => Notice::Info,
                _ => Notice::Success,
            };
            render::notify(kind, &reply.notification());
            Some(reply)
        }
        Err(e) => {
            render::notify(Notice::Error, &e.to_string());
            None
        }
    };
    show_storage_warning(store);
    reply
}

pub(crate) fn show_storage_warning(store: &mut QueueStore) {
    if let Some(warning) = store.take_storage_warning() {
        render::notify(
            Notice::Warning,
            &format!("{warning} (data is kept in memory and will be saved again)"),
        );
    }
}

/// Write `contents` to `target`, or to `dir/default_name` when no target is given.
pub(crate) fn write_output(
    dir: &Path,
    target: Option<&str>,
    default_name: &str,
    contents: &str,
) -> WashResult<PathBuf> {
    let path = match target {
        Some(t) => PathBuf::from(t),
        None => dir.join(default_name),
    };
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn positionals(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}
