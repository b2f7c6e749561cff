//! JSON-lines protocol for driving the desk from another process.
//!
//! Requests, one per line:
//!   {"type":"get_state"}
//!   {"type":"command","command":{"cmd":"add_customer","name":"Alice","service_type":1}}
//!   {"type":"quit"}
//! Every request gets one reply line carrying the current state.

use anyhow::Result;
use carwash_core::{
    catalog::ServiceEntry,
    command::{CommandReply, DeskCommand},
    queue::QueueStore,
    snapshot::QueueSnapshot,
};
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Services,
    Command { command: DeskCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<CommandReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<Vec<ServiceEntry>>,
    state: QueueSnapshot,
}

impl IpcReply {
    fn state_of(store: &mut QueueStore) -> Self {
        Self {
            ok: true,
            reply: None,
            error: None,
            warning: store.take_storage_warning().map(|w| w.to_string()),
            services: None,
            state: store.snapshot(),
        }
    }
}

pub fn run(mut store: QueueStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "ok": false, "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => IpcReply::state_of(&mut store),
            IpcRequest::Services => IpcReply {
                services: Some(store.catalog().entries().cloned().collect()),
                ..IpcReply::state_of(&mut store)
            },
            IpcRequest::Command { command } => match command.apply(&mut store) {
                Ok(reply) => IpcReply {
                    reply: Some(reply),
                    ..IpcReply::state_of(&mut store)
                },
                Err(e) => IpcReply {
                    ok: false,
                    error: Some(e.to_string()),
                    ..IpcReply::state_of(&mut store)
                },
            },
        };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }

    if let Err(e) = store.flush() {
        log::warn!("final save failed: {e}");
    }
    Ok(())
}
