//! Persistence seam between the queue store and a durable medium.
//!
//! RULE: `QueueStore` never talks to SQLite directly. It holds a
//! `Box<dyn StateStorage>` and calls save/load/wipe through it.

use crate::{error::WashResult, state::QueueState};

pub trait StateStorage: Send {
    /// Overwrite the persisted state with `state`, all entries at once.
    fn save(&mut self, state: &QueueState) -> WashResult<()>;

    /// Read the persisted state. `Ok(None)` means nothing has been saved.
    /// Malformed data is an error; callers fall back to an empty state.
    fn load(&self) -> WashResult<Option<QueueState>>;

    /// Remove every persisted entry.
    fn wipe(&mut self) -> WashResult<()>;
}
