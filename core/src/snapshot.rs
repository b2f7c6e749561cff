//! Read-only copies of queue state handed to renderers and formatters.
//!
//! A snapshot owns its data. Changing it never reaches the store; the
//! only way to mutate queue state is through `QueueStore`.

use crate::{
    state::{Customer, QueueState},
    types::Amount,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub customers: Vec<Customer>,
    pub total_revenue: Amount,
    pub customers_served: u64,
}

impl QueueSnapshot {
    pub fn of(state: &QueueState) -> Self {
        Self {
            customers: state.queue.iter().cloned().collect(),
            total_revenue: state.total_revenue,
            customers_served: state.customers_served,
        }
    }

    pub fn queue_len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_queue_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// The customer `CompleteService` would serve next.
    pub fn next_up(&self) -> Option<&Customer> {
        self.customers.first()
    }

    /// Revenue still waiting in the queue.
    pub fn pending_revenue(&self) -> Amount {
        self.customers.iter().map(|c| c.service_cost).sum()
    }

    pub fn to_state(&self) -> QueueState {
        QueueState {
            queue: self.customers.iter().cloned().collect(),
            total_revenue: self.total_revenue,
            customers_served: self.customers_served,
        }
    }
}
