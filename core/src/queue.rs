//! The queue store — the heart of the desk.
//!
//! RULES:
//!   - All state changes go through the operations below.
//!   - Every successful mutation is written through to storage at once.
//!   - A failed operation leaves the state exactly as it found it.
//!   - A failed save never undoes the mutation; it is kept as a warning
//!     for the caller to show and retried by the next save.

use crate::{
    backup,
    catalog::ServiceCatalog,
    clock::{Clock, CustomerIdSequence},
    error::{WashError, WashResult},
    persistence::StateStorage,
    snapshot::QueueSnapshot,
    state::{Customer, QueueState},
    types::ServiceId,
};
use chrono::{DateTime, SubsecRound, Utc};

pub struct QueueStore {
    state: QueueState,
    catalog: ServiceCatalog,
    storage: Box<dyn StateStorage>,
    clock: Box<dyn Clock>,
    ids: CustomerIdSequence,
    storage_warning: Option<WashError>,
}

impl QueueStore {
    /// Build the store from whatever storage holds.
    /// Nothing saved, or unreadable data, both start an empty desk.
    pub fn open(
        catalog: ServiceCatalog,
        storage: Box<dyn StateStorage>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut storage_warning = None;
        let state = match storage.load() {
            Ok(Some(state)) => {
                log::info!(
                    "loaded desk: {} queued, revenue={:.2}, served={}",
                    state.queue.len(),
                    state.total_revenue,
                    state.customers_served
                );
                state
            }
            Ok(None) => {
                log::info!("no saved desk found, starting empty");
                QueueState::empty()
            }
            Err(e) => {
                log::warn!("could not load saved desk, starting empty: {e}");
                if e.is_storage() {
                    storage_warning = Some(e);
                }
                QueueState::empty()
            }
        };
        Self {
            ids: CustomerIdSequence::resume_after(state.max_customer_id()),
            state,
            catalog,
            storage,
            clock,
            storage_warning,
        }
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Append a customer at the tail of the queue.
    pub fn add_customer(&mut self, name: &str, service_id: ServiceId) -> WashResult<Customer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WashError::Validation("customer name must not be empty".into()));
        }
        let service = self.catalog.get(service_id).ok_or_else(|| {
            WashError::Validation(format!("unknown service type {service_id}"))
        })?;

        // Millisecond precision so the customer survives a backup round-trip.
        let now = self.clock.now().trunc_subsecs(3);
        let customer = Customer {
            id: self.ids.next(now),
            name: name.to_string(),
            service_id,
            service_cost: service.cost,
            added_at: now,
        };
        self.state.queue.push_back(customer.clone());
        log::info!(
            "queued {} for {} (${:.2}), position {}",
            customer.name,
            service.name,
            customer.service_cost,
            self.state.queue.len()
        );
        self.persist();
        Ok(customer)
    }

    /// Serve the customer at the head of the queue and book their payment.
    pub fn complete_service(&mut self) -> WashResult<Customer> {
        if self.state.queue.is_empty() {
            return Err(WashError::EmptyQueue);
        }
        let served = self.state.customers_served.checked_add(1).ok_or_else(|| {
            WashError::Validation("customers served counter is full; reset counters first".into())
        })?;
        let customer = self.state.queue.pop_front().ok_or(WashError::EmptyQueue)?;
        self.state.total_revenue += customer.service_cost;
        self.state.customers_served = served;
        log::info!(
            "served {} (${:.2}); revenue={:.2}, served={}",
            customer.name,
            customer.service_cost,
            self.state.total_revenue,
            self.state.customers_served
        );
        self.persist();
        Ok(customer)
    }

    /// Zero both counters. The queue is left alone.
    pub fn reset_counters(&mut self) {
        self.state.total_revenue = 0.0;
        self.state.customers_served = 0;
        log::info!("counters reset");
        self.persist();
    }

    /// Empty the queue, zero the counters and wipe storage.
    pub fn clear_all(&mut self) {
        self.state = QueueState::empty();
        log::info!("all desk data cleared");
        if let Err(e) = self.storage.wipe() {
            log::warn!("storage wipe failed, saving empty state instead: {e}");
            self.persist();
        }
    }

    /// Swap in a whole new state (the import path).
    /// Rejected states leave the current one untouched.
    pub fn replace_state(&mut self, new_state: QueueState) -> WashResult<()> {
        new_state.check_well_formed().map_err(WashError::Parse)?;
        let last = self.ids.last().max(new_state.max_customer_id());
        self.ids = CustomerIdSequence::resume_after(last);
        self.state = new_state;
        log::info!(
            "state replaced: {} queued, revenue={:.2}, served={}",
            self.state.queue.len(),
            self.state.total_revenue,
            self.state.customers_served
        );
        self.persist();
        Ok(())
    }

    /// Parse a backup document and replace the state with it.
    pub fn import_backup(&mut self, raw: &str) -> WashResult<()> {
        let state = backup::parse_backup_document(raw)?;
        self.replace_state(state)
    }

    // ── Persistence ────────────────────────────────────────────

    /// Save now and report the outcome directly.
    pub fn flush(&mut self) -> WashResult<()> {
        self.storage.save(&self.state)
    }

    /// The last storage failure not yet shown to the user.
    pub fn take_storage_warning(&mut self) -> Option<WashError> {
        self.storage_warning.take()
    }

    pub fn storage(&self) -> &dyn StateStorage {
        self.storage.as_ref()
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.state) {
            log::warn!("save failed, desk state kept in memory: {e}");
            self.storage_warning = Some(e);
        }
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot::of(&self.state)
    }

    pub fn queue_len(&self) -> usize {
        self.state.queue.len()
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Swap the price list. Customers already queued keep their price.
    pub fn set_catalog(&mut self, catalog: ServiceCatalog) {
        self.catalog = catalog;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
