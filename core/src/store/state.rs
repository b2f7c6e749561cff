use super::KvStore;
use crate::{
    error::{WashError, WashResult},
    persistence::StateStorage,
    state::{lenient_amount, lenient_count, Customer, QueueState},
};
use serde_json::Value;

pub const CUSTOMERS_KEY: &str = "carWashCustomers";
pub const REVENUE_KEY: &str = "carWashRevenue";
pub const SERVED_KEY: &str = "carWashServed";

impl StateStorage for KvStore {
    fn save(&mut self, state: &QueueState) -> WashResult<()> {
        let customers = serde_json::to_string(&state.queue)?;
        self.put_all(&[
            (CUSTOMERS_KEY, customers),
            (REVENUE_KEY, state.total_revenue.to_string()),
            (SERVED_KEY, state.customers_served.to_string()),
        ])?;
        log::debug!(
            "saved state: {} queued, revenue={}, served={}",
            state.queue.len(),
            state.total_revenue,
            state.customers_served
        );
        Ok(())
    }

    fn load(&self) -> WashResult<Option<QueueState>> {
        let customers = self.get(CUSTOMERS_KEY)?;
        let revenue = self.get(REVENUE_KEY)?;
        let served = self.get(SERVED_KEY)?;
        if customers.is_none() && revenue.is_none() && served.is_none() {
            return Ok(None);
        }

        // Each entry is independent: an absent one means "never written".
        let queue = match customers {
            Some(raw) => serde_json::from_str::<Vec<Customer>>(&raw)
                .map_err(|e| WashError::Parse(format!("{CUSTOMERS_KEY}: {e}")))?,
            None => Vec::new(),
        };
        let total_revenue = match revenue {
            Some(raw) => lenient_amount(Some(&Value::String(raw.clone()))).ok_or_else(|| {
                WashError::Parse(format!("{REVENUE_KEY}: not a revenue figure: '{raw}'"))
            })?,
            None => 0.0,
        };
        let customers_served = match served {
            Some(raw) => lenient_count(Some(&Value::String(raw.clone()))).ok_or_else(|| {
                WashError::Parse(format!("{SERVED_KEY}: not a count: '{raw}'"))
            })?,
            None => 0,
        };

        let state = QueueState {
            queue: queue.into(),
            total_revenue,
            customers_served,
        };
        state.check_well_formed().map_err(WashError::Parse)?;
        Ok(Some(state))
    }

    fn wipe(&mut self) -> WashResult<()> {
        self.clear()?;
        log::debug!("storage wiped");
        Ok(())
    }
}
