//! Sample customers for trying the desk out.

use crate::{
    error::{WashError, WashResult},
    name_generator::NameGenerator,
    queue::QueueStore,
    rng::DemoRng,
    state::Customer,
};

pub const MAX_DEMO_CUSTOMERS: usize = 100;

/// Queue `count` deterministic sample customers.
/// Only allowed on an empty queue so real customers are never mixed
/// with made-up ones.
pub fn populate(store: &mut QueueStore, count: usize, seed: u64) -> WashResult<Vec<Customer>> {
    if count > MAX_DEMO_CUSTOMERS {
        return Err(WashError::Validation(format!(
            "at most {MAX_DEMO_CUSTOMERS} sample customers can be added at once"
        )));
    }
    if store.queue_len() > 0 {
        return Err(WashError::Validation(
            "sample data can only be added to an empty queue".into(),
        ));
    }
    let service_ids: Vec<_> = store.catalog().entries().map(|e| e.id).collect();
    let mut rng = DemoRng::new(seed);
    let mut added = Vec::new();
    for _ in 0..count {
        let name = NameGenerator::generate_full_name(&mut rng);
        let service_id = *rng.pick(&service_ids);
        added.push(store.add_customer(&name, service_id)?);
    }
    log::info!("queued {} sample customers (seed {seed})", added.len());
    Ok(added)
}
