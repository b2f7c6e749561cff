//! Backup documents — the lossless JSON export/import format.
//!
//! Shape:
//!   { "customers": [...], "totalRevenue": n, "customersServed": n,
//!     "exportDate": "2024-05-01T09:00:00.000Z" }
//!
//! Import is forgiving about the counters and strict about customers:
//! a missing or garbled counter reads as zero, a malformed customer
//! rejects the whole document.

use crate::{
    error::{WashError, WashResult},
    snapshot::QueueSnapshot,
    state::{iso_millis, lenient_amount, lenient_count, Customer, QueueState},
    types::Amount,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDocument<'a> {
    customers: &'a [Customer],
    total_revenue: Amount,
    customers_served: u64,
    #[serde(with = "iso_millis")]
    export_date: DateTime<Utc>,
}

/// Render the full state as a pretty-printed backup document.
pub fn generate_backup_document(
    snapshot: &QueueSnapshot,
    now: DateTime<Utc>,
) -> WashResult<String> {
    let doc = BackupDocument {
        customers: &snapshot.customers,
        total_revenue: snapshot.total_revenue,
        customers_served: snapshot.customers_served,
        export_date: now,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a backup document into a state ready for `replace_state`.
pub fn parse_backup_document(raw: &str) -> WashResult<QueueState> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| WashError::Parse(format!("not valid JSON: {e}")))?;
    let obj = doc
        .as_object()
        .ok_or_else(|| WashError::Parse("expected a JSON object at the top level".into()))?;

    let queue = match obj.get("customers") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<Customer>(item.clone())
                    .map_err(|e| WashError::Parse(format!("customer #{}: {e}", i + 1)))
            })
            .collect::<WashResult<Vec<_>>>()?,
        Some(_) => return Err(WashError::Parse("\"customers\" must be an array".into())),
    };

    let total_revenue = counter_or_zero(obj.get("totalRevenue"), "totalRevenue", lenient_amount);
    let customers_served =
        counter_or_zero(obj.get("customersServed"), "customersServed", lenient_count);

    let state = QueueState {
        queue: queue.into(),
        total_revenue,
        customers_served,
    };
    state.check_well_formed().map_err(WashError::Parse)?;
    Ok(state)
}

fn counter_or_zero<T: Default>(
    value: Option<&Value>,
    field: &str,
    read: fn(Option<&Value>) -> Option<T>,
) -> T {
    match read(value) {
        Some(v) => v,
        None => {
            if value.is_some_and(|v| !v.is_null()) {
                log::warn!("backup field {field} is malformed, using 0");
            }
            T::default()
        }
    }
}

/// `carwash_backup_2024-05-01.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("carwash_backup_{}.json", date.format("%Y-%m-%d"))
}
