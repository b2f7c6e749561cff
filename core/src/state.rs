//! The data model: customers and the queue state that owns them.
//!
//! Field names on the wire are camelCase (`serviceType`, `serviceCost`,
//! `addedAt`) so persisted data and backups stay readable by the
//! browser desk that produced earlier files.

use crate::types::{Amount, CustomerId, ServiceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(rename = "serviceType")]
    pub service_id: ServiceId,
    /// Price copied from the catalog when the customer joined.
    pub service_cost: Amount,
    #[serde(with = "iso_millis")]
    pub added_at: DateTime<Utc>,
}

impl Customer {
    /// Structural checks applied to customers arriving from outside the
    /// store (persisted data, backup files).
    pub fn check_well_formed(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("customer {} has an empty name", self.id));
        }
        if self.service_id == 0 {
            return Err(format!("customer {} has service type 0", self.id));
        }
        if !self.service_cost.is_finite() || self.service_cost < 0.0 {
            return Err(format!(
                "customer {} has invalid service cost {}",
                self.id, self.service_cost
            ));
        }
        Ok(())
    }
}

/// Everything the desk knows: pending customers plus the two counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueueState {
    /// Front is the next customer to serve.
    pub queue: VecDeque<Customer>,
    pub total_revenue: Amount,
    pub customers_served: u64,
}

impl QueueState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.queue.is_empty() && self.total_revenue == 0.0 && self.customers_served == 0
    }

    pub fn max_customer_id(&self) -> CustomerId {
        self.queue.iter().map(|c| c.id).max().unwrap_or(0)
    }

    /// Validate state that did not come from the store's own operations.
    /// Ids must be unique; every customer must be well formed.
    pub fn check_well_formed(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::with_capacity(self.queue.len());
        for customer in &self.queue {
            customer.check_well_formed()?;
            if !seen.insert(customer.id) {
                return Err(format!("duplicate customer id {}", customer.id));
            }
        }
        if !self.total_revenue.is_finite() || self.total_revenue < 0.0 {
            return Err(format!("invalid total revenue {}", self.total_revenue));
        }
        Ok(())
    }
}

/// Read a revenue figure that may be a number or a numeric string.
/// Anything else (missing, negative, garbage) yields `None`.
pub(crate) fn lenient_amount(value: Option<&Value>) -> Option<Amount> {
    let amount = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Read a served-customer count that may be a number or a numeric string.
/// Fractions are truncated, the way the browser desk's parseInt did.
/// Counts that would leave no room to serve another customer yield `None`.
pub(crate) fn lenient_count(value: Option<&Value>) -> Option<u64> {
    let count = match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(count_from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(count_from_float))
        }
        _ => None,
    }?;
    (count < u64::MAX).then_some(count)
}

fn count_from_float(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f < u64::MAX as f64).then(|| f as u64)
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix,
/// matching `Date.prototype.toISOString`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|e| serde::de::Error::custom(format!("bad timestamp '{raw}': {e}")))
    }

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_uses_browser_field_names() {
        let raw = json!({
            "id": 1714554000000u64,
            "name": "Alice",
            "serviceType": 1,
            "serviceCost": 20,
            "addedAt": "2024-05-01T09:00:00.000Z"
        });
        let customer: Customer = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(customer.service_id, 1);
        assert_eq!(customer.service_cost, 20.0);
        let back = serde_json::to_value(&customer).unwrap();
        assert_eq!(back["addedAt"], raw["addedAt"]);
        assert_eq!(back["serviceType"], raw["serviceType"]);
    }

    #[test]
    fn lenient_counters() {
        assert_eq!(lenient_amount(Some(&json!("80.5"))), Some(80.5));
        assert_eq!(lenient_amount(Some(&json!(-3))), None);
        assert_eq!(lenient_amount(Some(&json!({"x": 1}))), None);
        assert_eq!(lenient_amount(None), None);
        assert_eq!(lenient_count(Some(&json!("7"))), Some(7));
        assert_eq!(lenient_count(Some(&json!(2.9))), Some(2));
        assert_eq!(lenient_count(Some(&json!(null))), None);
    }
}
