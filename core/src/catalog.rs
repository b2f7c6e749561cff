//! Service catalog — the fixed price list keyed by service id.
//!
//! Prices are read once, at enqueue time. A queued customer keeps the
//! price that was current when they joined; catalog edits never reach
//! back into the queue.

use crate::{
    error::{WashError, WashResult},
    types::{Amount, ServiceId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: ServiceId,
    pub name: String,
    pub cost: Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCatalog {
    entries: BTreeMap<ServiceId, ServiceEntry>,
}

impl ServiceCatalog {
    /// The four services the desk sells.
    pub fn standard() -> Self {
        let entries = [
            (1, "Basic Wash", 20.0),
            (2, "Wax + Dent Removing", 35.0),
            (3, "Vacuum + Polish", 40.0),
            (4, "Full Package", 60.0),
        ]
        .into_iter()
        .map(|(id, name, cost)| {
            (
                id,
                ServiceEntry {
                    id,
                    name: name.to_string(),
                    cost,
                },
            )
        })
        .collect();
        Self { entries }
    }

    /// Build a catalog from configured entries.
    /// Rejects empty lists, id 0, duplicate ids, blank names and bad prices.
    pub fn from_entries(entries: Vec<ServiceEntry>) -> WashResult<Self> {
        if entries.is_empty() {
            return Err(WashError::Validation(
                "service catalog must list at least one service".into(),
            ));
        }
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.id == 0 {
                return Err(WashError::Validation("service id 0 is reserved".into()));
            }
            if entry.name.trim().is_empty() {
                return Err(WashError::Validation(format!(
                    "service {} has an empty name",
                    entry.id
                )));
            }
            if !entry.cost.is_finite() || entry.cost < 0.0 {
                return Err(WashError::Validation(format!(
                    "service {} has invalid cost {}",
                    entry.id, entry.cost
                )));
            }
            let id = entry.id;
            if map.insert(id, entry).is_some() {
                return Err(WashError::Validation(format!("duplicate service id {id}")));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, id: ServiceId) -> Option<&ServiceEntry> {
        self.entries.get(&id)
    }

    /// Display name for a service id, tolerating ids that have since
    /// left the catalog (imported or persisted customers).
    pub fn display_name(&self, id: ServiceId) -> String {
        self.get(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("Service #{id}"))
    }

    /// Entries in id order — the order menus list them.
    pub fn entries(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
