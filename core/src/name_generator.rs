//! Customer names for demo queues, drawn from short curated lists.

use crate::rng::DemoRng;

pub struct NameGenerator;

impl NameGenerator {
    /// "First Last", or "First L." for roughly a third of customers —
    /// how names get scribbled at a wash counter.
    pub fn generate_full_name(rng: &mut DemoRng) -> String {
        let first = rng.pick(FIRST_NAMES);
        let last = rng.pick(LAST_NAMES);
        if rng.chance(0.33) {
            format!("{first} {}.", &last[..1])
        } else {
            format!("{first} {last}")
        }
    }
}

const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Mike", "Emily", "Carlos", "Priya", "Tom", "Aisha", "Kenji", "Laura",
    "Omar", "Grace", "Diego", "Hannah", "Victor", "Mei", "Noah", "Fatima", "Liam", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Wilson", "Davis", "Garcia", "Patel", "Nguyen", "Okafor", "Tanaka",
    "Muller", "Rossi", "Kowalski", "Haddad", "Lopez", "Chen", "Brown", "Silva", "Murphy",
];
