//! carwash-core: queue, counters and persistence for the car wash desk.
//!
//! The whole domain is one FIFO queue of customers plus two running
//! counters (revenue, customers served). Every mutation goes through
//! `QueueStore` and is written through to the key-value store.

pub mod autosave;
pub mod backup;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod demo;
pub mod error;
pub mod name_generator;
pub mod persistence;
pub mod queue;
pub mod report;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
