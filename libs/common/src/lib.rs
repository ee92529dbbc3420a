//! Common library for the street parking application
//!
//! This crate provides shared functionality used across the parking
//! services: the flat-file JSON store, the notification seam and the error
//! types both of them report.

pub mod error;
pub mod notify;
pub mod store;

/// Example usage of the store module
///
/// ```rust,no_run
/// use common::store::{JsonStore, StoreConfig};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = StoreConfig::from_env()?;
///     let store = JsonStore::open(&config)?;
///     let fines: Vec<serde_json::Value> = store.read("pc_multas.json")?;
///     println!("Store health check: {}", store.health_check()?);
///     println!("{} fines", fines.len());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
