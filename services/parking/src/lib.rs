//! Street parking domain
//!
//! Users rent street spaces for a number of minutes, extend or release the
//! rental and are fined when they overstay. Inspectors compare the plate
//! parked on a space with its rental. Administrators manage spaces, tariffs
//! and reports.
//!
//! All state lives in JSON documents under one data directory; every
//! operation re-reads the documents it needs and rewrites them whole.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use common::notify::LogNotifier;
//! use parking::{Parking, ParkingConfig, SystemClock};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ParkingConfig::from_env()?;
//!     let parking = Parking::open(&config, Arc::new(LogNotifier), Arc::new(SystemClock))?;
//!     for id in parking.lifecycle().list_available_spaces()? {
//!         println!("{id} is free");
//!     }
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod clock;
pub mod config;
pub mod error;
pub mod fines;
pub mod inspection;
pub mod lifecycle;
pub mod models;
mod notifications;
pub mod reports;
pub mod repositories;
pub mod service;
pub mod users;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ParkingConfig;
pub use error::{ParkingError, ParkingResult};
pub use service::Parking;
