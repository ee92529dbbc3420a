//! Application state shared across handlers

use std::sync::Arc;

use parking::{Parking, ParkingResult};
use tokio::sync::Mutex;

use crate::error::ApiResult;

/// Application state shared across handlers.
///
/// Every document is read and rewritten whole, so requests take turns on
/// one lock around the parking service.
#[derive(Clone)]
pub struct AppState {
    parking: Arc<Mutex<Parking>>,
}

impl AppState {
    pub fn new(parking: Parking) -> Self {
        Self {
            parking: Arc::new(Mutex::new(parking)),
        }
    }

    /// Run one parking operation while holding the lock
    pub async fn run<T>(&self, op: impl FnOnce(&Parking) -> ParkingResult<T>) -> ApiResult<T> {
        let parking = self.parking.lock().await;
        Ok(op(&parking)?)
    }
}
