//! Rental repository

use common::error::StoreResult;
use common::store::JsonStore;

use crate::models::Rental;

/// Document holding every rental, active and finished
pub const RENTALS_DOCUMENT: &str = "pc_alquileres.json";

/// Rental repository
#[derive(Debug, Clone)]
pub struct RentalRepository {
    store: JsonStore,
}

impl RentalRepository {
    /// Create a new rental repository
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Load every rental
    pub fn load(&self) -> StoreResult<Vec<Rental>> {
        self.store.read(RENTALS_DOCUMENT)
    }

    /// Replace every rental
    pub fn save(&self, rentals: &[Rental]) -> StoreResult<()> {
        self.store.write(RENTALS_DOCUMENT, rentals)
    }
}
