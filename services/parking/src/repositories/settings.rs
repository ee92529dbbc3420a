//! Settings repository

use common::error::StoreResult;
use common::store::JsonStore;

use crate::error::{ParkingError, ParkingResult};
use crate::models::Settings;

/// Document holding the tariff configuration
pub const SETTINGS_DOCUMENT: &str = "pc_configuracion.json";

/// Settings repository
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    store: JsonStore,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Settings, if an administrator has saved any
    pub fn find(&self) -> StoreResult<Option<Settings>> {
        self.store.read(SETTINGS_DOCUMENT)
    }

    /// Settings, failing with `NotFound` when none were saved yet
    pub fn load(&self) -> ParkingResult<Settings> {
        self.find()?
            .ok_or_else(|| ParkingError::NotFound("Parking configuration".to_string()))
    }

    /// Replace the settings
    pub fn save(&self, settings: &Settings) -> StoreResult<()> {
        self.store.write(SETTINGS_DOCUMENT, settings)
    }
}
