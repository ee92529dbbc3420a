//! Administrator operations: settings and space management

use tracing::info;

use crate::error::{ParkingError, ParkingResult};
use crate::models::{Settings, Space, Spaces, normalize_space_id};
use crate::repositories::{SettingsRepository, SpaceRepository};
use crate::validation::{RatePolicy, validate_settings, validate_space_id};

/// Administrator-only operations
#[derive(Debug, Clone)]
pub struct Administration {
    spaces: SpaceRepository,
    settings: SettingsRepository,
    rate_policy: RatePolicy,
}

impl Administration {
    pub fn new(
        spaces: SpaceRepository,
        settings: SettingsRepository,
        rate_policy: RatePolicy,
    ) -> Self {
        Self {
            spaces,
            settings,
            rate_policy,
        }
    }

    pub fn rate_policy(&self) -> RatePolicy {
        self.rate_policy
    }

    /// Current settings
    pub fn settings(&self) -> ParkingResult<Settings> {
        self.settings.load()
    }

    /// Validate and save new settings. Nothing is written when validation fails.
    pub fn update_settings(&self, settings: Settings) -> ParkingResult<Settings> {
        validate_settings(&settings, self.rate_policy).map_err(ParkingError::Validation)?;
        self.settings.save(&settings)?;
        info!(
            "Settings updated: rate {:.2}, minimum {} minutes, fine {:.2}",
            settings.hourly_rate, settings.minimum_minutes, settings.fine_amount
        );

        Ok(settings)
    }

    pub fn list_spaces(&self) -> ParkingResult<Spaces> {
        Ok(self.spaces.load()?)
    }

    /// Create a space or change whether it is enabled. An existing space
    /// keeps its occupant.
    pub fn upsert_space(&self, id: &str, enabled: bool) -> ParkingResult<(String, Space)> {
        validate_space_id(id).map_err(ParkingError::Validation)?;
        let id = normalize_space_id(id);

        let mut spaces = self.spaces.load()?;
        let space = spaces
            .entry(id.clone())
            .and_modify(|space| space.enabled = enabled)
            .or_insert_with(|| Space::new(enabled))
            .clone();
        self.spaces.save(&spaces)?;
        info!("Space {} saved, enabled: {}", id, enabled);

        Ok((id, space))
    }
}
