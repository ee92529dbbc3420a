//! Parking service configuration

use common::store::StoreConfig;
use config::{Config, Environment};

use crate::error::{ParkingError, ParkingResult};
use crate::validation::RatePolicy;

/// Parking service configuration
#[derive(Debug, Clone)]
pub struct ParkingConfig {
    /// Where the JSON documents live
    pub store: StoreConfig,
    /// How hourly rates are validated on save
    pub rate_policy: RatePolicy,
}

impl ParkingConfig {
    /// Create a new ParkingConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PARKING_DATA_DIR`: Data directory (default: "data")
    /// - `PARKING_RATE_POLICY`: "any" or "even-integer" (default: "any")
    pub fn from_env() -> ParkingResult<Self> {
        let store = StoreConfig::from_env()?;

        let settings = Config::builder()
            .set_default("rate_policy", "any")
            .and_then(|builder| {
                builder
                    .add_source(Environment::with_prefix("PARKING"))
                    .build()
            })
            .and_then(|config| config.get_string("rate_policy"))
            .map_err(|e| ParkingError::Validation(format!("Invalid configuration: {e}")))?;

        let rate_policy = settings.parse().map_err(ParkingError::Validation)?;

        Ok(Self { store, rate_policy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parking_config_from_env() {
        unsafe {
            std::env::remove_var("PARKING_RATE_POLICY");
            std::env::set_var("PARKING_DATA_DIR", "/tmp/parking-config-test");
        }

        let config = ParkingConfig::from_env().unwrap();
        assert_eq!(config.rate_policy, RatePolicy::Any);
        assert_eq!(
            config.store.data_dir,
            std::path::PathBuf::from("/tmp/parking-config-test")
        );

        unsafe {
            std::env::set_var("PARKING_RATE_POLICY", "even-integer");
        }
        let config = ParkingConfig::from_env().unwrap();
        assert_eq!(config.rate_policy, RatePolicy::EvenInteger);

        unsafe {
            std::env::set_var("PARKING_RATE_POLICY", "sometimes");
        }
        assert!(matches!(
            ParkingConfig::from_env(),
            Err(ParkingError::Validation(_))
        ));

        // Clean up
        unsafe {
            std::env::remove_var("PARKING_RATE_POLICY");
            std::env::remove_var("PARKING_DATA_DIR");
        }
    }
}
