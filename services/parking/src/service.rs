//! Wiring of the parking components over one data directory

use std::sync::Arc;

use common::notify::Notifier;
use common::store::JsonStore;
use tracing::info;

use crate::admin::Administration;
use crate::clock::Clock;
use crate::config::ParkingConfig;
use crate::error::ParkingResult;
use crate::fines::FineIssuer;
use crate::inspection::Inspector;
use crate::lifecycle::LifecycleManager;
use crate::reports::Reports;
use crate::repositories::{
    FineRepository, RentalRepository, SettingsRepository, SpaceRepository, UserRepository,
};
use crate::users::Accounts;
use crate::validation::RatePolicy;

/// Every parking component, sharing one store, notifier and clock
#[derive(Clone)]
pub struct Parking {
    store: JsonStore,
    clock: Arc<dyn Clock>,
    lifecycle: LifecycleManager,
    fines: FineIssuer,
    inspector: Inspector,
    admin: Administration,
    accounts: Accounts,
    reports: Reports,
}

impl Parking {
    pub fn new(
        store: JsonStore,
        rate_policy: RatePolicy,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let spaces = SpaceRepository::new(store.clone());
        let rentals = RentalRepository::new(store.clone());
        let fine_records = FineRepository::new(store.clone());
        let settings = SettingsRepository::new(store.clone());
        let users = UserRepository::new(store.clone());

        let fines = FineIssuer::new(
            fine_records.clone(),
            users.clone(),
            settings.clone(),
            notifier.clone(),
            clock.clone(),
        );

        Self {
            lifecycle: LifecycleManager::new(
                spaces.clone(),
                rentals.clone(),
                settings.clone(),
                fines.clone(),
                notifier.clone(),
                clock.clone(),
            ),
            inspector: Inspector::new(
                spaces.clone(),
                rentals.clone(),
                fines.clone(),
                clock.clone(),
            ),
            admin: Administration::new(spaces.clone(), settings, rate_policy),
            accounts: Accounts::new(users, notifier, clock.clone()),
            reports: Reports::new(spaces, rentals, fine_records),
            fines,
            store,
            clock,
        }
    }

    /// Open the configured data directory
    pub fn open(
        config: &ParkingConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> ParkingResult<Self> {
        let store = JsonStore::open(&config.store)?;
        info!(
            "Parking data directory {} opened, rate policy {}",
            store.root().display(),
            config.rate_policy
        );

        Ok(Self::new(store, config.rate_policy, notifier, clock))
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn fines(&self) -> &FineIssuer {
        &self.fines
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn admin(&self) -> &Administration {
        &self.admin
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn reports(&self) -> &Reports {
        &self.reports
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Whether the data directory is writable
    pub fn health_check(&self) -> ParkingResult<bool> {
        Ok(self.store.health_check()?)
    }
}
