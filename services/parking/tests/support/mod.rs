//! Shared fixtures for the parking integration tests
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use common::notify::MemoryNotifier;
use common::store::{JsonStore, StoreConfig};
use parking::models::{Settings, Space, Spaces};
use parking::repositories::{SettingsRepository, SpaceRepository};
use parking::validation::RatePolicy;
use parking::{FixedClock, Parking};
use tempfile::TempDir;

/// 01/06/2025 at `h:m`
pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub struct Fixture {
    // Keeps the data directory alive for the duration of the test
    pub dir: TempDir,
    pub store: JsonStore,
    pub clock: Arc<FixedClock>,
    pub notifier: Arc<MemoryNotifier>,
    pub parking: Parking,
}

impl Fixture {
    /// Spaces given as `(id, enabled)`, clock at 01/06/2025 10:00
    pub fn new(spaces: &[(&str, bool)], settings: Settings) -> Self {
        Self::with_notifier(spaces, settings, MemoryNotifier::new())
    }

    pub fn with_notifier(
        spaces: &[(&str, bool)],
        settings: Settings,
        notifier: MemoryNotifier,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(&StoreConfig::new(dir.path())).unwrap();

        let spaces: Spaces = spaces
            .iter()
            .map(|(id, enabled)| (id.to_string(), Space::new(*enabled)))
            .collect();
        SpaceRepository::new(store.clone()).save(&spaces).unwrap();
        SettingsRepository::new(store.clone()).save(&settings).unwrap();

        let clock = Arc::new(FixedClock::new(at(10, 0)));
        let notifier = Arc::new(notifier);
        let parking = Parking::new(
            store.clone(),
            RatePolicy::Any,
            notifier.clone(),
            clock.clone(),
        );

        Self {
            dir,
            store,
            clock,
            notifier,
            parking,
        }
    }

    pub fn spaces(&self) -> Spaces {
        SpaceRepository::new(self.store.clone()).load().unwrap()
    }

    /// Raw JSON of a document, for checks on the on-disk shape
    pub fn raw(&self, document: &str) -> serde_json::Value {
        self.store.read(document).unwrap()
    }
}
