//! Space repository

use common::error::StoreResult;
use common::store::JsonStore;

use crate::models::Spaces;

/// Document holding every space, keyed by id
pub const SPACES_DOCUMENT: &str = "pc_espacios.json";

/// Space repository
#[derive(Debug, Clone)]
pub struct SpaceRepository {
    store: JsonStore,
}

impl SpaceRepository {
    /// Create a new space repository
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Load every space
    pub fn load(&self) -> StoreResult<Spaces> {
        self.store.read(SPACES_DOCUMENT)
    }

    /// Replace every space
    pub fn save(&self, spaces: &Spaces) -> StoreResult<()> {
        self.store.write(SPACES_DOCUMENT, spaces)
    }
}
