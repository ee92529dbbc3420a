//! Fine repository

use common::error::StoreResult;
use common::store::JsonStore;

use crate::models::Fine;

/// Document holding every fine ever issued
pub const FINES_DOCUMENT: &str = "pc_multas.json";

/// Fine repository. Fines are only ever appended.
#[derive(Debug, Clone)]
pub struct FineRepository {
    store: JsonStore,
}

impl FineRepository {
    /// Create a new fine repository
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Load every fine
    pub fn load(&self) -> StoreResult<Vec<Fine>> {
        self.store.read(FINES_DOCUMENT)
    }

    /// Append one fine
    pub fn append(&self, fine: &Fine) -> StoreResult<()> {
        let mut fines = self.load()?;
        fines.push(fine.clone());
        self.store.write(FINES_DOCUMENT, &fines)
    }

    /// Append several fines in a single write
    pub fn append_all(&self, new_fines: &[Fine]) -> StoreResult<()> {
        let mut fines = self.load()?;
        fines.extend_from_slice(new_fines);
        self.store.write(FINES_DOCUMENT, &fines)
    }

    /// Replace the whole document, used to undo an append
    pub fn replace(&self, fines: &[Fine]) -> StoreResult<()> {
        self.store.write(FINES_DOCUMENT, fines)
    }
}
