//! User repository

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use common::error::StoreResult;
use common::store::JsonStore;
use tracing::info;

use crate::error::{ParkingError, ParkingResult};
use crate::models::User;

/// Document holding every registered account
pub const USERS_DOCUMENT: &str = "pc_usuarios.json";

/// User repository
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: JsonStore,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Load every user
    pub fn load(&self) -> StoreResult<Vec<User>> {
        self.store.read(USERS_DOCUMENT)
    }

    /// Replace every user
    pub fn save(&self, users: &[User]) -> StoreResult<()> {
        self.store.write(USERS_DOCUMENT, users)
    }

    /// Find a user by identification
    pub fn find_by_identification(&self, identification: &str) -> StoreResult<Option<User>> {
        info!("Finding user by identification: {}", identification);
        Ok(self
            .load()?
            .into_iter()
            .find(|u| u.identification == identification))
    }

    /// Find the owner of a plate, matching case-insensitively
    pub fn find_by_plate(&self, plate: &str) -> StoreResult<Option<User>> {
        Ok(self.load()?.into_iter().find(|u| u.owns_plate(plate)))
    }

    /// Hash a password with argon2
    pub fn hash_password(password: &str) -> ParkingResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ParkingError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a user's password
    pub fn verify_password(user: &User, password: &str) -> ParkingResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            ParkingError::Inconsistent(format!(
                "Stored password hash of user {} is unreadable: {}",
                user.identification, e
            ))
        })?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }
}
