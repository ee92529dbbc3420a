//! User accounts
//!
//! Registration, sign-in, profile edits, vehicles and password recovery.

use std::sync::Arc;

use common::notify::Notifier;
use tracing::info;

use crate::clock::Clock;
use crate::error::{ParkingError, ParkingResult};
use crate::models::{LoginCredentials, NewUser, Role, Stamp, UpdateUser, User, Vehicle};
use crate::notifications;
use crate::repositories::UserRepository;
use crate::validation::{validate_email, validate_password, validate_phone, validate_plate};

/// Account management
#[derive(Clone)]
pub struct Accounts {
    users: UserRepository,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl Accounts {
    pub fn new(users: UserRepository, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            notifier,
            clock,
        }
    }

    /// Register a new account with the `User` role
    pub fn register(&self, new_user: NewUser) -> ParkingResult<User> {
        let identification = new_user.identification.trim().to_string();
        if identification.is_empty() {
            return Err(ParkingError::Validation("Identification is required".to_string()));
        }
        if new_user.name.trim().is_empty() {
            return Err(ParkingError::Validation("Name is required".to_string()));
        }

        let email = new_user.email.trim().to_string();
        validate_email(&email).map_err(ParkingError::Validation)?;
        validate_password(&new_user.password).map_err(ParkingError::Validation)?;
        let phone = normalize_phone(new_user.phone)?;

        let mut users = self.users.load()?;
        if users.iter().any(|u| u.identification == identification) {
            return Err(ParkingError::Validation(format!(
                "Identification {identification} is already registered"
            )));
        }
        if let Some(card) = &new_user.card {
            ensure_card_unused(&users, &card.number, None)?;
        }

        let user = User {
            identification,
            name: new_user.name.trim().to_string(),
            surname: new_user.surname.trim().to_string(),
            email,
            password_hash: UserRepository::hash_password(&new_user.password)?,
            phone,
            card: new_user.card,
            vehicles: Vec::new(),
            registered_at: Stamp::from(self.clock.now()),
            role: Role::User,
            temporary_password: false,
        };

        users.push(user.clone());
        self.users.save(&users)?;
        info!("User {} registered", user.identification);

        Ok(user)
    }

    /// Check credentials and return the account
    pub fn authenticate(&self, credentials: &LoginCredentials) -> ParkingResult<User> {
        let user = self.find(credentials.identification.trim())?;
        if !UserRepository::verify_password(&user, &credentials.password)? {
            info!("Failed sign-in for user {}", user.identification);
            return Err(ParkingError::InvalidCredentials);
        }

        info!("User {} signed in", user.identification);
        Ok(user)
    }

    pub fn find(&self, identification: &str) -> ParkingResult<User> {
        self.users
            .find_by_identification(identification)?
            .ok_or_else(|| ParkingError::NotFound(format!("User {identification}")))
    }

    /// Change profile fields. The password hash, registration date and role
    /// are kept.
    pub fn update_profile(&self, identification: &str, update: UpdateUser) -> ParkingResult<User> {
        let mut users = self.users.load()?;
        let index = position(&users, identification)?;

        if let Some(card) = &update.card {
            ensure_card_unused(&users, &card.number, Some(identification))?;
        }

        let user = &mut users[index];
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(ParkingError::Validation("Name is required".to_string()));
            }
            user.name = name.trim().to_string();
        }
        if let Some(surname) = update.surname {
            user.surname = surname.trim().to_string();
        }
        if let Some(email) = update.email {
            let email = email.trim().to_string();
            validate_email(&email).map_err(ParkingError::Validation)?;
            user.email = email;
        }
        if update.phone.is_some() {
            user.phone = normalize_phone(update.phone)?;
        }
        if let Some(card) = update.card {
            user.card = Some(card);
        }

        let user = user.clone();
        self.users.save(&users)?;
        info!("User {} updated their profile", user.identification);

        notifications::deliver(
            self.notifier.as_ref(),
            notifications::profile_updated(&user.email, &user.name),
        );

        Ok(user)
    }

    pub fn delete(&self, identification: &str) -> ParkingResult<()> {
        let mut users = self.users.load()?;
        let index = position(&users, identification)?;
        users.remove(index);
        self.users.save(&users)?;
        info!("User {} deleted", identification);

        Ok(())
    }

    /// Register a vehicle. Plates are stored upper-cased and unique per user.
    pub fn add_vehicle(&self, identification: &str, vehicle: Vehicle) -> ParkingResult<User> {
        validate_plate(&vehicle.plate).map_err(ParkingError::Validation)?;
        let vehicle = Vehicle {
            plate: vehicle.plate.trim().to_uppercase(),
            ..vehicle
        };

        let mut users = self.users.load()?;
        let index = position(&users, identification)?;
        let user = &mut users[index];
        if user.owns_plate(&vehicle.plate) {
            return Err(ParkingError::Validation(format!(
                "Vehicle {} is already registered",
                vehicle.plate
            )));
        }

        info!("User {} added vehicle {}", identification, vehicle.plate);
        user.vehicles.push(vehicle);
        let user = user.clone();
        self.users.save(&users)?;

        Ok(user)
    }

    pub fn remove_vehicle(&self, identification: &str, plate: &str) -> ParkingResult<User> {
        let mut users = self.users.load()?;
        let index = position(&users, identification)?;
        let user = &mut users[index];

        let before = user.vehicles.len();
        user.vehicles
            .retain(|v| !v.plate.trim().eq_ignore_ascii_case(plate.trim()));
        if user.vehicles.len() == before {
            return Err(ParkingError::NotFound(format!("Vehicle {plate}")));
        }

        let user = user.clone();
        self.users.save(&users)?;
        info!("User {} removed vehicle {}", identification, plate);

        Ok(user)
    }

    /// Replace the password after checking the current one
    pub fn change_password(
        &self,
        identification: &str,
        current: &str,
        new_password: &str,
    ) -> ParkingResult<()> {
        let mut users = self.users.load()?;
        let index = position(&users, identification)?;
        if !UserRepository::verify_password(&users[index], current)? {
            return Err(ParkingError::InvalidCredentials);
        }
        validate_password(new_password).map_err(ParkingError::Validation)?;

        let user = &mut users[index];
        user.password_hash = UserRepository::hash_password(new_password)?;
        user.temporary_password = false;
        self.users.save(&users)?;
        info!("User {} changed their password", identification);

        Ok(())
    }

    /// Set a temporary password on the account registered with `email` and
    /// mail it to the owner. Returns whether the mail was delivered.
    pub fn set_temporary_password(&self, email: &str, temporary: &str) -> ParkingResult<bool> {
        if temporary.trim().is_empty() {
            return Err(ParkingError::Validation(
                "Temporary password is required".to_string(),
            ));
        }

        let mut users = self.users.load()?;
        let user = users
            .iter_mut()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(|| ParkingError::NotFound(format!("User with email {email}")))?;

        user.password_hash = UserRepository::hash_password(temporary)?;
        user.temporary_password = true;
        let user = user.clone();
        self.users.save(&users)?;
        info!("Temporary password set for user {}", user.identification);

        Ok(notifications::deliver(
            self.notifier.as_ref(),
            notifications::temporary_password(&user.email, &user.name, temporary),
        ))
    }

    /// Mail recovery instructions to the account registered with `email`
    pub fn password_reminder(&self, email: &str) -> ParkingResult<bool> {
        let user = self
            .users
            .load()?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(|| ParkingError::NotFound(format!("User with email {email}")))?;

        Ok(notifications::deliver(
            self.notifier.as_ref(),
            notifications::password_reminder(&user.email, &user.name),
        ))
    }
}

fn position(users: &[User], identification: &str) -> ParkingResult<usize> {
    users
        .iter()
        .position(|u| u.identification == identification)
        .ok_or_else(|| ParkingError::NotFound(format!("User {identification}")))
}

/// Empty phone numbers are treated as absent
fn normalize_phone(phone: Option<String>) -> ParkingResult<Option<String>> {
    match phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
        Some(phone) => {
            validate_phone(&phone).map_err(ParkingError::Validation)?;
            Ok(Some(phone))
        }
        None => Ok(None),
    }
}

fn ensure_card_unused(users: &[User], number: &str, owner: Option<&str>) -> ParkingResult<()> {
    let taken = users.iter().any(|u| {
        Some(u.identification.as_str()) != owner
            && u.card.as_ref().is_some_and(|c| c.number.trim() == number.trim())
    });
    if taken {
        return Err(ParkingError::Validation(
            "Card number is already registered".to_string(),
        ));
    }

    Ok(())
}
