//! Space and rental lifecycle
//!
//! Renting, extending and releasing spaces, plus the sweep that turns
//! expired rentals into fines. Every operation reads the documents it needs,
//! applies its change and rewrites them before returning.
//!
//! A space has an occupant exactly when it is referenced by one active
//! rental. More than one active rental on a space is reported as
//! [`ParkingError::Inconsistent`] and never resolved silently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use common::notify::Notifier;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{ParkingError, ParkingResult};
use crate::fines::{FineIssued, FineIssuer};
use crate::models::rental::round2;
use crate::models::{
    Occupant, Rental, RentalStatus, SpaceStatus, Spaces, Stamp, normalize_space_id,
    rental_cost,
};
use crate::notifications;
use crate::repositories::{RentalRepository, SettingsRepository, SpaceRepository};
use crate::validation::validate_plate;

/// Detail recorded on fines issued by the sweep
pub const OVERSTAY_DETAIL: &str = "rental period exceeded without release";

/// Longest rental, and longest single extension, in minutes
pub const MAX_RENTAL_MINUTES: u32 = 24 * 60;

fn ensure_within_limit(minutes: u32) -> ParkingResult<()> {
    if minutes > MAX_RENTAL_MINUTES {
        return Err(ParkingError::Validation(format!(
            "At most {MAX_RENTAL_MINUTES} minutes can be requested at once, got {minutes}"
        )));
    }
    Ok(())
}

/// `start` plus `minutes`, or a validation error when the result is not a
/// representable date
fn add_minutes(start: NaiveDateTime, minutes: u32) -> ParkingResult<NaiveDateTime> {
    start
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or_else(|| {
            ParkingError::Validation(format!("{minutes} minutes after {start} is out of range"))
        })
}

/// Index of the active rental on `space_id`, if any
pub(crate) fn find_active_for_space(
    rentals: &[Rental],
    space_id: &str,
) -> ParkingResult<Option<usize>> {
    let mut active = rentals
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_active() && r.space_id == space_id)
        .map(|(index, _)| index);

    let first = active.next();
    if active.next().is_some() {
        return Err(ParkingError::Inconsistent(format!(
            "Space {space_id} has more than one active rental"
        )));
    }

    Ok(first)
}

/// Fail if any space is referenced by more than one active rental
fn ensure_single_active(rentals: &[Rental]) -> ParkingResult<()> {
    let mut per_space: HashMap<&str, usize> = HashMap::new();
    for rental in rentals.iter().filter(|r| r.is_active()) {
        let count = per_space.entry(rental.space_id.as_str()).or_default();
        *count += 1;
        if *count > 1 {
            return Err(ParkingError::Inconsistent(format!(
                "Space {} has more than one active rental",
                rental.space_id
            )));
        }
    }

    Ok(())
}

/// Owns rental creation, extension, release and expiry sweeping
#[derive(Clone)]
pub struct LifecycleManager {
    spaces: SpaceRepository,
    rentals: RentalRepository,
    settings: SettingsRepository,
    fines: FineIssuer,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl LifecycleManager {
    pub fn new(
        spaces: SpaceRepository,
        rentals: RentalRepository,
        settings: SettingsRepository,
        fines: FineIssuer,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            spaces,
            rentals,
            settings,
            fines,
            notifier,
            clock,
        }
    }

    /// Ids of the spaces that are enabled and free, in id order
    pub fn list_available_spaces(&self) -> ParkingResult<Vec<String>> {
        Ok(self
            .spaces
            .load()?
            .into_iter()
            .filter(|(_, space)| space.is_available())
            .map(|(id, _)| id)
            .collect())
    }

    /// Whether a space can be rented right now
    pub fn space_status(&self, space_id: &str) -> ParkingResult<SpaceStatus> {
        Ok(self
            .spaces
            .load()?
            .get(&normalize_space_id(space_id))
            .map_or(SpaceStatus::Unavailable, |space| space.status()))
    }

    /// The active rental held by `user`, if any
    pub fn active_rental_for(&self, user: &str) -> ParkingResult<Option<Rental>> {
        Ok(self
            .rentals
            .load()?
            .into_iter()
            .find(|r| r.is_active() && r.user == user))
    }

    /// Rent `space_id` for `minutes` starting now
    pub fn rent(
        &self,
        user: &str,
        space_id: &str,
        minutes: u32,
        plate: &str,
    ) -> ParkingResult<Uuid> {
        let space_id = normalize_space_id(space_id);
        let user = user.trim();
        if user.is_empty() {
            return Err(ParkingError::Validation("User is required".to_string()));
        }
        validate_plate(plate).map_err(ParkingError::Validation)?;
        let plate = plate.trim().to_uppercase();
        ensure_within_limit(minutes)?;

        let mut spaces = self.spaces.load()?;
        let mut rentals = self.rentals.load()?;
        let settings = self.settings.load()?;

        let space = spaces
            .get_mut(&space_id)
            .filter(|space| space.enabled)
            .ok_or_else(|| ParkingError::NotFound(format!("Space {space_id}")))?;

        if space.occupant.is_some() {
            return Err(ParkingError::AlreadyOccupied(space_id));
        }

        if minutes < settings.minimum_minutes {
            return Err(ParkingError::BelowMinimum {
                requested: minutes,
                minimum: settings.minimum_minutes,
            });
        }

        if find_active_for_space(&rentals, &space_id)?.is_some() {
            return Err(ParkingError::Inconsistent(format!(
                "Space {space_id} is free but still referenced by an active rental"
            )));
        }

        let start = self.clock.now();
        let end = add_minutes(start, minutes)?;
        let rental = Rental {
            id: Uuid::new_v4(),
            space_id: space_id.clone(),
            user: user.to_string(),
            start: Stamp::from(start),
            end: Stamp::from(end),
            status: RentalStatus::Active,
            total_cost: rental_cost(minutes, settings.hourly_rate),
            plate,
        };

        space.occupant = Some(Occupant {
            user: rental.user.clone(),
            plate: rental.plate.clone(),
            start: rental.start.clone(),
            minutes,
            end: rental.end.clone(),
        });
        let previous = rentals.clone();
        rentals.push(rental.clone());

        self.commit(&previous, &rentals, &spaces)?;
        info!(
            "Space {} rented by {} until {} (rental {})",
            rental.space_id, rental.user, rental.end, rental.id
        );

        notifications::deliver(
            self.notifier.as_ref(),
            notifications::rental_confirmation(&rental, minutes),
        );

        Ok(rental.id)
    }

    /// Add `extra_minutes` to an active rental
    pub fn extend(&self, rental_id: Uuid, extra_minutes: u32) -> ParkingResult<()> {
        let mut rentals = self.rentals.load()?;
        let mut spaces = self.spaces.load()?;

        let index = rentals
            .iter()
            .position(|r| r.id == rental_id && r.is_active())
            .ok_or_else(|| ParkingError::NotFound(format!("Active rental {rental_id}")))?;

        if extra_minutes == 0 {
            return Err(ParkingError::Validation(
                "Extra time must be at least 1 minute".to_string(),
            ));
        }
        ensure_within_limit(extra_minutes)?;

        let settings = self.settings.load()?;
        let space_id = rentals[index].space_id.clone();
        find_active_for_space(&rentals, &space_id)?;

        let previous = rentals.clone();
        let rental = &mut rentals[index];
        let current_end = rental.end.to_datetime().map_err(|e| {
            ParkingError::Inconsistent(format!(
                "Rental {rental_id} has an unreadable end time {:?}: {e}",
                rental.end.as_str()
            ))
        })?;

        let occupant = spaces
            .get_mut(&space_id)
            .and_then(|space| space.occupant.as_mut())
            .ok_or_else(|| {
                ParkingError::Inconsistent(format!(
                    "Active rental {rental_id} points at space {space_id}, which has no occupant"
                ))
            })?;

        let minutes = occupant.minutes.checked_add(extra_minutes).ok_or_else(|| {
            ParkingError::Validation(format!(
                "Rental {rental_id} cannot be extended by {extra_minutes} more minutes"
            ))
        })?;
        let end = add_minutes(current_end, extra_minutes)?;

        rental.end = Stamp::from(end);
        rental.total_cost = round2(
            rental.total_cost + rental_cost(extra_minutes, settings.hourly_rate),
        );
        occupant.minutes = minutes;
        occupant.end = rental.end.clone();

        let rental = rental.clone();
        self.commit(&previous, &rentals, &spaces)?;
        info!(
            "Rental {} extended by {} minutes until {}",
            rental.id, extra_minutes, rental.end
        );

        notifications::deliver(
            self.notifier.as_ref(),
            notifications::rental_extended(&rental, extra_minutes),
        );

        Ok(())
    }

    /// Finish an active rental and free its space
    pub fn release(&self, rental_id: Uuid) -> ParkingResult<()> {
        let mut rentals = self.rentals.load()?;
        let mut spaces = self.spaces.load()?;

        let index = rentals
            .iter()
            .position(|r| r.id == rental_id && r.is_active())
            .ok_or_else(|| ParkingError::NotFound(format!("Active rental {rental_id}")))?;

        let space_id = rentals[index].space_id.clone();
        find_active_for_space(&rentals, &space_id)?;

        let space = spaces.get_mut(&space_id).ok_or_else(|| {
            ParkingError::Inconsistent(format!(
                "Active rental {rental_id} points at unknown space {space_id}"
            ))
        })?;

        let previous = rentals.clone();
        rentals[index].status = RentalStatus::Finished;
        space.clear();

        self.commit(&previous, &rentals, &spaces)?;
        info!("Rental {} released, space {} is free", rental_id, space_id);

        Ok(())
    }

    /// Sweep with the current time
    pub fn sweep(&self) -> ParkingResult<Vec<FineIssued>> {
        self.sweep_expired(self.clock.now())
    }

    /// Finish every active rental that ended before `now`, free its space and
    /// fine it. Rentals already finished are never looked at again, so
    /// repeated sweeps do not issue duplicate fines.
    ///
    /// Fines are prepared before anything is written. They are recorded
    /// first and removed again if the rentals or spaces cannot be saved, so
    /// a failed sweep leaves every document as it found it.
    pub fn sweep_expired(&self, now: NaiveDateTime) -> ParkingResult<Vec<FineIssued>> {
        let mut rentals = self.rentals.load()?;
        ensure_single_active(&rentals)?;

        let previous = rentals.clone();
        let mut spaces = self.spaces.load()?;
        let mut expired = Vec::new();

        for rental in rentals.iter_mut().filter(|r| r.is_active()) {
            let end = match rental.end.to_datetime() {
                Ok(end) => end,
                Err(e) => {
                    warn!(
                        "Skipping rental {} with unreadable end time {:?}: {}",
                        rental.id,
                        rental.end.as_str(),
                        e
                    );
                    continue;
                }
            };

            if end >= now {
                continue;
            }

            rental.status = RentalStatus::Finished;
            match spaces.get_mut(&rental.space_id) {
                Some(space) => space.clear(),
                None => warn!(
                    "Expired rental {} points at unknown space {}",
                    rental.id, rental.space_id
                ),
            }
            expired.push(rental.clone());
        }

        if expired.is_empty() {
            return Ok(Vec::new());
        }

        let fines = expired
            .iter()
            .map(|rental| {
                self.fines.prepare(
                    &rental.space_id,
                    &rental.plate,
                    OVERSTAY_DETAIL,
                    Some(&rental.user),
                )
            })
            .collect::<ParkingResult<Vec<_>>>()?;

        let recorded = self.fines.all()?;
        self.fines.record_all(&fines)?;
        if let Err(e) = self.commit(&previous, &rentals, &spaces) {
            if let Err(restore) = self.fines.restore(&recorded) {
                error!("Could not remove fines of a failed sweep: {}", restore);
            }
            return Err(e);
        }
        info!("Sweep finished {} expired rentals", expired.len());

        Ok(fines
            .into_iter()
            .map(|fine| self.fines.notify(fine))
            .collect())
    }

    /// Save rentals, then spaces. When the spaces cannot be saved the
    /// rentals document is put back to `previous`.
    fn commit(
        &self,
        previous: &[Rental],
        rentals: &[Rental],
        spaces: &Spaces,
    ) -> ParkingResult<()> {
        self.rentals.save(rentals)?;
        if let Err(e) = self.spaces.save(spaces) {
            if let Err(restore) = self.rentals.save(previous) {
                error!("Could not restore rentals after a failed write: {}", restore);
            }
            return Err(e.into());
        }
        Ok(())
    }
}
