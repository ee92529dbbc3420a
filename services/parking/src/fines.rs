//! Fine issuing
//!
//! Fines are created by the expiry sweep and by inspector checks. The owner
//! of the fined plate is looked up among the registered vehicles and
//! notified when found; the fine is recorded either way.

use std::sync::Arc;

use common::notify::Notifier;
use serde::Serialize;
use tracing::info;

use crate::clock::Clock;
use crate::error::ParkingResult;
use crate::models::{Fine, Stamp, normalize_space_id};
use crate::notifications;
use crate::repositories::{FineRepository, SettingsRepository, UserRepository};

/// A fine that was just recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineIssued {
    pub fine: Fine,
    /// Whether the owner was successfully notified
    pub notified: bool,
}

/// Records fines and notifies vehicle owners
#[derive(Clone)]
pub struct FineIssuer {
    fines: FineRepository,
    users: UserRepository,
    settings: SettingsRepository,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl FineIssuer {
    pub fn new(
        fines: FineRepository,
        users: UserRepository,
        settings: SettingsRepository,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fines,
            users,
            settings,
            notifier,
            clock,
        }
    }

    /// Record a fine against `plate` at `space_id`
    pub fn issue(&self, space_id: &str, plate: &str, detail: &str) -> ParkingResult<FineIssued> {
        self.issue_with_fallback(space_id, plate, detail, None)
    }

    /// Record a fine, addressing it to `fallback_contact` when no registered
    /// vehicle matches the plate.
    pub(crate) fn issue_with_fallback(
        &self,
        space_id: &str,
        plate: &str,
        detail: &str,
        fallback_contact: Option<&str>,
    ) -> ParkingResult<FineIssued> {
        let fine = self.prepare(space_id, plate, detail, fallback_contact)?;
        self.fines.append(&fine)?;
        Ok(self.notify(fine))
    }

    /// Build a fine without recording it. Reads the owner and the configured
    /// amount, writes nothing.
    pub(crate) fn prepare(
        &self,
        space_id: &str,
        plate: &str,
        detail: &str,
        fallback_contact: Option<&str>,
    ) -> ParkingResult<Fine> {
        let contact = self
            .owner_contact(plate)?
            .or_else(|| fallback_contact.map(str::to_string))
            .filter(|c| !c.trim().is_empty());

        // A fine is recorded even before an administrator configured an amount
        let amount = self
            .settings
            .find()?
            .map(|settings| settings.fine_amount)
            .unwrap_or_default();

        Ok(Fine {
            timestamp: Stamp::from(self.clock.now()),
            space_id: normalize_space_id(space_id),
            plate: plate.trim().to_uppercase(),
            detail: detail.to_string(),
            amount,
            contact,
        })
    }

    /// Record prepared fines in one write
    pub(crate) fn record_all(&self, fines: &[Fine]) -> ParkingResult<()> {
        Ok(self.fines.append_all(fines)?)
    }

    /// Put the fines document back to `fines`
    pub(crate) fn restore(&self, fines: &[Fine]) -> ParkingResult<()> {
        Ok(self.fines.replace(fines)?)
    }

    /// Tell the owner about a recorded fine
    pub(crate) fn notify(&self, fine: Fine) -> FineIssued {
        info!(
            "Fine issued for plate {} at space {}: {}",
            fine.plate, fine.space_id, fine.detail
        );

        let notified = match &fine.contact {
            Some(recipient) => notifications::deliver(
                self.notifier.as_ref(),
                notifications::fine_issued(recipient, &fine),
            ),
            None => false,
        };

        FineIssued { fine, notified }
    }

    /// Email of the user owning `plate`, matched case-insensitively
    pub fn owner_contact(&self, plate: &str) -> ParkingResult<Option<String>> {
        Ok(self.users.find_by_plate(plate)?.map(|user| user.email))
    }

    /// Every fine recorded so far
    pub fn all(&self) -> ParkingResult<Vec<Fine>> {
        Ok(self.fines.load()?)
    }
}
