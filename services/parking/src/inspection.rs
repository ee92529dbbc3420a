//! Inspector checks
//!
//! An inspector stands at a space and reports the plate they see. The check
//! compares it with the active rental on that space and fines every outcome
//! except a compliant one. The space itself is never touched; clearing
//! expired rentals is the sweep's job.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::clock::Clock;
use crate::error::{ParkingError, ParkingResult};
use crate::fines::{FineIssued, FineIssuer};
use crate::lifecycle::find_active_for_space;
use crate::models::{Stamp, normalize_space_id};
use crate::repositories::{RentalRepository, SpaceRepository};

/// Outcome of comparing an observed plate with a space's rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Nobody paid for the space
    NoActiveRental,
    /// The active rental's end time cannot be read
    MalformedRentalRecord { end: Stamp },
    /// The rental ended before the inspection
    Expired { end: Stamp, observed_at: Stamp },
    /// A different vehicle is parked on the space
    PlateMismatch { registered: String, observed: String },
    Compliant,
}

impl Verdict {
    pub fn requires_fine(&self) -> bool {
        !matches!(self, Verdict::Compliant)
    }

    /// Reason written on the fine
    pub fn detail(&self) -> String {
        match self {
            Verdict::NoActiveRental => "no active rental for the space".to_string(),
            Verdict::MalformedRentalRecord { end } => {
                format!("rental record has an unreadable end time {:?}", end.as_str())
            }
            Verdict::Expired { end, .. } => format!("rental expired at {end}"),
            Verdict::PlateMismatch { registered, .. } => {
                format!("plate does not match the rental (registered {registered})")
            }
            Verdict::Compliant => "compliant".to_string(),
        }
    }
}

/// Result of an inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionOutcome {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub fine: Option<FineIssued>,
}

/// Runs inspector checks
#[derive(Clone)]
pub struct Inspector {
    spaces: SpaceRepository,
    rentals: RentalRepository,
    fines: FineIssuer,
    clock: Arc<dyn Clock>,
}

impl Inspector {
    pub fn new(
        spaces: SpaceRepository,
        rentals: RentalRepository,
        fines: FineIssuer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            spaces,
            rentals,
            fines,
            clock,
        }
    }

    /// Classify the state of `space_id` against `observed_plate` at `now`
    pub fn classify(
        &self,
        space_id: &str,
        observed_plate: &str,
        now: NaiveDateTime,
    ) -> ParkingResult<Verdict> {
        let space_id = normalize_space_id(space_id);
        if !self.spaces.load()?.contains_key(&space_id) {
            return Err(ParkingError::NotFound(format!("Space {space_id}")));
        }

        let rentals = self.rentals.load()?;
        let Some(index) = find_active_for_space(&rentals, &space_id)? else {
            return Ok(Verdict::NoActiveRental);
        };
        let rental = &rentals[index];

        let end = match rental.end.to_datetime() {
            Ok(end) => end,
            Err(_) => {
                return Ok(Verdict::MalformedRentalRecord {
                    end: rental.end.clone(),
                });
            }
        };

        if now > end {
            return Ok(Verdict::Expired {
                end: rental.end.clone(),
                observed_at: Stamp::from(now),
            });
        }

        let observed = observed_plate.trim();
        if !rental.plate.trim().eq_ignore_ascii_case(observed) {
            return Ok(Verdict::PlateMismatch {
                registered: rental.plate.clone(),
                observed: observed.to_uppercase(),
            });
        }

        Ok(Verdict::Compliant)
    }

    /// Classify with the current time and fine any non-compliant verdict
    pub fn inspect(
        &self,
        space_id: &str,
        observed_plate: &str,
    ) -> ParkingResult<InspectionOutcome> {
        let verdict = self.classify(space_id, observed_plate, self.clock.now())?;
        info!(
            "Inspection of space {} for plate {}: {:?}",
            normalize_space_id(space_id),
            observed_plate,
            verdict
        );

        let fine = if verdict.requires_fine() {
            Some(
                self.fines
                    .issue(space_id, observed_plate, &verdict.detail())?,
            )
        } else {
            None
        };

        Ok(InspectionOutcome { verdict, fine })
    }
}
