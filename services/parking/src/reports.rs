//! Administrator reports over rentals, fines and spaces

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

use crate::error::{ParkingError, ParkingResult};
use crate::models::stamp::DATE_FORMAT;
use crate::models::rental::round2;
use crate::models::{Fine, Rental, Space};
use crate::repositories::{FineRepository, RentalRepository, SpaceRepository};

/// Parse a `dd/mm/yyyy` report bound
pub fn parse_report_date(value: &str) -> ParkingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ParkingError::Validation(format!("Invalid date {value:?}, expected dd/mm/yyyy"))
    })
}

fn ensure_ordered(from: NaiveDate, to: NaiveDate) -> ParkingResult<()> {
    if from > to {
        return Err(ParkingError::Validation(format!(
            "Report start {} is after its end {}",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT)
        )));
    }

    Ok(())
}

/// Rental income grouped by the day the rental started
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeReport {
    pub per_day: BTreeMap<NaiveDate, f64>,
    pub total: f64,
}

/// Which spaces a listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpaceFilter {
    #[default]
    All,
    /// Spaces whose rental has not ended yet
    Occupied,
    Vacant,
}

impl FromStr for SpaceFilter {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "occupied" => Ok(Self::Occupied),
            "vacant" => Ok(Self::Vacant),
            other => Err(ParkingError::Validation(format!(
                "Unknown space filter {other:?}"
            ))),
        }
    }
}

/// One row of a space listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceLine {
    pub id: String,
    pub enabled: bool,
    pub occupied: bool,
    pub user: Option<String>,
    pub plate: Option<String>,
    pub end: Option<String>,
}

impl SpaceLine {
    fn new(id: String, space: &Space, occupied: bool) -> Self {
        let occupant = space.occupant.as_ref().filter(|_| occupied);
        Self {
            id,
            enabled: space.enabled,
            occupied,
            user: occupant.map(|o| o.user.clone()),
            plate: occupant.map(|o| o.plate.clone()),
            end: occupant.map(|o| o.end.to_string()),
        }
    }
}

/// Read-only reports
#[derive(Debug, Clone)]
pub struct Reports {
    spaces: SpaceRepository,
    rentals: RentalRepository,
    fines: FineRepository,
}

impl Reports {
    pub fn new(spaces: SpaceRepository, rentals: RentalRepository, fines: FineRepository) -> Self {
        Self {
            spaces,
            rentals,
            fines,
        }
    }

    /// Income of rentals started between `from` and `to`, both inclusive
    pub fn income_by_day(&self, from: NaiveDate, to: NaiveDate) -> ParkingResult<IncomeReport> {
        ensure_ordered(from, to)?;

        let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for rental in self.rentals.load()? {
            let Ok(start) = rental.start.to_datetime() else {
                warn!(
                    "Rental {} has an unreadable start time {:?}",
                    rental.id,
                    rental.start.as_str()
                );
                continue;
            };

            let day = start.date();
            if day >= from && day <= to {
                *per_day.entry(day).or_default() += rental.total_cost;
            }
        }

        for amount in per_day.values_mut() {
            *amount = round2(*amount);
        }
        let total = round2(per_day.values().sum());

        Ok(IncomeReport { per_day, total })
    }

    /// Fines issued between `from` and `to`, both inclusive
    pub fn fines_between(&self, from: NaiveDate, to: NaiveDate) -> ParkingResult<Vec<Fine>> {
        ensure_ordered(from, to)?;

        Ok(self
            .fines
            .load()?
            .into_iter()
            .filter(|fine| match fine.timestamp.to_datetime_lenient() {
                Ok(at) => at.date() >= from && at.date() <= to,
                Err(_) => {
                    warn!("Fine with unreadable date {:?}", fine.timestamp.as_str());
                    false
                }
            })
            .collect())
    }

    /// Every space matching `filter`. A space counts as occupied while its
    /// end time is still ahead of `now`.
    pub fn spaces_listing(
        &self,
        filter: SpaceFilter,
        now: NaiveDateTime,
    ) -> ParkingResult<Vec<SpaceLine>> {
        Ok(self
            .spaces
            .load()?
            .into_iter()
            .map(|(id, space)| {
                let occupied = space
                    .occupant
                    .as_ref()
                    .and_then(|o| o.end.to_datetime().ok())
                    .is_some_and(|end| end > now);
                SpaceLine::new(id, &space, occupied)
            })
            .filter(|line| match filter {
                SpaceFilter::All => true,
                SpaceFilter::Occupied => line.occupied,
                SpaceFilter::Vacant => !line.occupied,
            })
            .collect())
    }

    /// Every rental of `user`, newest first
    pub fn user_history(&self, user: &str) -> ParkingResult<Vec<Rental>> {
        let mut history: Vec<Rental> = self
            .rentals
            .load()?
            .into_iter()
            .filter(|r| r.user == user)
            .collect();

        history.sort_by_key(|r| std::cmp::Reverse(r.start.to_datetime().ok()));
        Ok(history)
    }
}
