//! API models for request and response payloads

use parking::fines::FineIssued;
use parking::inspection::{InspectionOutcome, Verdict};
use parking::models::{Fine, Rental, Role, Settings, Space, SpaceStatus, User, Vehicle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for a new rental
#[derive(Deserialize)]
pub struct RentRequest {
    /// Renter's email
    pub user: String,
    pub space_id: String,
    pub minutes: u32,
    pub plate: String,
}

/// Response for a new rental
#[derive(Serialize)]
pub struct RentResponse {
    pub rental_id: Uuid,
}

/// Request to add time to a rental
#[derive(Deserialize)]
pub struct ExtendRequest {
    pub minutes: u32,
}

/// Request for an inspector check
#[derive(Deserialize)]
pub struct InspectionRequest {
    pub space_id: String,
    pub plate: String,
}

/// Request to create or toggle a space
#[derive(Deserialize)]
pub struct SpaceRequest {
    pub enabled: bool,
}

/// Request carrying only an email address
#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Request to set a temporary password
#[derive(Deserialize)]
pub struct TemporaryPasswordRequest {
    pub email: String,
    pub password: String,
}

/// Request to change a password
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Inclusive `dd/mm/yyyy` date range
#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub from: String,
    pub to: String,
}

/// Space listing filter: `all`, `occupied` or `vacant`
#[derive(Deserialize)]
pub struct SpacesQuery {
    #[serde(default)]
    pub filter: String,
}

/// Response for user operations. The password hash and card are never
/// returned.
#[derive(Serialize)]
pub struct UserResponse {
    pub identification: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub vehicles: Vec<VehiclePayload>,
    pub registered_at: String,
    pub role: Role,
    pub temporary_password: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            identification: user.identification,
            name: user.name,
            surname: user.surname,
            email: user.email,
            phone: user.phone,
            vehicles: user.vehicles.into_iter().map(Into::into).collect(),
            registered_at: user.registered_at.to_string(),
            role: user.role,
            temporary_password: user.temporary_password,
        }
    }
}

/// A vehicle as exchanged with users
#[derive(Serialize, Deserialize)]
pub struct VehiclePayload {
    pub plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
}

impl From<Vehicle> for VehiclePayload {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            color: vehicle.color,
        }
    }
}

impl From<VehiclePayload> for Vehicle {
    fn from(payload: VehiclePayload) -> Self {
        Self {
            plate: payload.plate,
            make: payload.make,
            model: payload.model,
            color: payload.color,
        }
    }
}

/// Response for rental operations
#[derive(Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub space_id: String,
    pub user: String,
    pub plate: String,
    pub start: String,
    pub end: String,
    pub active: bool,
    pub total_cost: f64,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            active: rental.is_active(),
            id: rental.id,
            space_id: rental.space_id,
            user: rental.user,
            plate: rental.plate,
            start: rental.start.to_string(),
            end: rental.end.to_string(),
            total_cost: rental.total_cost,
        }
    }
}

/// Response for fines
#[derive(Serialize)]
pub struct FineResponse {
    pub timestamp: String,
    pub space_id: String,
    pub plate: String,
    pub detail: String,
    pub amount: f64,
    pub contact: Option<String>,
}

impl From<Fine> for FineResponse {
    fn from(fine: Fine) -> Self {
        Self {
            timestamp: fine.timestamp.to_string(),
            space_id: fine.space_id,
            plate: fine.plate,
            detail: fine.detail,
            amount: fine.amount,
            contact: fine.contact,
        }
    }
}

/// A fine that was just issued
#[derive(Serialize)]
pub struct FineIssuedResponse {
    #[serde(flatten)]
    pub fine: FineResponse,
    pub notified: bool,
}

impl From<FineIssued> for FineIssuedResponse {
    fn from(issued: FineIssued) -> Self {
        Self {
            fine: issued.fine.into(),
            notified: issued.notified,
        }
    }
}

/// Response for an inspector check
#[derive(Serialize)]
pub struct InspectionResponse {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub fine: Option<FineIssuedResponse>,
}

impl From<InspectionOutcome> for InspectionResponse {
    fn from(outcome: InspectionOutcome) -> Self {
        Self {
            verdict: outcome.verdict,
            fine: outcome.fine.map(Into::into),
        }
    }
}

/// What a user sees when opening their menu
#[derive(Serialize)]
pub struct MenuResponse {
    pub active_rental: Option<RentalResponse>,
    pub available_spaces: Vec<String>,
    /// Fines issued by the sweep that ran before building the menu
    pub fines_issued: Vec<FineIssuedResponse>,
}

/// A space as shown to administrators
#[derive(Serialize)]
pub struct SpaceResponse {
    pub id: String,
    pub enabled: bool,
    pub status: SpaceStatus,
    pub user: Option<String>,
    pub plate: Option<String>,
    pub end: Option<String>,
}

impl SpaceResponse {
    pub fn new(id: String, space: Space) -> Self {
        let status = space.status();
        let (user, plate, end) = match space.occupant {
            Some(occupant) => (
                Some(occupant.user),
                Some(occupant.plate),
                Some(occupant.end.to_string()),
            ),
            None => (None, None, None),
        };

        Self {
            id,
            enabled: space.enabled,
            status,
            user,
            plate,
            end,
        }
    }
}

/// Settings as exchanged with administrators
#[derive(Serialize, Deserialize)]
pub struct SettingsPayload {
    pub hourly_rate: f64,
    pub minimum_minutes: u32,
    #[serde(default)]
    pub fine_amount: f64,
    #[serde(default = "default_opening")]
    pub opening: String,
    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_opening() -> String {
    "00:00".to_string()
}

fn default_closing() -> String {
    "23:59".to_string()
}

impl From<Settings> for SettingsPayload {
    fn from(settings: Settings) -> Self {
        Self {
            hourly_rate: settings.hourly_rate,
            minimum_minutes: settings.minimum_minutes,
            fine_amount: settings.fine_amount,
            opening: settings.opening,
            closing: settings.closing,
        }
    }
}

impl From<SettingsPayload> for Settings {
    fn from(payload: SettingsPayload) -> Self {
        Self {
            hourly_rate: payload.hourly_rate,
            minimum_minutes: payload.minimum_minutes,
            fine_amount: payload.fine_amount,
            opening: payload.opening,
            closing: payload.closing,
        }
    }
}
