//! Parking domain models

pub mod fine;
pub mod rental;
pub mod role;
pub mod settings;
pub mod space;
pub mod stamp;
pub mod user;

// Re-export for convenience
pub use fine::Fine;
pub use rental::{Rental, RentalStatus, rental_cost};
pub use role::Role;
pub use settings::Settings;
pub use space::{Occupant, Space, SpaceStatus, Spaces, normalize_space_id};
pub use stamp::Stamp;
pub use user::{LoginCredentials, NewUser, PaymentCard, UpdateUser, User, Vehicle};
