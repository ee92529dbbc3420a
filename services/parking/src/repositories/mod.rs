//! Repositories over the flat-file store
//!
//! Each repository owns one JSON document and reads or rewrites it whole.

pub mod fine;
pub mod rental;
pub mod settings;
pub mod space;
pub mod user;

pub use fine::FineRepository;
pub use rental::RentalRepository;
pub use settings::SettingsRepository;
pub use space::SpaceRepository;
pub use user::UserRepository;
